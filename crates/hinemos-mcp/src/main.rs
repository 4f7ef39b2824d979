//! hinemos-mcp - exposes the Hinemos REST API to MCP hosts over stdio.
//!
//! stdout carries the protocol, so all logging goes to stderr.

mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hinemos_core::config::DEFAULT_TIMEOUT_SECS;
use hinemos_core::{Config, HinemosClient, ToolRegistry};

use server::McpServer;

#[derive(Parser, Debug)]
#[command(name = "hinemos-mcp", version, about = "MCP server for the Hinemos REST API")]
struct Cli {
    /// Hinemos manager URL, e.g. http://hinemos.example.com:8080
    #[arg(long, env = "HINEMOS_ENDPOINT")]
    endpoint: String,

    /// Login user ID
    #[arg(long, env = "HINEMOS_USERNAME")]
    username: String,

    #[arg(long, env = "HINEMOS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "HINEMOS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

/// Initialize the tracing subscriber. The returned guard flushes buffered
/// log lines on drop and must live until exit.
fn init_tracing() -> WorkerGuard {
    // RUST_LOG controls the level (e.g. RUST_LOG=hinemos_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();

    let config = Config::new(&cli.endpoint, &cli.username, &cli.password)
        .and_then(|c| c.with_timeout(Duration::from_secs(cli.timeout_secs)))
        .context("Invalid Hinemos configuration")?;
    let client = HinemosClient::new(&config).context("Failed to create HTTP client")?;
    let registry = ToolRegistry::hinemos().context("Tool registry is inconsistent")?;

    info!(
        endpoint = config.base_url(),
        tools = registry.len(),
        "hinemos-mcp starting"
    );

    let server = Arc::new(McpServer::new(registry, client.clone()));
    let result = server
        .serve(tokio::io::stdin(), tokio::io::stdout())
        .await
        .context("MCP transport failed");

    client.close();
    info!("hinemos-mcp shutting down");
    result
}
