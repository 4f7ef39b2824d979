//! MCP host over stdio: newline-delimited JSON-RPC 2.0.
//!
//! Each request runs on its own task so slow Hinemos calls don't block
//! the reader; responses are funneled through one writer task that owns
//! the output stream.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use hinemos_core::{DispatchOutcome, HinemosClient, ToolOutput, ToolRegistry};

// ============================================================================
// Constants
// ============================================================================

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
pub const MCP_SERVER_NAME: &str = "hinemos-mcp";

/// Responses buffered between request tasks and the writer.
const RESPONSE_CHANNEL_CAPACITY: usize = 64;

// ============================================================================
// JSON-RPC errors
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
        }
    }

    fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
        }
    }
}

fn success_response(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": error.code, "message": error.message }
    })
}

// ============================================================================
// Tool results
// ============================================================================

fn text_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

/// Render a tool output as MCP content. Images go out inline, other
/// binaries as an embedded resource blob.
fn output_result(output: ToolOutput) -> Result<Value, RpcError> {
    match output {
        ToolOutput::Json(value) => {
            let text = serde_json::to_string_pretty(&value)
                .map_err(|e| RpcError::internal(format!("Failed to encode result: {}", e)))?;
            Ok(text_result(text, false))
        }
        ToolOutput::Binary {
            bytes,
            mime_type,
            file_name,
        } => {
            let data = BASE64.encode(&bytes);
            let content = if mime_type.starts_with("image/") {
                json!({ "type": "image", "data": data, "mimeType": mime_type })
            } else {
                let uri = format!(
                    "hinemos://download/{}",
                    file_name.as_deref().unwrap_or("download")
                );
                json!({
                    "type": "resource",
                    "resource": { "uri": uri, "mimeType": mime_type, "blob": data }
                })
            };
            Ok(json!({ "content": [content], "isError": false }))
        }
    }
}

// ============================================================================
// Server
// ============================================================================

pub struct McpServer {
    registry: ToolRegistry,
    client: HinemosClient,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, client: HinemosClient) -> Self {
        Self { registry, client }
    }

    /// Serve until the reader reaches EOF, then wait for in-flight calls
    /// to flush their responses.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Value>(RESPONSE_CHANNEL_CAPACITY);
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let incoming: Value = match serde_json::from_str(line) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "Unparseable message");
                    let response = error_response(Value::Null, RpcError::parse_error(e.to_string()));
                    if tx.send(response).await.is_err() {
                        break;
                    }
                    continue;
                }
            };

            let server = Arc::clone(&self);
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(incoming).await {
                    // Writer gone means the output side closed; nothing left to do
                    let _ = tx.send(response).await;
                }
            });
        }

        debug!("Input closed, draining responses");
        drop(tx);
        match writer_task.await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::Other, e)),
        }
    }

    /// Handle one decoded message. Notifications and client responses
    /// yield no reply.
    pub async fn handle_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        let id = obj.get("id").cloned();
        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Some(error_response(
                id.unwrap_or(Value::Null),
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            return None;
        };
        let params = obj.get("params").cloned().unwrap_or(Value::Null);

        let Some(id) = id else {
            debug!(method, "Notification");
            return None;
        };

        Some(match self.handle_request(method, params).await {
            Ok(result) => success_response(id, result),
            Err(err) => error_response(id, err),
        })
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": MCP_SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn tools_list_payload(&self) -> Value {
        json!({ "tools": self.registry.list_operations() })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let arguments = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ))
            }
        };

        info!(tool = name, "Tool call");
        match self.registry.dispatch(name, &self.client, arguments).await {
            Ok(DispatchOutcome::Completed(output)) => output_result(output),
            Ok(DispatchOutcome::UnknownTool) => {
                warn!(tool = name, "Unknown tool requested");
                Ok(text_result(format!("Tool '{}' does not exist", name), true))
            }
            Err(e) => {
                error!(tool = name, error = %e, "Tool call failed");
                Ok(text_result(format!("Error calling tool '{}': {}", name, e), true))
            }
        }
    }
}

async fn write_responses<W>(mut rx: mpsc::Receiver<Value>, mut writer: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hinemos_core::Config;
    use tokio::io::{duplex, AsyncReadExt};

    fn server() -> McpServer {
        // Port 9 (discard) is never listened on in test environments
        let config = Config::new("http://127.0.0.1:9", "hinemos", "hinemos").unwrap();
        let client = HinemosClient::new(&config).unwrap();
        McpServer::new(ToolRegistry::hinemos().unwrap(), client)
    }

    fn text_of(result: &Value) -> &str {
        result["content"][0]["text"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
            .await
            .unwrap();
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], MCP_SERVER_NAME);
    }

    #[tokio::test]
    async fn test_tools_list_uses_registry_order() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}))
            .await
            .unwrap();
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools[0]["name"], "get_facility_tree");
        assert!(tools[0]["inputSchema"]["properties"].is_object());
        assert_eq!(tools.len(), ToolRegistry::hinemos().unwrap().len());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                "params": {"name": "no_such_tool", "arguments": {}}
            }))
            .await
            .unwrap();
        let result = &response["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(text_of(result), "Tool 'no_such_tool' does not exist");
    }

    #[tokio::test]
    async fn test_missing_argument_is_error_result() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {"name": "get_node"}
            }))
            .await
            .unwrap();
        let result = &response["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(
            text_of(result),
            "Error calling tool 'get_node': Missing required argument 'facility_id'"
        );
    }

    #[tokio::test]
    async fn test_envelope_errors() {
        let server = server();

        let response = server.handle_message(json!([1, 2])).await.unwrap();
        assert_eq!(response["error"]["code"], -32600);

        let response = server
            .handle_message(json!({"jsonrpc": "1.0", "id": 4, "method": "ping"}))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(response["id"], 4);

        let response = server
            .handle_message(json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"}))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32601);

        let response = server
            .handle_message(json!({
                "jsonrpc": "2.0", "id": 6, "method": "tools/call",
                "params": {"arguments": {}}
            }))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let response = server()
            .handle_message(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(response.is_none());
    }

    #[test]
    fn test_binary_outputs() {
        let image = output_result(ToolOutput::Binary {
            bytes: vec![0x89, b'P', b'N', b'G'],
            mime_type: "image/png".to_string(),
            file_name: None,
        })
        .unwrap();
        assert_eq!(image["content"][0]["type"], "image");
        assert_eq!(image["content"][0]["data"], BASE64.encode([0x89, b'P', b'N', b'G']));

        let csv = output_result(ToolOutput::Binary {
            bytes: b"a,b\n".to_vec(),
            mime_type: "text/csv".to_string(),
            file_name: Some("events.csv".to_string()),
        })
        .unwrap();
        assert_eq!(csv["content"][0]["type"], "resource");
        assert_eq!(csv["content"][0]["resource"]["uri"], "hinemos://download/events.csv");
        assert_eq!(csv["content"][0]["resource"]["mimeType"], "text/csv");
    }

    #[tokio::test]
    async fn test_serve_over_stream() {
        let (mut client_side, server_in) = duplex(64 * 1024);
        let (server_out, mut client_out) = duplex(64 * 1024);

        let server = Arc::new(server());
        let handle = tokio::spawn(server.serve(server_in, server_out));

        client_side
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\nnot json\n")
            .await
            .unwrap();
        drop(client_side);

        handle.await.unwrap().unwrap();

        let mut output = String::new();
        client_out.read_to_string(&mut output).await.unwrap();
        let responses: Vec<Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert!(responses
            .iter()
            .any(|r| r["id"] == 1 && r["result"] == json!({})));
        assert!(responses.iter().any(|r| r["error"]["code"] == -32700));
    }
}
