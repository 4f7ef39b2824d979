//! Name-based tool dispatch.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::HinemosClient;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{name}' is exported by both '{first}' and '{second}'")]
    DuplicateTool {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Outcome of a dispatch. An unknown name is a normal outcome, not an error.
#[derive(Debug)]
pub enum DispatchOutcome {
    Completed(ToolOutput),
    UnknownTool,
}

#[derive(Default)]
pub struct ToolRegistryBuilder {
    groups: Vec<Box<dyn ToolGroup>>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, group: impl ToolGroup + 'static) -> Self {
        self.groups.push(Box::new(group));
        self
    }

    /// Precompute the name index. Fails on the first name exported twice.
    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut descriptors = Vec::new();

        for (group_idx, group) in self.groups.iter().enumerate() {
            for descriptor in group.tools() {
                if let Some(&existing) = index.get(&descriptor.name) {
                    return Err(RegistryError::DuplicateTool {
                        name: descriptor.name,
                        first: self.groups[existing].name(),
                        second: group.name(),
                    });
                }
                index.insert(descriptor.name.clone(), group_idx);
                descriptors.push(descriptor);
            }
        }

        debug!(tools = descriptors.len(), groups = self.groups.len(), "Tool registry built");
        Ok(ToolRegistry {
            groups: self.groups,
            descriptors,
            index,
        })
    }
}

/// Immutable name → group mapping shared by all concurrent calls.
pub struct ToolRegistry {
    groups: Vec<Box<dyn ToolGroup>>,
    descriptors: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Registry with every Hinemos tool group, in the order
    /// repository, calendar, monitor, monitor result, job, collect.
    pub fn hinemos() -> Result<Self, RegistryError> {
        Self::builder()
            .register(super::repository::RepositoryTools)
            .register(super::calendar::CalendarTools)
            .register(super::monitor::MonitorTools)
            .register(super::monitor_result::MonitorResultTools)
            .register(super::job::JobTools)
            .register(super::collect::CollectTools)
            .build()
    }

    /// All descriptors in registration order.
    pub fn list_operations(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Route a call to the group owning `name`. Arguments are handed over
    /// unmodified; errors from the operation propagate unchanged.
    pub async fn dispatch(
        &self,
        name: &str,
        client: &HinemosClient,
        arguments: Map<String, Value>,
    ) -> Result<DispatchOutcome, ToolError> {
        let Some(&group_idx) = self.index.get(name) else {
            debug!(tool = name, "Unknown tool");
            return Ok(DispatchOutcome::UnknownTool);
        };
        let group = &self.groups[group_idx];
        debug!(tool = name, group = group.name(), "Dispatching tool call");

        let output = group.call(name, client, ToolArgs::new(arguments)).await?;
        Ok(DispatchOutcome::Completed(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use futures::future::BoxFuture;
    use serde_json::json;

    /// Echoes its arguments back, tagged with the tool name.
    struct EchoTools {
        group: &'static str,
        names: Vec<&'static str>,
    }

    impl ToolGroup for EchoTools {
        fn name(&self) -> &'static str {
            self.group
        }

        fn tools(&self) -> Vec<ToolDescriptor> {
            self.names
                .iter()
                .map(|n| ToolDescriptor::new(*n, "echo", json!({"type": "object"})))
                .collect()
        }

        fn call<'a>(
            &'a self,
            tool: &'a str,
            _client: &'a HinemosClient,
            args: ToolArgs,
        ) -> BoxFuture<'a, Result<ToolOutput, ToolError>> {
            Box::pin(async move {
                if tool == "fail" {
                    return Err(ToolError::MissingArgument("x".into()));
                }
                Ok(ToolOutput::Json(json!({
                    "group": self.group,
                    "tool": tool,
                    "args": Value::Object(args.into_inner()),
                })))
            })
        }
    }

    fn client() -> HinemosClient {
        let config = Config::new("http://127.0.0.1:9", "hinemos", "hinemos").unwrap();
        HinemosClient::new(&config).unwrap()
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::builder()
            .register(EchoTools { group: "a", names: vec!["one", "two"] })
            .register(EchoTools { group: "b", names: vec!["three", "fail"] })
            .build()
            .unwrap()
    }

    #[test]
    fn test_list_operations_in_registration_order() {
        let registry = registry();
        let names: Vec<_> = registry.list_operations().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three", "fail"]);
        assert_eq!(registry.len(), 4);
        assert!(registry.contains("three"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ToolRegistry::builder()
            .register(EchoTools { group: "a", names: vec!["one"] })
            .register(EchoTools { group: "b", names: vec!["one"] })
            .build();
        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateTool {
                name: "one".into(),
                first: "a",
                second: "b"
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_an_error() {
        let outcome = registry()
            .dispatch("nope", &client(), Map::new())
            .await
            .unwrap();
        assert!(matches!(outcome, DispatchOutcome::UnknownTool));
    }

    #[tokio::test]
    async fn test_dispatch_routes_with_unmodified_arguments() {
        let args = json!({"facility_id": "NODE1", "size": 5, "nested": {"k": [1, 2]}});
        let Value::Object(map) = args.clone() else { unreachable!() };

        let outcome = registry().dispatch("three", &client(), map).await.unwrap();
        match outcome {
            DispatchOutcome::Completed(ToolOutput::Json(v)) => {
                assert_eq!(v["group"], "b");
                assert_eq!(v["tool"], "three");
                assert_eq!(v["args"], args);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_group_errors_propagate() {
        let err = registry()
            .dispatch("fail", &client(), Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(_)));
    }

    #[test]
    fn test_hinemos_registry_has_no_duplicates() {
        let registry = ToolRegistry::hinemos().expect("tool names must be unique");
        assert!(registry.contains("get_node_list"));
        assert!(registry.contains("add_calendar"));
        assert!(registry.contains("add_ping_monitor"));
        assert!(registry.contains("event_search"));
        assert!(registry.contains("add_joblinkrcv_job"));
        assert!(registry.contains("add_joblinkrcv"));
        assert!(registry.contains("get_collect_data"));
        assert_eq!(registry.list_operations()[0].name, "get_facility_tree");
    }

    #[tokio::test]
    async fn test_every_hinemos_tool_is_handled() {
        let registry = ToolRegistry::hinemos().unwrap();
        let client = client();
        for descriptor in registry.list_operations() {
            // Nothing listens on the target, so calls end in argument or
            // network errors; a group that lacks the name reports NotHandled.
            let result = registry.dispatch(&descriptor.name, &client, Map::new()).await;
            assert!(
                !matches!(result, Err(ToolError::NotHandled(_))),
                "{} is advertised but not handled",
                descriptor.name
            );
        }
    }
}
