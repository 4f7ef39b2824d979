//! Repository tools.

use futures::future::BoxFuture;

use super::schema::Schema;
use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::HinemosClient;

const OWNER_ROLE: &str = "Owner role ID filter (optional)";

pub struct RepositoryTools;

impl ToolGroup for RepositoryTools {
    fn name(&self) -> &'static str {
        "repository"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(
                "get_facility_tree",
                "Get the facility tree from the Hinemos repository",
                Schema::object()
                    .string("owner_role_id", OWNER_ROLE)
                    .integer("size", "Maximum number of entries (optional)")
                    .build(),
            ),
            ToolDescriptor::new(
                "get_exec_target_facility_tree",
                "Get the facility tree below a given scope",
                Schema::object()
                    .string("target_facility_id", "Facility ID of the scope to start from")
                    .string("owner_role_id", OWNER_ROLE)
                    .required(&["target_facility_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_node_facility_tree",
                "Get the facility tree including node information",
                Schema::object().string("owner_role_id", OWNER_ROLE).build(),
            ),
            ToolDescriptor::new(
                "get_node_list",
                "List nodes registered in the repository",
                Schema::object()
                    .string("parent_facility_id", "Parent scope facility ID (optional)")
                    .integer("size", "Maximum number of entries (optional)")
                    .string("level", "Level, e.g. SCOPE or NODE (optional)")
                    .build(),
            ),
            ToolDescriptor::new(
                "get_node",
                "Get node information (without configuration details)",
                Schema::object()
                    .string("facility_id", "Node facility ID")
                    .required(&["facility_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_node_full",
                "Get node information including configuration details (CPU, disks, packages, ...)",
                Schema::object()
                    .string("facility_id", "Node facility ID")
                    .required(&["facility_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "add_node",
                "Register a node. node_info is a Hinemos node object, e.g. \
                 {\"facilityId\": \"WEB2\", \"facilityName\": \"Web server 2\", \
                 \"ipAddressVersion\": \"IPV4\", \"ipAddressV4\": \"172.31.24.200\", \
                 \"nodeName\": \"web2\", \"platformFamily\": \"LINUX\", \
                 \"ownerRoleId\": \"ALL_USERS\", \"valid\": true}",
                Schema::object()
                    .json_object("node_info", "Node definition")
                    .required(&["node_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "modify_node",
                "Update a node",
                Schema::object()
                    .string("facility_id", "Node facility ID")
                    .json_object("node_info", "Node fields to update")
                    .required(&["facility_id", "node_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_node",
                "Delete nodes",
                Schema::object()
                    .string_array("facility_ids", "Facility IDs to delete, e.g. [\"NODE001\", \"NODE002\"]")
                    .required(&["facility_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "search_node",
                "Search nodes, e.g. {\"facilityId\": \"NODE*\", \"ipAddressV4\": \"192.168.1.*\"}",
                Schema::object()
                    .json_object("search_params", "Search conditions")
                    .required(&["search_params"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_facility_list",
                "List scopes and nodes directly below a scope",
                Schema::object()
                    .string("parent_facility_id", "Parent scope facility ID (optional)")
                    .build(),
            ),
            ToolDescriptor::new(
                "get_scope",
                "Get scope information",
                Schema::object()
                    .string("facility_id", "Scope facility ID")
                    .required(&["facility_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_scope_default",
                "Get default values for a new scope",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "add_scope",
                "Add a scope, e.g. {\"parentFacilityId\": \"ROOT\", \"scopeInfo\": \
                 {\"facilityId\": \"SCOPE001\", \"facilityName\": \"Dev\", \
                 \"ownerRoleId\": \"ADMINISTRATORS\"}}",
                Schema::object()
                    .json_object("scope_info", "Scope definition with parent facility ID")
                    .required(&["scope_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "modify_scope",
                "Update a scope",
                Schema::object()
                    .string("facility_id", "Scope facility ID")
                    .json_object("scope_info", "Scope fields to update")
                    .required(&["facility_id", "scope_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_scope",
                "Delete scopes",
                Schema::object()
                    .string_array("facility_ids", "Scope facility IDs to delete")
                    .required(&["facility_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_platform_list",
                "List platforms that can be set on a node",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_subplatform_list",
                "List sub-platforms that can be set on a node",
                Schema::object().build(),
            ),
        ]
    }

    fn call<'a>(
        &'a self,
        tool: &'a str,
        client: &'a HinemosClient,
        args: ToolArgs,
    ) -> BoxFuture<'a, Result<ToolOutput, ToolError>> {
        Box::pin(call(tool, client, args))
    }
}

async fn call(tool: &str, client: &HinemosClient, args: ToolArgs) -> Result<ToolOutput, ToolError> {
    let api = client.repository();
    let value = match tool {
        "get_facility_tree" => {
            api.get_facility_tree(args.optional_str("owner_role_id")?, args.optional_u64("size")?)
                .await?
        }
        "get_exec_target_facility_tree" => {
            api.get_exec_target_facility_tree(
                args.required_str("target_facility_id")?,
                args.optional_str("owner_role_id")?,
            )
            .await?
        }
        "get_node_facility_tree" => {
            api.get_node_facility_tree(args.optional_str("owner_role_id")?)
                .await?
        }
        "get_node_list" => {
            api.get_node_list(
                args.optional_str("parent_facility_id")?,
                args.optional_u64("size")?,
                args.optional_str("level")?,
            )
            .await?
        }
        "get_node" => api.get_node(args.required_str("facility_id")?).await?,
        "get_node_full" => api.get_node_full(args.required_str("facility_id")?).await?,
        "add_node" => api.add_node(args.required_object("node_info")?).await?,
        "modify_node" => {
            api.modify_node(
                args.required_str("facility_id")?,
                args.required_object("node_info")?,
            )
            .await?
        }
        "delete_node" => api.delete_node(&args.id_list("facility_ids")?).await?,
        "search_node" => api.search_node(args.required_object("search_params")?).await?,
        "get_facility_list" => {
            api.get_facility_list(args.optional_str("parent_facility_id")?)
                .await?
        }
        "get_scope" => api.get_scope(args.required_str("facility_id")?).await?,
        "get_scope_default" => api.get_scope_default().await?,
        "add_scope" => api.add_scope(args.required_object("scope_info")?).await?,
        "modify_scope" => {
            api.modify_scope(
                args.required_str("facility_id")?,
                args.required_object("scope_info")?,
            )
            .await?
        }
        "delete_scope" => api.delete_scope(&args.id_list("facility_ids")?).await?,
        "get_platform_list" => api.get_platform_list().await?,
        "get_subplatform_list" => api.get_subplatform_list().await?,
        other => return Err(ToolError::NotHandled(other.to_string())),
    };
    Ok(ToolOutput::Json(value))
}
