//! Monitor setting tools.
//!
//! The per-type add/modify/list tools are generated from `MonitorKind`,
//! three per monitor type.

use futures::future::BoxFuture;

use super::schema::Schema;
use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::{HinemosClient, MonitorKind};

const MONITOR_INFO_EXAMPLE: &str = "{\"monitorId\": \"PING_001\", \"application\": \"web\", \
     \"facilityId\": \"WEB_SCOPE\", \"runInterval\": \"MIN_05\", \"monitorFlg\": true, \
     \"collectorFlg\": false, \"ownerRoleId\": \"ALL_USERS\", \"calendarId\": null, \
     \"notifyRelationList\": []}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindAction {
    Add,
    Modify,
    List,
}

/// Split `add_<slug>_monitor`, `modify_<slug>_monitor` and `get_<slug>_list`.
fn parse_kind_tool(tool: &str) -> Option<(KindAction, MonitorKind)> {
    let (action, slug) = if let Some(rest) = tool.strip_prefix("add_") {
        (KindAction::Add, rest.strip_suffix("_monitor")?)
    } else if let Some(rest) = tool.strip_prefix("modify_") {
        (KindAction::Modify, rest.strip_suffix("_monitor")?)
    } else {
        (KindAction::List, tool.strip_prefix("get_")?.strip_suffix("_list")?)
    };
    MonitorKind::from_slug(slug).map(|kind| (action, kind))
}

fn kind_tools(kind: MonitorKind) -> [ToolDescriptor; 3] {
    let label = kind.label();
    [
        ToolDescriptor::new(
            format!("add_{}_monitor", kind.slug()),
            format!("Add a {} monitor. Example: {}", label, MONITOR_INFO_EXAMPLE),
            Schema::object()
                .json_object("monitor_info", "Monitor setting")
                .required(&["monitor_info"])
                .build(),
        ),
        ToolDescriptor::new(
            format!("modify_{}_monitor", kind.slug()),
            format!("Update a {} monitor", label),
            Schema::object()
                .string("monitor_id", "Monitor ID")
                .json_object("monitor_info", "Monitor fields to update")
                .required(&["monitor_id", "monitor_info"])
                .build(),
        ),
        ToolDescriptor::new(
            format!("get_{}_list", kind.slug()),
            format!("List {} monitor settings", label),
            Schema::object()
                .string("monitor_id", "Monitor ID filter (optional)")
                .build(),
        ),
    ]
}

pub struct MonitorTools;

impl ToolGroup for MonitorTools {
    fn name(&self) -> &'static str {
        "monitor"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        let monitor_id = || {
            Schema::object()
                .string("monitor_id", "Monitor ID")
                .required(&["monitor_id"])
                .build()
        };
        let owner_role = || {
            Schema::object()
                .string("owner_role_id", "Owner role ID filter (optional)")
                .build()
        };

        let mut tools = vec![
            ToolDescriptor::new("get_monitor_list", "List all monitor settings", Schema::object().build()),
            ToolDescriptor::new(
                "get_monitor_list_by_condition",
                "Search monitor settings, e.g. {\"monitorId\": \"PING*\", \"monitorTypeId\": \
                 \"MON_PNG_N\", \"facilityId\": \"WEB_SCOPE\"}",
                Schema::object()
                    .json_object("monitor_filter_info", "Search conditions")
                    .required(&["monitor_filter_info"])
                    .build(),
            ),
            ToolDescriptor::new("get_monitor", "Get a monitor setting", monitor_id()),
            ToolDescriptor::new(
                "delete_monitor",
                "Delete monitor settings",
                Schema::object()
                    .string_array("monitor_ids", "Monitor IDs to delete")
                    .required(&["monitor_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "set_status_monitor",
                "Enable or disable monitoring",
                Schema::object()
                    .string_array("monitor_ids", "Monitor IDs")
                    .boolean("valid_flg", "true to enable, false to disable")
                    .required(&["monitor_ids", "valid_flg"])
                    .build(),
            ),
            ToolDescriptor::new(
                "set_status_collector",
                "Enable or disable data collection",
                Schema::object()
                    .string_array("monitor_ids", "Monitor IDs")
                    .boolean("valid_flg", "true to enable, false to disable")
                    .required(&["monitor_ids", "valid_flg"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_monitor_info_for_graph",
                "Get the monitor setting used to draw collected-data graphs",
                monitor_id(),
            ),
            ToolDescriptor::new(
                "get_monitor_list_without_checkinfo",
                "List monitor settings without type-specific check details",
                owner_role(),
            ),
            ToolDescriptor::new(
                "get_monitor_string_list",
                "List string-type monitor settings",
                Schema::object()
                    .string("facility_id", "Facility ID filter (optional)")
                    .string("owner_role_id", "Owner role ID filter (optional)")
                    .build(),
            ),
            ToolDescriptor::new(
                "get_monitor_list_for_job",
                "List monitor settings usable from monitor jobs",
                owner_role(),
            ),
        ];

        for kind in MonitorKind::ALL {
            tools.extend(kind_tools(kind));
        }

        tools.extend([
            ToolDescriptor::new(
                "get_jmx_url_format_list",
                "List JMX URL formats",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_jmx_master_list",
                "List JMX master entries (requires system administrator)",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "add_jmx_master_list",
                "Add JMX master entries (requires system administrator)",
                Schema::object()
                    .object_array("jmx_master_list", "JMX master entries")
                    .required(&["jmx_master_list"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_jmx_master",
                "Delete JMX master entries (requires system administrator)",
                Schema::object()
                    .string_array("jmx_master_ids", "JMX master IDs")
                    .required(&["jmx_master_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_jmx_master_all",
                "Delete every JMX master entry (requires system administrator)",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_jdbc_driver_list",
                "List JDBC drivers available to SQL monitors",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_binary_preset_list",
                "List binary file monitor presets",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_monitor_string_tag_list",
                "List tags extracted by a string monitor",
                Schema::object()
                    .string("monitor_id", "Monitor ID")
                    .string("owner_role_id", "Owner role ID")
                    .required(&["monitor_id", "owner_role_id"])
                    .build(),
            ),
        ]);
        tools
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
    let api = client.monitor();
    let value = match tool {
        "get_monitor_list" => api.get_monitor_list().await?,
        "get_monitor_list_by_condition" => {
            api.search_monitor_list(args.required_object("monitor_filter_info")?)
                .await?
        }
        "get_monitor" => api.get_monitor(args.required_str("monitor_id")?).await?,
        "delete_monitor" => api.delete_monitor(&args.id_list("monitor_ids")?).await?,
        "set_status_monitor" => {
            api.set_status_monitor(&args.id_list("monitor_ids")?, args.required_bool("valid_flg")?)
                .await?
        }
        "set_status_collector" => {
            api.set_status_collector(&args.id_list("monitor_ids")?, args.required_bool("valid_flg")?)
                .await?
        }
        "get_monitor_info_for_graph" => {
            api.get_monitor_info_for_graph(args.required_str("monitor_id")?)
                .await?
        }
        "get_monitor_list_without_checkinfo" => {
            api.get_monitor_list_without_checkinfo(args.optional_str("owner_role_id")?)
                .await?
        }
        "get_monitor_string_list" => {
            api.get_monitor_string_list(
                args.optional_str("facility_id")?,
                args.optional_str("owner_role_id")?,
            )
            .await?
        }
        "get_monitor_list_for_job" => {
            api.get_monitor_list_for_job(args.optional_str("owner_role_id")?)
                .await?
        }
        "get_jmx_url_format_list" => api.get_jmx_url_format_list().await?,
        "get_jmx_master_list" => api.get_jmx_master_list().await?,
        "add_jmx_master_list" => {
            api.add_jmx_master_list(args.required_array("jmx_master_list")?)
                .await?
        }
        "delete_jmx_master" => api.delete_jmx_master(&args.id_list("jmx_master_ids")?).await?,
        "delete_jmx_master_all" => api.delete_jmx_master_all().await?,
        "get_jdbc_driver_list" => api.get_jdbc_driver_list().await?,
        "get_binary_preset_list" => api.get_binary_preset_list().await?,
        "get_monitor_string_tag_list" => {
            api.get_monitor_string_tag_list(
                args.required_str("monitor_id")?,
                args.optional_str("owner_role_id")?,
            )
            .await?
        }
        other => match parse_kind_tool(other) {
            Some((KindAction::Add, kind)) => {
                api.add_monitor(kind, args.required_object("monitor_info")?)
                    .await?
            }
            Some((KindAction::Modify, kind)) => {
                api.modify_monitor(
                    kind,
                    args.required_str("monitor_id")?,
                    args.required_object("monitor_info")?,
                )
                .await?
            }
            Some((KindAction::List, kind)) => {
                api.get_monitor_list_by_kind(kind, args.optional_str("monitor_id")?)
                    .await?
            }
            None => return Err(ToolError::NotHandled(other.to_string())),
        },
    };
    Ok(ToolOutput::Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_tool() {
        assert_eq!(
            parse_kind_tool("add_http_scenario_monitor"),
            Some((KindAction::Add, MonitorKind::HttpScenario))
        );
        assert_eq!(
            parse_kind_tool("modify_sql_numeric_monitor"),
            Some((KindAction::Modify, MonitorKind::SqlNumeric))
        );
        assert_eq!(
            parse_kind_tool("get_ping_list"),
            Some((KindAction::List, MonitorKind::Ping))
        );
    }

    #[test]
    fn test_parse_kind_tool_ignores_general_tools() {
        assert_eq!(parse_kind_tool("get_monitor_list"), None);
        assert_eq!(parse_kind_tool("get_jmx_master_list"), None);
        assert_eq!(parse_kind_tool("add_jmx_master_list"), None);
        assert_eq!(parse_kind_tool("get_monitor"), None);
    }

    #[test]
    fn test_every_advertised_kind_tool_parses() {
        let tools = MonitorTools.tools();
        let kind_tool_count = tools
            .iter()
            .filter(|t| parse_kind_tool(&t.name).is_some())
            .count();
        assert_eq!(kind_tool_count, MonitorKind::ALL.len() * 3);
    }
}
