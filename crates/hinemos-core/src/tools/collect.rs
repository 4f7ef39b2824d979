//! Collected performance data tools.

use futures::future::BoxFuture;

use super::schema::Schema;
use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::HinemosClient;

pub struct CollectTools;

impl ToolGroup for CollectTools {
    fn name(&self) -> &'static str {
        "collect"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(
                "get_collect_id",
                "Resolve the collect IDs of a monitor item on the given facilities; \
                 pass them to get_collect_data",
                Schema::object()
                    .string("monitor_id", "Monitor ID")
                    .string("item_name", "Item name, e.g. CPU usage")
                    .string("display_name", "Display name (device), empty for none")
                    .string_array("facility_ids", "Facility IDs")
                    .integer("size", "Maximum number of entries (optional)")
                    .required(&["monitor_id", "item_name", "facility_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_collect_data",
                "Get collected values for collect IDs between two times",
                Schema::object()
                    .integer_array("id_list", "Collect IDs from get_collect_id")
                    .string("summary_type", "Summary type: REAL, AVG_HOUR, AVG_DAY, AVG_MONTH, ...")
                    .string("from_time", "Start, yyyy-MM-dd HH:mm:ss")
                    .string("to_time", "End, yyyy-MM-dd HH:mm:ss")
                    .integer("size", "Maximum number of entries (optional)")
                    .required(&["id_list", "summary_type", "from_time", "to_time"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_item_code_list",
                "List collected item codes on the given facilities",
                Schema::object()
                    .string_array("facility_ids", "Facility IDs")
                    .integer("size", "Maximum number of entries (optional)")
                    .required(&["facility_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_collect_item_code_master_list",
                "List the collector item code master",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_collect_key_map_for_analytics",
                "Map collected item keys to item names for a facility",
                Schema::object()
                    .string("facility_id", "Facility ID")
                    .string("owner_role_id", "Owner role ID")
                    .required(&["facility_id", "owner_role_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_available_collector_item_list",
                "List collector items available on a facility",
                Schema::object()
                    .string("facility_id", "Facility ID")
                    .required(&["facility_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_collect_master_info",
                "Get the complete collector master information",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "add_collect_setting",
                "Add a collection setting",
                Schema::object()
                    .json_object("collect_info", "Collection setting")
                    .required(&["collect_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "modify_collect_setting",
                "Update a collection setting",
                Schema::object()
                    .string("collect_id", "Collection setting ID")
                    .json_object("collect_info", "Collection setting")
                    .required(&["collect_id", "collect_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_collect_setting",
                "Delete collection settings",
                Schema::object()
                    .string_array("collect_ids", "Collection setting IDs")
                    .required(&["collect_ids"])
                    .build(),
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
    let api = client.collect();
    let value = match tool {
        "get_collect_id" => {
            api.get_collect_id(
                args.required_str("monitor_id")?,
                args.required_str("item_name")?,
                args.optional_str("display_name")?.unwrap_or_default(),
                &args.id_list("facility_ids")?,
                args.optional_u64("size")?,
            )
            .await?
        }
        "get_collect_data" => {
            api.get_collect_data(
                &args.i64_list("id_list")?,
                args.required_str("summary_type")?,
                args.required_str("from_time")?,
                args.required_str("to_time")?,
                args.optional_u64("size")?,
            )
            .await?
        }
        "get_item_code_list" => {
            api.get_item_code_list(&args.id_list("facility_ids")?, args.optional_u64("size")?)
                .await?
        }
        "get_collect_item_code_master_list" => api.get_collect_item_code_master_list().await?,
        "get_collect_key_map_for_analytics" => {
            api.get_collect_key_map_for_analytics(
                args.required_str("facility_id")?,
                args.required_str("owner_role_id")?,
            )
            .await?
        }
        "get_available_collector_item_list" => {
            api.get_available_collector_item_list(args.required_str("facility_id")?)
                .await?
        }
        "get_collect_master_info" => api.get_collect_master_info().await?,
        "add_collect_setting" => api.add_collect_setting(args.required_object("collect_info")?).await?,
        "modify_collect_setting" => {
            api.modify_collect_setting(
                args.required_str("collect_id")?,
                args.required_object("collect_info")?,
            )
            .await?
        }
        "delete_collect_setting" => api.delete_collect_setting(&args.id_list("collect_ids")?).await?,
        other => return Err(ToolError::NotHandled(other.to_string())),
    };
    Ok(ToolOutput::Json(value))
}
