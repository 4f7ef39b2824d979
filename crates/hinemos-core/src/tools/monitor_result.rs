//! Event and status tools.

use futures::future::BoxFuture;

use super::schema::Schema;
use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::{EventComment, EventKey, HinemosClient, ScopeListQuery};

const EVENT_FILTER_EXAMPLE: &str = "{\"priorityList\": [\"CRITICAL\", \"WARNING\"], \
     \"outputFromDate\": \"2024-05-01 00:00:00.000\", \"facilityId\": \"ROOT\", \
     \"confirmedList\": [\"UNCONFIRMED\"]}";

fn event_key(args: &ToolArgs) -> Result<EventKey, ToolError> {
    Ok(EventKey {
        monitor_id: args.required_str("monitorId")?.to_string(),
        monitor_detail_id: args.optional_str("monitorDetailId")?.unwrap_or_default().to_string(),
        plugin_id: args.required_str("pluginId")?.to_string(),
        facility_id: args.required_str("facilityId")?.to_string(),
        output_date: args.required_str("outputDate")?.to_string(),
    })
}

fn event_key_schema() -> Schema {
    Schema::object()
        .string("monitorId", "Monitor ID")
        .string("monitorDetailId", "Monitor detail ID (optional)")
        .string("pluginId", "Plugin ID, e.g. MON_PNG_N")
        .string("facilityId", "Facility ID")
        .string("outputDate", "Output date, yyyy-MM-dd HH:mm:ss.SSS")
}

/// MIME type for a downloaded event file, guessed from its name.
fn download_mime_type(file_name: Option<&str>) -> &'static str {
    match file_name.and_then(|f| f.rsplit_once('.')).map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "csv" => "text/csv",
        Some(ext) if ext == "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

pub struct MonitorResultTools;

impl ToolGroup for MonitorResultTools {
    fn name(&self) -> &'static str {
        "monitor_result"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        let filter_with_size = |what: &str| {
            Schema::object()
                .json_object("filter", what)
                .integer("size", "Maximum number of entries (optional)")
                .required(&["filter"])
                .build()
        };

        vec![
            ToolDescriptor::new(
                "event_search",
                format!("Search events. Filter example: {}", EVENT_FILTER_EXAMPLE),
                filter_with_size("Event filter"),
            ),
            ToolDescriptor::new(
                "scope_list",
                "Summarise event and status counts per scope",
                Schema::object()
                    .string("facility_id", "Facility ID (optional)")
                    .boolean("status_flag", "Include statuses (optional)")
                    .boolean("event_flag", "Include events (optional)")
                    .boolean("order_flg", "Sort by priority (optional)")
                    .build(),
            ),
            ToolDescriptor::new(
                "status_search",
                "Search status information",
                filter_with_size("Status filter"),
            ),
            ToolDescriptor::new(
                "status_delete",
                "Delete status information",
                Schema::object()
                    .object_array(
                        "status_data_info_request_list",
                        "Statuses to delete, each with monitorId, monitorDetailId, pluginId and facilityId",
                    )
                    .required(&["status_data_info_request_list"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_download",
                "Download events matching a filter as a file",
                Schema::object()
                    .json_object("filter", "Event filter")
                    .object_array("selected_events", "Only these events (optional)")
                    .string("filename", "File name, e.g. events.csv")
                    .required(&["filter", "filename"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_detail_search",
                "Get the details of one event",
                event_key_schema()
                    .required(&["monitorId", "pluginId", "facilityId", "outputDate"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_comment",
                "Set the comment of an event",
                event_key_schema()
                    .string("comment", "Comment text")
                    .string("commentDate", "Comment date, yyyy-MM-dd HH:mm:ss.SSS")
                    .string("commentUser", "Comment user")
                    .required(&[
                        "monitorId",
                        "pluginId",
                        "facilityId",
                        "outputDate",
                        "comment",
                        "commentDate",
                        "commentUser",
                    ])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_confirm",
                "Set the confirm state of events (0: unconfirmed, 1: confirmed, 2: in progress)",
                Schema::object()
                    .object_array("list", "Event keys")
                    .integer("confirmType", "Confirm state")
                    .required(&["list", "confirmType"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_multiConfirm",
                "Set the confirm state of every event matching a filter",
                Schema::object()
                    .integer("confirmType", "Confirm state")
                    .json_object("filter", "Event filter")
                    .required(&["confirmType", "filter"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_collectGraphFlg",
                "Set whether events are drawn on performance graphs",
                Schema::object()
                    .object_array("list", "Event keys")
                    .boolean("collectGraphFlg", "Graph flag")
                    .required(&["list", "collectGraphFlg"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_update",
                "Update event information (user items, comment)",
                Schema::object()
                    .json_object("info", "Event information")
                    .required(&["info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "eventCustomCommand_exec",
                "Run an event custom command; returns a uuid for eventCustomCommand_result",
                Schema::object()
                    .integer("commandNo", "Custom command number")
                    .object_array("eventList", "Target events")
                    .required(&["commandNo", "eventList"])
                    .build(),
            ),
            ToolDescriptor::new(
                "eventCustomCommand_result",
                "Get the result of an event custom command",
                Schema::object()
                    .string("uuid", "Execution uuid")
                    .required(&["uuid"])
                    .build(),
            ),
            ToolDescriptor::new(
                "event_collectValid_mapKeyFacility",
                "Get collection-enabled flags keyed by facility",
                Schema::object()
                    .string("facilityIdList", "Comma-separated facility IDs (optional)")
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
    let api = client.monitor_result();
    let value = match tool {
        "event_search" => {
            api.event_search(args.required_object("filter")?, args.optional_u64("size")?)
                .await?
        }
        "scope_list" => {
            let query = ScopeListQuery {
                facility_id: args.optional_str("facility_id")?,
                status_flag: args.optional_bool("status_flag")?,
                event_flag: args.optional_bool("event_flag")?,
                order_flg: args.optional_bool("order_flg")?,
            };
            api.scope_list(query).await?
        }
        "status_search" => {
            api.status_search(args.required_object("filter")?, args.optional_u64("size")?)
                .await?
        }
        "status_delete" => {
            api.status_delete(args.required_array("status_data_info_request_list")?)
                .await?
        }
        "event_download" => {
            let file_name = args.required_str("filename")?;
            let bytes = api
                .event_download(
                    args.required_object("filter")?,
                    args.optional_array("selected_events")?,
                    Some(file_name),
                )
                .await?;
            return Ok(ToolOutput::Binary {
                bytes,
                mime_type: download_mime_type(Some(file_name)).to_string(),
                file_name: Some(file_name.to_string()),
            });
        }
        "event_detail_search" => api.event_detail_search(&event_key(&args)?).await?,
        "event_comment" => {
            let comment = EventComment {
                event: event_key(&args)?,
                comment: args.required_str("comment")?.to_string(),
                comment_date: args.required_str("commentDate")?.to_string(),
                comment_user: args.required_str("commentUser")?.to_string(),
            };
            api.event_comment(&comment).await?
        }
        "event_confirm" => {
            api.event_confirm(args.required_array("list")?, args.required_i64("confirmType")?)
                .await?
        }
        "event_multiConfirm" => {
            api.event_multi_confirm(args.required_i64("confirmType")?, args.required_object("filter")?)
                .await?
        }
        "event_collectGraphFlg" => {
            api.event_collect_graph_flg(
                args.required_array("list")?,
                args.required_bool("collectGraphFlg")?,
            )
            .await?
        }
        "event_update" => api.event_update(args.required_object("info")?).await?,
        "eventCustomCommand_exec" => {
            api.event_custom_command_exec(
                args.required_i64("commandNo")?,
                args.required_array("eventList")?,
            )
            .await?
        }
        "eventCustomCommand_result" => {
            api.event_custom_command_result(args.required_str("uuid")?)
                .await?
        }
        "event_collectValid_mapKeyFacility" => {
            api.event_collect_valid_map_key_facility(args.optional_str("facilityIdList")?)
                .await?
        }
        other => return Err(ToolError::NotHandled(other.to_string())),
    };
    Ok(ToolOutput::Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn args(value: Value) -> ToolArgs {
        match value {
            Value::Object(map) => ToolArgs::new(map),
            _ => panic!("test args must be an object"),
        }
    }

    #[test]
    fn test_download_mime_type() {
        assert_eq!(download_mime_type(Some("events.csv")), "text/csv");
        assert_eq!(download_mime_type(Some("EVENTS.ZIP")), "application/zip");
        assert_eq!(download_mime_type(Some("events")), "application/octet-stream");
        assert_eq!(download_mime_type(None), "application/octet-stream");
    }

    #[test]
    fn test_event_key_defaults_detail_id() {
        let key = event_key(&args(json!({
            "monitorId": "PING_001",
            "pluginId": "MON_PNG_N",
            "facilityId": "WEB1",
            "outputDate": "2024-05-01 10:00:00.000"
        })))
        .unwrap();
        assert_eq!(key.monitor_detail_id, "");
        assert_eq!(key.plugin_id, "MON_PNG_N");
    }

    #[test]
    fn test_event_key_requires_plugin() {
        let err = event_key(&args(json!({
            "monitorId": "PING_001",
            "facilityId": "WEB1",
            "outputDate": "2024-05-01 10:00:00.000"
        })))
        .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(ref k) if k == "pluginId"));
    }
}
