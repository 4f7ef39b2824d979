//! Calendar tools.

use futures::future::BoxFuture;

use super::schema::Schema;
use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::HinemosClient;

pub struct CalendarTools;

impl ToolGroup for CalendarTools {
    fn name(&self) -> &'static str {
        "calendar"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        let owner_role = Schema::object()
            .string("owner_role_id", "Owner role ID filter (optional)")
            .build();

        vec![
            ToolDescriptor::new("get_calendar_list", "List calendars", owner_role.clone()),
            ToolDescriptor::new(
                "get_calendar",
                "Get a calendar",
                Schema::object()
                    .string("calendar_id", "Calendar ID")
                    .required(&["calendar_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "add_calendar",
                "Add a calendar. validTimeFrom/validTimeTo may be ISO-8601; they are sent as \
                 yyyy-MM-dd HH:mm:ss.SSS. Example: {\"calendarId\": \"CAL_001\", \
                 \"calendarName\": \"Business days\", \"ownerRoleId\": \"ADMINISTRATORS\", \
                 \"validTimeFrom\": \"2024-01-01T00:00:00.000Z\", \
                 \"validTimeTo\": \"2024-12-31T23:59:59.999Z\", \"calendarDetailList\": []}",
                Schema::object()
                    .json_object("calendar_info", "Calendar definition")
                    .required(&["calendar_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "modify_calendar",
                "Update a calendar (same fields as add_calendar, without calendarId)",
                Schema::object()
                    .string("calendar_id", "Calendar ID")
                    .json_object("calendar_info", "Calendar fields")
                    .required(&["calendar_id", "calendar_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_calendar",
                "Delete calendars",
                Schema::object()
                    .string_array("calendar_ids", "Calendar IDs to delete")
                    .required(&["calendar_ids"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_calendar_month",
                "Get the per-day operation state of a calendar for one month \
                 (ALL_OPERATION, PARTIAL_OPERATION, NOT_OPERATION)",
                Schema::object()
                    .string("calendar_id", "Calendar ID")
                    .integer("year", "Year")
                    .integer("month", "Month")
                    .required(&["calendar_id", "year", "month"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_calendar_week",
                "Get calendar details for the week containing a date",
                Schema::object()
                    .string("calendar_id", "Calendar ID")
                    .integer("year", "Year")
                    .integer("month", "Month")
                    .integer("day", "Day")
                    .required(&["calendar_id", "year", "month", "day"])
                    .build(),
            ),
            ToolDescriptor::new("get_calendar_pattern_list", "List calendar patterns", owner_role),
            ToolDescriptor::new(
                "get_calendar_pattern",
                "Get a calendar pattern",
                Schema::object()
                    .string("calendar_pattern_id", "Calendar pattern ID")
                    .required(&["calendar_pattern_id"])
                    .build(),
            ),
            ToolDescriptor::new(
                "add_calendar_pattern",
                "Add a calendar pattern, e.g. {\"calPatternId\": \"PATTERN_001\", \
                 \"calPatternName\": \"Weekends\", \"ownerRoleId\": \"ADMINISTRATORS\"}",
                Schema::object()
                    .json_object("pattern_info", "Calendar pattern definition")
                    .required(&["pattern_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "modify_calendar_pattern",
                "Update a calendar pattern",
                Schema::object()
                    .string("calendar_pattern_id", "Calendar pattern ID")
                    .json_object("pattern_info", "Calendar pattern fields")
                    .required(&["calendar_pattern_id", "pattern_info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_calendar_pattern",
                "Delete calendar patterns",
                Schema::object()
                    .string_array("calendar_pattern_ids", "Calendar pattern IDs to delete")
                    .required(&["calendar_pattern_ids"])
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
    let api = client.calendar();
    let value = match tool {
        "get_calendar_list" => api.get_calendar_list(args.optional_str("owner_role_id")?).await?,
        "get_calendar" => api.get_calendar(args.required_str("calendar_id")?).await?,
        "add_calendar" => api.add_calendar(args.required_object("calendar_info")?).await?,
        "modify_calendar" => {
            api.modify_calendar(
                args.required_str("calendar_id")?,
                args.required_object("calendar_info")?,
            )
            .await?
        }
        "delete_calendar" => api.delete_calendar(&args.id_list("calendar_ids")?).await?,
        "get_calendar_month" => {
            api.get_calendar_month(
                args.required_str("calendar_id")?,
                args.required_i64("year")?,
                args.required_i64("month")?,
            )
            .await?
        }
        "get_calendar_week" => {
            api.get_calendar_week(
                args.required_str("calendar_id")?,
                args.required_i64("year")?,
                args.required_i64("month")?,
                args.required_i64("day")?,
            )
            .await?
        }
        "get_calendar_pattern_list" => {
            api.get_calendar_pattern_list(args.optional_str("owner_role_id")?)
                .await?
        }
        "get_calendar_pattern" => {
            api.get_calendar_pattern(args.required_str("calendar_pattern_id")?)
                .await?
        }
        "add_calendar_pattern" => {
            api.add_calendar_pattern(args.required_object("pattern_info")?)
                .await?
        }
        "modify_calendar_pattern" => {
            api.modify_calendar_pattern(
                args.required_str("calendar_pattern_id")?,
                args.required_object("pattern_info")?,
            )
            .await?
        }
        "delete_calendar_pattern" => {
            api.delete_calendar_pattern(&args.id_list("calendar_pattern_ids")?)
                .await?
        }
        other => return Err(ToolError::NotHandled(other.to_string())),
    };
    Ok(ToolOutput::Json(value))
}
