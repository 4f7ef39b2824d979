//! Calendar API: calendars, operation states and calendar patterns.

use serde_json::Value;

use super::{ApiError, ApiRequest, HinemosClient};
use crate::utils::{join_ids, normalize_datetime_fields};

const BASE: &str = "CalendarRestEndpoints/calendar";

/// Body fields sent as `yyyy-MM-dd HH:mm:ss.SSS`.
const VALID_TIME_FIELDS: [&str; 2] = ["validTimeFrom", "validTimeTo"];

pub struct CalendarApi<'a> {
    client: &'a HinemosClient,
}

impl<'a> CalendarApi<'a> {
    pub(crate) fn new(client: &'a HinemosClient) -> Self {
        Self { client }
    }

    pub async fn get_calendar_list(&self, owner_role_id: Option<&str>) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/calendar", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_calendar(&self, calendar_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/calendar/{}", BASE, calendar_id));
        self.client.execute(request).await
    }

    /// Add a calendar. ISO-8601 `validTimeFrom`/`validTimeTo` are converted
    /// to the manager's layout first.
    pub async fn add_calendar(&self, calendar_info: Value) -> Result<Value, ApiError> {
        let body = normalize_datetime_fields(&calendar_info, &VALID_TIME_FIELDS);
        let request = ApiRequest::post(format!("{}/calendar", BASE)).json(body);
        self.client.execute(request).await
    }

    pub async fn modify_calendar(
        &self,
        calendar_id: &str,
        calendar_info: Value,
    ) -> Result<Value, ApiError> {
        let body = normalize_datetime_fields(&calendar_info, &VALID_TIME_FIELDS);
        let request = ApiRequest::put(format!("{}/calendar/{}", BASE, calendar_id)).json(body);
        self.client.execute(request).await
    }

    pub async fn delete_calendar<S: AsRef<str>>(&self, calendar_ids: &[S]) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/calendar", BASE))
            .query("calendarIds", join_ids(calendar_ids));
        self.client.execute(request).await
    }

    /// Per-day operation state (`ALL_OPERATION`, `PARTIAL_OPERATION`,
    /// `NOT_OPERATION`) for one month.
    pub async fn get_calendar_month(
        &self,
        calendar_id: &str,
        year: i64,
        month: i64,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!(
            "{}/calendar/{}/calendarDetail_monthOperationState",
            BASE, calendar_id
        ))
        .query("year", year)
        .query("month", month);
        self.client.execute(request).await
    }

    pub async fn get_calendar_week(
        &self,
        calendar_id: &str,
        year: i64,
        month: i64,
        day: i64,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::get(format!("{}/calendar/{}/calendarDetail_week", BASE, calendar_id))
                .query("year", year)
                .query("month", month)
                .query("day", day);
        self.client.execute(request).await
    }

    pub async fn get_calendar_pattern_list(
        &self,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::get(format!("{}/pattern", BASE)).query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_calendar_pattern(&self, calendar_pattern_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/pattern/{}", BASE, calendar_pattern_id));
        self.client.execute(request).await
    }

    pub async fn add_calendar_pattern(&self, pattern_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/pattern", BASE)).json(pattern_info);
        self.client.execute(request).await
    }

    pub async fn modify_calendar_pattern(
        &self,
        calendar_pattern_id: &str,
        pattern_info: Value,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::put(format!("{}/pattern/{}", BASE, calendar_pattern_id)).json(pattern_info);
        self.client.execute(request).await
    }

    pub async fn delete_calendar_pattern<S: AsRef<str>>(
        &self,
        calendar_pattern_ids: &[S],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/pattern", BASE))
            .query("calendarPatternIds", join_ids(calendar_pattern_ids));
        self.client.execute(request).await
    }
}
