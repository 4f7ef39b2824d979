//! Monitor result API: events, statuses and event custom commands.

use serde::Serialize;
use serde_json::{json, Value};

use super::{ApiError, ApiRequest, HinemosClient};

const BASE: &str = "MonitorResultRestEndpoints/monitorresult";

/// Identifies one event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventKey {
    pub monitor_id: String,
    pub monitor_detail_id: String,
    pub plugin_id: String,
    pub facility_id: String,
    pub output_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventComment {
    #[serde(flatten)]
    pub event: EventKey,
    pub comment: String,
    pub comment_date: String,
    pub comment_user: String,
}

/// Optional flags for `scope_list`.
#[derive(Debug, Clone, Default)]
pub struct ScopeListQuery<'q> {
    pub facility_id: Option<&'q str>,
    pub status_flag: Option<bool>,
    pub event_flag: Option<bool>,
    pub order_flg: Option<bool>,
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn filter_body(filter: Value, size: Option<u64>) -> Value {
    let mut body = json!({ "filter": filter });
    if let Some(size) = size {
        body["size"] = json!(size);
    }
    body
}

pub struct MonitorResultApi<'a> {
    client: &'a HinemosClient,
}

impl<'a> MonitorResultApi<'a> {
    pub(crate) fn new(client: &'a HinemosClient) -> Self {
        Self { client }
    }

    pub async fn event_search(&self, filter: Value, size: Option<u64>) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post(format!("{}/event_search", BASE)).json(filter_body(filter, size));
        self.client.execute(request).await
    }

    pub async fn scope_list(&self, query: ScopeListQuery<'_>) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/scope", BASE))
            .query_opt("facilityId", query.facility_id)
            .query_opt("statusFlag", query.status_flag)
            .query_opt("eventFlag", query.event_flag)
            .query_opt("orderFlg", query.order_flg);
        self.client.execute(request).await
    }

    pub async fn status_search(&self, filter: Value, size: Option<u64>) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post(format!("{}/status_search", BASE)).json(filter_body(filter, size));
        self.client.execute(request).await
    }

    pub async fn status_delete(&self, status_data_info_request_list: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/status_delete", BASE))
            .json(json!({ "statusDataInfoRequestlist": status_data_info_request_list }));
        self.client.execute(request).await
    }

    /// Download matching events as a file (CSV or zip, as the manager decides).
    pub async fn event_download(
        &self,
        filter: Value,
        selected_events: Option<Value>,
        filename: Option<&str>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut body = json!({ "filter": filter });
        if let Some(events) = selected_events {
            body["selectedEvents"] = events;
        }
        if let Some(filename) = filename {
            body["filename"] = json!(filename);
        }
        let request = ApiRequest::post(format!("{}/event_download", BASE)).json(body);
        self.client.download(request).await
    }

    pub async fn event_detail_search(&self, event: &EventKey) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/event_detail_search", BASE)).json(to_body(event)?);
        self.client.execute(request).await
    }

    pub async fn event_comment(&self, comment: &EventComment) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/event_comment", BASE)).json(to_body(comment)?);
        self.client.execute(request).await
    }

    /// Set the confirm state of the listed events.
    pub async fn event_confirm(&self, list: Value, confirm_type: i64) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/event_confirm", BASE))
            .json(json!({ "list": list, "confirmType": confirm_type }));
        self.client.execute(request).await
    }

    /// Set the confirm state of every event matching `filter`.
    pub async fn event_multi_confirm(&self, confirm_type: i64, filter: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/event_multiConfirm", BASE))
            .json(json!({ "confirmType": confirm_type, "filter": filter }));
        self.client.execute(request).await
    }

    pub async fn event_collect_graph_flg(
        &self,
        list: Value,
        collect_graph_flg: bool,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/event_collectGraphFlg", BASE))
            .json(json!({ "list": list, "collectGraphFlg": collect_graph_flg }));
        self.client.execute(request).await
    }

    pub async fn event_update(&self, info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/event", BASE)).json(json!({ "info": info }));
        self.client.execute(request).await
    }

    pub async fn event_custom_command_exec(
        &self,
        command_no: i64,
        event_list: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/eventCustomCommand_exec", BASE))
            .json(json!({ "commandNo": command_no, "eventList": event_list }));
        self.client.execute(request).await
    }

    pub async fn event_custom_command_result(&self, uuid: &str) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/eventCustomCommand/{}", BASE, uuid)))
            .await
    }

    pub async fn event_collect_valid_map_key_facility(
        &self,
        facility_id_list: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/event_collectValid_mapKeyFacility", BASE))
            .query_opt("facilityIdList", facility_id_list);
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_comment_body_is_flat_camel_case() {
        let comment = EventComment {
            event: EventKey {
                monitor_id: "PING01".into(),
                monitor_detail_id: "".into(),
                plugin_id: "MON_PNG_N".into(),
                facility_id: "NODE1".into(),
                output_date: "2024-05-01 12:00:00.000".into(),
            },
            comment: "checked".into(),
            comment_date: "2024-05-01 12:05:00.000".into(),
            comment_user: "hinemos".into(),
        };
        let body = to_body(&comment).unwrap();
        assert_eq!(body["monitorId"], "PING01");
        assert_eq!(body["pluginId"], "MON_PNG_N");
        assert_eq!(body["commentUser"], "hinemos");
        assert!(body.get("event").is_none());
    }

    #[test]
    fn test_filter_body_size_optional() {
        assert_eq!(filter_body(json!({}), None), json!({ "filter": {} }));
        assert_eq!(
            filter_body(json!({"priorityCritical": true}), Some(50)),
            json!({ "filter": {"priorityCritical": true}, "size": 50 })
        );
    }
}
