//! Monitor settings API.
//!
//! Every monitor type lives under its own path segment with the same
//! add/modify/list shape, so those calls take a `MonitorKind`.

use serde_json::{json, Value};

use super::{ApiError, ApiRequest, HinemosClient};
use crate::utils::join_ids;

const BASE: &str = "MonitorsettingRestEndpoints/monitorsetting";

/// Monitor types with per-type add/modify/list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorKind {
    HttpScenario,
    HttpNumeric,
    HttpString,
    Agent,
    Jmx,
    Ping,
    CustomNumeric,
    CustomString,
    Performance,
    SnmpNumeric,
    SnmpString,
    SqlNumeric,
    Logfile,
    Process,
}

impl MonitorKind {
    pub const ALL: [MonitorKind; 14] = [
        MonitorKind::HttpScenario,
        MonitorKind::HttpNumeric,
        MonitorKind::HttpString,
        MonitorKind::Agent,
        MonitorKind::Jmx,
        MonitorKind::Ping,
        MonitorKind::CustomNumeric,
        MonitorKind::CustomString,
        MonitorKind::Performance,
        MonitorKind::SnmpNumeric,
        MonitorKind::SnmpString,
        MonitorKind::SqlNumeric,
        MonitorKind::Logfile,
        MonitorKind::Process,
    ];

    /// Path segment under `monitorsetting/`.
    pub fn path(self) -> &'static str {
        match self {
            MonitorKind::HttpScenario => "httpScenario",
            MonitorKind::HttpNumeric => "httpNumeric",
            MonitorKind::HttpString => "httpString",
            MonitorKind::Agent => "agent",
            MonitorKind::Jmx => "jmx",
            MonitorKind::Ping => "ping",
            MonitorKind::CustomNumeric => "customNumeric",
            MonitorKind::CustomString => "customString",
            MonitorKind::Performance => "performance",
            MonitorKind::SnmpNumeric => "snmpNumeric",
            MonitorKind::SnmpString => "snmpString",
            MonitorKind::SqlNumeric => "sqlNumeric",
            MonitorKind::Logfile => "logfile",
            MonitorKind::Process => "process",
        }
    }

    /// snake_case name, as used in tool names (`add_<slug>_monitor`).
    pub fn slug(self) -> &'static str {
        match self {
            MonitorKind::HttpScenario => "http_scenario",
            MonitorKind::HttpNumeric => "http_numeric",
            MonitorKind::HttpString => "http_string",
            MonitorKind::Agent => "agent",
            MonitorKind::Jmx => "jmx",
            MonitorKind::Ping => "ping",
            MonitorKind::CustomNumeric => "custom_numeric",
            MonitorKind::CustomString => "custom_string",
            MonitorKind::Performance => "performance",
            MonitorKind::SnmpNumeric => "snmp_numeric",
            MonitorKind::SnmpString => "snmp_string",
            MonitorKind::SqlNumeric => "sql_numeric",
            MonitorKind::Logfile => "logfile",
            MonitorKind::Process => "process",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Human readable label for descriptions.
    pub fn label(self) -> &'static str {
        match self {
            MonitorKind::HttpScenario => "HTTP scenario",
            MonitorKind::HttpNumeric => "HTTP (numeric)",
            MonitorKind::HttpString => "HTTP (string)",
            MonitorKind::Agent => "Hinemos agent",
            MonitorKind::Jmx => "JMX",
            MonitorKind::Ping => "ping",
            MonitorKind::CustomNumeric => "custom command (numeric)",
            MonitorKind::CustomString => "custom command (string)",
            MonitorKind::Performance => "resource (performance)",
            MonitorKind::SnmpNumeric => "SNMP (numeric)",
            MonitorKind::SnmpString => "SNMP (string)",
            MonitorKind::SqlNumeric => "SQL (numeric)",
            MonitorKind::Logfile => "log file",
            MonitorKind::Process => "process",
        }
    }
}

pub struct MonitorApi<'a> {
    client: &'a HinemosClient,
}

impl<'a> MonitorApi<'a> {
    pub(crate) fn new(client: &'a HinemosClient) -> Self {
        Self { client }
    }

    pub async fn get_monitor_list(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/monitor", BASE)))
            .await
    }

    /// Monitor settings matching a `monitorFilterInfo` object.
    pub async fn search_monitor_list(&self, monitor_filter_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/monitor_search", BASE))
            .json(json!({ "monitorFilterInfo": monitor_filter_info }));
        self.client.execute(request).await
    }

    pub async fn get_monitor(&self, monitor_id: &str) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/monitor/{}", BASE, monitor_id)))
            .await
    }

    pub async fn delete_monitor<S: AsRef<str>>(&self, monitor_ids: &[S]) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/monitor", BASE))
            .query("monitorIds", join_ids(monitor_ids));
        self.client.execute(request).await
    }

    /// Enable or disable monitoring.
    pub async fn set_status_monitor<S: AsRef<str>>(
        &self,
        monitor_ids: &[S],
        valid_flg: bool,
    ) -> Result<Value, ApiError> {
        let ids: Vec<&str> = monitor_ids.iter().map(|s| s.as_ref()).collect();
        let request = ApiRequest::put(format!("{}/monitor_monitorValid", BASE))
            .json(json!({ "monitorIds": ids, "validFlg": valid_flg }));
        self.client.execute(request).await
    }

    /// Enable or disable collection.
    pub async fn set_status_collector<S: AsRef<str>>(
        &self,
        monitor_ids: &[S],
        collector_flg: bool,
    ) -> Result<Value, ApiError> {
        let ids: Vec<&str> = monitor_ids.iter().map(|s| s.as_ref()).collect();
        let request = ApiRequest::put(format!("{}/monitor_collectorValid", BASE))
            .json(json!({ "monitorIds": ids, "collectorFlg": collector_flg }));
        self.client.execute(request).await
    }

    pub async fn get_monitor_info_for_graph(&self, monitor_id: &str) -> Result<Value, ApiError> {
        let request =
            ApiRequest::get(format!("{}/monitor_graphInfo_forCollect/{}", BASE, monitor_id));
        self.client.execute(request).await
    }

    pub async fn add_monitor(&self, kind: MonitorKind, monitor_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/{}", BASE, kind.path())).json(monitor_info);
        self.client.execute(request).await
    }

    pub async fn modify_monitor(
        &self,
        kind: MonitorKind,
        monitor_id: &str,
        monitor_info: Value,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::put(format!("{}/{}/{}", BASE, kind.path(), monitor_id)).json(monitor_info);
        self.client.execute(request).await
    }

    /// Settings of one monitor type, optionally narrowed to one monitor id.
    pub async fn get_monitor_list_by_kind(
        &self,
        kind: MonitorKind,
        monitor_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/{}", BASE, kind.path()))
            .query_opt("monitorId", monitor_id);
        self.client.execute(request).await
    }

    pub async fn get_monitor_list_without_checkinfo(
        &self,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/monitor_withoutCheckInfo", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_monitor_string_list(
        &self,
        facility_id: Option<&str>,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/monitor_string", BASE))
            .query_opt("facilityId", facility_id)
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_monitor_list_for_job(
        &self,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/monitor_withoutCheckInfo_forJob", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_monitor_string_tag_list(
        &self,
        monitor_id: &str,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/monitor_string_tag/{}", BASE, monitor_id))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_jmx_url_format_list(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/jmx_urlFormat", BASE)))
            .await
    }

    pub async fn get_jmx_master_list(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/jmxMaster", BASE)))
            .await
    }

    pub async fn add_jmx_master_list(&self, jmx_master_list: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/jmxMaster_list", BASE))
            .json(json!({ "jmxMasterInfoList": jmx_master_list }));
        self.client.execute(request).await
    }

    pub async fn delete_jmx_master<S: AsRef<str>>(
        &self,
        jmx_master_ids: &[S],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/jmxMaster", BASE))
            .query("jmxMasterIds", join_ids(jmx_master_ids));
        self.client.execute(request).await
    }

    pub async fn delete_jmx_master_all(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::delete(format!("{}/jmxMaster_all", BASE)))
            .await
    }

    pub async fn get_jdbc_driver_list(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/sql_jdbcDriver", BASE)))
            .await
    }

    pub async fn get_binary_preset_list(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/binary_binaryPreset", BASE)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for kind in MonitorKind::ALL {
            assert_eq!(MonitorKind::from_slug(kind.slug()), Some(kind));
            assert!(seen.insert(kind.path()));
        }
        assert_eq!(MonitorKind::from_slug("nope"), None);
    }

    #[test]
    fn test_paths_are_camel_case() {
        assert_eq!(MonitorKind::HttpScenario.path(), "httpScenario");
        assert_eq!(MonitorKind::SqlNumeric.path(), "sqlNumeric");
        assert_eq!(MonitorKind::Logfile.path(), "logfile");
    }
}
