//! Collect API: collected performance data and collection settings.

use serde_json::Value;

use super::{ApiError, ApiRequest, HinemosClient};
use crate::utils::join_ids;

const BASE: &str = "CollectRestEndpoints/collect";

pub struct CollectApi<'a> {
    client: &'a HinemosClient,
}

impl<'a> CollectApi<'a> {
    pub(crate) fn new(client: &'a HinemosClient) -> Self {
        Self { client }
    }

    /// Collect ids for one monitor item across facilities.
    pub async fn get_collect_id<S: AsRef<str>>(
        &self,
        monitor_id: &str,
        item_name: &str,
        display_name: &str,
        facility_ids: &[S],
        size: Option<u64>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/key/{}", BASE, monitor_id))
            .query("itemName", item_name)
            .query("displayName", display_name)
            .query("facilityIds", join_ids(facility_ids))
            .query_opt("size", size);
        self.client.execute(request).await
    }

    /// Collected values. `from_time`/`to_time` are `yyyy-MM-dd HH:mm:ss`.
    pub async fn get_collect_data(
        &self,
        id_list: &[i64],
        summary_type: &str,
        from_time: &str,
        to_time: &str,
        size: Option<u64>,
    ) -> Result<Value, ApiError> {
        let ids: Vec<String> = id_list.iter().map(|id| id.to_string()).collect();
        let request = ApiRequest::get(format!("{}/data", BASE))
            .query("idList", join_ids(&ids))
            .query("summaryType", summary_type)
            .query("fromTime", from_time)
            .query("toTime", to_time)
            .query_opt("size", size);
        self.client.execute(request).await
    }

    pub async fn get_item_code_list<S: AsRef<str>>(
        &self,
        facility_ids: &[S],
        size: Option<u64>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/key", BASE))
            .query("facilityIds", join_ids(facility_ids))
            .query_opt("size", size);
        self.client.execute(request).await
    }

    pub async fn get_collect_item_code_master_list(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/itemCodeMst", BASE)))
            .await
    }

    pub async fn get_collect_key_map_for_analytics(
        &self,
        facility_id: &str,
        owner_role_id: &str,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/key_mapKeyItemName/{}", BASE, facility_id))
            .query("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_available_collector_item_list(
        &self,
        facility_id: &str,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/itemCodeMst_availableItem", BASE))
            .query("facilityId", facility_id);
        self.client.execute(request).await
    }

    pub async fn get_collect_master_info(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get(format!("{}/master", BASE)))
            .await
    }

    pub async fn add_collect_setting(&self, collect_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting", BASE)).json(collect_info);
        self.client.execute(request).await
    }

    pub async fn modify_collect_setting(
        &self,
        collect_id: &str,
        collect_info: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/setting/{}", BASE, collect_id)).json(collect_info);
        self.client.execute(request).await
    }

    pub async fn delete_collect_setting<S: AsRef<str>>(
        &self,
        collect_ids: &[S],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/setting", BASE))
            .query("collectIds", join_ids(collect_ids));
        self.client.execute(request).await
    }
}
