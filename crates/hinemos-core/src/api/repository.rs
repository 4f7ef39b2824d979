//! Repository API: facility tree, nodes, scopes and platforms.

use serde_json::Value;

use super::{ApiError, ApiRequest, HinemosClient};
use crate::utils::join_ids;

const BASE: &str = "RepositoryRestEndpoints/repository";

/// The manager expects `ipAddressVersion` as `"IPV4"`/`"IPV6"`; callers
/// often send `4`/`6`. Other numbers are left for the manager to reject.
fn normalize_ip_version(mut node_info: Value) -> Value {
    let label = match node_info.get("ipAddressVersion").and_then(Value::as_i64) {
        Some(4) => "IPV4",
        Some(6) => "IPV6",
        _ => return node_info,
    };
    node_info["ipAddressVersion"] = Value::String(label.to_string());
    node_info
}

pub struct RepositoryApi<'a> {
    client: &'a HinemosClient,
}

impl<'a> RepositoryApi<'a> {
    pub(crate) fn new(client: &'a HinemosClient) -> Self {
        Self { client }
    }

    pub async fn get_facility_tree(
        &self,
        owner_role_id: Option<&str>,
        size: Option<u64>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/facility_tree", BASE))
            .query_opt("ownerRoleId", owner_role_id)
            .query_opt("size", size);
        self.client.execute(request).await
    }

    /// Facility tree below `target_facility_id`.
    pub async fn get_exec_target_facility_tree(
        &self,
        target_facility_id: &str,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/facility_tree/{}", BASE, target_facility_id))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    /// Facility tree including node information.
    pub async fn get_node_facility_tree(
        &self,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/facility_nodeTree", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_node_list(
        &self,
        parent_facility_id: Option<&str>,
        size: Option<u64>,
        level: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/node_withoutNodeConfigInfo", BASE))
            .query_opt("parentFacilityId", parent_facility_id)
            .query_opt("size", size)
            .query_opt("level", level);
        self.client.execute(request).await
    }

    /// Node information without configuration details.
    pub async fn get_node(&self, facility_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/node_withoutNodeConfigInfo/{}", BASE, facility_id));
        self.client.execute(request).await
    }

    /// Node information including configuration details (CPU, disks, packages ...).
    pub async fn get_node_full(&self, facility_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/node/{}", BASE, facility_id));
        self.client.execute(request).await
    }

    pub async fn add_node(&self, node_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/node", BASE)).json(normalize_ip_version(node_info));
        self.client.execute(request).await
    }

    pub async fn modify_node(&self, facility_id: &str, node_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/node/{}", BASE, facility_id))
            .json(normalize_ip_version(node_info));
        self.client.execute(request).await
    }

    pub async fn delete_node<S: AsRef<str>>(&self, facility_ids: &[S]) -> Result<Value, ApiError> {
        let request =
            ApiRequest::delete(format!("{}/node", BASE)).query("facilityIds", join_ids(facility_ids));
        self.client.execute(request).await
    }

    pub async fn search_node(&self, search_params: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/node_withoutNodeConfigInfo_search", BASE))
            .json(search_params);
        self.client.execute(request).await
    }

    /// Scopes and nodes directly below a scope.
    pub async fn get_facility_list(
        &self,
        parent_facility_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/facility", BASE))
            .query_opt("parentFacilityId", parent_facility_id);
        self.client.execute(request).await
    }

    pub async fn get_scope(&self, facility_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/scope/{}", BASE, facility_id));
        self.client.execute(request).await
    }

    pub async fn get_scope_default(&self) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/scope_default", BASE));
        self.client.execute(request).await
    }

    pub async fn add_scope(&self, scope_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/scope", BASE)).json(scope_info);
        self.client.execute(request).await
    }

    pub async fn modify_scope(&self, facility_id: &str, scope_info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/scope/{}", BASE, facility_id)).json(scope_info);
        self.client.execute(request).await
    }

    pub async fn delete_scope<S: AsRef<str>>(&self, facility_ids: &[S]) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/scope", BASE))
            .query("facilityIds", join_ids(facility_ids));
        self.client.execute(request).await
    }

    pub async fn get_platform_list(&self) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/platform", BASE));
        self.client.execute(request).await
    }

    pub async fn get_subplatform_list(&self) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/subPlatform", BASE));
        self.client.execute(request).await
    }
}
