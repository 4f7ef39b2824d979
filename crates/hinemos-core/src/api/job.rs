//! Job management API.
//!
//! Covers job definitions (jobunits and their jobs), job kicks (schedules,
//! file checks, manual triggers, joblink receive triggers), sessions and
//! their operations, approvals, job queues, joblink messaging and RPA.

use serde_json::{json, Value};

use super::{ApiError, ApiRequest, HinemosClient};
use crate::utils::join_ids;

const BASE: &str = "JobRestEndpoints/job";

/// Job types that can be added to or modified in a jobunit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    Jobnet,
    Command,
    File,
    Refer,
    Monitor,
    Approval,
    JoblinkSend,
    JoblinkRcv,
    Filecheck,
    Rpa,
}

impl JobType {
    pub const ALL: [JobType; 10] = [
        JobType::Jobnet,
        JobType::Command,
        JobType::File,
        JobType::Refer,
        JobType::Monitor,
        JobType::Approval,
        JobType::JoblinkSend,
        JobType::JoblinkRcv,
        JobType::Filecheck,
        JobType::Rpa,
    ];

    /// Path segment used when adding a job.
    fn add_path(self) -> &'static str {
        match self {
            JobType::Jobnet => "jobnet",
            JobType::Command => "commandJob",
            JobType::File => "fileJob",
            JobType::Refer => "referJob",
            JobType::Monitor => "monitorJob",
            JobType::Approval => "approvalJob",
            JobType::JoblinkSend => "joblinksendJob",
            JobType::JoblinkRcv => "joblinkrcvJob",
            JobType::Filecheck => "filecheckJob",
            JobType::Rpa => "rpaJob",
        }
    }

    /// Path segment used when modifying a job. Joblink jobs are camel-cased
    /// differently here than on add.
    fn modify_path(self) -> &'static str {
        match self {
            JobType::JoblinkSend => "joblinkSendJob",
            JobType::JoblinkRcv => "joblinkRcvJob",
            other => other.add_path(),
        }
    }

    /// Tool name suffix: `add_<suffix>` / `modify_<suffix>`.
    pub fn tool_suffix(self) -> &'static str {
        match self {
            JobType::Jobnet => "jobnet",
            JobType::Command => "command_job",
            JobType::File => "file_job",
            JobType::Refer => "refer_job",
            JobType::Monitor => "monitor_job",
            JobType::Approval => "approval_job",
            JobType::JoblinkSend => "joblinksend_job",
            JobType::JoblinkRcv => "joblinkrcv_job",
            JobType::Filecheck => "filecheck_job",
            JobType::Rpa => "rpa_job",
        }
    }

    pub fn from_tool_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tool_suffix() == suffix)
    }

    pub fn label(self) -> &'static str {
        match self {
            JobType::Jobnet => "job net",
            JobType::Command => "command job",
            JobType::File => "file transfer job",
            JobType::Refer => "reference job",
            JobType::Monitor => "monitor job",
            JobType::Approval => "approval job",
            JobType::JoblinkSend => "joblink send job",
            JobType::JoblinkRcv => "joblink receive job",
            JobType::Filecheck => "file check job",
            JobType::Rpa => "RPA scenario job",
        }
    }
}

/// Kinds of job kick (execution trigger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KickType {
    Schedule,
    Filecheck,
    Manual,
    Joblinkrcv,
}

impl KickType {
    pub const ALL: [KickType; 4] = [
        KickType::Schedule,
        KickType::Filecheck,
        KickType::Manual,
        KickType::Joblinkrcv,
    ];

    /// Path segment under `setting/kick/`; also the tool name suffix.
    pub fn path(self) -> &'static str {
        match self {
            KickType::Schedule => "schedule",
            KickType::Filecheck => "filecheck",
            KickType::Manual => "manual",
            KickType::Joblinkrcv => "joblinkrcv",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.path() == path)
    }

    pub fn label(self) -> &'static str {
        match self {
            KickType::Schedule => "schedule",
            KickType::Filecheck => "file check trigger",
            KickType::Manual => "manual trigger",
            KickType::Joblinkrcv => "joblink receive trigger",
        }
    }
}

/// Session operations whose availability can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCheck {
    Start,
    Stop,
}

impl OperationCheck {
    fn path(self) -> &'static str {
        match self {
            OperationCheck::Start => "operationProp_availableStartOperation",
            OperationCheck::Stop => "operationProp_availableStopOperation",
        }
    }
}

pub struct JobApi<'a> {
    client: &'a HinemosClient,
}

impl<'a> JobApi<'a> {
    pub(crate) fn new(client: &'a HinemosClient) -> Self {
        Self { client }
    }

    async fn get(&self, path: String) -> Result<Value, ApiError> {
        self.client.execute(ApiRequest::get(path)).await
    }

    // ========================================================================
    // Job definitions
    // ========================================================================

    pub async fn get_job_tree_simple(&self, owner_role_id: Option<&str>) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/setting/job_treeSimple", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_job_tree_full(&self, owner_role_id: Option<&str>) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/setting/job_treeFull", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_job_info(&self, jobunit_id: &str, job_id: &str) -> Result<Value, ApiError> {
        self.get(format!(
            "{}/setting/job_info/jobunit/{}/job/{}",
            BASE, jobunit_id, job_id
        ))
        .await
    }

    /// `job_list` is an array of `{jobunitId, jobId}`.
    pub async fn get_job_info_bulk(&self, job_list: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/job_info_search", BASE))
            .json(json!({ "jobList": job_list }));
        self.client.execute(request).await
    }

    pub async fn add_jobunit(&self, jobunit: Value, is_client: bool) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/jobunit", BASE))
            .query("isClient", is_client)
            .json(jobunit);
        self.client.execute(request).await
    }

    pub async fn modify_jobunit(
        &self,
        jobunit_id: &str,
        jobunit: Value,
        is_client: bool,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/setting/jobunit/{}", BASE, jobunit_id))
            .query("isClient", is_client)
            .json(jobunit);
        self.client.execute(request).await
    }

    pub async fn delete_jobunit(&self, jobunit_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/setting/jobunit/{}", BASE, jobunit_id));
        self.client.execute(request).await
    }

    pub async fn get_edit_lock(
        &self,
        jobunit_id: &str,
        update_time: &str,
        force_flag: bool,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/jobunit/{}/lock", BASE, jobunit_id))
            .json(json!({ "updateTime": update_time, "forceFlag": force_flag }));
        self.client.execute(request).await
    }

    pub async fn check_edit_lock(&self, jobunit_id: &str, edit_session: i64) -> Result<Value, ApiError> {
        self.get(format!(
            "{}/setting/jobunit/{}/lock/{}",
            BASE, jobunit_id, edit_session
        ))
        .await
    }

    pub async fn release_edit_lock(
        &self,
        jobunit_id: &str,
        edit_session: i64,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!(
            "{}/setting/jobunit/{}/lock/{}",
            BASE, jobunit_id, edit_session
        ));
        self.client.execute(request).await
    }

    pub async fn add_job(&self, job_type: JobType, jobunit_id: &str, job: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!(
            "{}/setting/jobunit/{}/{}",
            BASE,
            jobunit_id,
            job_type.add_path()
        ))
        .json(job);
        self.client.execute(request).await
    }

    pub async fn modify_job(
        &self,
        job_type: JobType,
        jobunit_id: &str,
        job_id: &str,
        job: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!(
            "{}/setting/jobunit/{}/{}/{}",
            BASE,
            jobunit_id,
            job_type.modify_path(),
            job_id
        ))
        .json(job);
        self.client.execute(request).await
    }

    pub async fn delete_job(&self, jobunit_id: &str, job_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!(
            "{}/setting/jobunit/{}/job/{}",
            BASE, jobunit_id, job_id
        ));
        self.client.execute(request).await
    }

    pub async fn get_job_referrer_queue(&self, queue_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/setting/job_referrerQueue/{}", BASE, queue_id))
            .await
    }

    pub async fn get_jobmap_icon_image_icon_id(
        &self,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/jobmap/iconImage_iconId", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    // ========================================================================
    // Execution and sessions
    // ========================================================================

    pub async fn run_job(
        &self,
        jobunit_id: &str,
        job_id: &str,
        run_job_request: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!(
            "{}/session_exec/jobunit/{}/job/{}",
            BASE, jobunit_id, job_id
        ))
        .json(run_job_request);
        self.client.execute(request).await
    }

    pub async fn run_job_kick(
        &self,
        job_kick_id: &str,
        run_job_kick_request: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/session_exec/kick/{}", BASE, job_kick_id))
            .json(run_job_kick_request);
        self.client.execute(request).await
    }

    pub async fn session_job_operation(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
        operation: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!(
            "{}/sessionJob_operation/{}/jobunit/{}/job/{}",
            BASE, session_id, jobunit_id, job_id
        ))
        .json(operation);
        self.client.execute(request).await
    }

    pub async fn session_node_operation(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
        facility_id: &str,
        operation: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!(
            "{}/sessionNode_operation/{}/jobunit/{}/job/{}/facilityId/{}",
            BASE, session_id, jobunit_id, job_id, facility_id
        ))
        .json(operation);
        self.client.execute(request).await
    }

    pub async fn get_session_job_detail(&self, session_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/sessionJob_detail/{}", BASE, session_id))
            .await
    }

    pub async fn get_session_node_detail(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
    ) -> Result<Value, ApiError> {
        self.get(format!(
            "{}/sessionNode_detail/{}/jobunit/{}/job/{}",
            BASE, session_id, jobunit_id, job_id
        ))
        .await
    }

    pub async fn get_session_file_detail(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
    ) -> Result<Value, ApiError> {
        self.get(format!(
            "{}/sessionFile_detail/{}/jobunit/{}/job/{}",
            BASE, session_id, jobunit_id, job_id
        ))
        .await
    }

    pub async fn get_session_job_info(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
    ) -> Result<Value, ApiError> {
        self.get(format!(
            "{}/sessionJob_jobInfo/{}/jobunit/{}/job/{}",
            BASE, session_id, jobunit_id, job_id
        ))
        .await
    }

    pub async fn get_session_job_all_detail(&self, session_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/sessionJob_allDetail/{}", BASE, session_id))
            .await
    }

    pub async fn history_search(&self, size: u64, filter: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/history_search", BASE))
            .json(json!({ "size": size, "filter": filter }));
        self.client.execute(request).await
    }

    /// Whether a start/stop operation is currently permitted on a session
    /// job, or on one node of it when `facility_id` is given.
    pub async fn available_operation(
        &self,
        check: OperationCheck,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
        facility_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut path = format!(
            "{}/{}/{}/jobunit/{}/job/{}",
            BASE,
            check.path(),
            session_id,
            jobunit_id,
            job_id
        );
        if let Some(facility_id) = facility_id {
            path.push_str("/facility/");
            path.push_str(facility_id);
        }
        self.get(path).await
    }

    // ========================================================================
    // Kicks
    // ========================================================================

    pub async fn add_kick(&self, kick: KickType, info: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/kick/{}", BASE, kick.path())).json(info);
        self.client.execute(request).await
    }

    pub async fn get_kick_type_detail(&self, kick: KickType, job_kick_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/setting/kick/{}/{}", BASE, kick.path(), job_kick_id))
            .await
    }

    pub async fn modify_kick(
        &self,
        kick: KickType,
        job_kick_id: &str,
        info: Value,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::put(format!("{}/setting/kick/{}/{}", BASE, kick.path(), job_kick_id))
                .json(info);
        self.client.execute(request).await
    }

    pub async fn delete_kick_type<S: AsRef<str>>(
        &self,
        kick: KickType,
        jobkick_ids: &[S],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/setting/kick/{}", BASE, kick.path()))
            .query("jobkickIds", join_ids(jobkick_ids));
        self.client.execute(request).await
    }

    pub async fn get_kick_list(&self) -> Result<Value, ApiError> {
        self.get(format!("{}/setting/kick", BASE)).await
    }

    pub async fn get_kick_detail(&self, job_kick_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/setting/kick/{}", BASE, job_kick_id))
            .await
    }

    pub async fn kick_search(&self, condition: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/kick_search", BASE)).json(condition);
        self.client.execute(request).await
    }

    pub async fn set_kick_valid(&self, set_status: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/setting/kick_valid", BASE)).json(set_status);
        self.client.execute(request).await
    }

    pub async fn delete_kick<S: AsRef<str>>(&self, jobkick_ids: &[S]) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/setting/kick", BASE))
            .query("jobkickIds", join_ids(jobkick_ids));
        self.client.execute(request).await
    }

    pub async fn get_schedule_plan(&self, plan: Value) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post(format!("{}/setting/kick/schedule_plan", BASE)).json(plan);
        self.client.execute(request).await
    }

    pub async fn delete_premake_job_session(&self, jobkick_id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/setting/premakejobsession", BASE))
            .query("jobkickId", jobkick_id);
        self.client.execute(request).await
    }

    // ========================================================================
    // Approvals
    // ========================================================================

    pub async fn session_approval_search(&self, request_body: Value) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post(format!("{}/session_approval_search", BASE)).json(request_body);
        self.client.execute(request).await
    }

    pub async fn modify_approval_info(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
        info: Value,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!(
            "{}/session_approval/{}/jobunit/{}/job/{}",
            BASE, session_id, jobunit_id, job_id
        ))
        .json(info);
        self.client.execute(request).await
    }

    // ========================================================================
    // Queues
    // ========================================================================

    pub async fn get_queue_list(&self, role_id: Option<&str>) -> Result<Value, ApiError> {
        let request =
            ApiRequest::get(format!("{}/setting/queue", BASE)).query_opt("roleId", role_id);
        self.client.execute(request).await
    }

    pub async fn get_queue_detail(&self, queue_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/setting/queue/{}", BASE, queue_id))
            .await
    }

    pub async fn add_queue(&self, queue: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/queue", BASE)).json(queue);
        self.client.execute(request).await
    }

    pub async fn modify_queue(&self, queue_id: &str, queue: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::put(format!("{}/setting/queue/{}", BASE, queue_id)).json(queue);
        self.client.execute(request).await
    }

    pub async fn delete_queue<S: AsRef<str>>(&self, queue_ids: &[S]) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/setting/queue", BASE))
            .query("queueIds", join_ids(queue_ids));
        self.client.execute(request).await
    }

    pub async fn queue_search(&self, search: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/setting/queue_search", BASE)).json(search);
        self.client.execute(request).await
    }

    pub async fn queue_activity_search(&self, request_body: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/queueActivity_search", BASE)).json(request_body);
        self.client.execute(request).await
    }

    pub async fn queue_activity_detail(&self, queue_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/queueActivity_detail/{}", BASE, queue_id))
            .await
    }

    // ========================================================================
    // Joblink
    // ========================================================================

    pub async fn get_joblinksend_setting_list(
        &self,
        owner_role_id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(format!("{}/joblinksend_setting", BASE))
            .query_opt("ownerRoleId", owner_role_id);
        self.client.execute(request).await
    }

    pub async fn get_joblinksend_setting_detail(&self, setting_id: &str) -> Result<Value, ApiError> {
        self.get(format!("{}/joblinksend_setting/{}", BASE, setting_id))
            .await
    }

    pub async fn add_joblinksend_setting(&self, setting: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/joblinksend_setting", BASE)).json(setting);
        self.client.execute(request).await
    }

    pub async fn modify_joblinksend_setting(
        &self,
        setting_id: &str,
        setting: Value,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::put(format!("{}/joblinksend_setting/{}", BASE, setting_id)).json(setting);
        self.client.execute(request).await
    }

    pub async fn delete_joblinksend_setting<S: AsRef<str>>(
        &self,
        setting_ids: &[S],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("{}/joblinksend_setting", BASE))
            .query("joblinkSendSettingIds", join_ids(setting_ids));
        self.client.execute(request).await
    }

    pub async fn regist_joblink_message(&self, message: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/joblink_message", BASE)).json(message);
        self.client.execute(request).await
    }

    pub async fn send_joblink_message_manual(&self, message: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("{}/joblink_message_manual", BASE)).json(message);
        self.client.execute(request).await
    }

    pub async fn joblink_message_search(&self, request_body: Value) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post(format!("{}/joblink_message_search", BASE)).json(request_body);
        self.client.execute(request).await
    }

    // ========================================================================
    // RPA
    // ========================================================================

    pub async fn get_rpa_login_resolution(&self) -> Result<Value, ApiError> {
        self.get(format!("{}/setting/rpa_login_resolution", BASE))
            .await
    }

    /// Screenshot entries recorded for one node of an RPA job.
    pub async fn get_rpa_screenshot(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
        facility_id: &str,
    ) -> Result<Value, ApiError> {
        self.get(format!(
            "{}/sessionNode_operation/screenshot/{}/jobunit/{}/job/{}/facility/{}",
            BASE, session_id, jobunit_id, job_id, facility_id
        ))
        .await
    }

    /// Raw image bytes of one screenshot.
    pub async fn get_rpa_screenshot_file(
        &self,
        session_id: &str,
        jobunit_id: &str,
        job_id: &str,
        facility_id: &str,
        reg_date: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let request = ApiRequest::get(format!(
            "{}/sessionNode_operation/screenshot_file/{}/jobunit/{}/job/{}/facility/{}/regdate/{}",
            BASE, session_id, jobunit_id, job_id, facility_id, reg_date
        ));
        self.client.download(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joblink_paths_differ_between_add_and_modify() {
        assert_eq!(JobType::JoblinkSend.add_path(), "joblinksendJob");
        assert_eq!(JobType::JoblinkSend.modify_path(), "joblinkSendJob");
        assert_eq!(JobType::JoblinkRcv.add_path(), "joblinkrcvJob");
        assert_eq!(JobType::JoblinkRcv.modify_path(), "joblinkRcvJob");
        assert_eq!(JobType::Command.modify_path(), "commandJob");
    }

    #[test]
    fn test_tool_suffix_round_trip() {
        for job_type in JobType::ALL {
            assert_eq!(JobType::from_tool_suffix(job_type.tool_suffix()), Some(job_type));
        }
        for kick in KickType::ALL {
            assert_eq!(KickType::from_path(kick.path()), Some(kick));
        }
        assert_eq!(JobType::from_tool_suffix("jobnet_job"), None);
    }
}
