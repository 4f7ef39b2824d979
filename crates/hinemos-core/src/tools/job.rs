//! Job tools.
//!
//! Argument names are camelCase, matching the Hinemos job API fields.
//! Per-job-type and per-kick-type tools are generated from `JobType` and
//! `KickType`.

use futures::future::BoxFuture;

use super::schema::Schema;
use super::{ToolArgs, ToolDescriptor, ToolError, ToolGroup, ToolOutput};
use crate::api::{HinemosClient, JobType, KickType, OperationCheck};

const SCREENSHOT_MIME_TYPE: &str = "image/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Generated {
    AddJob(JobType),
    ModifyJob(JobType),
    AddKick(KickType),
    KickDetail(KickType),
    ModifyKick(KickType),
    DeleteKick(KickType),
}

/// Kick-level joblinkrcv registration; `add_joblinkrcv_job` is the job type.
fn add_kick_tool_name(kick: KickType) -> String {
    format!("add_{}", kick.path())
}

fn parse_generated(tool: &str) -> Option<Generated> {
    if let Some(rest) = tool.strip_prefix("add_") {
        JobType::from_tool_suffix(rest)
            .map(Generated::AddJob)
            .or_else(|| KickType::from_path(rest).map(Generated::AddKick))
    } else if let Some(rest) = tool.strip_prefix("modify_") {
        JobType::from_tool_suffix(rest)
            .map(Generated::ModifyJob)
            .or_else(|| KickType::from_path(rest).map(Generated::ModifyKick))
    } else if let Some(rest) = tool.strip_prefix("get_") {
        KickType::from_path(rest.strip_suffix("_detail")?).map(Generated::KickDetail)
    } else {
        KickType::from_path(tool.strip_prefix("delete_")?).map(Generated::DeleteKick)
    }
}

/// Argument holding the job definition for add/modify of a job type.
fn job_body_key(job_type: JobType) -> &'static str {
    match job_type {
        JobType::Jobnet => "jobnet",
        _ => "job",
    }
}

fn session_job_schema() -> Schema {
    Schema::object()
        .string("sessionId", "Session ID")
        .string("jobunitId", "Jobunit ID")
        .string("jobId", "Job ID")
}

fn session_node_schema() -> Schema {
    session_job_schema().string("facilityId", "Facility ID")
}

fn owner_role_schema() -> serde_json::Value {
    Schema::object()
        .string("ownerRoleId", "Owner role ID filter (optional)")
        .build()
}

fn object_schema(name: &str, description: &str) -> serde_json::Value {
    Schema::object()
        .json_object(name, description)
        .required(&[name])
        .build()
}

fn job_type_tools(job_type: JobType) -> [ToolDescriptor; 2] {
    let key = job_body_key(job_type);
    let label = job_type.label();
    [
        ToolDescriptor::new(
            format!("add_{}", job_type.tool_suffix()),
            format!("Add a {} to a jobunit", label),
            Schema::object()
                .string("jobunitId", "Jobunit ID")
                .json_object(key, "Job definition")
                .required(&["jobunitId", key])
                .build(),
        ),
        ToolDescriptor::new(
            format!("modify_{}", job_type.tool_suffix()),
            format!("Update a {}", label),
            Schema::object()
                .string("jobunitId", "Jobunit ID")
                .string("jobId", "Job ID")
                .json_object(key, "Job definition")
                .required(&["jobunitId", "jobId", key])
                .build(),
        ),
    ]
}

fn kick_type_tools(kick: KickType) -> [ToolDescriptor; 4] {
    let key = kick.path();
    let label = kick.label();
    [
        ToolDescriptor::new(
            add_kick_tool_name(kick),
            format!("Add a {}", label),
            object_schema(key, "Job kick definition"),
        ),
        ToolDescriptor::new(
            format!("get_{}_detail", key),
            format!("Get a {}", label),
            Schema::object()
                .string("jobKickId", "Job kick ID")
                .required(&["jobKickId"])
                .build(),
        ),
        ToolDescriptor::new(
            format!("modify_{}", key),
            format!("Update a {}", label),
            Schema::object()
                .string("jobKickId", "Job kick ID")
                .json_object(key, "Job kick definition")
                .required(&["jobKickId", key])
                .build(),
        ),
        ToolDescriptor::new(
            format!("delete_{}", key),
            format!("Delete {} entries", label),
            Schema::object()
                .string("jobkickIds", "Comma-separated job kick IDs")
                .required(&["jobkickIds"])
                .build(),
        ),
    ]
}

pub struct JobTools;

impl ToolGroup for JobTools {
    fn name(&self) -> &'static str {
        "job"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        let mut tools = vec![
            ToolDescriptor::new(
                "get_job_tree_simple",
                "Get the job tree without job details",
                owner_role_schema(),
            ),
            ToolDescriptor::new(
                "get_job_tree_full",
                "Get the job tree with full job details",
                owner_role_schema(),
            ),
            ToolDescriptor::new(
                "get_job_info",
                "Get one job definition",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .string("jobId", "Job ID")
                    .required(&["jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_job_info_bulk",
                "Get several job definitions, e.g. [{\"jobunitId\": \"JU1\", \"jobId\": \"J1\"}]",
                Schema::object()
                    .object_array("jobList", "Jobunit/job ID pairs")
                    .required(&["jobList"])
                    .build(),
            ),
            ToolDescriptor::new(
                "add_jobunit",
                "Register a jobunit",
                Schema::object()
                    .json_object("jobunit", "Jobunit definition")
                    .boolean("isClient", "Called from a client (default false)")
                    .required(&["jobunit"])
                    .build(),
            ),
            ToolDescriptor::new(
                "modify_jobunit",
                "Update a jobunit",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .json_object("jobunit", "Jobunit definition")
                    .boolean("isClient", "Called from a client (default false)")
                    .required(&["jobunitId", "jobunit"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_jobunit",
                "Delete a jobunit",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .required(&["jobunitId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_edit_lock",
                "Acquire the edit lock of a jobunit",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .string("updateTime", "Last update time of the jobunit")
                    .boolean("forceFlag", "Take the lock from another session")
                    .required(&["jobunitId", "updateTime", "forceFlag"])
                    .build(),
            ),
            ToolDescriptor::new(
                "check_edit_lock",
                "Check that an edit lock is still held",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .integer("editSession", "Edit session number")
                    .required(&["jobunitId", "editSession"])
                    .build(),
            ),
            ToolDescriptor::new(
                "release_edit_lock",
                "Release an edit lock",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .integer("editSession", "Edit session number")
                    .required(&["jobunitId", "editSession"])
                    .build(),
            ),
        ];

        for job_type in JobType::ALL {
            tools.extend(job_type_tools(job_type));
        }

        tools.extend([
            ToolDescriptor::new(
                "delete_job",
                "Delete a job from a jobunit",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .string("jobId", "Job ID")
                    .required(&["jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_job_referrer_queue",
                "List jobs that reference a job queue",
                Schema::object()
                    .string("queueId", "Queue ID")
                    .required(&["queueId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_jobmap_icon_image_iconId",
                "List job map icon IDs",
                owner_role_schema(),
            ),
            ToolDescriptor::new(
                "run_job",
                "Run a job immediately",
                Schema::object()
                    .string("jobunitId", "Jobunit ID")
                    .string("jobId", "Job ID")
                    .json_object("runJobRequest", "Run options, e.g. {\"jobWaitTime\": false}")
                    .required(&["jobunitId", "jobId", "runJobRequest"])
                    .build(),
            ),
            ToolDescriptor::new(
                "run_job_kick",
                "Run the job bound to a job kick",
                Schema::object()
                    .string("jobKickId", "Job kick ID")
                    .json_object("runJobKickRequest", "Run options")
                    .required(&["jobKickId", "runJobKickRequest"])
                    .build(),
            ),
            ToolDescriptor::new(
                "session_job_operation",
                "Operate on a session job (start, stop, suspend, skip ...)",
                session_job_schema()
                    .json_object("operation", "Operation, e.g. {\"controlOperation\": \"STOP_AT_ONCE\"}")
                    .required(&["sessionId", "jobunitId", "jobId", "operation"])
                    .build(),
            ),
            ToolDescriptor::new(
                "session_node_operation",
                "Operate on one node of a session job",
                session_node_schema()
                    .json_object("operation", "Operation")
                    .required(&["sessionId", "jobunitId", "jobId", "facilityId", "operation"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_session_job_detail",
                "List the jobs of a session",
                Schema::object()
                    .string("sessionId", "Session ID")
                    .required(&["sessionId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_session_node_detail",
                "List the node results of a session job",
                session_job_schema()
                    .required(&["sessionId", "jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_session_file_detail",
                "List the file transfers of a session job",
                session_job_schema()
                    .required(&["sessionId", "jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_session_job_jobInfo",
                "Get the job definition a session job ran with",
                session_job_schema()
                    .required(&["sessionId", "jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_session_job_allDetail",
                "Get every detail of a session",
                Schema::object()
                    .string("sessionId", "Session ID")
                    .required(&["sessionId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "history_search",
                "Search job execution history",
                Schema::object()
                    .integer("size", "Maximum number of entries")
                    .json_object("filter", "History filter, e.g. {\"jobId\": \"J1\", \"status\": \"END\"}")
                    .required(&["size", "filter"])
                    .build(),
            ),
            ToolDescriptor::new(
                "available_start_operation",
                "List start operations currently allowed on a session job",
                session_job_schema()
                    .required(&["sessionId", "jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "available_start_operation_node",
                "List start operations currently allowed on one node of a session job",
                session_node_schema()
                    .required(&["sessionId", "jobunitId", "jobId", "facilityId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "available_stop_operation",
                "List stop operations currently allowed on a session job",
                session_job_schema()
                    .required(&["sessionId", "jobunitId", "jobId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "available_stop_operation_node",
                "List stop operations currently allowed on one node of a session job",
                session_node_schema()
                    .required(&["sessionId", "jobunitId", "jobId", "facilityId"])
                    .build(),
            ),
        ]);

        for kick in KickType::ALL {
            tools.extend(kick_type_tools(kick));
        }

        tools.extend([
            ToolDescriptor::new("get_kick_list", "List all job kicks", Schema::object().build()),
            ToolDescriptor::new(
                "get_kick_detail",
                "Get a job kick of any type",
                Schema::object()
                    .string("jobKickId", "Job kick ID")
                    .required(&["jobKickId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "kick_search",
                "Search job kicks",
                object_schema("condition", "Search conditions"),
            ),
            ToolDescriptor::new(
                "set_kick_valid",
                "Enable or disable job kicks, e.g. {\"jobkickId\": [\"K1\"], \"validFlag\": true}",
                object_schema("setStatus", "Target kicks and state"),
            ),
            ToolDescriptor::new(
                "delete_kick",
                "Delete job kicks of any type",
                Schema::object()
                    .string("jobkickIds", "Comma-separated job kick IDs")
                    .required(&["jobkickIds"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_schedule_plan",
                "List planned schedule runs",
                object_schema("plan", "Plan filter"),
            ),
            ToolDescriptor::new(
                "delete_premakejobsession",
                "Delete sessions created in advance for a job kick",
                Schema::object()
                    .string("jobkickId", "Job kick ID")
                    .required(&["jobkickId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "session_approval_search",
                "Search approval jobs waiting for a decision",
                object_schema("request", "Search conditions"),
            ),
            ToolDescriptor::new(
                "modify_approval_info",
                "Approve or reject an approval job",
                session_job_schema()
                    .json_object("info", "Approval result and comment")
                    .required(&["sessionId", "jobunitId", "jobId", "info"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_queue_list",
                "List job queues",
                Schema::object()
                    .string("roleId", "Role ID filter (optional)")
                    .build(),
            ),
            ToolDescriptor::new(
                "get_queue_detail",
                "Get a job queue",
                Schema::object()
                    .string("queueId", "Queue ID")
                    .required(&["queueId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "add_queue",
                "Add a job queue, e.g. {\"queueId\": \"Q1\", \"name\": \"Batch\", \"concurrency\": 2}",
                object_schema("queue", "Queue definition"),
            ),
            ToolDescriptor::new(
                "modify_queue",
                "Update a job queue",
                Schema::object()
                    .string("queueId", "Queue ID")
                    .json_object("queue", "Queue definition")
                    .required(&["queueId", "queue"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_queue",
                "Delete job queues",
                Schema::object()
                    .string("queueIds", "Comma-separated queue IDs")
                    .required(&["queueIds"])
                    .build(),
            ),
            ToolDescriptor::new(
                "queue_search",
                "Search job queue settings",
                object_schema("search", "Search conditions"),
            ),
            ToolDescriptor::new(
                "queue_activity_search",
                "Search job queue activity",
                object_schema("request", "Search conditions"),
            ),
            ToolDescriptor::new(
                "queue_activity_detail",
                "List the jobs currently held by a queue",
                Schema::object()
                    .string("queueId", "Queue ID")
                    .required(&["queueId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_joblinksend_setting_list",
                "List joblink send settings",
                owner_role_schema(),
            ),
            ToolDescriptor::new(
                "get_joblinksend_setting_detail",
                "Get a joblink send setting",
                Schema::object()
                    .string("joblinkSendSettingId", "Joblink send setting ID")
                    .required(&["joblinkSendSettingId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "add_joblinksend_setting",
                "Add a joblink send setting",
                object_schema("setting", "Joblink send setting"),
            ),
            ToolDescriptor::new(
                "modify_joblinksend_setting",
                "Update a joblink send setting",
                Schema::object()
                    .string("joblinkSendSettingId", "Joblink send setting ID")
                    .json_object("setting", "Joblink send setting")
                    .required(&["joblinkSendSettingId", "setting"])
                    .build(),
            ),
            ToolDescriptor::new(
                "delete_joblinksend_setting",
                "Delete joblink send settings",
                Schema::object()
                    .string("joblinkSendSettingIds", "Comma-separated setting IDs")
                    .required(&["joblinkSendSettingIds"])
                    .build(),
            ),
            ToolDescriptor::new(
                "regist_joblink_message",
                "Register a joblink message",
                object_schema("message", "Joblink message"),
            ),
            ToolDescriptor::new(
                "send_joblink_message_manual",
                "Send a joblink message manually",
                object_schema("message", "Joblink message"),
            ),
            ToolDescriptor::new(
                "joblink_message_search",
                "Search joblink messages",
                object_schema("request", "Search conditions"),
            ),
            ToolDescriptor::new(
                "get_rpa_login_resolution",
                "List screen resolutions available to RPA logins",
                Schema::object().build(),
            ),
            ToolDescriptor::new(
                "get_rpa_screenshot",
                "List screenshots taken by an RPA job on one node",
                session_node_schema()
                    .required(&["sessionId", "jobunitId", "jobId", "facilityId"])
                    .build(),
            ),
            ToolDescriptor::new(
                "get_rpa_screenshot_file",
                "Download one RPA screenshot as an image",
                session_node_schema()
                    .string("regDate", "Registration date of the screenshot")
                    .required(&["sessionId", "jobunitId", "jobId", "facilityId", "regDate"])
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

async fn available(
    client: &HinemosClient,
    args: &ToolArgs,
    check: OperationCheck,
    per_node: bool,
) -> Result<serde_json::Value, ToolError> {
    let facility_id = if per_node {
        Some(args.required_str("facilityId")?)
    } else {
        None
    };
    Ok(client
        .job()
        .available_operation(
            check,
            args.required_str("sessionId")?,
            args.required_str("jobunitId")?,
            args.required_str("jobId")?,
            facility_id,
        )
        .await?)
}

async fn call(tool: &str, client: &HinemosClient, args: ToolArgs) -> Result<ToolOutput, ToolError> {
    let api = client.job();
    let value = match tool {
        "get_job_tree_simple" => api.get_job_tree_simple(args.optional_str("ownerRoleId")?).await?,
        "get_job_tree_full" => api.get_job_tree_full(args.optional_str("ownerRoleId")?).await?,
        "get_job_info" => {
            api.get_job_info(args.required_str("jobunitId")?, args.required_str("jobId")?)
                .await?
        }
        "get_job_info_bulk" => api.get_job_info_bulk(args.required_array("jobList")?).await?,
        "add_jobunit" => {
            api.add_jobunit(args.required_object("jobunit")?, args.bool_or("isClient", false)?)
                .await?
        }
        "modify_jobunit" => {
            api.modify_jobunit(
                args.required_str("jobunitId")?,
                args.required_object("jobunit")?,
                args.bool_or("isClient", false)?,
            )
            .await?
        }
        "delete_jobunit" => api.delete_jobunit(args.required_str("jobunitId")?).await?,
        "get_edit_lock" => {
            api.get_edit_lock(
                args.required_str("jobunitId")?,
                args.required_str("updateTime")?,
                args.required_bool("forceFlag")?,
            )
            .await?
        }
        "check_edit_lock" => {
            api.check_edit_lock(args.required_str("jobunitId")?, args.required_i64("editSession")?)
                .await?
        }
        "release_edit_lock" => {
            api.release_edit_lock(args.required_str("jobunitId")?, args.required_i64("editSession")?)
                .await?
        }
        "delete_job" => {
            api.delete_job(args.required_str("jobunitId")?, args.required_str("jobId")?)
                .await?
        }
        "get_job_referrer_queue" => api.get_job_referrer_queue(args.required_str("queueId")?).await?,
        "get_jobmap_icon_image_iconId" => {
            api.get_jobmap_icon_image_icon_id(args.optional_str("ownerRoleId")?)
                .await?
        }
        "run_job" => {
            api.run_job(
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
                args.required_object("runJobRequest")?,
            )
            .await?
        }
        "run_job_kick" => {
            api.run_job_kick(
                args.required_str("jobKickId")?,
                args.required_object("runJobKickRequest")?,
            )
            .await?
        }
        "session_job_operation" => {
            api.session_job_operation(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
                args.required_object("operation")?,
            )
            .await?
        }
        "session_node_operation" => {
            api.session_node_operation(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
                args.required_str("facilityId")?,
                args.required_object("operation")?,
            )
            .await?
        }
        "get_session_job_detail" => api.get_session_job_detail(args.required_str("sessionId")?).await?,
        "get_session_node_detail" => {
            api.get_session_node_detail(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
            )
            .await?
        }
        "get_session_file_detail" => {
            api.get_session_file_detail(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
            )
            .await?
        }
        "get_session_job_jobInfo" => {
            api.get_session_job_info(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
            )
            .await?
        }
        "get_session_job_allDetail" => {
            api.get_session_job_all_detail(args.required_str("sessionId")?)
                .await?
        }
        "history_search" => {
            api.history_search(args.required_u64("size")?, args.required_object("filter")?)
                .await?
        }
        "available_start_operation" => available(client, &args, OperationCheck::Start, false).await?,
        "available_start_operation_node" => available(client, &args, OperationCheck::Start, true).await?,
        "available_stop_operation" => available(client, &args, OperationCheck::Stop, false).await?,
        "available_stop_operation_node" => available(client, &args, OperationCheck::Stop, true).await?,
        "get_kick_list" => api.get_kick_list().await?,
        "get_kick_detail" => api.get_kick_detail(args.required_str("jobKickId")?).await?,
        "kick_search" => api.kick_search(args.required_object("condition")?).await?,
        "set_kick_valid" => api.set_kick_valid(args.required_object("setStatus")?).await?,
        "delete_kick" => api.delete_kick(&args.id_list("jobkickIds")?).await?,
        "get_schedule_plan" => api.get_schedule_plan(args.required_object("plan")?).await?,
        "delete_premakejobsession" => {
            api.delete_premake_job_session(args.required_str("jobkickId")?)
                .await?
        }
        "session_approval_search" => {
            api.session_approval_search(args.required_object("request")?)
                .await?
        }
        "modify_approval_info" => {
            api.modify_approval_info(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
                args.required_object("info")?,
            )
            .await?
        }
        "get_queue_list" => api.get_queue_list(args.optional_str("roleId")?).await?,
        "get_queue_detail" => api.get_queue_detail(args.required_str("queueId")?).await?,
        "add_queue" => api.add_queue(args.required_object("queue")?).await?,
        "modify_queue" => {
            api.modify_queue(args.required_str("queueId")?, args.required_object("queue")?)
                .await?
        }
        "delete_queue" => api.delete_queue(&args.id_list("queueIds")?).await?,
        "queue_search" => api.queue_search(args.required_object("search")?).await?,
        "queue_activity_search" => api.queue_activity_search(args.required_object("request")?).await?,
        "queue_activity_detail" => api.queue_activity_detail(args.required_str("queueId")?).await?,
        "get_joblinksend_setting_list" => {
            api.get_joblinksend_setting_list(args.optional_str("ownerRoleId")?)
                .await?
        }
        "get_joblinksend_setting_detail" => {
            api.get_joblinksend_setting_detail(args.required_str("joblinkSendSettingId")?)
                .await?
        }
        "add_joblinksend_setting" => {
            api.add_joblinksend_setting(args.required_object("setting")?)
                .await?
        }
        "modify_joblinksend_setting" => {
            api.modify_joblinksend_setting(
                args.required_str("joblinkSendSettingId")?,
                args.required_object("setting")?,
            )
            .await?
        }
        "delete_joblinksend_setting" => {
            api.delete_joblinksend_setting(&args.id_list("joblinkSendSettingIds")?)
                .await?
        }
        "regist_joblink_message" => api.regist_joblink_message(args.required_object("message")?).await?,
        "send_joblink_message_manual" => {
            api.send_joblink_message_manual(args.required_object("message")?)
                .await?
        }
        "joblink_message_search" => api.joblink_message_search(args.required_object("request")?).await?,
        "get_rpa_login_resolution" => api.get_rpa_login_resolution().await?,
        "get_rpa_screenshot" => {
            api.get_rpa_screenshot(
                args.required_str("sessionId")?,
                args.required_str("jobunitId")?,
                args.required_str("jobId")?,
                args.required_str("facilityId")?,
            )
            .await?
        }
        "get_rpa_screenshot_file" => {
            let bytes = api
                .get_rpa_screenshot_file(
                    args.required_str("sessionId")?,
                    args.required_str("jobunitId")?,
                    args.required_str("jobId")?,
                    args.required_str("facilityId")?,
                    args.required_str("regDate")?,
                )
                .await?;
            return Ok(ToolOutput::Binary {
                bytes,
                mime_type: SCREENSHOT_MIME_TYPE.to_string(),
                file_name: None,
            });
        }
        other => match parse_generated(other) {
            Some(Generated::AddJob(job_type)) => {
                api.add_job(
                    job_type,
                    args.required_str("jobunitId")?,
                    args.required_object(job_body_key(job_type))?,
                )
                .await?
            }
            Some(Generated::ModifyJob(job_type)) => {
                api.modify_job(
                    job_type,
                    args.required_str("jobunitId")?,
                    args.required_str("jobId")?,
                    args.required_object(job_body_key(job_type))?,
                )
                .await?
            }
            Some(Generated::AddKick(kick)) => api.add_kick(kick, args.required_object(kick.path())?).await?,
            Some(Generated::KickDetail(kick)) => {
                api.get_kick_type_detail(kick, args.required_str("jobKickId")?)
                    .await?
            }
            Some(Generated::ModifyKick(kick)) => {
                api.modify_kick(
                    kick,
                    args.required_str("jobKickId")?,
                    args.required_object(kick.path())?,
                )
                .await?
            }
            Some(Generated::DeleteKick(kick)) => {
                api.delete_kick_type(kick, &args.id_list("jobkickIds")?)
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
    use std::collections::HashSet;

    #[test]
    fn test_parse_generated_jobs() {
        assert_eq!(parse_generated("add_jobnet"), Some(Generated::AddJob(JobType::Jobnet)));
        assert_eq!(
            parse_generated("modify_joblinkrcv_job"),
            Some(Generated::ModifyJob(JobType::JoblinkRcv))
        );
        assert_eq!(
            parse_generated("add_filecheck_job"),
            Some(Generated::AddJob(JobType::Filecheck))
        );
    }

    #[test]
    fn test_parse_generated_kicks() {
        assert_eq!(
            parse_generated("add_filecheck"),
            Some(Generated::AddKick(KickType::Filecheck))
        );
        assert_eq!(
            parse_generated("add_joblinkrcv"),
            Some(Generated::AddKick(KickType::Joblinkrcv))
        );
        assert_eq!(
            parse_generated("get_schedule_detail"),
            Some(Generated::KickDetail(KickType::Schedule))
        );
        assert_eq!(
            parse_generated("delete_manual"),
            Some(Generated::DeleteKick(KickType::Manual))
        );
    }

    #[test]
    fn test_parse_generated_ignores_fixed_tools() {
        for name in ["delete_job", "delete_kick", "get_kick_detail", "add_queue", "get_job_info"] {
            assert_eq!(parse_generated(name), None, "{}", name);
        }
    }

    #[test]
    fn test_job_body_key() {
        assert_eq!(job_body_key(JobType::Jobnet), "jobnet");
        assert_eq!(job_body_key(JobType::Command), "job");
    }

    #[test]
    fn test_tool_names_unique() {
        let tools = JobTools.tools();
        let names: HashSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tools.len());
        assert!(names.contains("add_joblinkrcv_job"));
        assert!(names.contains("add_joblinkrcv"));
        assert!(names.contains("get_session_job_allDetail"));
    }

    #[test]
    fn test_generated_tools_all_parse() {
        let generated = JobTools
            .tools()
            .iter()
            .filter(|t| parse_generated(&t.name).is_some())
            .count();
        assert_eq!(generated, JobType::ALL.len() * 2 + KickType::ALL.len() * 4);
    }
}
