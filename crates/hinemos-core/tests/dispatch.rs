//! Tool dispatch and capability requests against a fake manager.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Map, Value};

use common::{FakeHinemos, Reply};
use hinemos_core::api::{JobType, MonitorKind};
use hinemos_core::{DispatchOutcome, ToolError, ToolOutput, ToolRegistry};

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test args must be an object"),
    }
}

fn completed_json(outcome: DispatchOutcome) -> Value {
    match outcome {
        DispatchOutcome::Completed(ToolOutput::Json(value)) => value,
        other => panic!("expected JSON output, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dispatch_matches_direct_call() {
    let fake = FakeHinemos::start().await;
    fake.set_reply(Reply::Json(
        StatusCode::OK,
        json!([{"facilityId": "WEB1"}, {"facilityId": "DB1"}]),
    ));
    let client = fake.client();
    let registry = ToolRegistry::hinemos().unwrap();

    let dispatched = registry
        .dispatch(
            "get_node_list",
            &client,
            args(json!({"parent_facility_id": "ROOT", "size": 50})),
        )
        .await
        .unwrap();
    let via_tool = completed_json(dispatched);
    let tool_request = fake.last_request();

    let direct = client
        .repository()
        .get_node_list(Some("ROOT"), Some(50), None)
        .await
        .unwrap();
    let direct_request = fake.last_request();

    assert_eq!(via_tool, direct);
    assert_eq!(tool_request.path, direct_request.path);
    assert_eq!(tool_request.query, direct_request.query);
    assert_eq!(tool_request.path, "/HinemosWeb/api/RepositoryRestEndpoints/repository/node_withoutNodeConfigInfo");
    assert_eq!(tool_request.query_value("parentFacilityId"), Some("ROOT"));
    assert_eq!(tool_request.query_value("size"), Some("50"));
    assert_eq!(tool_request.query_value("level"), None);
}

#[tokio::test]
async fn test_unknown_tool_makes_no_request() {
    let fake = FakeHinemos::start().await;
    let registry = ToolRegistry::hinemos().unwrap();

    let outcome = registry
        .dispatch("drop_all_nodes", &fake.client(), Map::new())
        .await
        .unwrap();

    assert!(matches!(outcome, DispatchOutcome::UnknownTool));
    assert_eq!(fake.logins(), 0);
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_argument_errors_propagate() {
    let fake = FakeHinemos::start().await;
    let registry = ToolRegistry::hinemos().unwrap();

    let err = registry
        .dispatch("get_calendar", &fake.client(), Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::MissingArgument(ref k) if k == "calendar_id"));

    let err = registry
        .dispatch(
            "delete_node",
            &fake.client(),
            args(json!({"facility_ids": []})),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArgument { ref name, .. } if name == "facility_ids"));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_remote_errors_propagate_through_dispatch() {
    let fake = FakeHinemos::start().await;
    fake.set_reply(Reply::Json(
        StatusCode::NOT_FOUND,
        json!({"message": "Node not found: GHOST"}),
    ));
    let registry = ToolRegistry::hinemos().unwrap();

    let err = registry
        .dispatch("get_node", &fake.client(), args(json!({"facility_id": "GHOST"})))
        .await
        .unwrap_err();
    match err {
        ToolError::Api(api) => {
            assert_eq!(api.status(), Some(404));
            assert!(api.to_string().contains("GHOST"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_id_lists_are_comma_joined() {
    let fake = FakeHinemos::start().await;
    let registry = ToolRegistry::hinemos().unwrap();
    let client = fake.client();

    registry
        .dispatch(
            "delete_node",
            &client,
            args(json!({"facility_ids": ["NODE001", "NODE002"]})),
        )
        .await
        .unwrap();
    let request = fake.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.query_value("facilityIds"), Some("NODE001,NODE002"));

    registry
        .dispatch("delete_queue", &client, args(json!({"queueIds": "Q1, Q2"})))
        .await
        .unwrap();
    assert_eq!(fake.last_request().query_value("queueIds"), Some("Q1,Q2"));
}

#[tokio::test]
async fn test_calendar_times_are_normalized() {
    let fake = FakeHinemos::start().await;
    let registry = ToolRegistry::hinemos().unwrap();
    let client = fake.client();

    registry
        .dispatch(
            "modify_calendar",
            &client,
            args(json!({
                "calendar_id": "CAL_001",
                "calendar_info": {
                    "calendarName": "Business days",
                    "validTimeFrom": "2024-01-01T00:00:00.000Z",
                    "validTimeTo": "not a date"
                }
            })),
        )
        .await
        .unwrap();

    let request = fake.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(
        request.path,
        "/HinemosWeb/api/CalendarRestEndpoints/calendar/calendar/CAL_001"
    );
    let body = request.body.unwrap();
    assert_eq!(body["validTimeFrom"], "2024-01-01 00:00:00.000");
    assert_eq!(body["validTimeTo"], "not a date");
    assert_eq!(body["calendarName"], "Business days");
}

#[tokio::test]
async fn test_monitor_kind_paths() {
    let fake = FakeHinemos::start().await;
    let registry = ToolRegistry::hinemos().unwrap();
    let client = fake.client();

    registry
        .dispatch(
            "add_http_scenario_monitor",
            &client,
            args(json!({"monitor_info": {"monitorId": "HTTPS_1"}})),
        )
        .await
        .unwrap();
    let request = fake.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.path,
        format!(
            "/HinemosWeb/api/MonitorsettingRestEndpoints/monitorsetting/{}",
            MonitorKind::HttpScenario.path()
        )
    );
    assert_eq!(request.body, Some(json!({"monitorId": "HTTPS_1"})));

    registry
        .dispatch("get_ping_list", &client, Map::new())
        .await
        .unwrap();
    let request = fake.last_request();
    assert_eq!(request.path, "/HinemosWeb/api/MonitorsettingRestEndpoints/monitorsetting/ping");
    assert!(request.query.is_empty());
}

#[tokio::test]
async fn test_joblink_paths_differ_between_add_and_modify() {
    let fake = FakeHinemos::start().await;
    let client = fake.client();
    let job = client.job();

    job.add_job(JobType::JoblinkSend, "JU1", json!({"id": "J1"}))
        .await
        .unwrap();
    assert_eq!(
        fake.last_request().path,
        "/HinemosWeb/api/JobRestEndpoints/job/setting/jobunit/JU1/joblinksendJob"
    );

    job.modify_job(JobType::JoblinkSend, "JU1", "J1", json!({"id": "J1"}))
        .await
        .unwrap();
    assert_eq!(
        fake.last_request().path,
        "/HinemosWeb/api/JobRestEndpoints/job/setting/jobunit/JU1/joblinkSendJob/J1"
    );
}

#[tokio::test]
async fn test_event_download_returns_bytes() {
    let fake = FakeHinemos::start().await;
    fake.set_reply(Reply::Bytes("application/octet-stream", b"id,priority\n1,CRITICAL\n".to_vec()));
    let registry = ToolRegistry::hinemos().unwrap();

    let outcome = registry
        .dispatch(
            "event_download",
            &fake.client(),
            args(json!({"filter": {"priorityList": ["CRITICAL"]}, "filename": "events.csv"})),
        )
        .await
        .unwrap();

    match outcome {
        DispatchOutcome::Completed(ToolOutput::Binary {
            bytes,
            mime_type,
            file_name,
        }) => {
            assert_eq!(bytes, b"id,priority\n1,CRITICAL\n");
            assert_eq!(mime_type, "text/csv");
            assert_eq!(file_name.as_deref(), Some("events.csv"));
        }
        other => panic!("expected binary output, got {:?}", other),
    }
    let body = fake.last_request().body.unwrap();
    assert_eq!(body["filename"], "events.csv");
    assert_eq!(body["filter"]["priorityList"][0], "CRITICAL");
}
