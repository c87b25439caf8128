//! Contract tests for the reqwest collaborator client.

#![cfg(feature = "remote-api")]

use routine_rust::api::{RunStatus, ScheduleRunId, SemesterOfferingId};
use routine_rust::remote::{HttpRoutineApi, RemoteError, RunApi, SolverApi};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_body(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "semester_offering_id": 1,
        "status": status,
        "generated_at": "2025-03-09T10:00:00Z",
        "meta": {
            "total_blocks": 2,
            "placed_blocks": 2,
            "unplaced_blocks": 0
        },
        "entries": [
            {
                "id": 1,
                "schedule_run_id": id,
                "course_offering_id": 100,
                "teacher_id": 5,
                "room_id": 10,
                "day_of_week": 1,
                "slot_number": 1
            },
            {
                "id": 2,
                "schedule_run_id": id,
                "course_offering_id": 100,
                "teacher_id": 5,
                "room_id": 10,
                "day_of_week": 1,
                "slot_number": 2
            }
        ]
    })
}

#[tokio::test]
async fn test_generate_posts_offering_and_decodes_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/routines/generate"))
        .and(body_json(json!({"semester_offering_id": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body(7, "DRAFT")))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpRoutineApi::new(server.uri()).unwrap();
    let run = api.generate(SemesterOfferingId::new(1)).await.unwrap();

    assert_eq!(run.id, ScheduleRunId::new(7));
    assert_eq!(run.status, RunStatus::Draft);
    assert_eq!(run.entries.len(), 2);
    assert_eq!(run.meta.unwrap().placed_blocks, 2);
}

#[tokio::test]
async fn test_commit_error_body_preserved_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/routines/7/commit"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("run 7 is CANCELLED and cannot be committed"),
        )
        .mount(&server)
        .await;

    let api = HttpRoutineApi::new(server.uri()).unwrap();
    let err = api.commit(ScheduleRunId::new(7)).await.unwrap_err();

    match err {
        RemoteError::Status { status, body, .. } => {
            assert_eq!(status, 409);
            assert_eq!(body, "run 7 is CANCELLED and cannot be committed");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/routines/7/cancel"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpRoutineApi::new(server.uri()).unwrap();
    api.cancel(ScheduleRunId::new(7)).await.unwrap();
}

#[tokio::test]
async fn test_list_runs_decodes_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/semester-offerings/1/routines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            run_body(7, "COMMITTED"),
            run_body(6, "CANCELLED"),
        ])))
        .mount(&server)
        .await;

    let api = HttpRoutineApi::new(server.uri()).unwrap();
    let runs = api
        .list_runs_by_offering(SemesterOfferingId::new(1))
        .await
        .unwrap();

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].status, RunStatus::Committed);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/routines/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = HttpRoutineApi::new(server.uri()).unwrap();
    let err = api.get_run(ScheduleRunId::new(7)).await.unwrap_err();
    assert!(matches!(err, RemoteError::Decode { .. }));
}

#[tokio::test]
async fn test_transport_error_when_server_unreachable() {
    // Bind-then-drop guarantees a port with no listener.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let api = HttpRoutineApi::new(uri).unwrap();
    let err = api.get_run(ScheduleRunId::new(7)).await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport { .. }));
}
