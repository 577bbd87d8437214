use chrono::NaiveDate;
use std::time::Duration;
use training_session_client::http_client::ReqwestTrainingSessionClient;
use training_session_client::retry::RetryPolicy;
use training_session_client::{Session, TrainingSessionClient, TrainingSessionError};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(uri: &str) -> ReqwestTrainingSessionClient {
    ReqwestTrainingSessionClient::new(uri)
        .expect("client")
        .with_retry_policy(RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        })
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn get_sessions_sends_query_and_tracing_headers() {
    let server = MockServer::start().await;
    let body = serde_json::json!({"sessions": [
        {"id": "s1", "date": "20240102", "fatigue": 4, "timeInMinutes": 30},
        {"id": "s2", "date": "20240103"}
    ]});

    Mock::given(method("GET"))
        .and(path("/sessions"))
        .and(query_param("dateFrom", "20240101"))
        .and(query_param("sort", "date"))
        .and(query_param("sortDir", "asc"))
        .and(header("x-correlation-id", "cid-42"))
        .and(header_exists("x-msg-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server.uri());
    let sessions = client
        .get_sessions(day(2024, 1, 1), "cid-42")
        .await
        .expect("sessions");
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id.as_deref(), Some("s1"));
    assert_eq!(sessions[0].time_in_minutes, Some(30.0));
    assert_eq!(sessions[1].fatigue, None);

    let received = server.received_requests().await.expect("requests");
    let msg_id = received[0]
        .headers
        .get("x-msg-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(msg_id.starts_with("cid-42-"));
}

#[tokio::test]
async fn get_sessions_treats_missing_list_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let sessions = fast_client(&server.uri())
        .get_sessions(day(2024, 1, 1), "cid")
        .await
        .expect("sessions");
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn get_sessions_drops_undecodable_records() {
    let server = MockServer::start().await;
    let body = serde_json::json!({"sessions": [{"id": "ok", "date": "20240101"}, 7, "nope"]});
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let sessions = fast_client(&server.uri())
        .get_sessions(day(2024, 1, 1), "cid")
        .await
        .expect("sessions");
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(3)
        .mount(&server)
        .await;

    let err = fast_client(&server.uri())
        .get_sessions(day(2024, 1, 1), "cid")
        .await
        .expect_err("should fail");
    match err {
        TrainingSessionError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "busy");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let res = fast_client(&server.uri())
        .get_sessions(day(2024, 1, 1), "cid")
        .await;
    assert!(matches!(res, Err(TrainingSessionError::Status { status: 400, .. })));
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let res = fast_client(&server.uri())
        .get_sessions(day(2024, 1, 1), "cid")
        .await;
    assert!(matches!(res, Err(TrainingSessionError::Decode(_))));
}

#[tokio::test]
async fn get_session_exercises_pairs_session_with_exercises() {
    let server = MockServer::start().await;
    let body = serde_json::json!({"exercises": [
        {"muscleGroupId": "chest", "sessionId": "s1"},
        {"sessionId": "s1"}
    ]});
    Mock::given(method("GET"))
        .and(path("/sessions/s1/exercises"))
        .and(header("x-correlation-id", "cid-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let session = Session {
        id: Some("s1".into()),
        date: Some("20240101".into()),
        ..Session::default()
    };
    let result = fast_client(&server.uri())
        .get_session_exercises(session.clone(), "cid-7")
        .await
        .expect("exercises");
    assert_eq!(result.session, session);
    let exercises = result.exercises.expect("exercise list");
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0].muscle_group_id.as_deref(), Some("chest"));
    assert_eq!(exercises[1].muscle_group_id, None);
}

#[tokio::test]
async fn get_session_exercises_without_list_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions/s9/exercises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"total": 0})))
        .mount(&server)
        .await;

    let session = Session {
        id: Some("s9".into()),
        ..Session::default()
    };
    let result = fast_client(&server.uri())
        .get_session_exercises(session, "cid")
        .await
        .expect("exercises");
    assert_eq!(result.exercises, None);
}

#[tokio::test]
async fn session_without_id_skips_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let result = fast_client(&server.uri())
        .get_session_exercises(Session::default(), "cid")
        .await
        .expect("no request");
    assert_eq!(result.exercises, None);
}
