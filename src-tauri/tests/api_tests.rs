use std::collections::HashMap;
use std::path::Path;

use exoscope_tauri::api::router::{NETWORK_ERROR, NOT_FOUND, SESSION_EXPIRED, UNEXPECTED_RESPONSE};
use exoscope_tauri::session::{FileStorage, SessionStorage, TOKEN_KEY, USER_ID_KEY};
use exoscope_tauri::{AppState, ClientConfig, Dataset, ExoError, PredictionRequest};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(&server.uri())
        .expect("mock server URI is a valid base URL")
}

fn state_with_file(server: &MockServer, file: &Path) -> AppState {
    AppState::new(&config_for(server), FileStorage::new(file)).expect("Failed to build state")
}

async fn logged_in(server: &MockServer, file: &Path, user_id: &str) -> AppState {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "user_id": user_id
        })))
        .mount(server)
        .await;

    let state = state_with_file(server, file);
    state.login("a@b.com", "secret1").await.expect("login failed");
    state
}

fn kepler_primaries() -> HashMap<String, Option<f64>> {
    Dataset::Kepler
        .required()
        .iter()
        .map(|id| {
            let default = Dataset::Kepler.param(id).map(|p| p.default);
            (id.to_string(), default)
        })
        .collect()
}

#[tokio::test]
async fn test_login_stores_session_and_logout_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_string_contains("username=a%40b.com"))
        .and(body_string_contains("password=secret1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "user_id": "7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let state = state_with_file(&server, &file);

    let info = state.login("a@b.com", "secret1").await.unwrap();
    assert_eq!(info.user_id, 7);
    assert_eq!(state.session.token().as_deref(), Some("tok"));

    let on_disk = FileStorage::new(&file);
    assert_eq!(on_disk.read(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
    assert_eq!(on_disk.read(USER_ID_KEY).unwrap().as_deref(), Some("7"));

    state.logout().unwrap();
    assert!(!state.session.is_authenticated());
    assert_eq!(on_disk.read(TOKEN_KEY).unwrap(), None);
    assert_eq!(on_disk.read(USER_ID_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    drop(logged_in(&server, &file, "12").await);

    let restarted = state_with_file(&server, &file);
    assert_eq!(restarted.session.user_id(), Some(12));
    assert_eq!(restarted.session.token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_login_failure_reports_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state = state_with_file(&server, &dir.path().join("session.json"));
    let mut notices = state.subscribe_notices();
    let err = state.login("a@b.com", "wrong").await.unwrap_err();

    // Bad credentials are reported by the form only, never as an expired session
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!state.session.is_authenticated());
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_signup_rejection_is_not_routed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state = state_with_file(&server, &dir.path().join("session.json"));
    let mut notices = state.subscribe_notices();
    let err = state.signup("Ada", "ada@example.com", "pw123456").await.unwrap_err();

    assert_eq!(err.to_string(), "Email already registered");
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_bearer_token_and_user_id_are_sent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = logged_in(&server, &dir.path().join("session.json"), "7").await;

    Mock::given(method("GET"))
        .and(path("/predictions/"))
        .and(header("authorization", "Bearer tok"))
        .and(query_param("user_id", "7"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [
                { "prediction_id": "p1", "prediction": 1, "confidence": 0.93, "created_at": "2025-10-05T12:00:00" },
                { "prediction_id": "p2", "prediction": 0, "confidence": 0.61, "created_at": "2025-10-04T08:30:00" }
            ],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = state.list_predictions(Dataset::Kepler, None, None).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.predictions[0].prediction.as_str(), "1");
    assert_eq!(page.predictions[1].confidence_percent(), 61.0);
    assert_eq!(page.predictions[0].created_label.as_deref(), Some("Oct 5, 2025 12:00"));
}

#[tokio::test]
async fn test_get_prediction_fetches_one_record() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = logged_in(&server, &dir.path().join("session.json"), "7").await;

    Mock::given(method("GET"))
        .and(path("/tess/predictions/t9"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction_id": "t9",
            "prediction": "PC",
            "confidence": 0.874,
            "timestamp": "2025-10-05T12:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = state.get_prediction(Dataset::Tess, " t9 ").await.unwrap();
    assert_eq!(record.prediction_id, "t9");
    assert_eq!(record.prediction.as_str(), "PC");
    assert_eq!(record.created_label.as_deref(), Some("Oct 5, 2025 12:00"));
}

#[tokio::test]
async fn test_tess_prediction_fills_blank_fields_with_defaults() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = logged_in(&server, &dir.path().join("session.json"), "7").await;

    let mut expected = PredictionRequest::defaults(Dataset::Tess).to_json();
    expected["pl_orbper"] = json!(12.3);

    Mock::given(method("POST"))
        .and(path("/tess/predictions/predict"))
        .and(query_param("user_id", "7"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prediction": "PC",
            "confidence": 0.71,
            "prediction_id": "t1",
            "timestamp": "2025-10-05T12:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut values: HashMap<String, Option<f64>> = Dataset::Tess
        .schema()
        .iter()
        .map(|p| (p.id.to_string(), None))
        .collect();
    values.insert("pl_orbper".into(), Some(12.3));

    let outcome = state.predict(Dataset::Tess, &values).await.unwrap();
    assert_eq!(outcome.prediction.as_str(), "PC");
    assert_eq!(outcome.prediction_id, "t1");
}

#[tokio::test]
async fn test_missing_required_fields_send_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = logged_in(&server, &dir.path().join("session.json"), "7").await;

    Mock::given(method("POST"))
        .and(path("/predictions/predict"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut values = kepler_primaries();
    values.insert("koi_prad".into(), None);

    match state.predict(Dataset::Kepler, &values).await {
        Err(ExoError::MissingParameters(missing)) => assert_eq!(missing, vec!["koi_prad".to_string()]),
        other => panic!("expected MissingParameters, got {:?}", other),
    }
}

#[tokio::test]
async fn test_401_clears_session_and_publishes_notice() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let state = logged_in(&server, &file, "7").await;
    let mut notices = state.subscribe_notices();

    Mock::given(method("POST"))
        .and(path("/predictions/predict"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&server)
        .await;

    let err = state.predict(Dataset::Kepler, &kepler_primaries()).await.unwrap_err();
    assert_eq!(err.to_string(), "Could not validate credentials");

    assert!(!state.session.is_authenticated());
    assert_eq!(FileStorage::new(&file).read(TOKEN_KEY).unwrap(), None);

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.message, SESSION_EXPIRED);
    assert_eq!(notice.status, Some(401));
}

#[tokio::test]
async fn test_delete_and_missing_prediction() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = logged_in(&server, &dir.path().join("session.json"), "7").await;
    let mut notices = state.subscribe_notices();

    Mock::given(method("DELETE"))
        .and(path("/tess/predictions/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Prediction deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tess/predictions/t1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Prediction not found" })))
        .mount(&server)
        .await;

    state.delete_prediction(Dataset::Tess, "t1").await.unwrap();

    let err = state.get_prediction(Dataset::Tess, "t1").await.unwrap_err();
    assert_eq!(err.to_string(), "Prediction not found");
    assert_eq!(notices.try_recv().unwrap().message, NOT_FOUND);
    assert!(state.session.is_authenticated());
}

#[tokio::test]
async fn test_undecodable_success_uses_fallback() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = logged_in(&server, &dir.path().join("session.json"), "7").await;

    Mock::given(method("GET"))
        .and(path("/predictions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let mut notices = state.subscribe_notices();
    let err = state.list_predictions(Dataset::Kepler, None, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch predictions");
    assert_eq!(notices.try_recv().unwrap().message, UNEXPECTED_RESPONSE);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:9")
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let storage = FileStorage::new(&file);
    storage.write(TOKEN_KEY, "tok").unwrap();
    storage.write(USER_ID_KEY, "7").unwrap();

    let state = AppState::new(&config, FileStorage::new(&file)).unwrap();
    let mut notices = state.subscribe_notices();

    let err = state.list_predictions(Dataset::Kepler, None, None).await.unwrap_err();
    assert!(err.to_string().starts_with("Network error"), "got {}", err);
    assert_eq!(notices.try_recv().unwrap().message, NETWORK_ERROR);
    assert!(state.session.is_authenticated());

    // Login shows the same message inline but raises no toast
    let err = state.login("a@b.com", "secret1").await.unwrap_err();
    assert!(err.to_string().starts_with("Network error"), "got {}", err);
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_signup_returns_created_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(json!({ "name": "Ada", "email": "ada@example.com", "password": "pw123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "name": "Ada", "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state = state_with_file(&server, &dir.path().join("session.json"));
    let user: Value = state.signup("Ada", "ada@example.com", "pw123456").await.unwrap();
    assert_eq!(user["id"], 5);
    assert!(!state.session.is_authenticated());
}
