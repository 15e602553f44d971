//! Black-box tests for the API client against a stub backend.
//!
//! Spins the stub on an ephemeral port and drives the real client over HTTP,
//! so header/query behavior is asserted on the wire, not by inspection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use carelink_auth::Role;
use carelink_client::{
    telemetry, ApiClient, ApiError, ClientConfig, FacilitySelection, InMemoryStore, LoginError,
    SessionContext, SessionState,
};
use carelink_core::{FacilityId, ResidentId};

#[derive(Clone, Default)]
struct Recorded {
    /// `facilityId` query param seen by `/api/residents`, per call.
    resident_queries: Arc<Mutex<Vec<Option<String>>>>,
    /// `Authorization` header seen by `/api/calls`, per call.
    call_auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

struct TestServer {
    base_url: String,
    recorded: Recorded,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        telemetry::init();

        let recorded = Recorded::default();
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/residents", get(list_residents))
            .route("/api/residents/:id", delete(delete_resident))
            .route("/api/calls", get(list_calls))
            .route("/api/staff/concerns", get(concerns))
            .route("/api/staff/check-ins/summary", get(check_in_summary))
            .route("/api/facilities/:id", get(facility_not_found))
            .route("/api/facilities", post(reject_facility))
            .route("/api/books/:id/create", post(forbidden_lifebook))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            recorded,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stub handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "linda@example.com" && body["password"] == "password123" {
        Json(json!({
            "token": "test-token",
            "user": {
                "id": "user-1",
                "email": "linda@example.com",
                "firstName": "Linda",
                "lastName": "Ops",
                "role": "ADMIN",
                "facilityId": "brunnel-001"
            }
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "invalid credentials").into_response()
    }
}

async fn list_residents(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorded
        .resident_queries
        .lock()
        .unwrap()
        .push(params.get("facilityId").cloned());
    Json(json!([]))
}

async fn delete_resident(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_calls(State(recorded): State<Recorded>, headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    recorded.call_auth_headers.lock().unwrap().push(auth);

    (StatusCode::UNAUTHORIZED, "token expired")
}

async fn concerns() -> Json<Value> {
    Json(json!({
        "total": 1,
        "concerns": [{
            "concern": {
                "type": "health",
                "severity": "high",
                "description": "missed meals"
            },
            "resident": {"name": "Ada Byron"},
            "familyMember": {"name": "Anne Byron", "relationship": "daughter"},
            "facility": {"id": "brunnel-001", "name": "Brunnel House"}
        }]
    }))
}

async fn check_in_summary(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let days: u32 = params
        .get("days")
        .and_then(|d| d.parse().ok())
        .unwrap_or(7);
    Json(json!({
        "period": {"days": days},
        "summary": {
            "totalCheckIns": 40,
            "completed": 35,
            "withConcerns": 5,
            "concernsBySeverity": {"high": 1, "medium": 2, "low": 2}
        }
    }))
}

async fn facility_not_found(Path(_id): Path<String>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "no such facility")
}

async fn reject_facility(Json(_body): Json<Value>) -> impl IntoResponse {
    (StatusCode::UNPROCESSABLE_ENTITY, "name must not be empty")
}

async fn forbidden_lifebook(Path(_id): Path<String>) -> impl IntoResponse {
    (StatusCode::FORBIDDEN, "lifebook creation is not permitted")
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

fn test_client(base_url: &str) -> ApiClient {
    let store = Arc::new(InMemoryStore::new());
    let session = SessionContext::new(store.clone());
    let facility = FacilitySelection::new(store);
    let config =
        ClientConfig::new(base_url).with_fallback_facility(FacilityId::new("fallback-000"));
    ApiClient::new(config, session, facility)
}

fn established_session(token: &str) -> carelink_client::Session {
    carelink_client::Session {
        user: carelink_client::SessionUser {
            id: carelink_core::UserId::new("user-9"),
            email: "mgr@example.com".to_string(),
            first_name: "Max".to_string(),
            last_name: "Lead".to_string(),
            role: Role::Manager,
            facility_id: None,
        },
        token: token.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_establishes_the_session() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    let session = client
        .login("linda@example.com", "password123")
        .await
        .expect("login should succeed");

    assert_eq!(session.token, "test-token");
    assert_eq!(session.user.role, Role::Admin);
    assert_eq!(client.session().token().as_deref(), Some("test-token"));
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn rejected_login_reports_invalid_credentials_and_keeps_state() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    // A previous session is in place; the failed login must not disturb it.
    client.session().establish(established_session("tok-keep"));

    let result = client.login("linda@example.com", "wrong").await;
    assert!(matches!(result, Err(LoginError::InvalidCredentials)));

    // No mutation, no 401 recovery on the login flow.
    assert_eq!(client.session().token().as_deref(), Some("tok-keep"));
}

#[tokio::test]
async fn facility_precedence_is_visible_on_the_wire() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    // No selection → configured fallback.
    client.residents(None).await.expect("list should succeed");

    // Selected facility.
    client
        .facility_selection()
        .select(FacilityId::new("selected-1"));
    client.residents(None).await.expect("list should succeed");

    // Explicit parameter beats the selection.
    client
        .residents(Some(&FacilityId::new("explicit-2")))
        .await
        .expect("list should succeed");

    let recorded = srv.recorded.resident_queries.lock().unwrap();
    assert_eq!(
        recorded.as_slice(),
        &[
            Some("fallback-000".to_string()),
            Some("selected-1".to_string()),
            Some("explicit-2".to_string()),
        ]
    );
}

#[tokio::test]
async fn empty_facility_list_still_scopes_with_the_fallback() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    // No facilities available: selection stays unset, requests still scope.
    client.facility_selection().initialize(&[]);
    assert_eq!(client.facility_selection().active(), None);

    client.residents(None).await.expect("list should succeed");

    let recorded = srv.recorded.resident_queries.lock().unwrap();
    assert_eq!(recorded.as_slice(), &[Some("fallback-000".to_string())]);
}

#[tokio::test]
async fn stale_token_is_cleared_by_401_recovery() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);
    client.session().establish(established_session("stale-token"));

    let state = client.session().subscribe();

    // The call itself still fails to its caller.
    let result = client.calls(&Default::default()).await;
    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));

    // Recovery cleared the session and signalled the shell.
    assert!(client.session().current().is_none());
    assert_eq!(*state.borrow(), SessionState::Unauthenticated);

    // The next call carries no stale bearer token.
    let _ = client.calls(&Default::default()).await;

    let recorded = srv.recorded.call_auth_headers.lock().unwrap();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].as_deref(), Some("Bearer stale-token"));
    assert_eq!(recorded[1], None);
}

#[tokio::test]
async fn non_success_statuses_map_to_the_error_taxonomy() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    let err = client
        .facility(&FacilityId::new("ghost-9"))
        .await
        .expect_err("missing facility should 404");
    assert!(matches!(err, ApiError::NotFound { .. }));

    let err = client
        .create_facility(&json!({"name": ""}))
        .await
        .expect_err("invalid facility should be rejected");
    match err {
        ApiError::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("name must not be empty"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }

    let err = client
        .create_lifebook(&ResidentId::new("res-1"))
        .await
        .expect_err("lifebook creation should be forbidden");
    assert!(matches!(err, ApiError::Forbidden { .. }));
}

#[tokio::test]
async fn unreachable_backend_surfaces_a_transport_error() {
    // Nothing listens on this port.
    let client = test_client("http://127.0.0.1:1");

    let err = client
        .residents(None)
        .await
        .expect_err("request should fail");
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn delete_accepts_an_empty_success_body() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    client
        .delete_resident(&ResidentId::new("res-1"))
        .await
        .expect("delete should succeed on 204");
}

#[tokio::test]
async fn pre_shaped_reports_decode_as_returned() {
    let srv = TestServer::spawn().await;
    let client = test_client(&srv.base_url);

    let report = client
        .concerns(&Default::default())
        .await
        .expect("concerns should decode");
    assert_eq!(report.total, 1);
    assert_eq!(report.concerns[0].concern.severity, "high");
    assert_eq!(
        report.concerns[0]
            .family_member
            .as_ref()
            .unwrap()
            .relationship
            .as_deref(),
        Some("daughter")
    );

    let summary = client
        .check_in_summary(14, None)
        .await
        .expect("summary should decode");
    assert_eq!(summary.period.days, 14);
    assert_eq!(summary.summary.total_check_ins, 40);
    assert_eq!(summary.summary.concerns_by_severity.medium, 2);
}
