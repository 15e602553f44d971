//! Outbound API client.
//!
//! The sole HTTP boundary of the dashboard. Every call resolves its path
//! under the configured origin, attaches the live session token, scopes
//! facility-bound endpoints (explicit parameter beats selected facility
//! beats configured fallback), and is issued exactly once. No retries, no
//! backoff, no caching of session or facility state inside the client.

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use carelink_core::{CallId, FacilityId, FamilyMemberId, ResidentId};

use crate::config::ClientConfig;
use crate::error::{ApiError, LoginError};
use crate::facility::FacilitySelection;
use crate::session::{Session, SessionContext};
use crate::types::{
    Call, CallFilter, CheckInSummaryReport, ConcernFilter, ConcernsReport, Facility, FamilyMember,
    LoginRequest, LoginResponse, RecentCheckIns, Resident,
};

/// HTTP client for the CareLink backend.
///
/// Cheap to clone; clones share the session and facility containers.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionContext,
    facility: FacilitySelection,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionContext, facility: FacilitySelection) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
            facility,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn facility_selection(&self) -> &FacilitySelection {
        &self.facility
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────
    // Request plumbing
    // ─────────────────────────────────────────────────────────────────────

    /// Base request: path under the configured origin, JSON content type
    /// (later headers override it), bearer token read live from the session.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.api_url, path);
        let mut req = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Send exactly once; map any non-success status to [`ApiError`].
    ///
    /// A `401` off the login flow runs recovery: the session is cleared so
    /// no further call carries the stale token, and subscribers of the
    /// session state see `Unauthenticated` (their cue to present the login
    /// surface). The failing call still returns its error to the caller.
    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        login_flow: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED && !login_flow {
            tracing::warn!("backend rejected the session token; clearing session");
            self.session.logout();
        }

        Err(ApiError::from_status(status.as_u16(), body))
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = self.execute(req, false).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// For endpoints whose success response carries no body (DELETE).
    async fn dispatch_empty(&self, req: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.execute(req, false).await?;
        Ok(())
    }

    /// Facility precedence: explicit beats selected beats configured
    /// fallback. Never fails, even with no facilities available.
    fn scope_facility(&self, explicit: Option<&FacilityId>) -> FacilityId {
        explicit
            .cloned()
            .or_else(|| self.facility.active())
            .unwrap_or_else(|| self.config.fallback_facility.clone())
    }

    /// Inject the scoped facility into a creation payload that lacks one.
    fn with_scoped_facility(&self, mut data: Value) -> Value {
        let missing = data.get("facilityId").map_or(true, Value::is_null);
        if missing {
            if let Some(obj) = data.as_object_mut() {
                obj.insert(
                    "facilityId".to_string(),
                    Value::String(self.scope_facility(None).into_string()),
                );
            }
        }
        data
    }

    // ─────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────

    /// Authenticate and establish the session.
    ///
    /// On failure existing session state is untouched; a rejected credential
    /// surfaces as `InvalidCredentials` (no 401 recovery runs here, so a
    /// failed login never bounces the login surface).
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = self.request(Method::POST, "/api/auth/login").json(&body);

        match self.execute(req, true).await {
            Ok(resp) => {
                let login: LoginResponse = resp
                    .json()
                    .await
                    .map_err(|e| LoginError::ServiceUnavailable(e.to_string()))?;

                let session = Session {
                    user: login.user,
                    token: login.token,
                };
                self.session.establish(session.clone());
                tracing::debug!(user = %session.user.email, "session established");
                Ok(session)
            }
            Err(
                ApiError::Unauthenticated { .. }
                | ApiError::Forbidden { .. }
                | ApiError::Rejected { .. },
            ) => Err(LoginError::InvalidCredentials),
            Err(err) => Err(LoginError::ServiceUnavailable(err.to_string())),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Residents
    // ─────────────────────────────────────────────────────────────────────

    pub async fn residents(
        &self,
        facility: Option<&FacilityId>,
    ) -> Result<Vec<Resident>, ApiError> {
        let fid = self.scope_facility(facility);
        let req = self
            .request(Method::GET, "/api/residents")
            .query(&[("facilityId", fid.as_str())]);
        self.dispatch(req).await
    }

    pub async fn resident(&self, id: &ResidentId) -> Result<Resident, ApiError> {
        self.dispatch(self.request(Method::GET, &format!("/api/residents/{id}")))
            .await
    }

    pub async fn create_resident(&self, data: Value) -> Result<Resident, ApiError> {
        let data = self.with_scoped_facility(data);
        let req = self.request(Method::POST, "/api/residents").json(&data);
        self.dispatch(req).await
    }

    pub async fn update_resident(&self, id: &ResidentId, patch: &Value) -> Result<Resident, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/residents/{id}"))
            .json(patch);
        self.dispatch(req).await
    }

    pub async fn delete_resident(&self, id: &ResidentId) -> Result<(), ApiError> {
        self.dispatch_empty(self.request(Method::DELETE, &format!("/api/residents/{id}")))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Family members
    // ─────────────────────────────────────────────────────────────────────

    pub async fn family_members(
        &self,
        resident: &ResidentId,
    ) -> Result<Vec<FamilyMember>, ApiError> {
        self.dispatch(self.request(
            Method::GET,
            &format!("/api/family-members/resident/{resident}"),
        ))
        .await
    }

    pub async fn create_family_member(&self, data: &Value) -> Result<FamilyMember, ApiError> {
        let req = self.request(Method::POST, "/api/family-members").json(data);
        self.dispatch(req).await
    }

    pub async fn update_family_member(
        &self,
        id: &FamilyMemberId,
        patch: &Value,
    ) -> Result<FamilyMember, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/family-members/{id}"))
            .json(patch);
        self.dispatch(req).await
    }

    pub async fn delete_family_member(&self, id: &FamilyMemberId) -> Result<(), ApiError> {
        self.dispatch_empty(self.request(Method::DELETE, &format!("/api/family-members/{id}")))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Calls
    // ─────────────────────────────────────────────────────────────────────

    pub async fn calls(&self, filter: &CallFilter) -> Result<Vec<Call>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(resident) = &filter.resident_id {
            query.push(("residentId", resident.to_string()));
        }
        if let Some(status) = &filter.status {
            query.push(("status", status.clone()));
        }

        let req = self.request(Method::GET, "/api/calls").query(&query);
        self.dispatch(req).await
    }

    pub async fn call(&self, id: &CallId) -> Result<Call, ApiError> {
        self.dispatch(self.request(Method::GET, &format!("/api/calls/{id}")))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Staff dashboard
    // ─────────────────────────────────────────────────────────────────────

    pub async fn concerns(&self, filter: &ConcernFilter) -> Result<ConcernsReport, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(severity) = &filter.severity {
            query.push(("severity", severity.clone()));
        }
        if let Some(facility) = &filter.facility_id {
            query.push(("facilityId", facility.to_string()));
        }

        let req = self.request(Method::GET, "/api/staff/concerns").query(&query);
        self.dispatch(req).await
    }

    pub async fn check_in_summary(
        &self,
        days: u32,
        facility: Option<&FacilityId>,
    ) -> Result<CheckInSummaryReport, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("days", days.to_string())];
        if let Some(facility) = facility {
            query.push(("facilityId", facility.to_string()));
        }

        let req = self
            .request(Method::GET, "/api/staff/check-ins/summary")
            .query(&query);
        self.dispatch(req).await
    }

    pub async fn recent_check_ins(
        &self,
        limit: u32,
        facility: Option<&FacilityId>,
    ) -> Result<RecentCheckIns, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(facility) = facility {
            query.push(("facilityId", facility.to_string()));
        }

        let req = self
            .request(Method::GET, "/api/staff/check-ins/recent")
            .query(&query);
        self.dispatch(req).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifebooks
    // ─────────────────────────────────────────────────────────────────────

    /// Build (or fetch) a resident's life-story book. The backend shapes the
    /// book; it is passed through untouched.
    pub async fn create_lifebook(&self, resident: &ResidentId) -> Result<Value, ApiError> {
        self.dispatch(self.request(Method::POST, &format!("/api/books/{resident}/create")))
            .await
    }

    pub async fn segments(&self, resident: &ResidentId) -> Result<Vec<Value>, ApiError> {
        let req = self
            .request(Method::GET, "/api/segments")
            .query(&[("residentId", resident.as_str())]);
        self.dispatch(req).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Facilities
    // ─────────────────────────────────────────────────────────────────────

    pub async fn facilities(&self) -> Result<Vec<Facility>, ApiError> {
        self.dispatch(self.request(Method::GET, "/api/facilities"))
            .await
    }

    pub async fn facility(&self, id: &FacilityId) -> Result<Facility, ApiError> {
        self.dispatch(self.request(Method::GET, &format!("/api/facilities/{id}")))
            .await
    }

    pub async fn create_facility(&self, data: &Value) -> Result<Facility, ApiError> {
        let req = self.request(Method::POST, "/api/facilities").json(data);
        self.dispatch(req).await
    }

    pub async fn update_facility(
        &self,
        id: &FacilityId,
        patch: &Value,
    ) -> Result<Facility, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/facilities/{id}"))
            .json(patch);
        self.dispatch(req).await
    }

    pub async fn delete_facility(&self, id: &FacilityId) -> Result<(), ApiError> {
        self.dispatch_empty(self.request(Method::DELETE, &format!("/api/facilities/{id}")))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Memory layer: patterns, anticipated events, callbacks
    // ─────────────────────────────────────────────────────────────────────

    pub async fn resident_pattern(&self, resident: &ResidentId) -> Result<Value, ApiError> {
        self.dispatch(self.request(Method::GET, &format!("/api/patterns/{resident}")))
            .await
    }

    pub async fn update_resident_pattern(
        &self,
        resident: &ResidentId,
        patch: &Value,
    ) -> Result<Value, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/patterns/{resident}"))
            .json(patch);
        self.dispatch(req).await
    }

    pub async fn call_states(
        &self,
        resident: &ResidentId,
        limit: u32,
    ) -> Result<Vec<Value>, ApiError> {
        let req = self
            .request(Method::GET, &format!("/api/patterns/{resident}/call-states"))
            .query(&[("limit", limit.to_string())]);
        self.dispatch(req).await
    }

    pub async fn anticipated_events(
        &self,
        resident: &ResidentId,
        status: Option<&str>,
    ) -> Result<Vec<Value>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("residentId", resident.to_string())];
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }

        let req = self.request(Method::GET, "/api/events").query(&query);
        self.dispatch(req).await
    }

    pub async fn create_anticipated_event(&self, data: &Value) -> Result<Value, ApiError> {
        let req = self.request(Method::POST, "/api/events").json(data);
        self.dispatch(req).await
    }

    pub async fn update_anticipated_event(
        &self,
        id: &str,
        patch: &Value,
    ) -> Result<Value, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/events/{id}"))
            .json(patch);
        self.dispatch(req).await
    }

    pub async fn mark_event_asked(
        &self,
        id: &str,
        outcome_notes: Option<&str>,
    ) -> Result<Value, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/events/{id}/mark-asked"))
            .json(&serde_json::json!({ "outcomeNotes": outcome_notes }));
        self.dispatch(req).await
    }

    pub async fn delete_anticipated_event(&self, id: &str) -> Result<(), ApiError> {
        self.dispatch_empty(self.request(Method::DELETE, &format!("/api/events/{id}")))
            .await
    }

    pub async fn callbacks(
        &self,
        resident: &ResidentId,
        still_lands: Option<bool>,
    ) -> Result<Vec<Value>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("residentId", resident.to_string())];
        if let Some(still_lands) = still_lands {
            query.push(("stillLands", still_lands.to_string()));
        }

        let req = self.request(Method::GET, "/api/callbacks").query(&query);
        self.dispatch(req).await
    }

    pub async fn create_callback(&self, data: &Value) -> Result<Value, ApiError> {
        let req = self.request(Method::POST, "/api/callbacks").json(data);
        self.dispatch(req).await
    }

    pub async fn update_callback(&self, id: &str, patch: &Value) -> Result<Value, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/api/callbacks/{id}"))
            .json(patch);
        self.dispatch(req).await
    }

    pub async fn mark_callback_used(&self, id: &str) -> Result<Value, ApiError> {
        self.dispatch(self.request(Method::PATCH, &format!("/api/callbacks/{id}/mark-used")))
            .await
    }

    pub async fn delete_callback(&self, id: &str) -> Result<(), ApiError> {
        self.dispatch_empty(self.request(Method::DELETE, &format!("/api/callbacks/{id}")))
            .await
    }
}
