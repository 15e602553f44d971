//! Client configuration.

use carelink_core::FacilityId;

/// Default backend origin for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default facility used when a facility-scoped call has neither an explicit
/// facility nor a persisted selection. Deployment configuration, not a
/// protocol constant; override with `CARELINK_FALLBACK_FACILITY`.
pub const DEFAULT_FALLBACK_FACILITY: &str = "brunnel-001";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin; endpoints are resolved as relative paths under it.
    pub api_url: String,

    /// Facility of last resort for scoped requests (see
    /// [`DEFAULT_FALLBACK_FACILITY`]).
    pub fallback_facility: FacilityId,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(api_url.into()),
            fallback_facility: FacilityId::new(DEFAULT_FALLBACK_FACILITY),
        }
    }

    pub fn with_fallback_facility(mut self, facility: FacilityId) -> Self {
        self.fallback_facility = facility;
        self
    }

    /// Build from `CARELINK_API_URL` / `CARELINK_FALLBACK_FACILITY`,
    /// defaulting any variable that is unset.
    pub fn from_env() -> Self {
        let api_url = std::env::var("CARELINK_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let fallback = std::env::var("CARELINK_FALLBACK_FACILITY")
            .unwrap_or_else(|_| DEFAULT_FALLBACK_FACILITY.to_string());

        Self::new(api_url).with_fallback_facility(FacilityId::new(fallback))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
