//! Client error taxonomy.
//!
//! Every API call either returns data or fails with one of these; nothing is
//! retried and nothing is swallowed except the session-clearing side effect
//! of 401 recovery. Error bodies are carried as opaque text; no field-level
//! parsing is attempted on failure paths.

use thiserror::Error;

/// Failure of an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `401`: the backend rejected the session token. Off the login flow
    /// this also triggers session recovery.
    #[error("authentication required: {body}")]
    Unauthenticated { body: String },

    /// `403`: surfaced as-is. The triggering control should already have
    /// been hidden by the authorization facade; this path is defense in
    /// depth, not the primary guard.
    #[error("forbidden: {body}")]
    Forbidden { body: String },

    /// `404`: callers render an empty/not-found state.
    #[error("not found: {body}")]
    NotFound { body: String },

    /// Any other `4xx`, with the raw body text.
    #[error("request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// `5xx`.
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Network failure, no response. Callers treat this like a `5xx`.
    #[error("network error: {0}")]
    Transport(String),

    /// A success response carried a body that did not decode to the
    /// caller's expected type (contract violation).
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => ApiError::Unauthenticated { body },
            403 => ApiError::Forbidden { body },
            404 => ApiError::NotFound { body },
            400..=499 => ApiError::Rejected { status, body },
            _ => ApiError::Server { status, body },
        }
    }

    /// HTTP status of the failure, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthenticated { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

/// Failure of the login flow.
///
/// Login never triggers 401 recovery; a rejected credential is surfaced
/// here instead of bouncing the user around the login surface.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
