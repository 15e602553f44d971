//! Current-session container.
//!
//! Owns the single authenticated-session value for the running client and
//! mirrors it into the persisted credential entry so a reload resumes the
//! session. Lifecycle is `Unauthenticated → Authenticated → Unauthenticated`;
//! there is no refresh state.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use carelink_auth::Role;
use carelink_core::{FacilityId, UserId};

use crate::store::{StateStore, CREDENTIALS_KEY};

/// Authenticated user snapshot as returned by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Home facility for single-facility roles; `None` for cross-facility
    /// admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<FacilityId>,
}

/// The authenticated identity plus its bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

/// Observable session lifecycle state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Shared, injectable holder of the current session.
///
/// Mutation is a point-in-time replace: memory and the persisted credential
/// entry are updated under one write lock, and the entry is a single JSON
/// blob, so token and user are never observable half-cleared.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn StateStore>,
    current: Arc<RwLock<Option<Session>>>,
    state_tx: Arc<watch::Sender<SessionState>>,
}

impl SessionContext {
    /// Build a context over `store`, restoring a persisted credential entry
    /// if one exists. A corrupt entry is discarded with a warning.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let restored = store.get(CREDENTIALS_KEY).and_then(|raw| {
            match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    tracing::warn!("discarding unreadable credential entry: {err}");
                    None
                }
            }
        });

        let state = if restored.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        let (state_tx, _) = watch::channel(state);

        Self {
            store,
            current: Arc::new(RwLock::new(restored)),
            state_tx: Arc::new(state_tx),
        }
    }

    /// Replace the current session (successful login).
    ///
    /// If the session cannot be serialized for persistence, existing state is
    /// left untouched.
    pub fn establish(&self, session: Session) {
        let raw = match serde_json::to_string(&session) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!("failed to serialize credential entry: {err}");
                return;
            }
        };

        if let Ok(mut guard) = self.current.write() {
            self.store.put(CREDENTIALS_KEY, raw);
            *guard = Some(session);
        }
        self.state_tx.send_replace(SessionState::Authenticated);
    }

    /// Clear the session, in memory and in the store, unconditionally.
    ///
    /// Idempotent; calling with no active session is a no-op that still ends
    /// in `Unauthenticated`.
    pub fn logout(&self) {
        if let Ok(mut guard) = self.current.write() {
            self.store.remove(CREDENTIALS_KEY);
            *guard = None;
        }
        self.state_tx.send_replace(SessionState::Unauthenticated);
    }

    /// The current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.token.clone()))
    }

    /// Role of the current session's user.
    pub fn role(&self) -> Option<Role> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.user.role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Subscribe to lifecycle transitions. The dashboard shell reacts to
    /// `Unauthenticated` by presenting the login surface.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }
}
