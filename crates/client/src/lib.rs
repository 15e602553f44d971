//! `carelink-client`
//!
//! **Responsibility:** thin client shell around the CareLink backend API.
//!
//! This crate provides:
//! - The current-session container, mirrored into a persisted credential entry
//! - Facility selection state with an invalidation signal for scoped views
//! - The advisory authorization facade over the RBAC registry
//! - The sole outbound HTTP boundary ([`ApiClient`])
//!
//! Authorization decisions made here only gate what the dashboard renders;
//! the backend independently enforces authorization on every endpoint.

pub mod api;
pub mod authz;
pub mod config;
pub mod error;
pub mod facility;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod types;

pub use api::ApiClient;
pub use authz::Authorizer;
pub use config::ClientConfig;
pub use error::{ApiError, LoginError};
pub use facility::FacilitySelection;
pub use session::{Session, SessionContext, SessionState, SessionUser};
pub use store::{FileStore, InMemoryStore, StateStore};
