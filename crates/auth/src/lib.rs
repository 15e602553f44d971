//! `carelink-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it holds the
//! static role→permission registry and navigation gating, nothing else.
//! Checks made here are advisory (UI gating); the backend independently
//! enforces authorization on every endpoint.

pub mod navigation;
pub mod permissions;
pub mod registry;
pub mod roles;

pub use navigation::{authorized_navigation, filter_navigation, NavItem, NAVIGATION};
pub use permissions::Permission;
pub use registry::{has_permission, permissions_of};
pub use roles::Role;
