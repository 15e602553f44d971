//! Navigation gating.
//!
//! The dashboard's sidebar entries, each optionally gated by a permission.
//! Filtering here only decides what to render; the backend still authorizes
//! every request behind each page.

use crate::permissions::Permission;
use crate::registry::has_permission;
use crate::roles::Role;

/// A navigation entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
    /// Entries without a required permission are visible to every session.
    pub required_permission: Option<Permission>,
}

/// The dashboard navigation, in display order.
pub const NAVIGATION: [NavItem; 7] = [
    NavItem {
        name: "Overview",
        path: "/",
        required_permission: Some(Permission::ViewDashboard),
    },
    NavItem {
        name: "Residents",
        path: "/residents",
        required_permission: Some(Permission::ViewResidents),
    },
    NavItem {
        name: "Calls",
        path: "/calls",
        required_permission: Some(Permission::ViewCalls),
    },
    NavItem {
        name: "Concerns",
        path: "/concerns",
        required_permission: Some(Permission::ViewConcerns),
    },
    NavItem {
        name: "Life Story Books",
        path: "/lifebooks",
        required_permission: Some(Permission::ViewLifebooks),
    },
    NavItem {
        name: "Reports",
        path: "/reports",
        required_permission: Some(Permission::ViewReports),
    },
    NavItem {
        name: "Facilities",
        path: "/facilities",
        required_permission: Some(Permission::ViewFacilities),
    },
];

/// Exactly the subset of `items` whose requirement `role` holds.
///
/// Entries with no requirement are always included.
pub fn filter_navigation(role: Role, items: &[NavItem]) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| match item.required_permission {
            Some(required) => has_permission(role, required),
            None => true,
        })
        .copied()
        .collect()
}

/// The default navigation filtered for `role`.
pub fn authorized_navigation(role: Role) -> Vec<NavItem> {
    filter_navigation(role, &NAVIGATION)
}
