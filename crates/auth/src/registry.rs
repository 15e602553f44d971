//! Static role→permission registry.
//!
//! Role scoping:
//! - `Admin`: full system access across all facilities (only role that can
//!   see or manage the facilities themselves).
//! - `Manager`: manages a single facility's residents and concerns.
//! - `Staff`: read-only access within a single facility. The `Staff` table
//!   contains no mutating permission, so a `Staff` session can never acquire
//!   one through this registry.
//!
//! A permission absent from a role's table is denied. Absence is a denial,
//! never an error.

use crate::permissions::Permission;
use crate::roles::Role;

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewResidents,
    Permission::CreateResident,
    Permission::EditResident,
    Permission::DeleteResident,
    Permission::ViewCalls,
    Permission::ViewConcerns,
    Permission::ActionConcerns,
    Permission::ViewLifebooks,
    Permission::CreateLifebook,
    Permission::ViewReports,
    Permission::ViewFacilities,
    Permission::CreateFacility,
    Permission::EditFacility,
    Permission::DeleteFacility,
];

// No view:facilities; the facilities tab is admin-only.
const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewResidents,
    Permission::CreateResident,
    Permission::EditResident,
    Permission::DeleteResident,
    Permission::ViewCalls,
    Permission::ViewConcerns,
    Permission::ActionConcerns,
    Permission::ViewLifebooks,
    Permission::CreateLifebook,
    Permission::ViewReports,
];

// Read-only; no reports, no facilities.
const STAFF_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewResidents,
    Permission::ViewCalls,
    Permission::ViewConcerns,
    Permission::ViewLifebooks,
];

/// All permissions granted to `role`.
///
/// Total over [`Role`]: every role has a table, possibly empty.
pub fn permissions_of(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Manager => MANAGER_PERMISSIONS,
        Role::Staff => STAFF_PERMISSIONS,
    }
}

/// Whether `role` holds `permission`.
///
/// - No IO
/// - No panics
/// - Default-deny: anything not explicitly granted is refused
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_of(role).contains(&permission)
}
