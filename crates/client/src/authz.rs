//! Authorization facade.
//!
//! The single place the dashboard asks "may the current user do X". Answers
//! gate rendering only: a hidden or disabled control is never the only
//! protection for a sensitive action, because the backend authorizes every
//! endpoint independently.

use carelink_auth::{authorized_navigation, has_permission, NavItem, Permission, Role};

use crate::session::SessionContext;

/// Permission checks bound to the current session.
#[derive(Clone)]
pub struct Authorizer {
    session: SessionContext,
}

impl Authorizer {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Whether the current user holds `permission`. `false` with no active
    /// session.
    pub fn can(&self, permission: Permission) -> bool {
        match self.session.role() {
            Some(role) => has_permission(role, permission),
            None => false,
        }
    }

    /// Whether the current user holds at least one of `permissions`.
    ///
    /// `false` when unauthenticated or when `permissions` is empty.
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        let Some(role) = self.session.role() else {
            return false;
        };
        permissions.iter().any(|p| has_permission(role, *p))
    }

    /// Whether the current user holds every one of `permissions`.
    ///
    /// Vacuously `true` for an empty slice when authenticated; `false` when
    /// unauthenticated.
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        let Some(role) = self.session.role() else {
            return false;
        };
        permissions.iter().all(|p| has_permission(role, *p))
    }

    /// Navigation entries the current user may see; empty when
    /// unauthenticated.
    pub fn navigation(&self) -> Vec<NavItem> {
        self.session
            .role()
            .map(authorized_navigation)
            .unwrap_or_default()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use carelink_core::UserId;

    use super::*;
    use crate::session::{Session, SessionUser};
    use crate::store::InMemoryStore;

    fn authorizer_with_role(role: Role) -> Authorizer {
        let session = SessionContext::new(Arc::new(InMemoryStore::new()));
        session.establish(Session {
            user: SessionUser {
                id: UserId::new("user-1"),
                email: "staff@example.com".to_string(),
                first_name: "Sam".to_string(),
                last_name: "Carer".to_string(),
                role,
                facility_id: None,
            },
            token: "tok".to_string(),
        });
        Authorizer::new(session)
    }

    fn unauthenticated_authorizer() -> Authorizer {
        Authorizer::new(SessionContext::new(Arc::new(InMemoryStore::new())))
    }

    #[test]
    fn staff_cannot_delete_residents_but_admin_can() {
        assert!(!authorizer_with_role(Role::Staff).can(Permission::DeleteResident));
        assert!(authorizer_with_role(Role::Admin).can(Permission::DeleteResident));
    }

    #[test]
    fn everything_is_denied_without_a_session() {
        let authz = unauthenticated_authorizer();
        assert!(!authz.can(Permission::ViewDashboard));
        assert!(!authz.can_any(&[Permission::ViewDashboard, Permission::ViewCalls]));
        assert!(!authz.can_all(&[]));
        assert!(authz.navigation().is_empty());
        assert_eq!(authz.role(), None);
    }

    #[test]
    fn empty_slice_boundary_cases() {
        let authz = authorizer_with_role(Role::Staff);
        assert!(!authz.can_any(&[]));
        assert!(authz.can_all(&[]));
    }

    #[test]
    fn combinators_short_circuit_correctly() {
        let authz = authorizer_with_role(Role::Manager);

        assert!(authz.can_any(&[Permission::ViewFacilities, Permission::ViewReports]));
        assert!(!authz.can_any(&[Permission::ViewFacilities, Permission::CreateFacility]));

        assert!(authz.can_all(&[Permission::ViewResidents, Permission::EditResident]));
        assert!(!authz.can_all(&[Permission::ViewResidents, Permission::ViewFacilities]));
    }

    #[test]
    fn checks_follow_the_live_session() {
        let session = SessionContext::new(Arc::new(InMemoryStore::new()));
        let authz = Authorizer::new(session.clone());
        assert!(!authz.can(Permission::ViewDashboard));

        session.establish(Session {
            user: SessionUser {
                id: UserId::new("user-2"),
                email: "mgr@example.com".to_string(),
                first_name: "Max".to_string(),
                last_name: "Lead".to_string(),
                role: Role::Manager,
                facility_id: None,
            },
            token: "tok".to_string(),
        });
        assert!(authz.can(Permission::ActionConcerns));

        session.logout();
        assert!(!authz.can(Permission::ActionConcerns));
    }
}
