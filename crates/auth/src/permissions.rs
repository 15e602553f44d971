use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permission identifier.
///
/// Each permission gates exactly one UI-visible action or view. The set is
/// closed: permissions are only ever looked up in the registry, never
/// combined or computed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "view:dashboard")]
    ViewDashboard,
    #[serde(rename = "view:residents")]
    ViewResidents,
    #[serde(rename = "create:resident")]
    CreateResident,
    #[serde(rename = "edit:resident")]
    EditResident,
    #[serde(rename = "delete:resident")]
    DeleteResident,
    #[serde(rename = "view:calls")]
    ViewCalls,
    #[serde(rename = "view:concerns")]
    ViewConcerns,
    #[serde(rename = "action:concerns")]
    ActionConcerns,
    #[serde(rename = "view:lifebooks")]
    ViewLifebooks,
    #[serde(rename = "create:lifebook")]
    CreateLifebook,
    #[serde(rename = "view:reports")]
    ViewReports,
    #[serde(rename = "view:facilities")]
    ViewFacilities,
    #[serde(rename = "create:facility")]
    CreateFacility,
    #[serde(rename = "edit:facility")]
    EditFacility,
    #[serde(rename = "delete:facility")]
    DeleteFacility,
}

impl Permission {
    /// The full closed set, in a fixed order.
    pub const ALL: [Permission; 15] = [
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

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view:dashboard",
            Permission::ViewResidents => "view:residents",
            Permission::CreateResident => "create:resident",
            Permission::EditResident => "edit:resident",
            Permission::DeleteResident => "delete:resident",
            Permission::ViewCalls => "view:calls",
            Permission::ViewConcerns => "view:concerns",
            Permission::ActionConcerns => "action:concerns",
            Permission::ViewLifebooks => "view:lifebooks",
            Permission::CreateLifebook => "create:lifebook",
            Permission::ViewReports => "view:reports",
            Permission::ViewFacilities => "view:facilities",
            Permission::CreateFacility => "create:facility",
            Permission::EditFacility => "edit:facility",
            Permission::DeleteFacility => "delete:facility",
        }
    }

    /// True for permissions that authorize a state change (`create:*`,
    /// `edit:*`, `delete:*`, `action:*`), as opposed to read-only views.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self.as_str().split(':').next(),
            Some("create" | "edit" | "delete" | "action")
        )
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission: {0}")]
pub struct ParsePermissionError(String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| ParsePermissionError(s.to_string()))
    }
}
