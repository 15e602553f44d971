//! Wire DTOs for the backend API.
//!
//! Field names follow the backend's camelCase JSON. Aggregate/report shapes
//! arrive pre-formed from the staff endpoints and are not reshaped here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carelink_core::{CallId, FacilityId, FamilyMemberId, ResidentId};

use crate::session::SessionUser;

/// A care-home site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Relation counts embedded by the backend list/detail endpoints.
    #[serde(default, rename = "_count", skip_serializing_if = "Option::is_none")]
    pub counts: Option<FacilityCounts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityCounts {
    #[serde(default)]
    pub residents: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: ResidentId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<FacilityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<Facility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: FamilyMemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_id: Option<ResidentId>,
    pub name: String,
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: CallId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_id: Option<ResidentId>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_summary: Option<String>,
}

/// Optional filters for the calls listing.
#[derive(Debug, Default, Clone)]
pub struct CallFilter {
    pub resident_id: Option<ResidentId>,
    pub status: Option<String>,
}

/// Optional filters for the concerns report.
#[derive(Debug, Default, Clone)]
pub struct ConcernFilter {
    pub severity: Option<String>,
    pub facility_id: Option<FacilityId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Staff dashboard reports
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernsReport {
    pub total: u64,
    pub concerns: Vec<ConcernRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernRecord {
    pub concern: Concern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_member: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<FacilityRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concern {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub description: String,
}

/// Lightweight name reference embedded in report rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FacilityId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSummaryReport {
    pub period: CheckInPeriod,
    pub summary: CheckInTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPeriod {
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInTotals {
    pub total_check_ins: u64,
    pub completed: u64,
    pub with_concerns: u64,
    pub concerns_by_severity: SeverityBuckets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityBuckets {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCheckIns {
    pub check_ins: Vec<CheckIn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: CallId,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_summary: Option<String>,
    pub resident: PersonRef,
    pub family_member: PersonRef,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth wire shapes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}
