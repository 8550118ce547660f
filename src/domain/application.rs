//! Application domain entity and related types.
//!
//! An Application is one user's submission requesting a spot at one
//! Event. At most one application may exist per (user, event) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::event::Event;
use super::user::UserSummary;

/// Application review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Waitlist,
}

impl ApplicationStatus {
    /// All statuses, in dashboard display order.
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Waitlist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Waitlist => "waitlist",
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(s: &str) -> Self {
        match s {
            "approved" => ApplicationStatus::Approved,
            "rejected" => ApplicationStatus::Rejected,
            "waitlist" => ApplicationStatus::Waitlist,
            _ => ApplicationStatus::Pending,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application domain entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub applicant_name: String,
    pub phone_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub medical_conditions: Option<String>,
    pub special_requirements: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub admin_notes: Option<String>,
    /// Admin who last changed the status, if reviewed.
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Normalized submission payload handed to the application service.
///
/// Empty-string optionals have already been collapsed to `None`.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub event_id: Uuid,
    pub applicant_name: String,
    pub phone_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub medical_conditions: Option<String>,
    pub special_requirements: Option<String>,
}

/// Partial update of applicant-supplied fields.
///
/// Status and review fields are never settable through this type;
/// only the admin review path touches them.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub applicant_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub emergency_contact_name: Option<Option<String>>,
    pub emergency_contact_phone: Option<Option<String>>,
    pub dietary_restrictions: Option<Option<String>>,
    pub medical_conditions: Option<Option<String>>,
    pub special_requirements: Option<Option<String>>,
}

/// Admin listing filters. Exact matches on event and status; `search`
/// is a case-insensitive substring match against applicant name or
/// owner email.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub event_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
}

/// Application joined with its event, as returned to the owner.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithEvent {
    #[serde(flatten)]
    pub application: Application,
    pub event: Event,
}

/// Application joined with owner, event, and reviewer, as returned
/// to admins.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub user: UserSummary,
    pub event: Event,
    pub reviewer: Option<UserSummary>,
}
