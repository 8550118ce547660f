//! Admin review service - Privileged operations over all applications.
//!
//! Authorization (authenticated session plus a fresh admin flag) is
//! checked at the API boundary before any of these are reached; the
//! service itself assumes a vetted admin caller.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::RECENT_APPLICATIONS_LIMIT;
use crate::domain::{AdminApplicationView, ApplicationFilter, ApplicationStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::ApplicationRepository;

/// Application counts by status, absent statuses zero-filled.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub waitlist: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected + self.waitlist
    }
}

/// Dashboard aggregate: counts plus the most recent submissions.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_applications: u64,
    pub status_counts: StatusCounts,
    pub recent_applications: Vec<AdminApplicationView>,
}

/// Admin review service trait for dependency injection.
#[async_trait]
pub trait AdminReviewService: Send + Sync {
    /// List applications across all users with filters
    async fn list(&self, filter: ApplicationFilter) -> AppResult<Vec<AdminApplicationView>>;

    /// Get any application by id with full joins
    async fn get(&self, id: Uuid) -> AppResult<AdminApplicationView>;

    /// Update status and notes, stamping the acting admin and the
    /// review time. The only path that ever sets status, reviewer,
    /// or reviewed_at.
    async fn review(
        &self,
        admin_id: Uuid,
        id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
    ) -> AppResult<AdminApplicationView>;

    /// Dashboard aggregate for the summary view
    async fn dashboard(&self) -> AppResult<DashboardSummary>;
}

/// Concrete implementation of AdminReviewService.
pub struct ReviewDesk {
    applications: Arc<dyn ApplicationRepository>,
}

impl ReviewDesk {
    /// Create new admin review service instance
    pub fn new(applications: Arc<dyn ApplicationRepository>) -> Self {
        Self { applications }
    }
}

#[async_trait]
impl AdminReviewService for ReviewDesk {
    async fn list(&self, filter: ApplicationFilter) -> AppResult<Vec<AdminApplicationView>> {
        self.applications
            .list_admin(filter)
            .await
            .map_err(AppError::Fetch)
    }

    async fn get(&self, id: Uuid) -> AppResult<AdminApplicationView> {
        self.applications
            .find_admin(id)
            .await
            .map_err(AppError::Fetch)?
            .ok_or_not_found()
    }

    async fn review(
        &self,
        admin_id: Uuid,
        id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
    ) -> AppResult<AdminApplicationView> {
        self.applications
            .update_review(id, status, admin_notes, admin_id, Utc::now())
            .await
            .map_err(AppError::Update)?
            .ok_or_not_found()
    }

    async fn dashboard(&self) -> AppResult<DashboardSummary> {
        let raw = self
            .applications
            .status_counts()
            .await
            .map_err(AppError::Fetch)?;

        let mut counts = StatusCounts::default();
        for status in ApplicationStatus::ALL {
            let count = raw.get(status.as_str()).copied().unwrap_or(0);
            match status {
                ApplicationStatus::Pending => counts.pending = count,
                ApplicationStatus::Approved => counts.approved = count,
                ApplicationStatus::Rejected => counts.rejected = count,
                ApplicationStatus::Waitlist => counts.waitlist = count,
            }
        }

        let recent = self
            .applications
            .recent(RECENT_APPLICATIONS_LIMIT)
            .await
            .map_err(AppError::Fetch)?;

        Ok(DashboardSummary {
            total_applications: counts.total(),
            status_counts: counts,
            recent_applications: recent,
        })
    }
}
