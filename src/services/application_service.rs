//! Application service - Owner-scoped lifecycle of applications.
//!
//! Ownership is enforced by querying with the requester's user id;
//! an application that exists but belongs to someone else is
//! indistinguishable from one that does not exist. The eligibility
//! gate runs inside `submit`, so API clients cannot bypass it.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    check_eligibility, ApplicationPatch, ApplicationWithEvent, Ineligibility, NewApplication,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ApplicationRepository, EventRepository};

/// Application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// List the requester's applications, newest first
    async fn list_own(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithEvent>>;

    /// Get one application, only if owned by the requester
    async fn get_own(&self, user_id: Uuid, id: Uuid) -> AppResult<ApplicationWithEvent>;

    /// Submit a new application, subject to the eligibility gate
    async fn submit(&self, user_id: Uuid, data: NewApplication)
        -> AppResult<ApplicationWithEvent>;

    /// Update applicant-supplied fields of an owned application
    async fn update_own(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: ApplicationPatch,
    ) -> AppResult<ApplicationWithEvent>;

    /// Hard delete an owned application
    async fn delete_own(&self, user_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ApplicationService.
pub struct ApplicationDesk {
    applications: Arc<dyn ApplicationRepository>,
    events: Arc<dyn EventRepository>,
}

impl ApplicationDesk {
    /// Create new application service instance
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            applications,
            events,
        }
    }
}

#[async_trait]
impl ApplicationService for ApplicationDesk {
    async fn list_own(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithEvent>> {
        self.applications
            .list_for_user(user_id)
            .await
            .map_err(AppError::Fetch)
    }

    async fn get_own(&self, user_id: Uuid, id: Uuid) -> AppResult<ApplicationWithEvent> {
        self.applications
            .find_owned(id, user_id)
            .await
            .map_err(AppError::Fetch)?
            .ok_or_not_found()
    }

    async fn submit(
        &self,
        user_id: Uuid,
        data: NewApplication,
    ) -> AppResult<ApplicationWithEvent> {
        let event = self
            .events
            .find_by_id(data.event_id)
            .await
            .map_err(AppError::Fetch)?
            .ok_or_not_found()?;

        // Read-then-decide; the uniqueness constraint backs the
        // duplicate check, capacity is best-effort.
        let count = self
            .applications
            .count_for_event(event.id)
            .await
            .map_err(AppError::Fetch)?;
        let already_applied = self
            .applications
            .find_for_user_event(user_id, event.id)
            .await
            .map_err(AppError::Fetch)?
            .is_some();

        if let Err(reason) = check_eligibility(&event, count, already_applied, Utc::now()) {
            return Err(match reason {
                Ineligibility::AlreadyApplied => AppError::DuplicateApplication,
                denied => AppError::validation(denied.message()),
            });
        }

        let application = self
            .applications
            .insert(user_id, data)
            .await
            .map_err(AppError::from_insert)?;

        Ok(ApplicationWithEvent { application, event })
    }

    async fn update_own(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: ApplicationPatch,
    ) -> AppResult<ApplicationWithEvent> {
        let owned = self
            .applications
            .find_owned(id, user_id)
            .await
            .map_err(AppError::Fetch)?
            .ok_or_not_found()?;

        let application = self
            .applications
            .update_details(owned.application.id, patch)
            .await
            .map_err(AppError::Update)?;

        Ok(ApplicationWithEvent {
            application,
            event: owned.event,
        })
    }

    async fn delete_own(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let owned = self
            .applications
            .find_owned(id, user_id)
            .await
            .map_err(AppError::Fetch)?
            .ok_or_not_found()?;

        self.applications
            .delete(owned.application.id)
            .await
            .map_err(AppError::Delete)
    }
}
