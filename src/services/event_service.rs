//! Event service - Read-only surface over the event catalog.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::EventSummary;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::EventRepository;

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    /// List active events with application counts
    async fn list_events(&self) -> AppResult<Vec<EventSummary>>;

    /// Get one event (active or not) with its application count
    async fn get_event(&self, id: Uuid) -> AppResult<EventSummary>;
}

/// Concrete implementation of EventService.
pub struct EventCatalog {
    events: Arc<dyn EventRepository>,
}

impl EventCatalog {
    /// Create new event service instance
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl EventService for EventCatalog {
    async fn list_events(&self) -> AppResult<Vec<EventSummary>> {
        self.events.list_active().await.map_err(AppError::Fetch)
    }

    async fn get_event(&self, id: Uuid) -> AppResult<EventSummary> {
        self.events
            .find_summary(id)
            .await
            .map_err(AppError::Fetch)?
            .ok_or_not_found()
    }
}
