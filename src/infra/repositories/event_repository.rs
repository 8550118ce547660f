//! Event repository implementation.
//!
//! Events are reference data from the applicant's perspective: rows
//! come from the seed command or an out-of-scope administrative path,
//! so this repository is read-only apart from the seed insert.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::{
    application,
    event::{self, ActiveModel as EventActiveModel, Entity as EventEntity},
};
use crate::domain::{Event, EventSummary};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// List active events with application counts, start date ascending
    async fn list_active(&self) -> Result<Vec<EventSummary>, DbErr>;

    /// Find one event (active or not) with its application count
    async fn find_summary(&self, id: Uuid) -> Result<Option<EventSummary>, DbErr>;

    /// Find event by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, DbErr>;

    /// Insert an event (seed path only)
    async fn insert(&self, event: Event) -> Result<Event, DbErr>;
}

/// Per-event application count row for the grouped count query
#[derive(Debug, FromQueryResult)]
struct EventCountRow {
    event_id: Uuid,
    count: i64,
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Application counts grouped by event for the given events
    async fn counts_for(&self, event_ids: Vec<Uuid>) -> Result<HashMap<Uuid, u64>, DbErr> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = application::Entity::find()
            .select_only()
            .column(application::Column::EventId)
            .column_as(application::Column::Id.count(), "count")
            .filter(application::Column::EventId.is_in(event_ids))
            .group_by(application::Column::EventId)
            .into_model::<EventCountRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.event_id, row.count as u64))
            .collect())
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn list_active(&self) -> Result<Vec<EventSummary>, DbErr> {
        let models = EventEntity::find()
            .filter(event::Column::IsActive.eq(true))
            .order_by_asc(event::Column::StartDate)
            .all(&self.db)
            .await?;

        let counts = self.counts_for(models.iter().map(|m| m.id).collect()).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let count = counts.get(&model.id).copied().unwrap_or(0);
                EventSummary {
                    event: Event::from(model),
                    application_count: count,
                }
            })
            .collect())
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<EventSummary>, DbErr> {
        let Some(model) = EventEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let counts = self.counts_for(vec![model.id]).await?;
        let count = counts.get(&model.id).copied().unwrap_or(0);

        Ok(Some(EventSummary {
            event: Event::from(model),
            application_count: count,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, DbErr> {
        let result = EventEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Event::from))
    }

    async fn insert(&self, ev: Event) -> Result<Event, DbErr> {
        use sea_orm::Set;

        let active_model = EventActiveModel {
            id: Set(ev.id),
            name: Set(ev.name),
            description: Set(ev.description),
            start_date: Set(ev.start_date),
            end_date: Set(ev.end_date),
            location: Set(ev.location),
            application_deadline: Set(ev.application_deadline),
            max_participants: Set(ev.max_participants),
            is_active: Set(ev.is_active),
            created_at: Set(ev.created_at),
            updated_at: Set(ev.updated_at),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Event::from(model))
    }
}
