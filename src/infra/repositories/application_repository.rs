//! Application repository implementation.
//!
//! Owner-scoped queries return applications joined with their event;
//! admin queries additionally join the owner and (when reviewed) the
//! reviewer. The reviewer join is resolved by hand because the
//! applications table has two foreign keys into users.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::entities::{
    application::{self, ActiveModel, Entity as ApplicationEntity},
    event::{self, Entity as EventEntity},
    user::{self, Entity as UserEntity},
};
use crate::domain::{
    AdminApplicationView, Application, ApplicationFilter, ApplicationPatch, ApplicationStatus,
    ApplicationWithEvent, Event, NewApplication, UserSummary,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Application repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// List a user's applications with events, submitted_at descending
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithEvent>, DbErr>;

    /// Find one application by id scoped to its owner
    async fn find_owned(&self, id: Uuid, user_id: Uuid)
        -> Result<Option<ApplicationWithEvent>, DbErr>;

    /// Find a user's application for an event, if any
    async fn find_for_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<Application>, DbErr>;

    /// Count applications for an event
    async fn count_for_event(&self, event_id: Uuid) -> Result<u64, DbErr>;

    /// Insert a new application with status pending and a
    /// server-assigned submission timestamp
    async fn insert(&self, user_id: Uuid, data: NewApplication) -> Result<Application, DbErr>;

    /// Update applicant-supplied fields
    async fn update_details(&self, id: Uuid, patch: ApplicationPatch) -> Result<Application, DbErr>;

    /// Hard delete an application
    async fn delete(&self, id: Uuid) -> Result<(), DbErr>;

    /// List applications across all users with admin joins and filters
    async fn list_admin(&self, filter: ApplicationFilter)
        -> Result<Vec<AdminApplicationView>, DbErr>;

    /// Find one application regardless of owner, with admin joins
    async fn find_admin(&self, id: Uuid) -> Result<Option<AdminApplicationView>, DbErr>;

    /// Set status, notes, reviewer and review timestamp together
    async fn update_review(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Option<AdminApplicationView>, DbErr>;

    /// Application counts grouped by raw status value
    async fn status_counts(&self) -> Result<HashMap<String, u64>, DbErr>;

    /// Most recently submitted applications with admin joins
    async fn recent(&self, limit: u64) -> Result<Vec<AdminApplicationView>, DbErr>;
}

/// Grouped count row for the dashboard aggregate
#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: String,
    count: i64,
}

/// Concrete implementation of ApplicationRepository
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach owner, event, and reviewer to application rows.
    ///
    /// Batch-loads the referenced users and events instead of joining
    /// per row; admin listings are small enough for two extra queries.
    async fn hydrate_admin(
        &self,
        models: Vec<application::Model>,
    ) -> Result<Vec<AdminApplicationView>, DbErr> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: HashSet<Uuid> = models.iter().map(|m| m.event_id).collect();
        let user_ids: HashSet<Uuid> = models
            .iter()
            .flat_map(|m| [Some(m.user_id), m.reviewed_by])
            .flatten()
            .collect();

        let events: HashMap<Uuid, Event> = EventEntity::find()
            .filter(event::Column::Id.is_in(event_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, Event::from(m)))
            .collect();

        let users: HashMap<Uuid, UserSummary> = UserEntity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    UserSummary {
                        id: m.id,
                        email: m.email,
                        name: m.name,
                    },
                )
            })
            .collect();

        models
            .into_iter()
            .map(|model| {
                let event = events
                    .get(&model.event_id)
                    .cloned()
                    .ok_or_else(|| DbErr::RecordNotFound(format!("event {}", model.event_id)))?;
                let owner = users
                    .get(&model.user_id)
                    .cloned()
                    .ok_or_else(|| DbErr::RecordNotFound(format!("user {}", model.user_id)))?;
                let reviewer = model.reviewed_by.and_then(|id| users.get(&id).cloned());

                Ok(AdminApplicationView {
                    application: Application::from(model),
                    user: owner,
                    event,
                    reviewer,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithEvent>, DbErr> {
        let rows = ApplicationEntity::find()
            .filter(application::Column::UserId.eq(user_id))
            .order_by_desc(application::Column::SubmittedAt)
            .find_also_related(EventEntity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, ev)| {
                let ev = ev
                    .ok_or_else(|| DbErr::RecordNotFound(format!("event {}", model.event_id)))?;
                Ok(ApplicationWithEvent {
                    application: Application::from(model),
                    event: Event::from(ev),
                })
            })
            .collect()
    }

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApplicationWithEvent>, DbErr> {
        let row = ApplicationEntity::find_by_id(id)
            .filter(application::Column::UserId.eq(user_id))
            .find_also_related(EventEntity)
            .one(&self.db)
            .await?;

        match row {
            Some((model, Some(ev))) => Ok(Some(ApplicationWithEvent {
                application: Application::from(model),
                event: Event::from(ev),
            })),
            Some((model, None)) => {
                Err(DbErr::RecordNotFound(format!("event {}", model.event_id)))
            }
            None => Ok(None),
        }
    }

    async fn find_for_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<Application>, DbErr> {
        let result = ApplicationEntity::find()
            .filter(application::Column::UserId.eq(user_id))
            .filter(application::Column::EventId.eq(event_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Application::from))
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        ApplicationEntity::find()
            .filter(application::Column::EventId.eq(event_id))
            .count(&self.db)
            .await
    }

    async fn insert(&self, user_id: Uuid, data: NewApplication) -> Result<Application, DbErr> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            event_id: Set(data.event_id),
            applicant_name: Set(data.applicant_name),
            phone_number: Set(data.phone_number),
            emergency_contact_name: Set(data.emergency_contact_name),
            emergency_contact_phone: Set(data.emergency_contact_phone),
            dietary_restrictions: Set(data.dietary_restrictions),
            medical_conditions: Set(data.medical_conditions),
            special_requirements: Set(data.special_requirements),
            status: Set(ApplicationStatus::Pending.as_str().to_string()),
            submitted_at: Set(Utc::now()),
            admin_notes: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Application::from(model))
    }

    async fn update_details(
        &self,
        id: Uuid,
        patch: ApplicationPatch,
    ) -> Result<Application, DbErr> {
        let model = ApplicationEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("application {}", id)))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = patch.applicant_name {
            active.applicant_name = Set(name);
        }
        if let Some(phone) = patch.phone_number {
            active.phone_number = Set(phone);
        }
        if let Some(name) = patch.emergency_contact_name {
            active.emergency_contact_name = Set(name);
        }
        if let Some(phone) = patch.emergency_contact_phone {
            active.emergency_contact_phone = Set(phone);
        }
        if let Some(text) = patch.dietary_restrictions {
            active.dietary_restrictions = Set(text);
        }
        if let Some(text) = patch.medical_conditions {
            active.medical_conditions = Set(text);
        }
        if let Some(text) = patch.special_requirements {
            active.special_requirements = Set(text);
        }

        let model = active.update(&self.db).await?;
        Ok(Application::from(model))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        let result = ApplicationEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("application {}", id)));
        }

        Ok(())
    }

    async fn list_admin(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<AdminApplicationView>, DbErr> {
        let mut query = ApplicationEntity::find();

        if let Some(event_id) = filter.event_id {
            query = query.filter(application::Column::EventId.eq(event_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(application::Column::Status.eq(status.as_str()));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!(
                "%{}%",
                search.to_lowercase().replace('%', "\\%").replace('_', "\\_")
            );

            // Case-insensitive substring match on applicant name OR
            // owner email, AND'd with the exact filters above.
            query = query
                .join(JoinType::InnerJoin, application::Relation::User.def())
                .filter(
                    Condition::any()
                        .add(
                            Expr::expr(Func::lower(Expr::col((
                                ApplicationEntity,
                                application::Column::ApplicantName,
                            ))))
                            .like(pattern.clone()),
                        )
                        .add(
                            Expr::expr(Func::lower(Expr::col((
                                UserEntity,
                                user::Column::Email,
                            ))))
                            .like(pattern),
                        ),
                );
        }

        let models = query
            .order_by_desc(application::Column::SubmittedAt)
            .all(&self.db)
            .await?;

        self.hydrate_admin(models).await
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<AdminApplicationView>, DbErr> {
        let Some(model) = ApplicationEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut views = self.hydrate_admin(vec![model]).await?;
        Ok(views.pop())
    }

    async fn update_review(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        admin_notes: Option<String>,
        reviewed_by: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Option<AdminApplicationView>, DbErr> {
        let Some(model) = ApplicationEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.admin_notes = Set(admin_notes);
        active.reviewed_by = Set(Some(reviewed_by));
        active.reviewed_at = Set(Some(reviewed_at));

        let model = active.update(&self.db).await?;

        let mut views = self.hydrate_admin(vec![model]).await?;
        Ok(views.pop())
    }

    async fn status_counts(&self) -> Result<HashMap<String, u64>, DbErr> {
        let rows = ApplicationEntity::find()
            .select_only()
            .column(application::Column::Status)
            .column_as(application::Column::Id.count(), "count")
            .group_by(application::Column::Status)
            .into_model::<StatusCountRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.status, row.count as u64))
            .collect())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AdminApplicationView>, DbErr> {
        let models = ApplicationEntity::find()
            .order_by_desc(application::Column::SubmittedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        self.hydrate_admin(models).await
    }
}
