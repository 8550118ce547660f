//! Application database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Application, ApplicationStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub status: String,
    pub submitted_at: DateTimeUtc,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewedBy",
        to = "super::user::Column::Id"
    )]
    Reviewer,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

// Owner relation; the reviewer join is done by hand in the repository
// since SeaORM's Related cannot disambiguate two paths to users.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Application {
    fn from(model: Model) -> Self {
        Application {
            id: model.id,
            user_id: model.user_id,
            event_id: model.event_id,
            applicant_name: model.applicant_name,
            phone_number: model.phone_number,
            emergency_contact_name: model.emergency_contact_name,
            emergency_contact_phone: model.emergency_contact_phone,
            dietary_restrictions: model.dietary_restrictions,
            medical_conditions: model.medical_conditions,
            special_requirements: model.special_requirements,
            status: ApplicationStatus::from(model.status.as_str()),
            submitted_at: model.submitted_at,
            admin_notes: model.admin_notes,
            reviewed_by: model.reviewed_by,
            reviewed_at: model.reviewed_at,
        }
    }
}
