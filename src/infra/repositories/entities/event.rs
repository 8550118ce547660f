//! Event database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Event;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub location: Option<String>,
    pub application_deadline: Option<DateTimeUtc>,
    pub max_participants: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Event {
            id: model.id,
            name: model.name,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            location: model.location,
            application_deadline: model.application_deadline,
            max_participants: model.max_participants,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
