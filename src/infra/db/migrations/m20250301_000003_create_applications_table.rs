//! Migration: Create the applications table.
//!
//! Carries the composite uniqueness constraint on (user_id, event_id)
//! that backs duplicate-application prevention.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users_table::Users;
use super::m20250301_000002_create_events_table::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::UserId).uuid().not_null())
                    .col(ColumnDef::new(Applications::EventId).uuid().not_null())
                    .col(
                        ColumnDef::new(Applications::ApplicantName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::PhoneNumber).string().null())
                    .col(
                        ColumnDef::new(Applications::EmergencyContactName)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Applications::EmergencyContactPhone)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Applications::DietaryRestrictions)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Applications::MedicalConditions)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Applications::SpecialRequirements)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Applications::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Applications::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::AdminNotes).text().null())
                    .col(ColumnDef::new(Applications::ReviewedBy).uuid().null())
                    .col(
                        ColumnDef::new(Applications::ReviewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_user")
                            .from(Applications::Table, Applications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_event")
                            .from(Applications::Table, Applications::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_reviewer")
                            .from(Applications::Table, Applications::ReviewedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Authoritative duplicate guard: one application per
        // (user, event) pair, enforced even when the service-level
        // pre-check races.
        manager
            .create_index(
                Index::create()
                    .name("uq_applications_user_event")
                    .table(Applications::Table)
                    .col(Applications::UserId)
                    .col(Applications::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_event_id")
                    .table(Applications::Table)
                    .col(Applications::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_status")
                    .table(Applications::Table)
                    .col(Applications::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_submitted_at")
                    .table(Applications::Table)
                    .col(Applications::SubmittedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
    UserId,
    EventId,
    ApplicantName,
    PhoneNumber,
    EmergencyContactName,
    EmergencyContactPhone,
    DietaryRestrictions,
    MedicalConditions,
    SpecialRequirements,
    Status,
    SubmittedAt,
    AdminNotes,
    ReviewedBy,
    ReviewedAt,
}
