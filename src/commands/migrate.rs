//! Migrate command - Schema management for the registration store.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Schema changes are always explicit here; nothing auto-applies.
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Cannot reach database: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            db.migrate_down()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Rolled back one migration");
        }
        MigrateAction::Status => {
            let overview = db
                .migration_overview()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            for (name, applied) in overview {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and rebuilding the schema");
            db.reset_schema()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            tracing::info!("Schema rebuilt");
        }
    }

    Ok(())
}
