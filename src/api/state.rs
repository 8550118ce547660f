//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AdminReviewService, ApplicationService, EventService, IdentityService, ServiceContainer,
    Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Identity service (session verification, user resolution)
    pub identity: Arc<dyn IdentityService>,
    /// Event catalog service
    pub events: Arc<dyn EventService>,
    /// Applicant-facing application service
    pub applications: Arc<dyn ApplicationService>,
    /// Admin review service
    pub admin: Arc<dyn AdminReviewService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            identity: container.identity(),
            events: container.events(),
            applications: container.applications(),
            admin: container.admin(),
            database,
        }
    }

    /// Create application state with manually injected services.
    ///
    /// Intended for tests that substitute fakes for one or more
    /// services.
    pub fn new(
        identity: Arc<dyn IdentityService>,
        events: Arc<dyn EventService>,
        applications: Arc<dyn ApplicationService>,
        admin: Arc<dyn AdminReviewService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            identity,
            events,
            applications,
            admin,
            database,
        }
    }
}
