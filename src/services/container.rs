//! Service Container - Centralized service access.
//!
//! Wires repositories into services once, at startup, and hands out
//! trait objects for the API layer to depend on.

use std::sync::Arc;

use super::{
    AdminReviewService, ApplicationDesk, ApplicationService, EventCatalog, EventService,
    IdentityService, ReviewDesk, SessionGate,
};
use crate::config::Config;
use crate::infra::{ApplicationStore, EventStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get identity service
    fn identity(&self) -> Arc<dyn IdentityService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;

    /// Get application service
    fn applications(&self) -> Arc<dyn ApplicationService>;

    /// Get admin review service
    fn admin(&self) -> Arc<dyn AdminReviewService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    identity: Arc<dyn IdentityService>,
    events: Arc<dyn EventService>,
    applications: Arc<dyn ApplicationService>,
    admin: Arc<dyn AdminReviewService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        identity: Arc<dyn IdentityService>,
        events: Arc<dyn EventService>,
        applications: Arc<dyn ApplicationService>,
        admin: Arc<dyn AdminReviewService>,
    ) -> Self {
        Self {
            identity,
            events,
            applications,
            admin,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let events = Arc::new(EventStore::new(db.clone()));
        let applications = Arc::new(ApplicationStore::new(db));

        let identity = Arc::new(SessionGate::new(users, config));
        let event_service = Arc::new(EventCatalog::new(events.clone()));
        let application_service = Arc::new(ApplicationDesk::new(applications.clone(), events));
        let admin_service = Arc::new(ReviewDesk::new(applications));

        Self::new(identity, event_service, application_service, admin_service)
    }
}

impl ServiceContainer for Services {
    fn identity(&self) -> Arc<dyn IdentityService> {
        self.identity.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.events.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.applications.clone()
    }

    fn admin(&self) -> Arc<dyn AdminReviewService> {
        self.admin.clone()
    }
}
