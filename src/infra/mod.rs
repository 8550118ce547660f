//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over the three relational tables

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    ApplicationRepository, ApplicationStore, EventRepository, EventStore, UserRepository,
    UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockApplicationRepository, MockEventRepository, MockUserRepository};
