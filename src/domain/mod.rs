//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns:
//! users, camping events, applications, and the eligibility gate.

pub mod application;
pub mod eligibility;
pub mod event;
pub mod user;

pub use application::{
    AdminApplicationView, Application, ApplicationFilter, ApplicationPatch, ApplicationStatus,
    ApplicationWithEvent, NewApplication,
};
pub use eligibility::{check_eligibility, Ineligibility};
pub use event::{Event, EventSummary};
pub use user::{User, UserSummary};
