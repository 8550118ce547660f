//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and repositories to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and own the error boundary that scopes
//! storage failures to operation-specific error codes.

mod admin_service;
mod application_service;
pub mod container;
mod event_service;
mod identity_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminReviewService, DashboardSummary, ReviewDesk, StatusCounts};
pub use application_service::{ApplicationDesk, ApplicationService};
pub use event_service::{EventCatalog, EventService};
pub use identity_service::{Claims, CurrentUser, IdentityService, SessionGate};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
