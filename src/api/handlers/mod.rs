//! HTTP request handlers.

pub mod admin_handler;
pub mod application_handler;
pub mod event_handler;

pub use admin_handler::admin_routes;
pub use application_handler::application_routes;
pub use event_handler::event_routes;
