//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod application;
pub mod event;
pub mod user;
