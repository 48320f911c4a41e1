//! Domain layer - Core business objects with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: Products, users, carts and the session identity
//! - Traits: Abstractions for infrastructure (gateway, key/value slot)
//! - Routes: Navigation guard for protected views
//! - Format: Display helpers shared by the views

pub mod entities;
pub mod format;
pub mod routes;
pub mod traits;
