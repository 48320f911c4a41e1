//! Application layer - Stores and the state that owns them
//!
//! This layer contains:
//! - Stores: Reactive state for auth, products, users and analytics
//! - State: The application context handed to the views
//! - Errors: Error taxonomy shared across layers

pub mod errors;
pub mod state;
pub mod stores;
