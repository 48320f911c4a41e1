//! Admin dashboard core for the Fake Store API
//!
//! Stores for the session, the product catalog, the user directory and sales
//! analytics, fed by a read-only HTTP gateway. Writes to products and users
//! are kept locally on top of the fetched data.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{AppError, GatewayError, StoreError};
pub use application::state::AppState;
pub use infrastructure::config::Config;
