//! Stores - State holders driven by view actions
//!
//! No store depends on another. Reads go through the catalog gateway;
//! writes to products and users stay local (see [`overlay`]).

pub mod analytics;
pub mod auth;
pub mod flash;
pub mod loading;
pub mod overlay;
pub mod products;
pub mod users;

pub use analytics::{AnalyticsStore, AnalyticsSummary};
pub use auth::AuthStore;
pub use flash::FlashMessage;
pub use loading::{LoadingFlag, LoadingGuard};
pub use overlay::{LocalOverlay, OverlayWrite};
pub use products::{ProductSnapshot, ProductStore};
pub use users::{UserSnapshot, UserStore};

#[cfg(test)]
pub(crate) mod testing;
