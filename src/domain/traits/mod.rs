//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod store;

pub use gateway::CatalogGateway;
pub use store::KeyValueStore;
