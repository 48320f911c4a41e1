//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Api: HTTP client for the remote store API
//! - Config: Configuration loading
//! - Storage: Persistent key/value slots

pub mod api;
pub mod config;
pub mod storage;
