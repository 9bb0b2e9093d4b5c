//! # CareerDeck Infrastructure
//!
//! Infrastructure implementations of the core calendar ports.
//!
//! This crate contains:
//! - The HTTP client and the collaborator API adapter
//! - File-backed client-local storage
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `careerdeck-core`
//! - Contains all "impure" code (network, filesystem, global subscriber)

pub mod bootstrap;
pub mod collaborators;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use bootstrap::calendar_service;
pub use collaborators::ApiClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
pub use storage::FileKeyValueStore;
