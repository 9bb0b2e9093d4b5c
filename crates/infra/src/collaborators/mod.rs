//! HTTP adapters for the remote collaborators.
//!
//! A single [`ApiClient`] implements every remote port defined in
//! `careerdeck-core`; the port method names never overlap.

pub mod api_client;

pub use api_client::ApiClient;
