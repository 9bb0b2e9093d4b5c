//! HTTP plumbing shared by the collaborator adapters.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
