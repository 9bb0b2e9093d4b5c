//! # CareerDeck Domain
//!
//! Domain types for the CareerDeck calendar aggregation engine.
//!
//! This crate contains:
//! - Collaborator records (deadlines, interviews, reminders, integrations)
//! - The [`UnifiedEvent`] tagged union consumed by the aggregation core
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other CareerDeck crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
