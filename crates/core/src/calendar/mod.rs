//! Unified calendar aggregation
//!
//! Four feeds reach the timeline: job deadlines, interviews (with reminder
//! state), local notes and events synced from external calendar accounts.
//! Each stage below is a pure function of its inputs except the registry,
//! which owns integration state, and the dispatcher, which talks to the
//! owning collaborator of an event.

pub mod dispatcher;
pub mod external;
pub mod identity;
pub mod lifetime;
pub mod merger;
pub mod mutation;
pub mod normalizer;
pub mod ports;
pub mod registry;
pub mod service;
pub mod summary;
pub mod time;
pub mod visibility;
