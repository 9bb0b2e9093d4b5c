//! Durable client-local storage.

pub mod file_kv;

pub use file_kv::FileKeyValueStore;
