//! Lifetime guard for the consuming surface
//!
//! Loads suspend on network calls. If the surface that asked for the data is
//! torn down meanwhile, the results are dropped instead of applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable flag shared between the surface and in-flight loads.
#[derive(Debug, Clone)]
pub struct LifetimeGuard {
    alive: Arc<AtomicBool>,
}

impl LifetimeGuard {
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the surface as gone. Idempotent.
    pub fn teardown(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for LifetimeGuard {
    fn default() -> Self {
        Self::new()
    }
}
