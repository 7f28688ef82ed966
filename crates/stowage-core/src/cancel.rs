//! Cooperative cancellation and stale-result guarding for long runs.
//!
//! A [`RunSupervisor`] hands out one [`CancelToken`] per run. Beginning a new
//! run supersedes every older token: they report cancelled, and results
//! computed under them are refused by [`CancelToken::accept`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::{PackError, Result};

/// Issues run tokens for one bin; at most one run is current at a time.
#[derive(Debug, Clone, Default)]
pub struct RunSupervisor {
    latest: Arc<AtomicU64>,
}

impl RunSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run, superseding whatever run was current.
    pub fn begin(&self) -> CancelToken {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        CancelToken {
            generation,
            latest: Arc::clone(&self.latest),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}

/// Token polled by packing runs between instances.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    latest: Arc<AtomicU64>,
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that is only cancelled explicitly.
    pub fn new() -> Self {
        Self {
            generation: 0,
            latest: Arc::new(AtomicU64::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether no newer run has started since this token was issued.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire) || !self.is_current()
    }

    /// Fails with [`PackError::Cancelled`] once cancelled or superseded.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(PackError::Cancelled);
        }
        Ok(())
    }

    /// Passes `value` through only while this run is still the current one.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        (!self.is_cancelled()).then_some(value)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
