//! Job-level control primitives: cancellation and budget enforcement
//!
//! Both are shared across concurrently running per-claim tasks, so they are
//! cheap atomics behind `Arc`-cloneable handles.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Cooperative cancellation signal for an analysis job
///
/// In-flight per-claim tasks check the token between external calls and
/// return their best partial result when cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Error returned when the external-call budget is exhausted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("external call budget exhausted ({limit} calls)")]
pub struct BudgetExhausted {
    /// The configured ceiling
    pub limit: u32,
}

/// Hard ceiling on external calls (LLM completions + searches) per job
///
/// Checked before each loop iteration in the research and verdict stages;
/// exhaustion terminates that unit of work with its best partial result, not
/// the whole job.
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    used: Arc<AtomicU32>,
    limit: u32,
}

impl BudgetTracker {
    /// Create a tracker with the given call ceiling
    pub fn new(limit: u32) -> Self {
        Self {
            used: Arc::new(AtomicU32::new(0)),
            limit,
        }
    }

    /// Reserve one external call, failing if the ceiling is reached
    pub fn charge(&self) -> Result<(), BudgetExhausted> {
        let mut current = self.used.load(Ordering::SeqCst);
        loop {
            if current >= self.limit {
                return Err(BudgetExhausted { limit: self.limit });
            }
            match self.used.compare_exchange(
                current,
                current + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    /// Calls consumed so far
    pub fn used(&self) -> u32 {
        self.used.load(Ordering::SeqCst)
    }

    /// Calls still available
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used())
    }
}
