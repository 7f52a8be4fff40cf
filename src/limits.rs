use std::time::{Duration, Instant};

/// Hard ceiling on traversal depth; caller-supplied depths are clamped here.
pub const MAX_SEARCH_DEPTH: usize = 6;

pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_NODES: usize = 10_000;
pub const DEFAULT_MAX_EDGES: usize = 50_000;

/// Deadline tracker for traversal and batch loops. Created with a
/// millisecond budget at search start and checked at every dequeue, so a
/// single slow store fetch can overrun the budget by at most one fetch.
#[derive(Debug)]
pub struct TimeoutGuard {
    started: Instant,
    budget: Duration,
}

impl TimeoutGuard {
    pub fn new(budget_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            budget: Duration::from_millis(budget_ms),
        }
    }

    /// True once elapsed time has reached the budget. A zero budget is
    /// expired from the first check.
    pub fn is_expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
