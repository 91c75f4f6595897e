//! Statement cache defeat
//!
//! Appending a comment carrying the current time makes every statement text
//! unique, so the server has to parse and plan it again.

use std::sync::Arc;

/// Source of wall-clock milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The real wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Rewrites statements so they never hit the statement cache
#[derive(Clone)]
pub struct HardParse {
    clock: Arc<dyn Clock>,
}

impl HardParse {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Append the timestamped comment to `query`
    pub fn rewrite(&self, query: &str) -> String {
        format!("{} /* hard parse interrupt: {} */ ", query, self.clock.now_millis())
    }
}

impl Default for HardParse {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HardParse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HardParse").finish_non_exhaustive()
    }
}
