//! Wall clock source for expiration bookkeeping.
//!
//! Paging records expire against wall-clock deadlines. The clock is handed
//! to the paging state at construction time so tests can substitute a
//! deterministic one and fast-forward it.

use chrono::{DateTime, Utc};

/// Source of "now".
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The process wall clock.
pub fn system_clock() -> Clock {
    Box::new(Utc::now)
}
