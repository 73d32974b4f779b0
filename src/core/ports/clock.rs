//! Clock port
//!
//! The conversation engine and the post ingest path read time only
//! through this trait so a fake clock can drive them in tests.

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Source of monotonic time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant
    fn now(&self) -> Instant;

    /// Current calendar time, used to pin relative post ages
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall-clock implementation backed by [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
