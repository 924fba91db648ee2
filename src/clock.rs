//! Source of "today" for month truncation.
//!
//! Aggregation never reads the clock itself; callers ask a [`Clock`] once
//! per request and pass the day down.

use chrono::{DateTime, Utc};

use crate::models::DayKey;

pub trait Clock: Send + Sync {
    /// Today's day key in the local calendar.
    fn today(&self) -> DayKey;

    /// Timestamp recorded on mutated scoreboards.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock, using the machine's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        DayKey::from_date(chrono::Local::now().date_naive())
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: DayKey,
}

impl FixedClock {
    pub fn new(today: DayKey) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DayKey {
        self.today.clone()
    }

    fn now(&self) -> DateTime<Utc> {
        self.today.date().and_hms_opt(12, 0, 0).unwrap_or_default().and_utc()
    }
}
