//! Display calendars.
//!
//! Scoreboard data is keyed by Gregorian day, but months are shown and
//! totalled in a display calendar. Everything downstream only needs the
//! mapping from a day key to a month id and a few labels, which is what
//! [`CalendarMapper`] provides.

mod persian;

pub use persian::*;

use crate::models::{DayKey, DisplayMonthId};

/// Maps Gregorian day keys onto a display calendar.
pub trait CalendarMapper: Send + Sync {
    /// Month of the display calendar containing this day.
    fn display_month(&self, day: &DayKey) -> DisplayMonthId;

    /// Short month name for the day's display month.
    fn month_short_label(&self, day: &DayKey) -> String;

    /// Header label for a single day column.
    fn day_label(&self, day: &DayKey) -> String;

    /// Header label for the month total that closes the day's month.
    fn month_total_label(&self, day: &DayKey) -> String {
        format!("{} total", self.month_short_label(day))
    }
}
