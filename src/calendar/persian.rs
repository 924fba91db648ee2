//! Solar Hijri (Persian) display calendar.

use chrono::Datelike;

use super::CalendarMapper;
use crate::models::{DayKey, DisplayMonthId};

/// Month names, Farvardin first.
pub const PERSIAN_MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// A date in the solar Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PersianDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl PersianDate {
    /// Convert a Gregorian calendar date.
    ///
    /// Uses the arithmetic 33-year leap cycle. Input is the plain
    /// year/month/day of the day key; no timezone is applied.
    ///
    /// Matches the astronomical Solar Hijri calendar from 1950 through
    /// 2124-03-19. From the 2124 Nowruz onwards the leap years diverge and
    /// results may be off by one day.
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Self {
        const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

        let gy = i64::from(year);
        let gy2 = if month > 2 { gy + 1 } else { gy };
        let mut days = 355_666 + 365 * gy + (gy2 + 3).div_euclid(4) - (gy2 + 99).div_euclid(100)
            + (gy2 + 399).div_euclid(400)
            + i64::from(day)
            + DAYS_BEFORE_MONTH[(month.clamp(1, 12) - 1) as usize];

        let mut jy = -1595 + 33 * days.div_euclid(12_053);
        days = days.rem_euclid(12_053);
        jy += 4 * days.div_euclid(1461);
        days = days.rem_euclid(1461);
        if days > 365 {
            jy += (days - 1).div_euclid(365);
            days = (days - 1).rem_euclid(365);
        }

        // First six months have 31 days, the next five 30, Esfand 29 or 30.
        let (jm, jd) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Self {
            year: jy,
            month: jm as u32,
            day: jd as u32,
        }
    }

    pub fn month_name(&self) -> &'static str {
        PERSIAN_MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }
}

/// Render ASCII digits with Persian digit glyphs.
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x06F0 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// The solar Hijri calendar. Month ids are the two-digit month number
/// (`"01"` for Farvardin through `"12"` for Esfand).
#[derive(Debug, Clone, Copy, Default)]
pub struct PersianCalendar;

impl PersianCalendar {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(&self, day: &DayKey) -> PersianDate {
        let date = day.date();
        PersianDate::from_gregorian(date.year(), date.month(), date.day())
    }
}

impl CalendarMapper for PersianCalendar {
    fn display_month(&self, day: &DayKey) -> DisplayMonthId {
        DisplayMonthId::new(format!("{:02}", self.convert(day).month))
    }

    fn month_short_label(&self, day: &DayKey) -> String {
        self.convert(day).month_name().to_string()
    }

    fn day_label(&self, day: &DayKey) -> String {
        let persian = self.convert(day);
        format!(
            "{} {}",
            to_persian_digits(&format!("{:02}", persian.day)),
            persian.month_name()
        )
    }
}
