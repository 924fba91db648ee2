//! Canonical `YYYY-MM-DD` day keys.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when a string is not a canonical day key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayKeyError {
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    Format(String),

    #[error("Not a calendar date: {0}")]
    OutOfRange(String),
}

fn day_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("day key pattern compiles"))
}

/// One Gregorian day, stored in its zero-padded `YYYY-MM-DD` form.
///
/// Ordering is plain string ordering, which matches chronological order
/// because every key has the same width.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(String);

impl DayKey {
    /// Parse a canonical day key. The string must match the grammar and name
    /// a real Gregorian date.
    pub fn parse(s: &str) -> Result<Self, DayKeyError> {
        if !day_key_pattern().is_match(s) {
            return Err(DayKeyError::Format(s.to_string()));
        }
        // Components are validated separately so "2024-02-30" is rejected
        // instead of silently rolling over.
        if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
            return Err(DayKeyError::OutOfRange(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Accept either a day key or a full timestamp. Anything containing a `T`
    /// is cut to its first 10 characters before parsing.
    pub fn normalize(input: &str) -> Result<Self, DayKeyError> {
        let candidate = if input.contains('T') {
            input.get(..10).unwrap_or(input)
        } else {
            input
        };
        Self::parse(candidate)
    }

    /// Build a key from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// The calendar date this key names, built from its own components.
    pub fn date(&self) -> NaiveDate {
        let year = self.0[0..4].parse().unwrap_or_default();
        let month = self.0[5..7].parse().unwrap_or_default();
        let day = self.0[8..10].parse().unwrap_or_default();
        // Parsing already proved the date exists.
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayKey({})", self.0)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
