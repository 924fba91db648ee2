//! Derived table layout: date metadata and display columns.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DayKey;

/// Opaque identifier of one month in the display calendar.
///
/// Days sharing an id belong to the same month total, whatever their
/// Gregorian months are.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayMonthId(String);

impl DisplayMonthId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a two-digit month number (`01` to `12`).
    pub fn parse_month_number(raw: &str) -> Option<Self> {
        match raw.parse::<u32>() {
            Ok(m) if raw.len() == 2 && (1..=12).contains(&m) => Some(Self::new(raw)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayMonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayMonthId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A known day together with its display-calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMeta {
    pub day_key: DayKey,
    pub date: NaiveDate,
    pub month: DisplayMonthId,
}

/// One column of the scoreboard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Column {
    #[serde(rename_all = "camelCase")]
    Date {
        day_key: DayKey,
        date: NaiveDate,
        label: String,
    },
    #[serde(rename_all = "camelCase")]
    MonthTotal { month: DisplayMonthId, label: String },
}

impl Column {
    pub fn is_month_total(&self) -> bool {
        matches!(self, Column::MonthTotal { .. })
    }
}
