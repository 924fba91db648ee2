//! Scoreboard calculation engine.
//!
//! Derives everything the table shows from a scoreboard's day keys:
//! - Date catalog: sorted days tagged with their display month
//! - Column plan: one column per day plus a total after each month
//! - Month totals, truncated at today for the running month
//! - Row ordering and per-player summaries

mod sort;
mod summary;
mod view;

pub use sort::*;
pub use summary::*;
pub use view::*;

use std::collections::BTreeSet;

use crate::calendar::CalendarMapper;
use crate::models::{Column, DateMeta, DayKey, DisplayMonthId, Player};

/// Deduplicate and sort day keys, then tag each with its display month.
pub fn build_catalog<'a, I, C>(day_keys: I, calendar: &C) -> Vec<DateMeta>
where
    I: IntoIterator<Item = &'a DayKey>,
    C: CalendarMapper + ?Sized,
{
    let unique: BTreeSet<&DayKey> = day_keys.into_iter().collect();

    unique
        .into_iter()
        .map(|day| DateMeta {
            day_key: day.clone(),
            date: day.date(),
            month: calendar.display_month(day),
        })
        .collect()
}

/// Lay out table columns for a sorted catalog.
///
/// A month total column follows an entry whenever the next entry belongs to
/// a different month (or there is no next entry). Grouping only looks at
/// neighbours, so a month id that shows up again later gets its own total.
pub fn build_columns<C>(catalog: &[DateMeta], calendar: &C) -> Vec<Column>
where
    C: CalendarMapper + ?Sized,
{
    let mut columns = Vec::with_capacity(catalog.len() + catalog.len() / 28 + 1);

    for (i, meta) in catalog.iter().enumerate() {
        columns.push(Column::Date {
            day_key: meta.day_key.clone(),
            date: meta.date,
            label: calendar.day_label(&meta.day_key),
        });

        let end_of_month = catalog
            .get(i + 1)
            .map_or(true, |next| next.month != meta.month);

        if end_of_month {
            columns.push(Column::MonthTotal {
                month: meta.month.clone(),
                label: calendar.month_total_label(&meta.day_key),
            });
        }
    }

    columns
}

/// Total wins for a player in one display month.
///
/// When `month` is the month containing `today`, days after `today` are
/// left out so a running month is not compared against finished ones with
/// empty future days.
pub fn month_total<C>(
    player: &Player,
    month: &DisplayMonthId,
    catalog: &[DateMeta],
    today: &DayKey,
    calendar: &C,
) -> u64
where
    C: CalendarMapper + ?Sized,
{
    let is_current_month = *month == calendar.display_month(today);

    catalog
        .iter()
        .filter(|meta| meta.month == *month)
        .filter(|meta| !(is_current_month && meta.day_key > *today))
        .map(|meta| u64::from(player.wins_on(&meta.day_key)))
        .sum()
}

/// Sum of every recorded day for a player, without truncation.
pub fn season_total(player: &Player, catalog: &[DateMeta]) -> u64 {
    catalog
        .iter()
        .map(|meta| u64::from(player.wins_on(&meta.day_key)))
        .sum()
}
