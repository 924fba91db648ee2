//! Per-player season summaries.

use serde::Serialize;

use super::{month_total, season_total};
use crate::calendar::CalendarMapper;
use crate::models::{Column, DateMeta, DayKey, Player};

/// Headline numbers for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub rank: usize,
    pub name: String,
    pub total: u64,
    pub best_month_total: u64,
    pub current_month_total: u64,
}

/// Summaries for every player, ranked by season total (highest first).
/// Equal totals keep scoreboard order.
pub fn summarize_players<C>(
    players: &[Player],
    catalog: &[DateMeta],
    columns: &[Column],
    today: &DayKey,
    calendar: &C,
) -> Vec<PlayerSummary>
where
    C: CalendarMapper + ?Sized,
{
    let current_month = calendar.display_month(today);

    let mut summaries: Vec<PlayerSummary> = players
        .iter()
        .map(|player| {
            let best_month_total = columns
                .iter()
                .filter_map(|c| match c {
                    Column::MonthTotal { month, .. } => {
                        Some(month_total(player, month, catalog, today, calendar))
                    }
                    Column::Date { .. } => None,
                })
                .max()
                .unwrap_or(0);

            PlayerSummary {
                rank: 0,
                name: player.name.clone(),
                total: season_total(player, catalog),
                best_month_total,
                current_month_total: month_total(player, &current_month, catalog, today, calendar),
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    for (i, summary) in summaries.iter_mut().enumerate() {
        summary.rank = i + 1;
    }

    summaries
}
