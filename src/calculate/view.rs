//! Full table view: columns plus one row of cells per player.

use serde::Serialize;

use super::{build_catalog, build_columns, month_total, sort_players, SortState};
use crate::calendar::CalendarMapper;
use crate::models::{Column, DateMeta, DayKey, Player, Scoreboard};

/// One player's row. `cells` lines up with the view's columns: day cells
/// hold that day's wins, month total cells hold the truncated month total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub name: String,
    pub cells: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardView {
    pub today: DayKey,
    pub columns: Vec<Column>,
    pub rows: Vec<RowView>,
    pub sort: SortState,
}

fn row_for<C>(
    player: &Player,
    columns: &[Column],
    catalog: &[DateMeta],
    today: &DayKey,
    calendar: &C,
) -> RowView
where
    C: CalendarMapper + ?Sized,
{
    let cells = columns
        .iter()
        .map(|column| match column {
            Column::Date { day_key, .. } => u64::from(player.wins_on(day_key)),
            Column::MonthTotal { month, .. } => month_total(player, month, catalog, today, calendar),
        })
        .collect();

    RowView {
        name: player.name.clone(),
        cells,
    }
}

/// Build the table for a scoreboard as of `today`, ordered by `sort`.
pub fn build_view<C>(
    board: &Scoreboard,
    sort: &SortState,
    today: &DayKey,
    calendar: &C,
) -> ScoreboardView
where
    C: CalendarMapper + ?Sized,
{
    let catalog = build_catalog(&board.dates, calendar);
    let columns = build_columns(&catalog, calendar);

    let rows = sort_players(
        &board.players,
        sort.month.as_ref(),
        sort.direction,
        &catalog,
        today,
        calendar,
    )
    .into_iter()
    .map(|player| row_for(player, &columns, &catalog, today, calendar))
    .collect();

    ScoreboardView {
        today: today.clone(),
        columns,
        rows,
        sort: sort.clone(),
    }
}
