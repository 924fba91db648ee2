//! Derived scoreboard views: the column table and per-player summaries.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    build_catalog, build_columns, build_view, summarize_players, PlayerSummary, ScoreboardView,
    SortDirection, SortState,
};
use crate::models::{DayKey, DisplayMonthId};

/// Query parameters for the table endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TableParams {
    /// Month column currently sorted by
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    /// Month column the user just selected; toggles against `sort`
    pub select: Option<String>,
}

fn parse_month(param: &str, raw: &str) -> Result<DisplayMonthId, ApiError> {
    DisplayMonthId::parse_month_number(raw).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "{} must be a two-digit month number (01-12)",
            param
        ))
    })
}

impl TableParams {
    fn sort_state(&self) -> Result<SortState, ApiError> {
        let mut state = SortState {
            month: self
                .sort
                .as_deref()
                .map(|m| parse_month("sort", m))
                .transpose()?,
            direction: self.direction.unwrap_or_default(),
        };

        if let Some(selected) = self.select.as_deref() {
            state.select(parse_month("select", selected)?);
        }

        Ok(state)
    }
}

pub async fn table(
    State(state): State<AppState>,
    Query(params): Query<TableParams>,
) -> Result<Json<ScoreboardView>, ApiError> {
    let sort = params.sort_state()?;
    let board = state.load_scoreboard().await?;
    let today = state.clock.today();

    Ok(Json(build_view(&board, &sort, &today, &*state.calendar)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub today: DayKey,
    pub current_month: DisplayMonthId,
    pub players: Vec<PlayerSummary>,
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, ApiError> {
    let board = state.load_scoreboard().await?;
    let today = state.clock.today();
    let calendar = &*state.calendar;

    let catalog = build_catalog(&board.dates, calendar);
    let columns = build_columns(&catalog, calendar);

    Ok(Json(SummaryResponse {
        current_month: calendar.display_month(&today),
        players: summarize_players(&board.players, &catalog, &columns, &today, calendar),
        today,
    }))
}
