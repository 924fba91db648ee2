use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{DayKey, Player, Scoreboard};
use crate::update::{self, PlayerWins};

// ── Input validation ─────────────────────────────────────────────
//
// Bodies are taken as loose JSON so each rejected field gets its own
// message instead of a generic deserialization failure.

fn parse_date(value: Option<&Value>) -> Result<DayKey, ApiError> {
    let raw = match value {
        None | Some(Value::Null) => {
            return Err(ApiError::BadRequest("date is required".to_string()));
        }
        Some(Value::String(s)) if s.is_empty() => {
            return Err(ApiError::BadRequest("date is required".to_string()));
        }
        Some(Value::String(s)) => s,
        Some(_) => return Err(ApiError::BadRequest("date must be a string".to_string())),
    };

    DayKey::normalize(raw).map_err(|_| {
        ApiError::BadRequest("Invalid date format. Expected YYYY-MM-DD".to_string())
    })
}

fn parse_wins(value: Option<&Value>) -> Result<u32, ApiError> {
    let Some(Value::Number(n)) = value else {
        return Err(ApiError::BadRequest(
            "wins must be a non-negative number".to_string(),
        ));
    };

    if let Some(wins) = n.as_u64() {
        return u32::try_from(wins)
            .map_err(|_| ApiError::BadRequest(format!("wins is too large: {}", wins)));
    }

    match n.as_f64() {
        Some(f) if f < 0.0 => Err(ApiError::BadRequest(
            "wins must be a non-negative number".to_string(),
        )),
        _ => Err(ApiError::BadRequest("wins must be a whole number".to_string())),
    }
}

fn parse_player_name(value: Option<&Value>) -> Result<String, ApiError> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ApiError::BadRequest("playerName is required".to_string())),
    }
}

fn parse_player_wins(value: Option<&Value>) -> Result<Vec<PlayerWins>, ApiError> {
    let Some(Value::Array(items)) = value else {
        return Err(ApiError::BadRequest(
            "playerWins must be an array".to_string(),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<PlayerWins, ApiError> {
            let entry = |e: ApiError| ApiError::BadRequest(format!("playerWins[{}]: {}", i, e));
            Ok(PlayerWins {
                player_name: parse_player_name(item.get("playerName")).map_err(entry)?,
                wins: parse_wins(item.get("wins")).map_err(entry)?,
            })
        })
        .collect()
}

// ── Fetch ────────────────────────────────────────────────────────

pub async fn get_scoreboard(State(state): State<AppState>) -> Result<Json<Scoreboard>, ApiError> {
    Ok(Json(state.load_scoreboard().await?))
}

// ── Bulk day insert ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWinsRequest {
    pub date: Option<Value>,
    pub player_wins: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWinsResponse {
    pub success: bool,
    pub message: String,
    pub date: DayKey,
    pub total_wins: u64,
    pub merged_players: usize,
    pub ignored_players: Vec<String>,
}

pub async fn add_wins(
    State(state): State<AppState>,
    Json(body): Json<AddWinsRequest>,
) -> Result<Json<AddWinsResponse>, ApiError> {
    let day = parse_date(body.date.as_ref())?;
    let entries = parse_player_wins(body.player_wins.as_ref())?;

    let _guard = state.write_lock.lock().await;
    let mut board = state.load_scoreboard().await?;
    let report = update::apply_day_results(&mut board, &day, &entries, state.clock.now())?;
    state.store.save(&board).await?;

    Ok(Json(AddWinsResponse {
        success: true,
        message: format!(
            "Added wins for players on {} (total: {})",
            report.day, report.total_wins
        ),
        date: report.day,
        total_wins: report.total_wins,
        merged_players: report.merged_players,
        ignored_players: report.ignored_players,
    }))
}

// ── Single cell edit ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCellRequest {
    pub player_name: Option<Value>,
    pub date: Option<Value>,
    pub wins: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub async fn update_cell(
    State(state): State<AppState>,
    Json(body): Json<UpdateCellRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let player_name = parse_player_name(body.player_name.as_ref())?;
    let day = parse_date(body.date.as_ref())?;
    let wins = parse_wins(body.wins.as_ref())?;

    let _guard = state.write_lock.lock().await;
    let mut board = state.load_scoreboard().await?;
    update::set_cell_value(&mut board, &player_name, &day, wins, state.clock.now())?;
    state.store.save(&board).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Updated {}'s wins for {} to {}", player_name, day, wins),
    }))
}

// ── Player creation ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlayerRequest {
    pub player_name: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct AddPlayerResponse {
    pub success: bool,
    pub message: String,
    pub player: Player,
}

pub async fn add_player(
    State(state): State<AppState>,
    Json(body): Json<AddPlayerRequest>,
) -> Result<Json<AddPlayerResponse>, ApiError> {
    let name = parse_player_name(body.player_name.as_ref())?;

    let _guard = state.write_lock.lock().await;
    let mut board = state.load_scoreboard().await?;
    let player = update::add_player(&mut board, &name, state.clock.now())?.clone();
    state.store.save(&board).await?;

    Ok(Json(AddPlayerResponse {
        success: true,
        message: "Player added successfully".to_string(),
        player,
    }))
}
