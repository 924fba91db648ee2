//! Scoreboard mutations.
//!
//! Three ways a scoreboard changes after creation:
//! - adding a player (seeded with zeros for every known day)
//! - merging a day's results (additive)
//! - setting a single cell (absolute)
//!
//! Every mutation keeps `dates` covering each day that appears in any
//! player's row. Loading and saving the record is the caller's job.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{DayKey, DayKeyError, Player, PlayerKey, Scoreboard, ScoreboardKey};

/// Errors raised by scoreboard operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreboardError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Player with this name already exists: {0}")]
    DuplicatePlayer(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Scoreboard not found: {0}")]
    ScoreboardNotFound(ScoreboardKey),
}

impl From<DayKeyError> for ScoreboardError {
    fn from(err: DayKeyError) -> Self {
        ScoreboardError::Validation(err.to_string())
    }
}

/// One player's wins in a bulk day insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWins {
    pub player_name: String,
    pub wins: u32,
}

impl PlayerWins {
    pub fn new(player_name: impl Into<String>, wins: u32) -> Self {
        Self {
            player_name: player_name.into(),
            wins,
        }
    }
}

/// Outcome of merging a day's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMergeReport {
    pub day: DayKey,
    /// Sum of every submitted entry, including ignored names.
    pub total_wins: u64,
    pub merged_players: usize,
    pub ignored_players: Vec<String>,
}

/// Add a day's results to every existing player.
///
/// Wins are added to whatever the player already has for that day, so
/// submitting the same results twice counts them twice. Players missing
/// from `entries` get an explicit zero for the day. Names that match no
/// player are ignored; only [`add_player`] creates players. When a name is
/// listed more than once, its last entry is used.
pub fn apply_day_results(
    board: &mut Scoreboard,
    day: &DayKey,
    entries: &[PlayerWins],
    now: DateTime<Utc>,
) -> Result<DayMergeReport, ScoreboardError> {
    let wins_by_name: HashMap<&str, u32> = entries
        .iter()
        .map(|e| (e.player_name.as_str(), e.wins))
        .collect();

    // Compute every new value before touching the board so an overflow
    // leaves it unchanged.
    let mut updated = Vec::with_capacity(board.players.len());
    for player in &board.players {
        let add = wins_by_name.get(player.name.as_str()).copied().unwrap_or(0);
        let value = player.wins_on(day).checked_add(add).ok_or_else(|| {
            ScoreboardError::Validation(format!(
                "wins for {} on {} exceed the supported maximum",
                player.name, day
            ))
        })?;
        updated.push(value);
    }

    for (player, value) in board.players.iter_mut().zip(updated) {
        player.wins_by_date.insert(day.clone(), value);
    }
    board.dates.insert(day.clone());
    board.updated_at = Some(now);

    let mut ignored_players: Vec<String> = wins_by_name
        .keys()
        .filter(|name| board.player(name).is_none())
        .map(|name| name.to_string())
        .collect();
    ignored_players.sort();
    if !ignored_players.is_empty() {
        warn!(
            "Ignoring wins for unknown players on {}: {}",
            day,
            ignored_players.join(", ")
        );
    }

    let report = DayMergeReport {
        day: day.clone(),
        total_wins: entries.iter().map(|e| u64::from(e.wins)).sum(),
        merged_players: wins_by_name.len() - ignored_players.len(),
        ignored_players,
    };

    info!(
        "Merged {} wins for {} players on {}",
        report.total_wins, report.merged_players, day
    );
    Ok(report)
}

/// Set one player's wins for a day, replacing any previous value.
pub fn set_cell_value(
    board: &mut Scoreboard,
    player_name: &str,
    day: &DayKey,
    wins: u32,
    now: DateTime<Utc>,
) -> Result<(), ScoreboardError> {
    let player = board
        .player_mut(player_name)
        .ok_or_else(|| ScoreboardError::PlayerNotFound(player_name.to_string()))?;

    player.wins_by_date.insert(day.clone(), wins);
    board.dates.insert(day.clone());
    board.updated_at = Some(now);

    info!("Set {}'s wins for {} to {}", player_name, day, wins);
    Ok(())
}

/// Create a player with a zero for every day the scoreboard already has.
///
/// The name is trimmed. Names are unique ignoring case.
pub fn add_player<'a>(
    board: &'a mut Scoreboard,
    name: &str,
    now: DateTime<Utc>,
) -> Result<&'a Player, ScoreboardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScoreboardError::Validation(
            "player name is required".to_string(),
        ));
    }

    if board.players.iter().any(|p| p.name_matches(name)) {
        return Err(ScoreboardError::DuplicatePlayer(name.to_string()));
    }

    let mut player = Player::new(name);
    player.player_key = Some(PlayerKey::generate(
        &board.league_key,
        &board.season_key,
        name,
    ));
    player.wins_by_date = board.dates.iter().map(|day| (day.clone(), 0)).collect();

    board.players.push(player);
    board.updated_at = Some(now);

    info!("Added player {} to {}", name, board.key());
    Ok(&board.players[board.players.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-12-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn board_with(players: &[&str]) -> Scoreboard {
        let mut board = Scoreboard::new(&ScoreboardKey::new("quantum-league", "2025-fall"), None);
        for name in players {
            board.players.push(Player::new(*name));
        }
        board
    }

    #[test]
    fn test_apply_day_results_adds_to_existing() {
        let mut board = board_with(&["A"]);
        board.dates.insert(day("2024-12-01"));
        board.players[0].wins_by_date.insert(day("2024-12-01"), 1);

        apply_day_results(&mut board, &day("2024-12-01"), &[PlayerWins::new("A", 2)], now())
            .unwrap();

        assert_eq!(board.players[0].wins_on(&day("2024-12-01")), 3);
    }

    #[test]
    fn test_apply_day_results_twice_doubles() {
        let mut board = board_with(&["A", "B"]);
        let entries = vec![PlayerWins::new("A", 2), PlayerWins::new("B", 5)];

        apply_day_results(&mut board, &day("2024-12-01"), &entries, now()).unwrap();
        apply_day_results(&mut board, &day("2024-12-01"), &entries, now()).unwrap();

        assert_eq!(board.players[0].wins_on(&day("2024-12-01")), 4);
        assert_eq!(board.players[1].wins_on(&day("2024-12-01")), 10);
        assert_eq!(board.dates.len(), 1);
    }

    #[test]
    fn test_apply_day_results_ignores_unknown_players() {
        let mut board = board_with(&["A"]);
        let entries = vec![PlayerWins::new("A", 1), PlayerWins::new("Ghost", 4)];

        let report = apply_day_results(&mut board, &day("2024-12-01"), &entries, now()).unwrap();

        assert_eq!(board.players.len(), 1);
        assert_eq!(
            report,
            DayMergeReport {
                day: day("2024-12-01"),
                total_wins: 5,
                merged_players: 1,
                ignored_players: vec!["Ghost".to_string()],
            }
        );
    }

    #[test]
    fn test_apply_day_results_zero_fills_absent_players() {
        let mut board = board_with(&["A", "B"]);
        apply_day_results(&mut board, &day("2024-12-02"), &[PlayerWins::new("A", 1)], now())
            .unwrap();

        assert_eq!(board.players[1].wins_by_date.get(&day("2024-12-02")), Some(&0));
        assert!(board.dates.contains(&day("2024-12-02")));
        assert!(board.dates_cover_players());
        assert_eq!(board.updated_at, Some(now()));
    }

    #[test]
    fn test_apply_day_results_keeps_dates_sorted() {
        let mut board = board_with(&["A"]);
        apply_day_results(&mut board, &day("2024-12-05"), &[], now()).unwrap();
        apply_day_results(&mut board, &day("2024-11-01"), &[], now()).unwrap();

        let dates: Vec<&str> = board.dates.iter().map(|d| d.as_str()).collect();
        assert_eq!(dates, vec!["2024-11-01", "2024-12-05"]);
    }

    #[test]
    fn test_apply_day_results_last_duplicate_entry_wins() {
        let mut board = board_with(&["A"]);
        let entries = vec![PlayerWins::new("A", 1), PlayerWins::new("A", 4)];

        let report = apply_day_results(&mut board, &day("2024-12-01"), &entries, now()).unwrap();

        assert_eq!(board.players[0].wins_on(&day("2024-12-01")), 4);
        assert_eq!(report.total_wins, 5);
        assert_eq!(report.merged_players, 1);
    }

    #[test]
    fn test_apply_day_results_names_are_exact() {
        let mut board = board_with(&["Sara"]);
        let report =
            apply_day_results(&mut board, &day("2024-12-01"), &[PlayerWins::new("sara", 2)], now())
                .unwrap();

        assert_eq!(board.players[0].wins_on(&day("2024-12-01")), 0);
        assert_eq!(report.ignored_players, vec!["sara".to_string()]);
    }

    #[test]
    fn test_apply_day_results_overflow_leaves_board_unchanged() {
        let mut board = board_with(&["A", "B"]);
        board.players[1].wins_by_date.insert(day("2024-12-01"), u32::MAX);
        board.dates.insert(day("2024-12-01"));
        let before = board.clone();

        let entries = vec![PlayerWins::new("A", 1), PlayerWins::new("B", 1)];
        let err = apply_day_results(&mut board, &day("2024-12-01"), &entries, now()).unwrap_err();

        assert!(matches!(err, ScoreboardError::Validation(_)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_set_cell_value_replaces() {
        let mut board = board_with(&["A"]);
        board.dates.insert(day("2024-10-13"));
        board.players[0].wins_by_date.insert(day("2024-10-13"), 5);

        set_cell_value(&mut board, "A", &day("2024-10-13"), 2, now()).unwrap();
        assert_eq!(board.players[0].wins_on(&day("2024-10-13")), 2);
    }

    #[test]
    fn test_set_cell_value_idempotent() {
        let mut board = board_with(&["A"]);

        set_cell_value(&mut board, "A", &day("2024-10-13"), 3, now()).unwrap();
        let once = board.clone();
        set_cell_value(&mut board, "A", &day("2024-10-13"), 3, now()).unwrap();

        assert_eq!(board, once);
        assert_eq!(board.dates.len(), 1);
        assert_eq!(board.players[0].wins_on(&day("2024-10-13")), 3);
    }

    #[test]
    fn test_set_cell_value_adds_new_day() {
        let mut board = board_with(&["A", "B"]);
        set_cell_value(&mut board, "B", &day("2024-10-20"), 1, now()).unwrap();

        assert!(board.dates.contains(&day("2024-10-20")));
        assert!(board.dates_cover_players());
        assert!(board.players[0].wins_by_date.is_empty());
    }

    #[test]
    fn test_set_cell_value_unknown_player() {
        let mut board = board_with(&["A"]);
        let err = set_cell_value(&mut board, "Z", &day("2024-10-13"), 1, now()).unwrap_err();

        assert_eq!(err, ScoreboardError::PlayerNotFound("Z".to_string()));
        assert!(board.dates.is_empty());
    }

    #[test]
    fn test_add_player_seeds_zeros() {
        let mut board = board_with(&["A"]);
        board.dates.insert(day("2024-10-13"));
        board.dates.insert(day("2024-11-01"));

        let player = add_player(&mut board, "  Sara ", now()).unwrap();
        assert_eq!(player.name, "Sara");
        assert_eq!(player.wins_by_date.len(), 2);
        assert!(player.wins_by_date.values().all(|w| *w == 0));
        assert_eq!(
            player.player_key,
            Some(PlayerKey::generate("quantum-league", "2025-fall", "Sara"))
        );
        assert_eq!(board.players.len(), 2);
    }

    #[test]
    fn test_add_player_rejects_case_insensitive_duplicate() {
        let mut board = board_with(&["Sara"]);
        let err = add_player(&mut board, "SARA", now()).unwrap_err();

        assert_eq!(err, ScoreboardError::DuplicatePlayer("SARA".to_string()));
        assert_eq!(board.players.len(), 1);
    }

    #[test]
    fn test_add_player_rejects_blank_name() {
        let mut board = board_with(&[]);
        let err = add_player(&mut board, "   ", now()).unwrap_err();
        assert!(matches!(err, ScoreboardError::Validation(_)));
    }

    #[test]
    fn test_day_key_error_is_validation() {
        let err: ScoreboardError = DayKey::parse("2024/10/13").unwrap_err().into();
        assert!(matches!(err, ScoreboardError::Validation(_)));
    }
}
