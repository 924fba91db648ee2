//! Scoreboard records: one per league season.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DayKey, PlayerKey};

/// Identifies a single scoreboard record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardKey {
    pub league_key: String,
    pub season_key: String,
}

impl ScoreboardKey {
    pub fn new(league_key: impl Into<String>, season_key: impl Into<String>) -> Self {
        Self {
            league_key: league_key.into(),
            season_key: season_key.into(),
        }
    }
}

impl std::fmt::Display for ScoreboardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.league_key, self.season_key)
    }
}

/// A player's row: wins recorded per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_key: Option<PlayerKey>,

    pub name: String,

    #[serde(default)]
    pub wins_by_date: BTreeMap<DayKey, u32>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            player_key: None,
            name: name.into(),
            wins_by_date: BTreeMap::new(),
        }
    }

    /// Wins on a day. Days never recorded count as zero.
    pub fn wins_on(&self, day: &DayKey) -> u32 {
        self.wins_by_date.get(day).copied().unwrap_or(0)
    }

    /// Whether this player's name matches `name` ignoring case and padding.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Season-long win tally for one league.
///
/// `dates` is the authoritative set of days that ever received data. Every
/// day present in a player's `wins_by_date` must also be in `dates`; the
/// reverse is not required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub league_key: String,
    pub season_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub dates: BTreeSet<DayKey>,

    #[serde(default)]
    pub players: Vec<Player>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Scoreboard {
    /// Create an empty scoreboard for a league season.
    pub fn new(key: &ScoreboardKey, title: Option<String>) -> Self {
        Self {
            league_key: key.league_key.clone(),
            season_key: key.season_key.clone(),
            title,
            dates: BTreeSet::new(),
            players: Vec::new(),
            updated_at: None,
        }
    }

    pub fn key(&self) -> ScoreboardKey {
        ScoreboardKey::new(self.league_key.clone(), self.season_key.clone())
    }

    /// Exact-name lookup, as used by cell edits and bulk inserts.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Whether every day in any player's row is part of `dates`.
    pub fn dates_cover_players(&self) -> bool {
        self.players
            .iter()
            .flat_map(|p| p.wins_by_date.keys())
            .all(|day| self.dates.contains(day))
    }
}
