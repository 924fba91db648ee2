//! Deterministic player keys using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A stable player identifier derived from league, season and player name.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerKey(String);

impl PlayerKey {
    /// Generate a key for a player in one league season.
    /// The name is compared case-insensitively, so it is trimmed and
    /// lowercased before hashing. Keeps the first 16 hex characters.
    pub fn generate(league_key: &str, season_key: &str, name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        let mut hasher = Sha256::new();
        for (i, field) in [league_key, season_key, normalized.as_str()].iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerKey({})", self.0)
    }
}

impl From<&str> for PlayerKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_key_deterministic() {
        let a = PlayerKey::generate("quantum-league", "2025-fall", "Sara");
        let b = PlayerKey::generate("quantum-league", "2025-fall", "Sara");
        assert_eq!(a, b);
    }

    #[test]
    fn test_player_key_ignores_case_and_padding() {
        let a = PlayerKey::generate("quantum-league", "2025-fall", "Sara");
        let b = PlayerKey::generate("quantum-league", "2025-fall", "  sARA ");
        assert_eq!(a, b);
    }

    #[test]
    fn test_player_key_scoped_by_season() {
        let a = PlayerKey::generate("quantum-league", "2025-fall", "Sara");
        let b = PlayerKey::generate("quantum-league", "2026-spring", "Sara");
        assert_ne!(a, b);
    }

    #[test]
    fn test_player_key_hex_format() {
        let key = PlayerKey::generate("l", "s", "n");
        assert_eq!(key.as_str().len(), 16);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_player_key_serializes_as_string() {
        let key = PlayerKey::from("abc123");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"abc123\"");
    }
}
