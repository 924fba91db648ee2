use std::sync::Arc;

use crate::api::ApiError;
use crate::calendar::CalendarMapper;
use crate::clock::Clock;
use crate::models::{Scoreboard, ScoreboardKey};
use crate::storage::ScoreboardStore;
use crate::update::ScoreboardError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScoreboardStore>,
    pub scoreboard_key: Arc<ScoreboardKey>,
    pub calendar: Arc<dyn CalendarMapper>,
    pub clock: Arc<dyn Clock>,
    /// Held across load/mutate/save so requests in this process do not
    /// overwrite each other's changes.
    pub write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ScoreboardStore>,
        scoreboard_key: ScoreboardKey,
        calendar: Arc<dyn CalendarMapper>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            scoreboard_key: Arc::new(scoreboard_key),
            calendar,
            clock,
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Load the configured scoreboard, or fail with a not-found error.
    pub async fn load_scoreboard(&self) -> Result<Scoreboard, ApiError> {
        self.store
            .load(&self.scoreboard_key)
            .await?
            .ok_or_else(|| ScoreboardError::ScoreboardNotFound((*self.scoreboard_key).clone()).into())
    }
}
