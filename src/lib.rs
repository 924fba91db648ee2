//! # Win Tally
//!
//! A season-long win tally for a single league, with monthly totals grouped
//! by the Persian (Solar Hijri) calendar.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (day keys, scoreboards, columns)
//! - **calendar**: Gregorian to display-month mapping and labels
//! - **calculate**: Date catalog, column plan, month totals, sorting
//! - **update**: Scoreboard mutations (add player, merge day, set cell)
//! - **storage**: JSONL scoreboard store
//! - **api**: REST API endpoints
//! - **clock**: Source of "today"
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod models;
pub mod storage;
pub mod update;

pub use models::*;
