//! Core data models for the win tally.

mod column;
mod day_key;
mod ids;
mod scoreboard;

pub use column::*;
pub use day_key::*;
pub use ids::*;
pub use scoreboard::*;
