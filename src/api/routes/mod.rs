pub mod scoreboard;
pub mod view;
