//! Fairness-adjusted clan leaderboard.
//!
//! Raw roster rows are normalized, scored with participation-weighted
//! efficiency plus roster-scaled contribution metrics, and ranked with
//! competition ("1224") ranking.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod roster;
pub mod scoring;
