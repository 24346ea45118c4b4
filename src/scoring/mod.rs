pub mod config;
pub mod engine;
pub mod factors;
pub mod rank;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, score_roster, RosterMaxima, ScoreBreakdown, ScoreResult};
pub use factors::{efficiency, participation_factor, CategoryScore};
pub use rank::{rank_members, score_leaderboard, Leaderboard, ScoredMember};
pub use validation::{validate_scoring, WEIGHT_SUM_TOLERANCE};
