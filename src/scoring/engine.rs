use super::config::ScoringConfig;
use super::factors::CategoryScore;
use crate::roster::Member;

/// Roster-wide maxima used to scale the contribution metrics.
///
/// Computed once per scoring pass from the immutable roster snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterMaxima {
    pub clan_capital_gold: f64,
    pub clan_games_points: f64,
}

impl RosterMaxima {
    pub fn from_members(members: &[Member]) -> Self {
        Self {
            clan_capital_gold: column_max(members, |m| m.clan_capital_gold),
            clan_games_points: column_max(members, |m| m.clan_games_points),
        }
    }

    /// Scale `value` against a roster maximum; a zero maximum divides by 1.
    fn scale(value: f64, max: f64) -> f64 {
        value / max.max(1.0)
    }
}

/// Every intermediate value behind a member's final score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub war: CategoryScore,
    pub cwl: CategoryScore,
    /// Weighted war/CWL skill on a 0-100 scale
    pub skill_score_pct: f64,
    pub gold_scaled: f64,
    pub games_scaled: f64,
    pub events_scaled: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

pub fn calculate_score(member: &Member, maxima: &RosterMaxima, config: &ScoringConfig) -> ScoreResult {
    let war = CategoryScore::compute(
        member.war_stars,
        member.war_attempts,
        config.war_max_attempts,
        config.steepness,
        config.midpoint,
        config.clamp_stars,
    );
    let cwl = CategoryScore::compute(
        member.cwl_stars,
        member.cwl_attempts,
        config.cwl_max_attempts,
        config.steepness,
        config.midpoint,
        config.clamp_stars,
    );

    let split = &config.skill_split;
    let raw_skill_pct = round_to(
        (war.fair_score * split.war + cwl.fair_score * split.cwl) * 100.0,
        config.precision,
    );

    let gold_scaled = RosterMaxima::scale(member.clan_capital_gold, maxima.clan_capital_gold);
    let games_scaled = RosterMaxima::scale(member.clan_games_points, maxima.clan_games_points);
    let events_scaled = member.rush_events_participation_pct / 100.0;

    let weights = &config.weights;
    let composite = (raw_skill_pct / 100.0) * weights.skill
        + gold_scaled * weights.gold
        + games_scaled * weights.games
        + events_scaled * weights.events;
    let score = round_to(composite * 100.0, config.precision);

    ScoreResult {
        score: finite_or_zero(score),
        breakdown: ScoreBreakdown {
            war,
            cwl,
            skill_score_pct: finite_or_zero(raw_skill_pct),
            gold_scaled,
            games_scaled,
            events_scaled,
        },
    }
}

/// Score every member of a roster snapshot, preserving input order.
pub fn score_roster(members: &[Member], config: &ScoringConfig) -> Vec<ScoreResult> {
    let maxima = RosterMaxima::from_members(members);
    tracing::debug!(
        members = members.len(),
        gold_max = maxima.clan_capital_gold,
        games_max = maxima.clan_games_points,
        "scoring roster"
    );
    members
        .iter()
        .map(|member| calculate_score(member, &maxima, config))
        .collect()
}

fn column_max(members: &[Member], field: impl Fn(&Member) -> f64) -> f64 {
    members.iter().map(field).fold(0.0, f64::max)
}

/// Overflowing inputs (e.g. a `1e308` star count) must not reach the ranking.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round_to(value: f64, precision: Option<u32>) -> f64 {
    match precision {
        Some(places) => {
            let factor = 10f64.powi(places as i32);
            (value * factor).round() / factor
        }
        None => value,
    }
}
