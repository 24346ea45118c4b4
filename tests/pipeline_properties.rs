//! Property tests over the whole scoring pipeline.

use clanboard::roster::Member;
use clanboard::scoring::{
    participation_factor, score_leaderboard, CompositeWeights, Leaderboard, ScoringConfig,
};
use proptest::prelude::*;

fn well_formed_member() -> impl Strategy<Value = Member> {
    (0u32..=10, 0u32..=7, 0u32..=200_000, 0u32..=5_000, 0u32..=100)
        .prop_flat_map(|(war_attempts, cwl_attempts, gold, games, pct)| {
            (
                Just(war_attempts),
                0..=war_attempts * 3,
                Just(cwl_attempts),
                0..=cwl_attempts * 3,
                Just(gold),
                Just(games),
                Just(pct),
            )
        })
        .prop_map(
            |(war_attempts, war_stars, cwl_attempts, cwl_stars, gold, games, pct)| Member {
                name: String::new(),
                war_attempts: war_attempts as f64,
                war_stars: war_stars as f64,
                cwl_attempts: cwl_attempts as f64,
                cwl_stars: cwl_stars as f64,
                clan_capital_gold: gold as f64,
                clan_games_points: games as f64,
                rush_events_participation_pct: pct as f64,
            },
        )
}

/// Rosters with unique names so name -> rank is a function.
fn roster() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec(well_formed_member(), 0..25).prop_map(|members| {
        members
            .into_iter()
            .enumerate()
            .map(|(i, m)| Member {
                name: format!("member-{:02}", i),
                ..m
            })
            .collect()
    })
}

fn name_ranks(board: &Leaderboard) -> Vec<(String, u32)> {
    let mut ranks: Vec<_> = board
        .iter()
        .map(|e| (e.member.name.clone(), e.rank))
        .collect();
    ranks.sort();
    ranks
}

proptest! {
    #[test]
    fn participation_factor_is_bounded(max in 1u32..=10, ratio in 0.0f64..=3.0) {
        let factor = participation_factor(ratio * max as f64, max as f64, 8.0, 0.5);
        prop_assert!(factor > 0.0);
        prop_assert!(factor < 1.0);
    }

    #[test]
    fn weighting_never_amplifies(members in roster()) {
        let board = score_leaderboard(members, &ScoringConfig::default());
        for entry in &board {
            let b = &entry.result.breakdown;
            prop_assert!(b.war.fair_score <= b.war.efficiency);
            prop_assert!(b.cwl.fair_score <= b.cwl.efficiency);
            prop_assert!(b.war.participation_factor >= 0.0 && b.war.participation_factor < 1.0);
            prop_assert!(b.cwl.participation_factor >= 0.0 && b.cwl.participation_factor < 1.0);
        }
    }

    #[test]
    fn final_score_stays_on_0_to_100(members in roster()) {
        let board = score_leaderboard(members, &ScoringConfig::default());
        for entry in &board {
            prop_assert!(entry.final_score() >= 0.0);
            prop_assert!(entry.final_score() <= 100.0);
        }
    }

    #[test]
    fn ranking_ignores_input_order(
        (members, shuffled) in roster().prop_flat_map(|m| (Just(m.clone()), Just(m).prop_shuffle()))
    ) {
        let config = ScoringConfig::default();
        let a = score_leaderboard(members, &config);
        let b = score_leaderboard(shuffled, &config);
        prop_assert_eq!(name_ranks(&a), name_ranks(&b));
    }

    #[test]
    fn ranks_follow_competition_rule(members in roster()) {
        let board = score_leaderboard(members, &ScoringConfig::default());
        let scores: Vec<f64> = board.iter().map(|e| e.final_score()).collect();
        for entry in &board {
            let strictly_better = scores.iter().filter(|s| **s > entry.final_score()).count();
            prop_assert_eq!(entry.rank as usize, strictly_better + 1);
        }
        for pair in board.entries().windows(2) {
            prop_assert!(pair[0].final_score() >= pair[1].final_score());
        }
    }

    #[test]
    fn scoring_is_idempotent(members in roster()) {
        let config = ScoringConfig::default();
        let first = score_leaderboard(members.clone(), &config);
        let second = score_leaderboard(members, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn final_score_is_linear_in_weights(
        members in roster(),
        raw in (0u32..=100, 0u32..=100, 0u32..=100, 1u32..=100),
    ) {
        let total = (raw.0 + raw.1 + raw.2 + raw.3) as f64;
        let weights = CompositeWeights {
            skill: raw.0 as f64 / total,
            gold: raw.1 as f64 / total,
            games: raw.2 as f64 / total,
            events: raw.3 as f64 / total,
        };
        let config = ScoringConfig { weights, precision: None, ..ScoringConfig::default() };
        let board = score_leaderboard(members, &config);
        for entry in &board {
            let b = &entry.result.breakdown;
            let expected = (b.skill_score_pct / 100.0 * weights.skill
                + b.gold_scaled * weights.gold
                + b.games_scaled * weights.games
                + b.events_scaled * weights.events)
                * 100.0;
            prop_assert!((entry.final_score() - expected).abs() < 1e-9);
        }
    }
}
