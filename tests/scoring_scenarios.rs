use clanboard::roster::{normalize_roster, parse_roster_csv, Member};
use clanboard::scoring::{score_leaderboard, CompositeWeights, ScoringConfig};

const HEADER: &str = "Name,War_Attempts,War_Stars,CWL_Attempts,CWL_Stars,ClanCapital_Gold,ClanGames_Points,RushEvents_Participation_pct";

fn board_from_csv(body: &str, config: &ScoringConfig) -> clanboard::scoring::Leaderboard {
    let text = format!("{}\n{}", HEADER, body);
    let rows = parse_roster_csv(&text).unwrap();
    score_leaderboard(normalize_roster(&rows), config)
}

#[test]
fn test_full_participation_member() {
    let board = board_from_csv("Ace,10,27,7,18,50000,4000,100\n", &ScoringConfig::default());
    let ace = &board.entries()[0];
    let b = &ace.result.breakdown;

    assert_eq!(ace.rank, 1);
    assert!((b.war.efficiency - 0.9).abs() < 1e-9);
    assert!((b.war.participation_factor - 1.0 / (1.0 + (-4.0f64).exp())).abs() < 1e-12);
    assert!((b.cwl.efficiency - 18.0 / 21.0).abs() < 1e-9);
    assert!((b.cwl.participation_factor - 0.982).abs() < 1e-3);
    assert_eq!(b.gold_scaled, 1.0);
    assert_eq!(b.games_scaled, 1.0);
    assert_eq!(b.events_scaled, 1.0);
    assert!((b.skill_score_pct - 86.70).abs() < 1e-9);
    assert!((ace.final_score() - 95.74).abs() < 1e-9);
}

#[test]
fn test_zero_attempt_member() {
    let board = board_from_csv("Lurker,0,0,0,0,0,0,0\n", &ScoringConfig::default());
    let b = &board.entries()[0].result.breakdown;
    assert_eq!(b.war.efficiency, 0.0);
    assert!((b.war.participation_factor - 1.0 / (1.0 + 4.0f64.exp())).abs() < 1e-12);
    assert_eq!(board.entries()[0].final_score(), 0.0);
}

#[test]
fn test_empty_roster() {
    let board = board_from_csv("", &ScoringConfig::default());
    assert!(board.is_empty());
}

#[test]
fn test_malformed_cells_are_zeroed() {
    let board = board_from_csv(
        "Messy,ten,27,,x,\"12,000\",--,85%\nClean,10,30,7,21,12000,100,85\n",
        &ScoringConfig::default(),
    );
    let messy = board.entries().iter().find(|e| e.member.name == "Messy").unwrap();
    assert_eq!(messy.member.war_attempts, 0.0);
    assert_eq!(messy.member.war_stars, 27.0);
    assert_eq!(messy.member.cwl_attempts, 0.0);
    assert_eq!(messy.member.cwl_stars, 0.0);
    assert_eq!(messy.member.clan_capital_gold, 12_000.0);
    assert_eq!(messy.member.clan_games_points, 0.0);
    assert_eq!(messy.member.rush_events_participation_pct, 85.0);
    assert_eq!(board.rank_of("Clean"), Some(1));
}

#[test]
fn test_low_effort_member_ranks_below_regular() {
    // One perfect attack must not beat ten good ones
    let board = board_from_csv(
        "OneShot,1,3,1,3,0,0,0\nGrinder,10,24,7,15,0,0,0\n",
        &ScoringConfig::default(),
    );
    assert_eq!(board.rank_of("Grinder"), Some(1));
    assert_eq!(board.rank_of("OneShot"), Some(2));
}

#[test]
fn test_tied_members_share_rank() {
    let board = board_from_csv(
        "Top,10,30,7,21,1000,100,100\nTwinB,5,10,3,6,500,50,40\nTwinA,5,10,3,6,500,50,40\nLast,0,0,0,0,0,0,0\n",
        &ScoringConfig::default(),
    );
    let ranks: Vec<_> = board
        .iter()
        .map(|e| (e.member.name.as_str(), e.rank))
        .collect();
    assert_eq!(ranks, vec![("Top", 1), ("TwinA", 2), ("TwinB", 2), ("Last", 4)]);
}

#[test]
fn test_weight_set_changes_ordering() {
    let body = "Gold,10,15,7,10,90000,100,10\nEvents,10,15,7,10,1000,100,100\n";

    let capital_heavy = ScoringConfig {
        weights: CompositeWeights { skill: 0.2, gold: 0.7, games: 0.05, events: 0.05 },
        ..ScoringConfig::default()
    };
    assert_eq!(board_from_csv(body, &capital_heavy).rank_of("Gold"), Some(1));
    assert_eq!(board_from_csv(body, &ScoringConfig::default()).rank_of("Events"), Some(1));
}

#[test]
fn test_impossible_stars_only_clamped_on_request() {
    let member = Member {
        name: "Cheater".to_string(),
        war_attempts: 2.0,
        war_stars: 30.0,
        ..Member::default()
    };

    let loose = score_leaderboard(vec![member.clone()], &ScoringConfig::default());
    assert_eq!(loose.entries()[0].result.breakdown.war.efficiency, 5.0);

    let strict = ScoringConfig {
        clamp_stars: true,
        ..ScoringConfig::default()
    };
    let clamped = score_leaderboard(vec![member], &strict);
    assert_eq!(clamped.entries()[0].result.breakdown.war.efficiency, 1.0);
}

#[test]
fn test_overflowing_cell_scores_zero() {
    let board = board_from_csv(
        "Big,10,1e308,7,18,50000,4000,100\nSteady,10,27,7,18,50000,4000,100\n",
        &ScoringConfig::default(),
    );
    let big = board.iter().find(|e| e.member.name == "Big").unwrap();
    assert_eq!(big.final_score(), 0.0);
    assert_eq!(big.result.breakdown.skill_score_pct, 0.0);
    assert_eq!(big.rank, 2);
    assert_eq!(board.rank_of("Steady"), Some(1));
}

#[test]
fn test_scores_equal_after_rounding_tie() {
    // Unrounded finals are 21.0 and 21.00042
    let body = "Even,0,0,0,0,0,0,50\nHair,0,0,0,0,0,0,50.001\n";

    let rounded = board_from_csv(body, &ScoringConfig::default());
    assert_eq!(rounded.rank_of("Even"), Some(1));
    assert_eq!(rounded.rank_of("Hair"), Some(1));

    let exact = ScoringConfig {
        precision: None,
        ..ScoringConfig::default()
    };
    let unrounded = board_from_csv(body, &exact);
    assert_eq!(unrounded.rank_of("Hair"), Some(1));
    assert_eq!(unrounded.rank_of("Even"), Some(2));
}
