use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::roster::types::INPUT_COLUMNS;
use crate::scoring::{Leaderboard, ScoredMember};

/// Derived columns appended after the input columns in exports.
pub const DERIVED_COLUMNS: [&str; 12] = [
    "War_Efficiency",
    "CWL_Efficiency",
    "War_Participation_Factor",
    "CWL_Participation_Factor",
    "Fair_War_Score",
    "Fair_CWL_Score",
    "War_CWL_Skill_Score",
    "Gold_Scaled",
    "Games_Scaled",
    "Events_Scaled",
    "FinalScore",
    "Rank",
];

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a count with thousands separators: 50000 -> "50,000"
pub fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// "stars/attempts" with both rendered as whole numbers
pub fn format_stars(stars: f64, attempts: f64) -> String {
    format!("{}/{}", stars.round() as i64, attempts.round() as i64)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the leaderboard as an aligned table, one member per line.
/// Columns: rank, score, name, war, CWL, gold, games, events.
pub fn format_leaderboard_table(board: &Leaderboard, use_colors: bool) -> String {
    if board.is_empty() {
        return "No members found.".to_string();
    }

    // Rank 4 + score 7 + stats columns, rest for the name
    let stats_width = 4 + 7 + 9 + 9 + 10 + 8 + 6 + 2 * 7;
    let name_width = match get_terminal_width() {
        Some(width) if width > stats_width + 10 => (width - stats_width).min(24),
        Some(_) => 10,
        None => 24,
    };

    board
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>3}.", entry.rank);
            let score_str = format!("{:>7.2}", entry.final_score());
            let name = format!("{:<width$}", truncate_name(&entry.member.name, name_width), width = name_width);
            let m = &entry.member;
            let stats = format!(
                "{:>9}  {:>9}  {:>10}  {:>8}  {:>5.0}%",
                format_stars(m.war_stars, m.war_attempts),
                format_stars(m.cwl_stars, m.cwl_attempts),
                format_count(m.clan_capital_gold),
                format_count(m.clan_games_points),
                m.rush_events_participation_pct,
            );

            if use_colors {
                let rank_colored = match entry.rank {
                    1 => rank_str.yellow().bold().to_string(),
                    2 => rank_str.white().bold().to_string(),
                    3 => rank_str.red().to_string(),
                    _ => rank_str.dimmed().to_string(),
                };
                format!("{} {}  {}  {}", rank_colored, score_str.bold(), name.cyan(), stats)
            } else {
                format!("{} {}  {}  {}", rank_str, score_str, name, stats)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line breakdown of how a member's score was built (verbose mode)
pub fn format_breakdown(entry: &ScoredMember) -> String {
    let b = &entry.result.breakdown;
    format!(
        "#{} {} ({:.2})\n  War:    efficiency {:.3} x participation {:.3} = {:.3}\n  CWL:    efficiency {:.3} x participation {:.3} = {:.3}\n  Skill:  {:.2}%\n  Gold:   {:.3}  Games: {:.3}  Events: {:.3}",
        entry.rank,
        entry.member.name,
        entry.final_score(),
        b.war.efficiency,
        b.war.participation_factor,
        b.war.fair_score,
        b.cwl.efficiency,
        b.cwl.participation_factor,
        b.cwl.fair_score,
        b.skill_score_pct,
        b.gold_scaled,
        b.games_scaled,
        b.events_scaled,
    )
}

/// Export the full scored table as CSV, sorted by rank.
/// Header is the input columns followed by [`DERIVED_COLUMNS`].
pub fn format_csv(board: &Leaderboard) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(INPUT_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()))?;

    for entry in board {
        let m = &entry.member;
        let b = &entry.result.breakdown;
        let mut record = vec![m.name.clone()];
        record.extend(
            [
                m.war_attempts,
                m.war_stars,
                m.cwl_attempts,
                m.cwl_stars,
                m.clan_capital_gold,
                m.clan_games_points,
                m.rush_events_participation_pct,
                b.war.efficiency,
                b.cwl.efficiency,
                b.war.participation_factor,
                b.cwl.participation_factor,
                b.war.fair_score,
                b.cwl.fair_score,
                b.skill_score_pct,
                b.gold_scaled,
                b.games_scaled,
                b.events_scaled,
                entry.final_score(),
            ]
            .iter()
            .map(|v| v.to_string()),
        );
        record.push(entry.rank.to_string());
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
