//! Standalone HTML leaderboard page.
//!
//! Rendering reads only the ranked [`Leaderboard`]; it never calls back into
//! the scoring pipeline.

use std::fmt::Write;

use super::formatter::{format_count, format_stars};
use crate::scoring::{Leaderboard, ScoredMember};

const STYLESHEET: &str = r#"
body { font-family: 'Orbitron', sans-serif; background: #0f0f2e; color: #fff; }
h1 { text-align: center; color: #00FFFF; }
.notice { width: 90%; margin: 0 auto 15px; padding: 10px 20px; border-radius: 10px; background: #5c1a1a; color: #ffd7d7; }
.empty { text-align: center; opacity: 0.7; }
.leaderboard { display: flex; flex-direction: column; gap: 15px; width: 90%; margin: 0 auto; }
.player-row { display: flex; align-items: center; justify-content: space-between; padding: 15px 20px; border-radius: 15px; background: rgba(0,0,0,0.6); box-shadow: 0 0 15px rgba(0,255,255,0.3); flex-wrap: wrap; transition: 0.3s; }
.player-row:hover { transform: scale(1.02); box-shadow: 0 0 25px #00FFFF; }
.rank-badge { width: 50px; height: 50px; border-radius: 50%; display: flex; justify-content: center; align-items: center; font-weight: bold; color: #000; background: #00FFFF; margin-right: 15px; flex-shrink: 0; }
.rank-badge.silver { background: #C0C0C0; color: #000; }
.rank-badge.bronze { background: #CD7F32; color: #fff; }
.player-name { font-size: 20px; font-weight: bold; color: #00FFFF; flex: 1; min-width: 150px; }
.stats-bar-wrapper { flex: 1; min-width: 150px; margin: 5px 10px; }
.stats-label { font-size: 12px; margin-bottom: 2px; }
.stats-bar-container { width: 100%; background: rgba(255,255,255,0.1); border-radius: 12px; overflow: hidden; height: 20px; }
.stats-bar { height: 100%; text-align: center; padding: 0 5px; color: #000; font-weight: bold; line-height: 20px; border-radius: 12px 0 0 12px; overflow: visible; width: var(--bar-width); }
.attack { background: linear-gradient(90deg, #FF4500, #FF6347); }
.gold { background: linear-gradient(90deg, #FFD700, #FFEA70); }
.games { background: linear-gradient(90deg, #00BFFF, #1E90FF); }
.events { background: linear-gradient(90deg, #32CD32, #7CFC00); }
.final-score { font-weight: bold; min-width: 80px; text-align: center; }
@media screen and (max-width: 800px) { .player-row { flex-direction: column; align-items: flex-start; } .stats-bar-wrapper { width: 100%; margin: 5px 0; } }
"#;

/// Render the leaderboard as a complete HTML page.
pub fn render_html(board: &Leaderboard) -> String {
    render_html_with_notice(board, None)
}

/// Render the page with an optional warning banner above the board.
pub fn render_html_with_notice(board: &Leaderboard, notice: Option<&str>) -> String {
    let mut html = String::with_capacity(4096 + board.len() * 1536);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Clan Leaderboard</title>\n<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n<h1>&#127942; Top Clan Players Leaderboard</h1>\n");

    if let Some(notice) = notice {
        let _ = writeln!(
            html,
            "<div class=\"notice\">&#9888;&#65039; {}</div>",
            html_escape::encode_text(notice)
        );
    }

    html.push_str("<div class=\"leaderboard\">\n");
    if board.is_empty() {
        html.push_str("<p class=\"empty\">No members to show.</p>\n");
    }
    for entry in board {
        render_row(&mut html, entry);
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

/// CSS class for the rank badge: silver and bronze for 2nd and 3rd.
pub fn badge_class(rank: u32) -> &'static str {
    match rank {
        2 => "rank-badge silver",
        3 => "rank-badge bronze",
        _ => "rank-badge",
    }
}

/// Bar width in percent, clamped to [0, 100].
fn bar_width(fraction: f64) -> f64 {
    if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn render_bar(html: &mut String, label: &str, class: &str, fraction: f64, text: &str) {
    let _ = write!(
        html,
        concat!(
            "  <div class=\"stats-bar-wrapper\">\n",
            "    <div class=\"stats-label\">{}</div>\n",
            "    <div class=\"stats-bar-container\">\n",
            "      <div class=\"stats-bar {}\" style=\"--bar-width:{:.1}%\">{}</div>\n",
            "    </div>\n",
            "  </div>\n",
        ),
        label,
        class,
        bar_width(fraction),
        text
    );
}

fn render_row(html: &mut String, entry: &ScoredMember) {
    let m = &entry.member;
    let b = &entry.result.breakdown;

    html.push_str("<div class=\"player-row\">\n");
    let _ = writeln!(html, "  <div class=\"{}\">{}</div>", badge_class(entry.rank), entry.rank);
    let _ = writeln!(
        html,
        "  <div class=\"player-name\">{}</div>",
        html_escape::encode_text(&m.name)
    );

    render_bar(
        html,
        "&#9876;&#65039; War Stars / Attempts",
        "attack",
        b.war.efficiency,
        &format_stars(m.war_stars, m.war_attempts),
    );
    render_bar(
        html,
        "&#128737;&#65039; CWL Stars / Attempts",
        "attack",
        b.cwl.efficiency,
        &format_stars(m.cwl_stars, m.cwl_attempts),
    );
    render_bar(
        html,
        "&#128176; Capital Gold",
        "gold",
        b.gold_scaled,
        &format_count(m.clan_capital_gold),
    );
    render_bar(
        html,
        "&#127918; Clan Games",
        "games",
        b.games_scaled,
        &format_count(m.clan_games_points),
    );
    render_bar(
        html,
        "&#127919; Events",
        "events",
        b.events_scaled,
        &format!("{:.0}%", b.events_scaled * 100.0),
    );

    let _ = writeln!(html, "  <div class=\"final-score\">{:.2}</div>", entry.final_score());
    html.push_str("</div>\n");
}
