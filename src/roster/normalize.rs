use super::types::*;

/// Coerce a single cell into a non-negative finite number.
///
/// Missing, unparseable, non-finite and negative values all become `0.0`.
/// Thousands separators and a trailing `%` are accepted.
pub fn coerce_cell(cell: Option<&str>) -> f64 {
    let Some(raw) = cell else {
        return 0.0;
    };

    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) => {
            tracing::debug!(cell = raw, value, "out-of-range cell replaced with 0");
            0.0
        }
        Err(_) => {
            tracing::debug!(cell = raw, "malformed cell replaced with 0");
            0.0
        }
    }
}

/// Normalize one raw row into a member record.
pub fn normalize_row(row: &RawRow) -> Member {
    Member {
        name: row.get(COL_NAME).unwrap_or_default().to_string(),
        war_attempts: coerce_cell(row.get(COL_WAR_ATTEMPTS)),
        war_stars: coerce_cell(row.get(COL_WAR_STARS)),
        cwl_attempts: coerce_cell(row.get(COL_CWL_ATTEMPTS)),
        cwl_stars: coerce_cell(row.get(COL_CWL_STARS)),
        clan_capital_gold: coerce_cell(row.get(COL_CAPITAL_GOLD)),
        clan_games_points: coerce_cell(row.get(COL_GAMES_POINTS)),
        rush_events_participation_pct: coerce_cell(row.get(COL_EVENTS_PCT)),
    }
}

/// Normalize a whole raw roster. Never fails; bad cells are zeroed.
pub fn normalize_roster(rows: &[RawRow]) -> Vec<Member> {
    rows.iter().map(normalize_row).collect()
}
