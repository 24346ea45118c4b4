use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const COL_NAME: &str = "Name";
pub const COL_WAR_ATTEMPTS: &str = "War_Attempts";
pub const COL_WAR_STARS: &str = "War_Stars";
pub const COL_CWL_ATTEMPTS: &str = "CWL_Attempts";
pub const COL_CWL_STARS: &str = "CWL_Stars";
pub const COL_CAPITAL_GOLD: &str = "ClanCapital_Gold";
pub const COL_GAMES_POINTS: &str = "ClanGames_Points";
pub const COL_EVENTS_PCT: &str = "RushEvents_Participation_pct";

/// The recognized input columns, in source order.
pub const INPUT_COLUMNS: [&str; 8] = [
    COL_NAME,
    COL_WAR_ATTEMPTS,
    COL_WAR_STARS,
    COL_CWL_ATTEMPTS,
    COL_CWL_STARS,
    COL_CAPITAL_GOLD,
    COL_GAMES_POINTS,
    COL_EVENTS_PCT,
];

/// One row of the raw roster as it came out of the spreadsheet.
///
/// Column names are stored lower-cased so lookups ignore header casing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (column, value) pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.set(column.as_ref(), value);
        }
        row
    }

    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        self.cells.insert(column_key(column), value.into());
    }

    /// Cell text for a column, `None` when the column is absent or the cell is blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(&column_key(column))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

fn column_key(column: &str) -> String {
    column.trim().to_ascii_lowercase()
}

/// A roster member after input normalization.
///
/// Every numeric field is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub war_attempts: f64,
    pub war_stars: f64,
    pub cwl_attempts: f64,
    pub cwl_stars: f64,
    pub clan_capital_gold: f64,
    pub clan_games_points: f64,
    pub rush_events_participation_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_lookup_ignores_case_and_whitespace() {
        let row = RawRow::from_pairs([(" war_attempts ", "8")]);
        assert_eq!(row.get("War_Attempts"), Some("8"));
        assert_eq!(row.get("WAR_ATTEMPTS"), Some("8"));
    }

    #[test]
    fn test_raw_row_blank_cell_is_absent() {
        let row = RawRow::from_pairs([("War_Stars", "   ")]);
        assert_eq!(row.get("War_Stars"), None);
        assert_eq!(row.get("CWL_Stars"), None);
    }
}
