use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

pub const DEFAULT_REFRESH_INTERVAL: &str = "10m";
pub const DEFAULT_FETCH_TIMEOUT: &str = "20s";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Roster location: CSV URL or local path
    pub source: Option<String>,
    /// How long a fetched roster stays fresh, e.g. "10m"
    pub refresh_interval: String,
    /// Upper bound on one roster request, e.g. "20s"
    pub fetch_timeout: String,
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            refresh_interval: DEFAULT_REFRESH_INTERVAL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT.to_string(),
            scoring: ScoringConfig::default(),
        }
    }
}
