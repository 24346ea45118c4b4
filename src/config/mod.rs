mod schema;

pub use schema::{Config, DEFAULT_FETCH_TIMEOUT, DEFAULT_REFRESH_INTERVAL};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Get the config directory path (~/.config/clanboard/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("clanboard")
}

/// Get the default config file path (~/.config/clanboard/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    pub fn refresh_interval(&self) -> Result<Duration> {
        humantime::parse_duration(self.refresh_interval.trim())
            .with_context(|| format!("invalid refresh_interval '{}'", self.refresh_interval))
    }

    pub fn fetch_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(self.fetch_timeout.trim())
            .with_context(|| format!("invalid fetch_timeout '{}'", self.fetch_timeout))
    }

    /// Pick the roster location: explicit override, then `CLANBOARD_SOURCE`,
    /// then the config file.
    pub fn resolve_source(&self, override_source: Option<String>) -> Option<String> {
        override_source
            .or_else(crate::roster::get_source_from_env)
            .or_else(|| self.source.clone())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Validate the whole configuration. Returns all errors at once.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match config.refresh_interval() {
        Ok(d) if d.is_zero() => errors.push("refresh_interval: must be greater than zero".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(format!("{:#}", e)),
    }

    match config.fetch_timeout() {
        Ok(d) if d.is_zero() => errors.push("fetch_timeout: must be greater than zero".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if let Err(scoring_errors) = crate::scoring::validate_scoring(&config.scoring) {
        errors.extend(scoring_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.refresh_interval().unwrap(), Duration::from_secs(600));
        assert_eq!(config.fetch_timeout().unwrap(), Duration::from_secs(20));
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
source: "https://example.com/roster.csv"
refresh_interval: 5m
fetch_timeout: 10s
scoring:
  weights: { skill: 0.31, gold: 0.05, games: 0.21, events: 0.43 }
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.source.as_deref(), Some("https://example.com/roster.csv"));
        assert_eq!(config.refresh_interval().unwrap(), Duration::from_secs(300));
        assert_eq!(config.scoring.weights.events, 0.43);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_durations_and_weights_collected() {
        let config = Config {
            refresh_interval: "soon".to_string(),
            fetch_timeout: "0s".to_string(),
            scoring: crate::scoring::ScoringConfig {
                steepness: -1.0,
                ..Default::default()
            },
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("refresh_interval"));
        assert!(errors[1].contains("fetch_timeout"));
        assert!(errors[2].contains("scoring.steepness"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("missing.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source: ./roster.csv\nrefresh_interval: 1h").unwrap();
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.source.as_deref(), Some("./roster.csv"));
        assert_eq!(config.refresh_interval().unwrap(), Duration::from_secs(3600));
        assert_eq!(config.scoring, crate::scoring::ScoringConfig::default());
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "queries: []").unwrap();
        assert!(load_config(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_resolve_source_prefers_override() {
        let config = Config {
            source: Some("from-config.csv".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_source(Some("cli.csv".to_string())).as_deref(),
            Some("cli.csv")
        );
    }
}
