use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::cache::{CacheKey, RosterCache};
use crate::roster::{fetch_roster, normalize_roster, Member};
use crate::scoring::{score_leaderboard, Leaderboard, ScoringConfig};

/// Where the roster behind a leaderboard came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOrigin {
    /// Fetched from the source during this call
    Fresh,
    /// Served from a cache entry still inside its freshness interval
    Cached,
    /// Source failed; served from an expired cache entry
    Stale,
    /// Source failed and nothing was cached; the leaderboard is empty
    Unavailable,
}

/// Result of one fetch-and-score pass.
#[derive(Debug, Clone)]
pub struct LeaderboardOutcome {
    pub leaderboard: Leaderboard,
    pub origin: RosterOrigin,
    /// When the roster was fetched (None when unavailable)
    pub fetched_at: Option<DateTime<Utc>>,
    /// User-facing warning when the source could not be read
    pub warning: Option<String>,
}

/// Options for [`fetch_and_score`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub source: String,
    pub refresh_interval: Duration,
    pub fetch_timeout: Duration,
}

/// Load the roster for `options.source`, going through the cache, and score it.
///
/// Never fails: a source that cannot be read produces a stale leaderboard
/// (when the cache has one) or an empty one, with a warning attached.
///
/// This function is called from main.rs for one-shot commands and from the
/// watch loop on every tick.
pub async fn fetch_and_score(
    options: &FetchOptions,
    scoring: &ScoringConfig,
    cache: &mut RosterCache,
    now: DateTime<Utc>,
) -> LeaderboardOutcome {
    let key = CacheKey::new(options.source.clone(), options.refresh_interval);

    if let Some(entry) = cache.get_fresh(&key, now) {
        tracing::debug!(source = %options.source, fetched_at = %entry.fetched_at, "using cached roster");
        return scored(entry.members.clone(), scoring, RosterOrigin::Cached, Some(entry.fetched_at), None);
    }

    match fetch_roster(&options.source, options.fetch_timeout).await {
        Ok(rows) => {
            let members = normalize_roster(&rows);
            tracing::info!(source = %options.source, members = members.len(), "roster loaded");
            cache.insert(key, members.clone(), now);
            scored(members, scoring, RosterOrigin::Fresh, Some(now), None)
        }
        Err(e) => {
            tracing::warn!(source = %options.source, error = %e, "roster source unavailable");
            match cache.get_any(&key) {
                Some(entry) => {
                    let warning = format!(
                        "Failed to load roster: {}. Showing data from {}.",
                        e,
                        entry.fetched_at.format("%Y-%m-%d %H:%M UTC")
                    );
                    scored(
                        entry.members.clone(),
                        scoring,
                        RosterOrigin::Stale,
                        Some(entry.fetched_at),
                        Some(warning),
                    )
                }
                None => LeaderboardOutcome {
                    leaderboard: Leaderboard::empty(),
                    origin: RosterOrigin::Unavailable,
                    fetched_at: None,
                    warning: Some(format!("Failed to load roster: {}", e)),
                },
            }
        }
    }
}

fn scored(
    members: Vec<Member>,
    scoring: &ScoringConfig,
    origin: RosterOrigin,
    fetched_at: Option<DateTime<Utc>>,
    warning: Option<String>,
) -> LeaderboardOutcome {
    LeaderboardOutcome {
        leaderboard: score_leaderboard(members, scoring),
        origin,
        fetched_at,
        warning,
    }
}
