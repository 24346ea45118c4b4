use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;

use crate::roster::Member;

/// Get the platform-appropriate cache directory for clanboard
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("clanboard/roster-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/clanboard/roster-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Remove the on-disk roster cache directory
pub fn clear_disk_cache(cache_path: &std::path::Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Identity of a cached roster: where it came from and how long it stays fresh.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: String,
    pub freshness: Duration,
}

impl CacheKey {
    pub fn new(source: impl Into<String>, freshness: Duration) -> Self {
        Self {
            source: source.into(),
            freshness,
        }
    }

    fn disk_key(&self) -> String {
        format!("roster:{}:{}s", self.source, self.freshness.as_secs())
    }
}

/// A normalized roster snapshot and the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRoster {
    pub fetched_at: DateTime<Utc>,
    pub members: Vec<Member>,
}

impl CachedRoster {
    /// Fresh while less than `freshness` has elapsed since the fetch.
    /// A fetch time in the future (clock skew) counts as fresh.
    pub fn is_fresh(&self, freshness: Duration, now: DateTime<Utc>) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < freshness,
            Err(_) => true,
        }
    }
}

/// Explicit roster cache keyed by [`CacheKey`].
///
/// Entries live in memory and, for a persistent cache, are mirrored to disk
/// with cacache so a fresh snapshot survives process restarts. The clock is
/// always passed in, never read here.
#[derive(Debug, Clone)]
pub struct RosterCache {
    enabled: bool,
    entries: HashMap<CacheKey, CachedRoster>,
    disk_path: Option<PathBuf>,
    /// Keys whose disk entry could not be removed; never reloaded from disk
    invalidated: HashSet<CacheKey>,
}

impl RosterCache {
    pub fn in_memory() -> Self {
        Self {
            enabled: true,
            entries: HashMap::new(),
            disk_path: None,
            invalidated: HashSet::new(),
        }
    }

    pub fn persistent(disk_path: PathBuf) -> Self {
        Self {
            enabled: true,
            entries: HashMap::new(),
            disk_path: Some(disk_path),
            invalidated: HashSet::new(),
        }
    }

    /// A cache that never holds anything (--no-cache)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            entries: HashMap::new(),
            disk_path: None,
            invalidated: HashSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The cached roster for `key` if it is still fresh at `now`.
    pub fn get_fresh(&mut self, key: &CacheKey, now: DateTime<Utc>) -> Option<&CachedRoster> {
        self.entry(key)
            .filter(|entry| entry.is_fresh(key.freshness, now))
    }

    /// The cached roster for `key` regardless of age.
    pub fn get_any(&mut self, key: &CacheKey) -> Option<&CachedRoster> {
        self.entry(key)
    }

    pub fn insert(&mut self, key: CacheKey, members: Vec<Member>, now: DateTime<Utc>) {
        if !self.enabled {
            return;
        }
        let entry = CachedRoster {
            fetched_at: now,
            members,
        };

        // Disk write is best-effort, a failure only costs a refetch next run
        if let Some(path) = &self.disk_path {
            match serde_json::to_vec(&entry) {
                Ok(serialized) => {
                    if let Err(e) = cacache::write_sync(path, key.disk_key(), &serialized) {
                        tracing::warn!(error = %e, "failed to persist roster cache");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to serialize roster cache"),
            }
        }

        self.invalidated.remove(&key);
        self.entries.insert(key, entry);
    }

    /// Drop the entry for `key` from memory and disk.
    pub fn invalidate(&mut self, key: &CacheKey) {
        self.entries.remove(key);
        if let Some(path) = &self.disk_path {
            if let Err(e) = cacache::remove_sync(path, key.disk_key()) {
                tracing::warn!(error = %e, source = %key.source, "failed to remove cached roster from disk");
                self.invalidated.insert(key.clone());
            }
        }
    }

    /// Drop all in-memory entries. Disk entries are left for [`clear_disk_cache`].
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry(&mut self, key: &CacheKey) -> Option<&CachedRoster> {
        if !self.enabled {
            return None;
        }
        if !self.entries.contains_key(key) {
            if let Some(loaded) = self.load_from_disk(key) {
                self.entries.insert(key.clone(), loaded);
            }
        }
        self.entries.get(key)
    }

    fn load_from_disk(&self, key: &CacheKey) -> Option<CachedRoster> {
        if self.invalidated.contains(key) {
            return None;
        }
        let path = self.disk_path.as_ref()?;
        let bytes = cacache::read_sync(path, key.disk_key()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}
