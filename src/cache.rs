use crate::models::{ActivitySummary, CacheEntry};
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// Cache freshness window: 6 hours, in milliseconds.
pub const CACHE_TTL_MS: u64 = 6 * 60 * 60 * 1000;

/// File-backed key/value cache, one JSON file per key.
///
/// Expiry is checked on read only; expired files are left in place so
/// [`CacheStore::get_stale`] can serve them when a refresh fails. Every
/// I/O failure degrades to a miss (`get`) or a logged no-op (`set`) —
/// the cache is an optimization, never a correctness dependency.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the cache directory. Called once at startup.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Returns the cached value for `key` if it is younger than the TTL.
    pub async fn get(&self, key: &str) -> Option<ActivitySummary> {
        let entry = self.read_entry(key).await?;
        let age = now_ms().saturating_sub(entry.timestamp);
        if age > CACHE_TTL_MS {
            debug!("cache expired for key {key}");
            return None;
        }
        debug!("cache hit for key {key}");
        Some(entry.value)
    }

    /// Returns the cached value for `key` regardless of age. Fallback
    /// path for serving stale data when the upstream refresh fails.
    pub async fn get_stale(&self, key: &str) -> Option<ActivitySummary> {
        self.read_entry(key).await.map(|entry| entry.value)
    }

    /// Writes `value` under `key`, overwriting any prior entry.
    pub async fn set(&self, key: &str, value: &ActivitySummary) {
        let entry = CacheEntry {
            timestamp: now_ms(),
            value: value.clone(),
        };
        let payload = match serde_json::to_vec(&entry) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to serialize cache entry for key {key}: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(self.entry_path(key), payload).await {
            warn!("failed to write cache entry for key {key}: {err}");
        }
    }

    async fn read_entry(&self, key: &str) -> Option<CacheEntry> {
        let bytes = match fs::read(self.entry_path(key)).await {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to read cache entry for key {key}: {err}");
                }
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("failed to parse cache entry for key {key}: {err}");
                None
            }
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are account:period; anything path-hostile is mapped away.
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
