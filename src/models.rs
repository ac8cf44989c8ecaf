use serde::{Deserialize, Serialize};

/// Aggregated commit activity for one account over one period.
///
/// Only successful fetches produce one of these; upstream failures are
/// carried as [`crate::github::FetchError`] instead and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Commits per day over the nominal period, fixed to 2 decimals.
    pub average: String,
    /// Commit counts for the most recent days (at most 7), oldest first.
    pub sparkline_data: Vec<u64>,
}

/// Envelope persisted by the cache store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Creation time, epoch milliseconds.
    pub timestamp: u64,
    pub value: ActivitySummary,
}

/// Decorative options for the badge renderer. Every field is optional
/// and unknown values degrade to defaults; the renderer never fails.
#[derive(Debug, Clone, Default)]
pub struct BadgeOptions {
    pub theme: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub animated: Option<String>,
    pub icon: Option<String>,
    pub sparkline: Option<Vec<u64>>,
    pub show_border: bool,
}

/// Raw query parameters accepted by the `/commits` route.
#[derive(Debug, Deserialize, Default)]
pub struct BadgeQuery {
    pub account: Option<String>,
    pub period: Option<String>,
    pub theme: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub animated: Option<String>,
    pub icon: Option<String>,
    pub sparkline: Option<String>,
    pub border: Option<String>,
}
