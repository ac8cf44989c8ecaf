use crate::cache::CacheStore;
use crate::github::GithubFetcher;

/// Shared per-request context. Cheap to clone; the cache store is just
/// a directory path and the fetcher wraps a pooled HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheStore,
    pub fetcher: GithubFetcher,
}

impl AppState {
    pub fn new(cache: CacheStore, fetcher: GithubFetcher) -> Self {
        Self { cache, fetcher }
    }
}
