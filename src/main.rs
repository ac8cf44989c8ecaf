use commit_badge::cache::CacheStore;
use commit_badge::github::{DEFAULT_GRAPHQL_URL, GithubFetcher};
use commit_badge::{AppState, router};
use std::{env, net::SocketAddr, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cache_dir = resolve_cache_dir();
    let cache = CacheStore::new(cache_dir.clone());
    if let Err(err) = cache.ensure_dir().await {
        // Degraded but serviceable: every lookup will miss.
        error!(
            "failed to create cache directory {}: {err}",
            cache_dir.display()
        );
    }

    let token = env::var("GITHUB_TOKEN").ok();
    let endpoint =
        env::var("GITHUB_GRAPHQL_URL").unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string());
    let fetcher = GithubFetcher::new(token.as_deref(), endpoint)?;

    let app = router(AppState::new(cache, fetcher));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn resolve_cache_dir() -> PathBuf {
    if let Ok(dir) = env::var("CACHE_DIR") {
        return PathBuf::from(dir);
    }
    env::temp_dir().join("commit-badge-cache")
}
