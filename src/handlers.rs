use crate::badge;
use crate::cache::CacheStore;
use crate::errors::AppError;
use crate::github::FetchActivity;
use crate::models::{ActivitySummary, BadgeOptions, BadgeQuery};
use crate::period::Period;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use tracing::{info, warn};

/// Browser-side cache hint, aligned with the store TTL.
const BROWSER_CACHE_CONTROL: &str = "public, max-age=21600";

pub async fn index() -> &'static str {
    "commit-badge: GET /commits?account=<github-login>&period=week|month|quarter|half|year\n"
}

pub async fn commits(
    State(state): State<AppState>,
    Query(query): Query<BadgeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let account = query
        .account
        .as_deref()
        .map(str::trim)
        .filter(|account| !account.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing GitHub account parameter."))?
        .to_string();

    let svg = serve_badge(&state.fetcher, &state.cache, &account, &query).await;
    Ok((
        [
            (CONTENT_TYPE, "image/svg+xml"),
            (CACHE_CONTROL, BROWSER_CACHE_CONTROL),
        ],
        svg,
    ))
}

/// The cache-and-refresh pipeline. Always produces a badge; the only
/// hard failure lives in the parameter check above.
async fn serve_badge<F: FetchActivity>(
    fetcher: &F,
    cache: &CacheStore,
    account: &str,
    query: &BadgeQuery,
) -> String {
    let period = Period::parse(query.period.as_deref());
    let key = format!("{account}:{}", period.as_str());
    let options = base_options(query);
    let want_sparkline = flag(&query.sparkline);

    if let Some(summary) = cache.get(&key).await {
        return render_summary(period, &summary, options, want_sparkline);
    }

    match fetcher.fetch(account, period).await {
        Ok(summary) => {
            cache.set(&key, &summary).await;
            info!("refreshed activity for {key}");
            render_summary(period, &summary, options, want_sparkline)
        }
        Err(err) => {
            warn!("refresh failed for {key}: {err}");
            // Recheck the cache after the failed refresh: a concurrent
            // request may have just populated it, and an expired entry
            // still beats an error badge.
            match cache.get_stale(&key).await {
                Some(summary) => render_summary(period, &summary, options, want_sparkline),
                None => badge::render_error(&err.to_string(), &options),
            }
        }
    }
}

fn render_summary(
    period: Period,
    summary: &ActivitySummary,
    mut options: BadgeOptions,
    want_sparkline: bool,
) -> String {
    options.sparkline = want_sparkline.then(|| summary.sparkline_data.clone());
    badge::render(period.as_str(), &summary.average, &options)
}

fn base_options(query: &BadgeQuery) -> BadgeOptions {
    BadgeOptions {
        theme: query.theme.clone(),
        color: query.color.clone(),
        style: query.style.clone(),
        animated: query.animated.clone(),
        icon: query.icon.clone(),
        sparkline: None,
        show_border: flag(&query.border),
    }
}

fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("true") | Some("1"))
}
