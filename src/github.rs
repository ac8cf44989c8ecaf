use crate::models::ActivitySummary;
use crate::period::Period;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use std::future::Future;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const CONTRIBUTIONS_QUERY: &str = "\
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}";

/// Upstream failure taxonomy. The display text is what ends up on the
/// error badge.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    #[error("user not found")]
    UserNotFound,
    #[error("api error")]
    ApiError,
}

/// Source of commit activity summaries. Abstracted so the request
/// pipeline can be exercised against a scripted upstream in tests.
pub trait FetchActivity: Send + Sync + 'static {
    fn fetch(
        &self,
        account: &str,
        period: Period,
    ) -> impl Future<Output = Result<ActivitySummary, FetchError>> + Send;
}

/// GitHub GraphQL client for the contribution calendar.
///
/// One outbound call per invocation, no retries and no timeout; the
/// cache layer is what bounds call frequency.
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    client: Client,
    endpoint: String,
}

impl GithubFetcher {
    pub fn new(token: Option<&str>, endpoint: impl Into<String>) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("commit-badge"));
        match token {
            Some(token) if !token.is_empty() => {
                match HeaderValue::from_str(&format!("Bearer {token}")) {
                    Ok(value) => {
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(err) => warn!("ignoring malformed GITHUB_TOKEN: {err}"),
                }
            }
            _ => warn!("no GITHUB_TOKEN configured; upstream calls will fail"),
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl FetchActivity for GithubFetcher {
    async fn fetch(&self, account: &str, period: Period) -> Result<ActivitySummary, FetchError> {
        let body = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "login": account },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!("contribution query transport failure for {account}: {err}");
                FetchError::ApiError
            })?;

        if !response.status().is_success() {
            warn!(
                "contribution query for {account} returned HTTP {}",
                response.status()
            );
            return Err(FetchError::ApiError);
        }

        let payload: GraphqlResponse = response.json().await.map_err(|err| {
            warn!("malformed contribution response for {account}: {err}");
            FetchError::ApiError
        })?;

        let days = extract_days(payload)?;
        Ok(summarize(days, period))
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContributionDay {
    date: String,
    #[serde(rename = "contributionCount")]
    count: u64,
}

/// Classifies the GraphQL payload and flattens weeks into one day list.
fn extract_days(payload: GraphqlResponse) -> Result<Vec<ContributionDay>, FetchError> {
    if payload
        .errors
        .iter()
        .any(|err| err.message.contains("Could not resolve to a User"))
    {
        return Err(FetchError::UserNotFound);
    }
    if !payload.errors.is_empty() {
        return Err(FetchError::ApiError);
    }

    let user = payload
        .data
        .and_then(|data| data.user)
        .ok_or(FetchError::UserNotFound)?;

    Ok(user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .collect())
}

/// Aggregates daily counts into the badge summary.
///
/// The average divides by the nominal period length even when the
/// account's history is shorter than the window, so young accounts read
/// lower. That matches the documented "average over the nominal period"
/// semantic.
fn summarize(mut days: Vec<ContributionDay>, period: Period) -> ActivitySummary {
    // ISO dates sort lexicographically; descending puts today first.
    days.sort_by(|a, b| b.date.cmp(&a.date));
    days.truncate(period.days() as usize);

    let total: u64 = days.iter().map(|day| day.count).sum();
    let average = format!("{:.2}", total as f64 / f64::from(period.days()));

    let mut sparkline_data: Vec<u64> = days.iter().take(7).map(|day| day.count).collect();
    sparkline_data.reverse();

    ActivitySummary {
        average,
        sparkline_data,
    }
}
