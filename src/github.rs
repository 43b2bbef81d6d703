use crate::config::ClientConfig;
use crate::error::{ExplorerError, Result, RATE_LIMIT_MESSAGE, USER_NOT_FOUND_MESSAGE};
use crate::models::RateLimitState;
use crate::types::{GitHubRepo, GitHubUser, UserSearchResponse};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use std::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// The two lookups the explorer needs. Implemented over HTTP by
/// [`GitHubClient`] and by fakes in tests.
#[async_trait]
pub trait GitHubApi {
    /// Best match for `name`, resolved to a full profile.
    async fn search_user(&self, name: &str) -> Result<GitHubUser>;

    /// Public repositories of `login`, most recently updated first.
    async fn list_repositories(&self, login: &str) -> Result<Vec<GitHubRepo>>;
}

pub struct GitHubClient {
    client: Client,
    config: ClientConfig,
    rate_limit: Mutex<RateLimitState>,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            config,
            rate_limit: Mutex::new(RateLimitState::default()),
        })
    }

    /// Rate limit state from the most recent response.
    pub fn last_rate_limit(&self) -> RateLimitState {
        self.rate_limit
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let url = format!("{}/{}", base, path.trim_start_matches('/'));
        Ok(Url::parse_with_params(&url, params)?)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        debug!(%url, "GitHub request");

        let mut request = self.client.get(url.clone()).header(ACCEPT, ACCEPT_HEADER);
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let rate_limit = rate_limit_from_headers(response.headers());

        if rate_limit.remaining < 5 {
            warn!(remaining = rate_limit.remaining, limit = rate_limit.limit, "Rate limit low");
        }
        if let Ok(mut state) = self.rate_limit.lock() {
            *state = rate_limit.clone();
        }

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                warn!(%url, status = %response.status(), "GitHub rejected request");
                Err(ExplorerError::RateLimitExceeded(rate_limit_message(&rate_limit)))
            }
            status => {
                debug!(%url, %status, "GitHub request failed");
                Err(ExplorerError::ApiError(format!("HTTP error! Status: {}", status.as_u16())))
            }
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn search_user(&self, name: &str) -> Result<GitHubUser> {
        let url = self.endpoint("search/users", &[("q", name), ("per_page", "1")])?;
        let response = self.make_request(url).await?;
        let search: UserSearchResponse = response.json().await?;

        let Some(top) = search.items.into_iter().next() else {
            return Err(ExplorerError::NotFound(USER_NOT_FOUND_MESSAGE.to_string()));
        };

        debug!(login = %top.login, total = search.total_count, "Search matched");
        let response = self.make_request(Url::parse(&top.url)?).await?;
        let user: GitHubUser = response.json().await?;
        Ok(user)
    }

    async fn list_repositories(&self, login: &str) -> Result<Vec<GitHubRepo>> {
        let path = format!("users/{}/repos", login);
        let url = self.endpoint(&path, &[("sort", "updated")])?;
        let response = self.make_request(url).await?;
        let repos: Vec<GitHubRepo> = response.json().await?;
        Ok(repos)
    }
}

/// Read the `X-RateLimit-*` headers. Missing headers leave the defaults.
pub fn rate_limit_from_headers(headers: &HeaderMap) -> RateLimitState {
    let number = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
    };

    let defaults = RateLimitState::default();
    let remaining = number("X-RateLimit-Remaining")
        .map(|n| n.max(0) as u32)
        .unwrap_or(defaults.remaining);
    let limit = number("X-RateLimit-Limit")
        .map(|n| n.max(0) as u32)
        .unwrap_or(defaults.limit);
    let reset_time = number("X-RateLimit-Reset").and_then(|ts| DateTime::from_timestamp(ts, 0));

    RateLimitState {
        remaining,
        limit,
        reset_time,
        is_limited: remaining == 0,
    }
}

fn rate_limit_message(state: &RateLimitState) -> String {
    match state.reset_time {
        Some(reset) if state.is_limited => format!(
            "{} Limit resets at {}.",
            RATE_LIMIT_MESSAGE,
            reset.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        _ => RATE_LIMIT_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn rate_limit_headers_are_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        headers.insert("X-RateLimit-Limit", HeaderValue::from_static("60"));
        headers.insert("X-RateLimit-Reset", HeaderValue::from_static("1700000000"));

        let state = rate_limit_from_headers(&headers);
        assert_eq!(state.remaining, 0);
        assert_eq!(state.limit, 60);
        assert!(state.is_limited);
        assert_eq!(state.reset_time.unwrap().timestamp(), 1_700_000_000);

        let message = rate_limit_message(&state);
        assert!(message.starts_with(RATE_LIMIT_MESSAGE));
        assert!(message.contains("2023-11-14T22:13:20Z"));
    }

    #[test]
    fn missing_headers_use_defaults() {
        let state = rate_limit_from_headers(&HeaderMap::new());
        assert!(!state.is_limited);
        assert_eq!(rate_limit_message(&state), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn endpoint_encodes_query() {
        let client = GitHubClient::new(
            ClientConfig::default().with_base_url("https://example.test/api/"),
        )
        .unwrap();
        let url = client
            .endpoint("search/users", &[("q", "a b&c"), ("per_page", "1")])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.test/api/search/users?q=a+b%26c&per_page=1");
    }
}
