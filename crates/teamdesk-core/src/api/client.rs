//! API client for communicating with the school administration REST API.
//!
//! This module provides the `ApiClient` struct for fetching team, student and
//! event data and for enrolling participants in events.

use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{EnrollmentRequest, EventDetail, EventSummary, Student, Team, TeamSummary};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when the config does not name one
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API client for the school administration backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    initial_backoff: Duration,
}

impl ApiClient {
    /// Create a new API client against `base_url`
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Build a client from the loaded configuration, including its token if any
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let mut api = Self::with_timeout(
            config.api_base_url(),
            Duration::from_secs(config.request_timeout_secs()),
        )?;
        if let Some(token) = config.api_token.clone().filter(|t| !t.is_empty()) {
            api.set_token(token);
        }
        Ok(api)
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
            initial_backoff: self.initial_backoff,
        }
    }

    /// Override the first rate-limit backoff delay (doubles on each retry)
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> ApiResult<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidResponse("Bearer token contains invalid characters".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    /// `Ok(None)` means rate limited with retries left. A final 429 is
    /// decoded like any other failure so its body message survives.
    async fn check_response_for_retry(
        response: reqwest::Response,
        can_retry: bool,
    ) -> ApiResult<Option<reqwest::Response>> {
        let status = response.status();
        if status.is_success() {
            Ok(Some(response))
        } else if status == StatusCode::TOO_MANY_REQUESTS && can_retry {
            Ok(None)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send a request, backing off and retrying on 429
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            let mut request = self
                .client
                .request(method.clone(), url)
                .headers(self.auth_headers()?);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request.send().await?;

            let can_retry = retries < MAX_RATE_LIMIT_RETRIES;
            match Self::check_response_for_retry(response, can_retry).await? {
                Some(response) => return Ok(response),
                None => {
                    retries += 1;
                    warn!(url = url, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self.send::<()>(Method::GET, url, None).await?;
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse JSON from {}: {}", url, e)))
    }

    // ===== Teams =====

    /// Fetch a team with its ordered member roster
    pub async fn fetch_team(&self, team_id: i64) -> ApiResult<Team> {
        let url = self.url(&format!("/teams/{}", team_id));
        let team: Team = self.get(&url).await?;
        debug!(team_id, members = team.members.len(), "Fetched team roster");
        Ok(team)
    }

    pub async fn fetch_school_teams(&self, school_id: i64) -> ApiResult<Vec<TeamSummary>> {
        let url = self.url(&format!("/schools/{}/teams", school_id));
        let teams: Vec<TeamSummary> = self.get(&url).await?;
        debug!(school_id, count = teams.len(), "Fetched teams");
        Ok(teams)
    }

    // ===== Students =====

    /// Fetch every student of a school; this is the candidate pool for enrollment
    pub async fn fetch_school_students(&self, school_id: i64) -> ApiResult<Vec<Student>> {
        let url = self.url(&format!("/schools/{}/students", school_id));
        let students: Vec<Student> = self.get(&url).await?;
        debug!(school_id, count = students.len(), "Fetched students");
        Ok(students)
    }

    // ===== Events =====

    pub async fn fetch_school_events(&self, school_id: i64) -> ApiResult<Vec<EventSummary>> {
        let url = self.url(&format!("/schools/{}/events", school_id));
        let events: Vec<EventSummary> = self.get(&url).await?;
        debug!(school_id, count = events.len(), "Fetched events");
        Ok(events)
    }

    pub async fn fetch_event_detail(&self, event_id: i64) -> ApiResult<EventDetail> {
        let url = self.url(&format!("/events/{}", event_id));
        let event: EventDetail = self.get(&url).await?;
        debug!(event_id, participants = event.participants.len(), "Fetched event detail");
        Ok(event)
    }

    /// Enroll a batch of students in an event. The response body is ignored.
    pub async fn submit_participants(
        &self,
        event_id: i64,
        request: &EnrollmentRequest,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/events/{}/participants", event_id));
        self.send(Method::POST, &url, Some(request)).await?;
        debug!(
            event_id,
            team_id = ?request.team_id,
            count = request.student_ids.len(),
            from_team = request.is_from_team,
            "Submitted participants"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = ApiClient::new("http://school.test/api/").expect("Failed to build client");
        assert_eq!(api.base_url(), "http://school.test/api");
        assert_eq!(api.url("/teams/3"), "http://school.test/api/teams/3");
    }

    #[test]
    fn test_auth_headers() {
        let api = ApiClient::new(DEFAULT_API_BASE_URL).expect("Failed to build client");
        let headers = api.auth_headers().expect("Failed to build headers");
        assert!(headers.get(header::AUTHORIZATION).is_none());

        let authed = api.with_token("abc123".to_string());
        let headers = authed.auth_headers().expect("Failed to build headers");
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc123")
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        let api = ApiClient::new(DEFAULT_API_BASE_URL)
            .expect("Failed to build client")
            .with_token("bad\ntoken".to_string());
        assert!(matches!(api.auth_headers(), Err(ApiError::InvalidResponse(_))));
    }
}
