//! Bearer-token cache for the imagery provider
//!
//! OAuth2 client-credentials tokens are valid for roughly an hour; field
//! evaluations run in parallel and must not stampede the token endpoint.
//! The cache serves concurrent readers from a shared `RwLock` and refreshes
//! proactively - a configurable margin (default 5 minutes) before expiry -
//! under the write lock, with a double-check so only one task refreshes.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{MonitorError, Result};

/// A cached access token with its expiry instant
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Whether the token is inside the refresh margin (or already expired)
    pub fn needs_refresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now + margin >= self.expires_at
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Seconds until expiry
    expires_in: i64,
}

/// Thread-safe token cache owned by the imagery client
pub struct TokenCache {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_margin: Duration,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(
        http: reqwest::Client,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        refresh_margin_secs: i64,
    ) -> Self {
        Self {
            http,
            token_url: token_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            refresh_margin: Duration::seconds(refresh_margin_secs),
            cached: RwLock::new(None),
        }
    }

    /// Get a bearer token, refreshing first when inside the margin.
    ///
    /// Concurrent callers share the read lock on the fast path; on refresh
    /// the first writer re-checks under the write lock so parallel field
    /// evaluations trigger at most one token request.
    pub async fn bearer(&self) -> Result<String> {
        let now = Utc::now();
        {
            let guard = self.cached.read().await;
            if let Some(token) = guard.as_ref() {
                if !token.needs_refresh(now, self.refresh_margin) {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut guard = self.cached.write().await;
        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = guard.as_ref() {
            if !token.needs_refresh(now, self.refresh_margin) {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let token = fresh.token.clone();
        *guard = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        debug!(url = %self.token_url, "requesting access token");
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MonitorError::DataUnavailable(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MonitorError::DataUnavailable(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| MonitorError::DataUnavailable(format!("malformed token response: {e}")))?;

        let expires_at = Utc::now() + Duration::seconds(body.expires_in);
        info!(expires_in = body.expires_in, "access token refreshed");
        Ok(CachedToken {
            token: body.access_token,
            expires_at,
        })
    }

    /// Seed the cache directly (tests and pre-provisioned tokens)
    pub async fn seed(&self, token: CachedToken) {
        *self.cached.write().await = Some(token);
    }
}
