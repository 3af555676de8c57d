//! Imagery provider HTTP client
//!
//! Requests raw red/NIR reflectance plus scene classification for a bounding
//! region and date range. Bearer-token auth via the shared `TokenCache`;
//! every request carries an explicit timeout so a slow provider can never
//! stall a scheduler sweep beyond the per-field deadline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MonitorError, Result};
use crate::providers::token::TokenCache;
use crate::providers::{ImageryProvider, SceneRequest};
use crate::types::{SceneBands, SceneClass};

/// Wire payload for the provider's process endpoint
#[derive(Debug, Serialize)]
struct ProcessRequest<'a> {
    bbox: [f64; 4],
    from: &'a str,
    to: &'a str,
    bands: [&'a str; 2],
    max_cloud_coverage: f64,
    include_scene_classification: bool,
}

/// Provider response: band arrays plus optional scene-class codes
#[derive(Debug, Deserialize)]
struct ProcessResponse {
    width: usize,
    height: usize,
    red: Vec<f64>,
    nir: Vec<f64>,
    scene_class: Option<Vec<u8>>,
}

/// Map provider scene-class codes onto the mask enum.
///
/// Code table: 0 clear, 1 cloud, 2 water, 3 snow; anything else is treated
/// as no-data and excluded.
fn decode_scene_class(codes: &[u8]) -> Vec<SceneClass> {
    codes
        .iter()
        .map(|c| match c {
            0 => SceneClass::Clear,
            1 => SceneClass::Cloud,
            2 => SceneClass::Water,
            3 => SceneClass::Snow,
            _ => SceneClass::NoData,
        })
        .collect()
}

/// HTTP client for the imagery/spectral provider
pub struct ImageryClient {
    http: reqwest::Client,
    base_url: String,
    token_cache: TokenCache,
    request_timeout: Duration,
}

impl ImageryClient {
    /// Build a client.
    ///
    /// `request_timeout_secs` bounds every provider call; the token cache
    /// shares the same HTTP client.
    pub fn new(
        base_url: &str,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        request_timeout_secs: u64,
        token_refresh_margin_secs: i64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .map_err(|e| MonitorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_cache: TokenCache::new(
                http.clone(),
                token_url,
                client_id,
                client_secret,
                token_refresh_margin_secs,
            ),
            http,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Access the token cache (tests seed it to avoid the network)
    pub fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }
}

#[async_trait::async_trait]
impl ImageryProvider for ImageryClient {
    async fn fetch_scene(&self, request: &SceneRequest) -> Result<SceneBands> {
        let bearer = self.token_cache.bearer().await?;

        let from = request.from_date.to_rfc3339();
        let to = request.to_date.to_rfc3339();
        let payload = ProcessRequest {
            bbox: [
                request.bbox.min_lon,
                request.bbox.min_lat,
                request.bbox.max_lon,
                request.bbox.max_lat,
            ],
            from: &from,
            to: &to,
            bands: ["B04", "B08"],
            max_cloud_coverage: request.max_cloud_coverage,
            include_scene_classification: true,
        };

        debug!(
            bbox = ?payload.bbox,
            from = %from,
            to = %to,
            "fetching scene bands"
        );

        let response = self
            .http
            .post(format!("{}/api/v1/process", self.base_url))
            .bearer_auth(&bearer)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MonitorError::ProviderTimeout {
                        provider: "imagery",
                        seconds: self.request_timeout.as_secs(),
                    }
                } else {
                    MonitorError::DataUnavailable(format!("imagery request failed: {e}"))
                }
            })?;

        match response.status() {
            s if s.is_success() => {}
            reqwest::StatusCode::NOT_FOUND => {
                return Err(MonitorError::DataUnavailable(
                    "no cloud-free imagery for the requested window".to_string(),
                ))
            }
            s => {
                return Err(MonitorError::DataUnavailable(format!(
                    "imagery provider returned {s}"
                )))
            }
        }

        let body: ProcessResponse = response.json().await.map_err(|e| {
            MonitorError::DataUnavailable(format!("malformed imagery response: {e}"))
        })?;

        Ok(SceneBands {
            width: body.width,
            height: body.height,
            red: body.red,
            nir: body.nir,
            scene_class: body.scene_class.as_deref().map(decode_scene_class),
            bbox: request.bbox,
            from_date: request.from_date,
            to_date: request.to_date,
        })
    }
}
