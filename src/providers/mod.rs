//! External data providers: imagery/spectral and weather
//!
//! Both providers are bounded-time HTTP collaborators behind async traits so
//! the scheduler and verification layers can be exercised against fakes. The
//! only persistent cross-call state in the whole crate is the imagery
//! provider's access-token cache (`token` module).

pub mod imagery;
pub mod token;
pub mod weather;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{BoundingBox, ForecastDay, SceneBands, WeatherObservation};

pub use imagery::ImageryClient;
pub use token::TokenCache;
pub use weather::WeatherClient;

/// Scene request sent to the imagery provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRequest {
    pub bbox: BoundingBox,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    /// Scenes above this cloud share are rejected upstream (%)
    pub max_cloud_coverage: f64,
}

/// Imagery/spectral data source
#[async_trait]
pub trait ImageryProvider: Send + Sync {
    /// Fetch raw red/NIR bands plus scene classification for a region and
    /// date range.
    async fn fetch_scene(&self, request: &SceneRequest) -> Result<SceneBands>;
}

/// Weather data source
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions and the multi-day forecast for a location.
    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(WeatherObservation, Vec<ForecastDay>)>;
}
