//! Weather provider HTTP client

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{MonitorError, Result};
use crate::providers::WeatherProvider;
use crate::types::{ForecastDay, WeatherObservation};

/// Current-conditions block of the provider response
#[derive(Debug, Deserialize)]
struct CurrentDto {
    temperature_c: f64,
    rainfall_mm: f64,
    humidity_pct: f64,
    wind_speed_kmh: f64,
}

/// One forecast day of the provider response
#[derive(Debug, Deserialize)]
struct ForecastDto {
    date: NaiveDate,
    temperature_c: f64,
    rainfall_mm: f64,
    humidity_pct: f64,
    wind_speed_kmh: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    current: CurrentDto,
    forecast: Vec<ForecastDto>,
}

impl From<ForecastDto> for ForecastDay {
    fn from(dto: ForecastDto) -> Self {
        ForecastDay {
            date: dto.date,
            temperature_c: dto.temperature_c,
            rainfall_mm: dto.rainfall_mm,
            humidity_pct: dto.humidity_pct,
            wind_speed_kmh: dto.wind_speed_kmh,
        }
    }
}

/// HTTP client for the weather provider
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl WeatherClient {
    pub fn new(base_url: &str, request_timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .map_err(|e| MonitorError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

#[async_trait::async_trait]
impl WeatherProvider for WeatherClient {
    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(WeatherObservation, Vec<ForecastDay>)> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(MonitorError::InvalidGeometry(format!(
                "location ({latitude}, {longitude}) outside WGS84 range"
            )));
        }

        debug!(latitude, longitude, "fetching weather");

        let response = self
            .http
            .get(format!("{}/api/v1/forecast", self.base_url))
            .query(&[("latitude", latitude), ("longitude", longitude)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MonitorError::ProviderTimeout {
                        provider: "weather",
                        seconds: self.request_timeout.as_secs(),
                    }
                } else {
                    MonitorError::DataUnavailable(format!("weather request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(MonitorError::DataUnavailable(format!(
                "weather provider returned {}",
                response.status()
            )));
        }

        let body: WeatherResponse = response.json().await.map_err(|e| {
            MonitorError::DataUnavailable(format!("malformed weather response: {e}"))
        })?;

        let observation = WeatherObservation {
            temperature_c: body.current.temperature_c,
            rainfall_mm: body.current.rainfall_mm,
            humidity_pct: body.current.humidity_pct,
            wind_speed_kmh: body.current.wind_speed_kmh,
        };
        let forecast = body.forecast.into_iter().map(ForecastDay::from).collect();
        Ok((observation, forecast))
    }
}
