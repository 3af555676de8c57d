//! Weather observation and forecast types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::thresholds::forecast;

/// Current weather conditions at a field location
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Rainfall over the last 24h (mm)
    pub rainfall_mm: f64,
    /// Relative humidity (%)
    pub humidity_pct: f64,
    /// Wind speed (km/h)
    pub wind_speed_kmh: f64,
}

/// One day of forecast conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Forecast daily max temperature (°C)
    pub temperature_c: f64,
    /// Forecast daily rainfall (mm)
    pub rainfall_mm: f64,
    /// Forecast relative humidity (%)
    pub humidity_pct: f64,
    /// Forecast peak wind speed (km/h)
    pub wind_speed_kmh: f64,
}

/// Severity class of a single forecast day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastSeverity {
    Normal,
    Elevated,
    Critical,
}

impl ForecastDay {
    /// Classify this forecast day against the fixed severity thresholds.
    ///
    /// Critical when any of rainfall, temperature (hot or freezing), or wind
    /// crosses its critical breakpoint; Elevated when rainfall or wind crosses
    /// the elevated breakpoint.
    pub fn severity(&self) -> ForecastSeverity {
        if self.rainfall_mm >= forecast::RAINFALL_CRITICAL_MM
            || self.temperature_c >= forecast::TEMP_CRITICAL_C
            || self.temperature_c <= forecast::TEMP_CRITICAL_LOW_C
            || self.wind_speed_kmh >= forecast::WIND_CRITICAL_KMH
        {
            ForecastSeverity::Critical
        } else if self.rainfall_mm >= forecast::RAINFALL_ELEVATED_MM
            || self.wind_speed_kmh >= forecast::WIND_ELEVATED_KMH
        {
            ForecastSeverity::Elevated
        } else {
            ForecastSeverity::Normal
        }
    }
}

/// Count of critical-severity days in a forecast window
pub fn critical_event_count(days: &[ForecastDay]) -> usize {
    days.iter()
        .filter(|d| d.severity() == ForecastSeverity::Critical)
        .count()
}
