//! Monitor configuration structure
//!
//! TOML-backed configuration for the scheduler, providers, and verification
//! ensemble. Defaults match the documented threshold constants so a missing
//! config file yields the stock behavior.

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};
use crate::types::thresholds::scheduler as defaults;

/// Scheduler and deduplication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Interval between periodic sweeps (seconds)
    pub sweep_interval_secs: u64,
    /// Per-field evaluation deadline (seconds)
    pub field_timeout_secs: u64,
    /// Duplicate-alert suppression window (hours)
    pub suppression_window_hours: i64,
    /// Validity window for newly raised alerts (hours)
    pub alert_validity_hours: i64,
    /// Overall risk score at or above which an alert is raised
    pub alert_threshold: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: defaults::SWEEP_INTERVAL_SECS,
            field_timeout_secs: defaults::FIELD_TIMEOUT_SECS,
            suppression_window_hours: defaults::SUPPRESSION_WINDOW_HOURS,
            alert_validity_hours: defaults::ALERT_VALIDITY_HOURS,
            alert_threshold: defaults::ALERT_THRESHOLD,
        }
    }
}

/// Provider endpoints and timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub imagery_base_url: String,
    pub imagery_token_url: String,
    pub imagery_client_id: String,
    pub imagery_client_secret: String,
    pub weather_base_url: String,
    /// Bound on every provider HTTP request (seconds)
    pub request_timeout_secs: u64,
    /// Refresh the imagery token this long before expiry (seconds)
    pub token_refresh_margin_secs: i64,
    /// Scenes above this cloud share are rejected upstream (%)
    pub max_cloud_coverage: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            imagery_base_url: "https://services.imagery.example.com".to_string(),
            imagery_token_url: "https://services.imagery.example.com/oauth/token".to_string(),
            imagery_client_id: String::new(),
            imagery_client_secret: String::new(),
            weather_base_url: "https://api.weather.example.com".to_string(),
            request_timeout_secs: 60,
            token_refresh_margin_secs: 300,
            max_cloud_coverage: 20.0,
        }
    }
}

/// Verification ensemble settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Per-layer evaluation deadline (seconds)
    pub layer_timeout_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            layer_timeout_secs: defaults::LAYER_TIMEOUT_SECS,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub scheduler: SchedulerConfig,
    pub providers: ProviderConfig,
    pub verification: VerificationConfig,
}

impl MonitorConfig {
    /// Load configuration.
    ///
    /// Precedence: `CROPSENTINEL_CONFIG` env var (path to TOML) >
    /// `cropsentinel.toml` in the working directory > built-in defaults.
    /// A present-but-unreadable file is an error; a missing file is not.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CROPSENTINEL_CONFIG")
            .ok()
            .unwrap_or_else(|| "cropsentinel.toml".to_string());
        let explicit = std::env::var("CROPSENTINEL_CONFIG").is_ok();

        match std::fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml(&raw),
            Err(_) if !explicit => Ok(Self::default()),
            Err(e) => Err(MonitorError::Config(format!(
                "cannot read config at {path}: {e}"
            ))),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: MonitorConfig = toml::from_str(raw)
            .map_err(|e| MonitorError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject nonsensical values before they reach the scheduler.
    pub fn validate(&self) -> Result<()> {
        if self.scheduler.sweep_interval_secs == 0 {
            return Err(MonitorError::Config(
                "scheduler.sweep_interval_secs must be positive".to_string(),
            ));
        }
        if self.scheduler.field_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "scheduler.field_timeout_secs must be positive".to_string(),
            ));
        }
        if self.scheduler.suppression_window_hours <= 0 {
            return Err(MonitorError::Config(
                "scheduler.suppression_window_hours must be positive".to_string(),
            ));
        }
        if self.scheduler.alert_validity_hours <= 0 {
            return Err(MonitorError::Config(
                "scheduler.alert_validity_hours must be positive".to_string(),
            ));
        }
        if !(0.0..=10.0).contains(&self.scheduler.alert_threshold) {
            return Err(MonitorError::Config(format!(
                "scheduler.alert_threshold {} outside 0-10",
                self.scheduler.alert_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.providers.max_cloud_coverage) {
            return Err(MonitorError::Config(format!(
                "providers.max_cloud_coverage {} outside 0-100",
                self.providers.max_cloud_coverage
            )));
        }
        if self.providers.request_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "providers.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.verification.layer_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "verification.layer_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = MonitorConfig::default();
        assert_eq!(config.scheduler.sweep_interval_secs, 3600);
        assert_eq!(config.scheduler.field_timeout_secs, 60);
        assert_eq!(config.scheduler.suppression_window_hours, 6);
        assert_eq!(config.scheduler.alert_validity_hours, 24);
        assert!((config.scheduler.alert_threshold - 5.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config = MonitorConfig::from_toml(
            r#"
            [scheduler]
            sweep_interval_secs = 900

            [providers]
            weather_base_url = "https://weather.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.scheduler.sweep_interval_secs, 900);
        assert_eq!(config.scheduler.field_timeout_secs, 60);
        assert_eq!(config.providers.weather_base_url, "https://weather.internal");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = MonitorConfig::from_toml("[scheduler]\nsweep_interval_secs = 0\n").unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));

        let err = MonitorConfig::from_toml("[scheduler]\nalert_threshold = 42.0\n").unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(MonitorConfig::from_toml("not = [valid").is_err());
    }

    #[test]
    fn file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[scheduler]\nsuppression_window_hours = 12\nalert_threshold = 6.5\n"
        )
        .unwrap();
        let raw = std::fs::read_to_string(file.path()).unwrap();
        let config = MonitorConfig::from_toml(&raw).unwrap();
        assert_eq!(config.scheduler.suppression_window_hours, 12);
        assert!((config.scheduler.alert_threshold - 6.5).abs() < 1e-9);
    }
}
