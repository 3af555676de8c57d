//! Error taxonomy for the monitoring core
//!
//! Policy outcomes are not errors: a fraud classification or a
//! review-required verification tier is a normal return value. Errors here
//! cover bad input, unavailable data, and degenerate computation — the
//! situations where no meaningful score can be produced at all.

use thiserror::Error;

/// Errors produced by the monitoring core.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Bad field geometry or mismatched raster inputs.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Crop name not present in the sensitivity tables. Hard failure —
    /// scoring an unknown crop with default sensitivities would silently
    /// produce garbage risk numbers.
    #[error("unknown crop type: {0}")]
    UnknownCrop(String),

    /// Provider could not supply usable data (no cloud-free imagery,
    /// upstream failure, malformed response).
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A bounded-time provider call exceeded its deadline.
    #[error("{provider} provider timed out after {seconds}s")]
    ProviderTimeout { provider: &'static str, seconds: u64 },

    /// Zero valid pixels remained after scene-class masking.
    #[error("insufficient valid pixels: {valid} of {total}")]
    InsufficientData { valid: usize, total: usize },

    /// Degenerate numeric state during scoring.
    #[error("computation error: {0}")]
    Computation(String),

    /// Invalid configuration detected at load time.
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistence collaborator failure.
    #[error("store error: {0}")]
    Store(String),
}

impl MonitorError {
    /// Whether this error should surface immediately to an on-demand caller
    /// (input validation) rather than being logged and skipped by a sweep.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MonitorError::InvalidGeometry(_) | MonitorError::UnknownCrop(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_flagged() {
        assert!(MonitorError::UnknownCrop("quinoa".into()).is_validation());
        assert!(MonitorError::InvalidGeometry("empty ring".into()).is_validation());
        assert!(!MonitorError::DataUnavailable("offline".into()).is_validation());
    }

    #[test]
    fn timeout_display_names_provider() {
        let err = MonitorError::ProviderTimeout {
            provider: "imagery",
            seconds: 60,
        };
        assert_eq!(err.to_string(), "imagery provider timed out after 60s");
    }
}
