//! Vegetation statistics types

use serde::{Deserialize, Serialize};

use super::thresholds::vegetation;

/// Qualitative label for a statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthInterpretation {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl std::fmt::Display for HealthInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthInterpretation::Excellent => write!(f, "Excellent"),
            HealthInterpretation::Good => write!(f, "Good"),
            HealthInterpretation::Fair => write!(f, "Fair"),
            HealthInterpretation::Poor => write!(f, "Poor"),
            HealthInterpretation::Critical => write!(f, "Critical"),
        }
    }
}

/// Summary statistics over the valid pixels of one index map.
///
/// The four category percentages partition the valid pixels and sum to 100
/// (within float rounding); masked pixels are not represented anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VegetationStatistics {
    /// Valid pixel count the statistics were computed over
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Share of valid pixels with index > 0.6 (%)
    pub healthy_pct: f64,
    /// Share with index in (0.3, 0.6] (%)
    pub moderate_pct: f64,
    /// Share with index in [0.0, 0.3] (%)
    pub stressed_pct: f64,
    /// Share with index < 0.0 - bare soil or open water (%)
    pub bare_pct: f64,
    pub interpretation: HealthInterpretation,
}

impl VegetationStatistics {
    /// Project the snapshot onto a 0-100 health score for ensemble scoring.
    ///
    /// Linear in the mean over the index's dynamic range, plus a bonus of up
    /// to 20 points proportional to the healthy-canopy share.
    pub fn health_score(&self) -> f64 {
        let mean_component = ((self.mean + 1.0) / 2.0) * 80.0;
        let healthy_bonus = (self.healthy_pct / 100.0) * 20.0;
        (mean_component + healthy_bonus).clamp(0.0, 100.0)
    }

    /// Whether the snapshot shows a viable standing crop.
    ///
    /// Used by the fraud validator: a claim against a field whose baseline
    /// never held healthy vegetation is suspect regardless of the numbers.
    pub fn shows_viable_crop(&self) -> bool {
        self.mean >= vegetation::VIABLE_BASELINE_MEAN
    }
}
