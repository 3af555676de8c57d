//! Vegetation statistics aggregation
//!
//! Reduces an index map into summary statistics and health categories.
//! Pure and deterministic: the same index map always yields the same
//! statistics, and nothing here touches I/O.

use statrs::statistics::Statistics;

use crate::error::{MonitorError, Result};
use crate::types::thresholds::vegetation;
use crate::types::{HealthInterpretation, IndexMap, VegetationStatistics};

/// Summarize the valid pixels of an index map.
///
/// Category breakpoints: healthy `> 0.6`, moderate `(0.3, 0.6]`, stressed
/// `[0.0, 0.3]`, bare/water `< 0.0`. The four percentages partition the
/// valid pixels, so they sum to 100 within rounding.
pub fn summarize(map: &IndexMap) -> Result<VegetationStatistics> {
    let values: Vec<f64> = map.valid_values().collect();
    if values.is_empty() {
        // IndexMap construction rejects this, but summarize is a public
        // entry point and must hold its own contract.
        return Err(MonitorError::InsufficientData {
            valid: 0,
            total: map.total_pixels(),
        });
    }

    let count = values.len();
    let mean = values.iter().mean();
    let std_dev = if count > 1 {
        values.iter().population_std_dev()
    } else {
        0.0
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median = median_of(&values);

    let mut healthy = 0usize;
    let mut moderate = 0usize;
    let mut stressed = 0usize;
    let mut bare = 0usize;
    for &v in &values {
        if v > vegetation::HEALTHY_MIN {
            healthy += 1;
        } else if v > vegetation::MODERATE_MIN {
            moderate += 1;
        } else if v >= vegetation::STRESSED_MIN {
            stressed += 1;
        } else {
            bare += 1;
        }
    }
    let pct = |n: usize| (n as f64 / count as f64) * 100.0;
    let healthy_pct = pct(healthy);
    let moderate_pct = pct(moderate);
    let stressed_pct = pct(stressed);
    let bare_pct = pct(bare);

    let interpretation = interpret(mean, healthy_pct);

    Ok(VegetationStatistics {
        count,
        mean,
        median,
        min,
        max,
        std_dev,
        healthy_pct,
        moderate_pct,
        stressed_pct,
        bare_pct,
        interpretation,
    })
}

/// Median via sorted values; even-length inputs average the middle pair.
fn median_of(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Qualitative label from the fixed table over (mean, healthy %).
///
/// - Excellent: mean ≥ 0.60 and healthy ≥ 50%
/// - Good:      mean ≥ 0.45 and healthy ≥ 30%
/// - Fair:      mean ≥ 0.30
/// - Poor:      mean ≥ 0.15
/// - Critical:  below
fn interpret(mean: f64, healthy_pct: f64) -> HealthInterpretation {
    if mean >= 0.60 && healthy_pct >= 50.0 {
        HealthInterpretation::Excellent
    } else if mean >= 0.45 && healthy_pct >= 30.0 {
        HealthInterpretation::Good
    } else if mean >= 0.30 {
        HealthInterpretation::Fair
    } else if mean >= 0.15 {
        HealthInterpretation::Poor
    } else {
        HealthInterpretation::Critical
    }
}
