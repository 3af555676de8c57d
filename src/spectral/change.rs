//! Temporal change detection
//!
//! Compares a baseline and a current snapshot of the same field into a
//! damage measurement. This is the single source of truth for "how much did
//! vegetation health actually drop" - both weather-triggered monitoring and
//! claim evidence generation go through here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MonitorError, Result};
use crate::spectral::statistics::summarize;
use crate::types::thresholds::vegetation;
use crate::types::{IndexMap, VegetationStatistics};

/// Independently measured vegetation change between two dates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeMeasurement {
    pub baseline: VegetationStatistics,
    pub current: VegetationStatistics,
    /// `current.mean - baseline.mean`; negative means decline
    pub mean_change: f64,
    /// Share of co-valid pixels whose index dropped more than 0.2 (%)
    pub damage_percent: f64,
    /// Share of co-valid pixels whose index dropped more than 0.4 (%)
    pub severe_damage_percent: f64,
    /// 0-10 risk score mapped from `damage_percent`
    pub risk_score: f64,
    /// Co-valid pixels the per-pixel comparison ran over; zero when the
    /// measurement came from statistics alone
    pub compared_pixels: usize,
}

impl ChangeMeasurement {
    /// Damaged area given the field's total area (ha)
    pub fn damaged_area_ha(&self, field_area_ha: f64) -> f64 {
        field_area_ha * self.damage_percent / 100.0
    }
}

/// Map a damage percentage onto a 0-10 risk score.
///
/// Fixed breakpoints: ≥80→10, ≥60→8, ≥40→6, ≥20→4, ≥10→2, else 1.
pub fn damage_risk_score(damage_percent: f64) -> f64 {
    if damage_percent >= 80.0 {
        10.0
    } else if damage_percent >= 60.0 {
        8.0
    } else if damage_percent >= 40.0 {
        6.0
    } else if damage_percent >= 20.0 {
        4.0
    } else if damage_percent >= 10.0 {
        2.0
    } else {
        1.0
    }
}

/// Compare two index maps of the same field pixel-by-pixel.
///
/// Dimensions must agree; pixels are compared only where valid in BOTH maps
/// (a pixel clouded on either date carries no change signal). Zero co-valid
/// pixels is `InsufficientData`.
pub fn compare_maps(baseline: &IndexMap, current: &IndexMap) -> Result<ChangeMeasurement> {
    if baseline.width() != current.width() || baseline.height() != current.height() {
        return Err(MonitorError::InvalidGeometry(format!(
            "baseline is {}x{} but current is {}x{}",
            baseline.width(),
            baseline.height(),
            current.width(),
            current.height()
        )));
    }

    let baseline_stats = summarize(baseline)?;
    let current_stats = summarize(current)?;

    let mut compared = 0usize;
    let mut damaged = 0usize;
    let mut severe = 0usize;
    for (b, c) in baseline.co_valid_pairs(current) {
        compared += 1;
        let drop = b - c;
        if drop > vegetation::DAMAGE_DROP {
            damaged += 1;
        }
        if drop > vegetation::SEVERE_DROP {
            severe += 1;
        }
    }
    if compared == 0 {
        return Err(MonitorError::InsufficientData {
            valid: 0,
            total: baseline.total_pixels(),
        });
    }

    let damage_percent = (damaged as f64 / compared as f64) * 100.0;
    let severe_damage_percent = (severe as f64 / compared as f64) * 100.0;
    let measurement = ChangeMeasurement {
        mean_change: current_stats.mean - baseline_stats.mean,
        baseline: baseline_stats,
        current: current_stats,
        damage_percent,
        severe_damage_percent,
        risk_score: damage_risk_score(damage_percent),
        compared_pixels: compared,
    };

    debug!(
        compared,
        damage_pct = %format!("{damage_percent:.1}"),
        severe_pct = %format!("{severe_damage_percent:.1}"),
        mean_change = %format!("{:.3}", measurement.mean_change),
        "temporal change measured"
    );

    Ok(measurement)
}

/// Compare two statistics snapshots when the raw maps are no longer
/// available (e.g. only aggregates were persisted).
///
/// Without per-pixel data the damage share is approximated by the growth of
/// the stressed + bare population, floored at zero.
pub fn compare_stats(
    baseline: &VegetationStatistics,
    current: &VegetationStatistics,
) -> ChangeMeasurement {
    let declined_share = ((current.stressed_pct + current.bare_pct)
        - (baseline.stressed_pct + baseline.bare_pct))
        .max(0.0);
    ChangeMeasurement {
        mean_change: current.mean - baseline.mean,
        baseline: baseline.clone(),
        current: current.clone(),
        damage_percent: declined_share,
        severe_damage_percent: (current.bare_pct - baseline.bare_pct).max(0.0),
        risk_score: damage_risk_score(declined_share),
        compared_pixels: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;
    use chrono::{DateTime, Utc};

    fn map_of(values: Vec<f64>, valid: Vec<bool>) -> IndexMap {
        let n = values.len();
        let from: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        let to: DateTime<Utc> = "2025-06-30T00:00:00Z".parse().unwrap();
        IndexMap::new(
            n,
            1,
            values,
            valid,
            BoundingBox {
                min_lon: 77.2,
                min_lat: 21.1,
                max_lon: 77.3,
                max_lat: 21.2,
            },
            from,
            to,
        )
        .unwrap()
    }

    #[test]
    fn risk_score_breakpoints() {
        assert_eq!(damage_risk_score(85.0), 10.0);
        assert_eq!(damage_risk_score(80.0), 10.0);
        assert_eq!(damage_risk_score(65.0), 8.0);
        assert_eq!(damage_risk_score(45.0), 6.0);
        assert_eq!(damage_risk_score(25.0), 4.0);
        assert_eq!(damage_risk_score(12.0), 2.0);
        assert_eq!(damage_risk_score(5.0), 1.0);
    }

    #[test]
    fn per_pixel_damage_counting() {
        // 4 pixels: drops of 0.5 (severe), 0.3 (damage), 0.1 (none), -0.1 (greener)
        let baseline = map_of(vec![0.8, 0.7, 0.5, 0.4], vec![true; 4]);
        let current = map_of(vec![0.3, 0.4, 0.4, 0.5], vec![true; 4]);
        let m = compare_maps(&baseline, &current).unwrap();
        assert_eq!(m.compared_pixels, 4);
        assert!((m.damage_percent - 50.0).abs() < 1e-9);
        assert!((m.severe_damage_percent - 25.0).abs() < 1e-9);
        assert_eq!(m.risk_score, 6.0);
        assert!(m.mean_change < 0.0);
    }

    #[test]
    fn cloudy_pixels_do_not_count() {
        let baseline = map_of(vec![0.8, 0.8], vec![true, true]);
        let current = map_of(vec![0.2, 0.8], vec![false, true]);
        // pixel 0 clouded on the current date → only pixel 1 compared
        let m = compare_maps(&baseline, &current).unwrap();
        assert_eq!(m.compared_pixels, 1);
        assert!((m.damage_percent - 0.0).abs() < 1e-9);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let baseline = map_of(vec![0.8, 0.8], vec![true, true]);
        let current = map_of(vec![0.8], vec![true]);
        assert!(matches!(
            compare_maps(&baseline, &current).unwrap_err(),
            MonitorError::InvalidGeometry(_)
        ));
    }

    #[test]
    fn stats_fallback_uses_category_growth() {
        let baseline = summarize(&map_of(vec![0.8, 0.7, 0.5, 0.4], vec![true; 4])).unwrap();
        let current = summarize(&map_of(vec![0.1, 0.1, -0.2, 0.7], vec![true; 4])).unwrap();
        let m = compare_stats(&baseline, &current);
        assert_eq!(m.compared_pixels, 0);
        // stressed+bare went 0% → 75%
        assert!((m.damage_percent - 75.0).abs() < 1e-9);
        assert_eq!(m.risk_score, 8.0);
    }

    #[test]
    fn recovery_floors_at_zero_damage() {
        let baseline = summarize(&map_of(vec![0.1, 0.1], vec![true; 2])).unwrap();
        let current = summarize(&map_of(vec![0.8, 0.7], vec![true; 2])).unwrap();
        let m = compare_stats(&baseline, &current);
        assert_eq!(m.damage_percent, 0.0);
        assert!(m.mean_change > 0.0);
        assert_eq!(m.risk_score, 1.0);
    }

    #[test]
    fn damaged_area_projection() {
        let baseline = map_of(vec![0.8, 0.8], vec![true, true]);
        let current = map_of(vec![0.3, 0.8], vec![true, true]);
        let m = compare_maps(&baseline, &current).unwrap();
        assert!((m.damage_percent - 50.0).abs() < 1e-9);
        assert!((m.damaged_area_ha(10.0) - 5.0).abs() < 1e-9);
    }
}
