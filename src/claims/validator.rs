//! Claim fraud-consistency validation
//!
//! Cross-checks a self-reported damage claim against the independently
//! measured vegetation change. A fraud classification is a normal, expected
//! output - this module never fails on a fraud finding; "needs manual
//! review" is a valid terminal state.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::spectral::ChangeMeasurement;
use crate::types::thresholds::{fraud, vegetation};
use crate::types::{DamageEvidence, FraudRisk};

/// Claim context accompanying the measurement
#[derive(Debug, Clone)]
pub struct ClaimInput<'a> {
    pub field_id: &'a str,
    /// Farmer-reported damage (%)
    pub claimed_damage_pct: f64,
    /// Field area when known, for damaged-area accounting (ha)
    pub field_area_ha: Option<f64>,
    /// Insured amount when the claim is tied to a policy
    pub insured_amount: Option<f64>,
}

/// Classify the claim against the measurement.
///
/// Rules, in order:
/// 1. baseline mean `< 0.3` → HIGH - no healthy crop ever stood on this
///    field, so any damage claim is fabricated or misregistered;
/// 2. `|computed - claimed| > 30` → HIGH;
/// 3. difference `> 15` → MEDIUM;
/// 4. otherwise LOW.
fn classify(claimed_pct: f64, measurement: &ChangeMeasurement) -> (FraudRisk, Vec<String>) {
    let mut findings = Vec::new();

    if !measurement.baseline.shows_viable_crop() {
        findings.push(format!(
            "baseline mean index {:.2} below viability threshold {:.2}: no healthy crop existed at this field",
            measurement.baseline.mean,
            vegetation::VIABLE_BASELINE_MEAN
        ));
        return (FraudRisk::High, findings);
    }

    let discrepancy = (measurement.damage_percent - claimed_pct).abs();
    if discrepancy > fraud::HIGH_DISCREPANCY {
        findings.push(format!(
            "claimed {claimed_pct:.0}% but satellite measured {:.0}% damage (discrepancy {discrepancy:.0} > {})",
            measurement.damage_percent,
            fraud::HIGH_DISCREPANCY
        ));
        (FraudRisk::High, findings)
    } else if discrepancy > fraud::MEDIUM_DISCREPANCY {
        findings.push(format!(
            "claimed {claimed_pct:.0}% vs measured {:.0}% damage (discrepancy {discrepancy:.0} > {})",
            measurement.damage_percent,
            fraud::MEDIUM_DISCREPANCY
        ));
        (FraudRisk::Medium, findings)
    } else {
        findings.push(format!(
            "claimed {claimed_pct:.0}% consistent with measured {:.0}% damage",
            measurement.damage_percent
        ));
        (FraudRisk::Low, findings)
    }
}

/// Build the immutable evidence record for one claim.
///
/// Only LOW-risk claims auto-approve; the payout estimate (insured amount x
/// measured damage fraction) is produced solely for auto-approved claims so
/// a flagged claim never carries a precomputed payout into review.
pub fn validate_claim(input: &ClaimInput<'_>, measurement: &ChangeMeasurement) -> DamageEvidence {
    let (risk, findings) = classify(input.claimed_damage_pct, measurement);
    let auto_approved = risk == FraudRisk::Low;

    let estimated_claim = if auto_approved {
        input
            .insured_amount
            .map(|amount| amount * measurement.damage_percent / 100.0)
    } else {
        None
    };

    info!(
        field = input.field_id,
        claimed = %format!("{:.0}%", input.claimed_damage_pct),
        computed = %format!("{:.0}%", measurement.damage_percent),
        fraud_risk = %risk,
        auto_approved,
        "claim validated"
    );

    DamageEvidence {
        id: Uuid::new_v4(),
        field_id: input.field_id.to_string(),
        baseline_stats: measurement.baseline.clone(),
        current_stats: measurement.current.clone(),
        mean_change: measurement.mean_change,
        computed_damage_pct: measurement.damage_percent,
        severe_damage_pct: measurement.severe_damage_percent,
        damage_risk_score: measurement.risk_score,
        claimed_damage_pct: input.claimed_damage_pct,
        fraud_risk: risk,
        auto_approved,
        findings,
        damaged_area_ha: input
            .field_area_ha
            .map(|area| measurement.damaged_area_ha(area)),
        estimated_claim,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HealthInterpretation, VegetationStatistics};

    fn stats(mean: f64) -> VegetationStatistics {
        VegetationStatistics {
            count: 100,
            mean,
            median: mean,
            min: mean - 0.2,
            max: mean + 0.2,
            std_dev: 0.1,
            healthy_pct: if mean > 0.6 { 60.0 } else { 10.0 },
            moderate_pct: 30.0,
            stressed_pct: if mean > 0.6 { 10.0 } else { 60.0 },
            bare_pct: 0.0,
            interpretation: HealthInterpretation::Fair,
        }
    }

    fn measurement(baseline_mean: f64, damage_pct: f64) -> ChangeMeasurement {
        ChangeMeasurement {
            baseline: stats(baseline_mean),
            current: stats(baseline_mean - 0.3),
            mean_change: -0.3,
            damage_percent: damage_pct,
            severe_damage_percent: damage_pct / 2.0,
            risk_score: crate::spectral::damage_risk_score(damage_pct),
            compared_pixels: 100,
        }
    }

    fn claim(claimed: f64) -> ClaimInput<'static> {
        ClaimInput {
            field_id: "field-9",
            claimed_damage_pct: claimed,
            field_area_ha: Some(10.0),
            insured_amount: Some(50_000.0),
        }
    }

    #[test]
    fn nonviable_baseline_is_always_high_risk() {
        // Baseline mean 0.2 → HIGH even with a perfectly matching claim
        let evidence = validate_claim(&claim(40.0), &measurement(0.2, 40.0));
        assert_eq!(evidence.fraud_risk, FraudRisk::High);
        assert!(!evidence.auto_approved);
        assert!(evidence.estimated_claim.is_none());
        assert!(evidence.findings[0].contains("no healthy crop"));
    }

    #[test]
    fn large_discrepancy_is_high_risk() {
        // Computed 65%, claimed 20% → diff 45 > 30
        let evidence = validate_claim(&claim(20.0), &measurement(0.6, 65.0));
        assert_eq!(evidence.fraud_risk, FraudRisk::High);
        assert!(!evidence.auto_approved);
    }

    #[test]
    fn moderate_discrepancy_is_medium_risk() {
        // Computed 40%, claimed 20% → diff 20 ∈ (15, 30]
        let evidence = validate_claim(&claim(20.0), &measurement(0.6, 40.0));
        assert_eq!(evidence.fraud_risk, FraudRisk::Medium);
        assert!(!evidence.auto_approved);
        assert!(evidence.estimated_claim.is_none());
    }

    #[test]
    fn consistent_claim_auto_approves_with_payout() {
        // Computed 45%, claimed 50% → diff 5 → LOW
        let evidence = validate_claim(&claim(50.0), &measurement(0.6, 45.0));
        assert_eq!(evidence.fraud_risk, FraudRisk::Low);
        assert!(evidence.auto_approved);
        // Payout follows the MEASURED damage, not the claim: 50000 × 0.45
        assert!((evidence.estimated_claim.unwrap() - 22_500.0).abs() < 1e-6);
        assert!((evidence.damaged_area_ha.unwrap() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn boundary_discrepancies_favor_the_lower_tier() {
        // diff exactly 30 → MEDIUM, not HIGH; diff exactly 15 → LOW
        let evidence = validate_claim(&claim(30.0), &measurement(0.6, 60.0));
        assert_eq!(evidence.fraud_risk, FraudRisk::Medium);
        let evidence = validate_claim(&claim(30.0), &measurement(0.6, 45.0));
        assert_eq!(evidence.fraud_risk, FraudRisk::Low);
    }

    #[test]
    fn overclaim_and_underclaim_are_symmetric() {
        let over = validate_claim(&claim(80.0), &measurement(0.6, 20.0));
        let under = validate_claim(&claim(20.0), &measurement(0.6, 80.0));
        assert_eq!(over.fraud_risk, FraudRisk::High);
        assert_eq!(under.fraud_risk, FraudRisk::High);
    }

    #[test]
    fn evidence_carries_the_measurement_verbatim() {
        let m = measurement(0.6, 33.0);
        let evidence = validate_claim(&claim(30.0), &m);
        assert!((evidence.computed_damage_pct - 33.0).abs() < 1e-9);
        assert!((evidence.damage_risk_score - 4.0).abs() < 1e-9);
        assert!((evidence.mean_change + 0.3).abs() < 1e-9);
    }
}
