//! Damage evidence and fraud classification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vegetation::VegetationStatistics;

/// Fraud risk classification for a damage claim.
///
/// A policy outcome, never an error: HIGH means "route to manual review",
/// not "abort".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FraudRisk {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl std::fmt::Display for FraudRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FraudRisk::Low => write!(f, "LOW"),
            FraudRisk::Medium => write!(f, "MEDIUM"),
            FraudRisk::High => write!(f, "HIGH"),
        }
    }
}

/// Immutable evidence record for one damage claim.
///
/// Assembled exactly once per claim from the temporal change measurement and
/// the fraud-consistency rules; never mutated afterwards (append-only audit
/// trail). `findings` carries the human-readable reasoning for reviewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageEvidence {
    pub id: Uuid,
    pub field_id: String,
    pub baseline_stats: VegetationStatistics,
    pub current_stats: VegetationStatistics,
    /// `current.mean - baseline.mean`
    pub mean_change: f64,
    /// Independently measured damage share of co-valid pixels (%)
    pub computed_damage_pct: f64,
    /// Share of co-valid pixels with a severe index drop (%)
    pub severe_damage_pct: f64,
    /// 0-10 risk score mapped from `computed_damage_pct`
    pub damage_risk_score: f64,
    /// Farmer-reported damage (%)
    pub claimed_damage_pct: f64,
    pub fraud_risk: FraudRisk,
    /// True only for LOW-risk claims; MEDIUM/HIGH route to manual review
    pub auto_approved: bool,
    /// Human-readable audit trail of the rules that fired
    pub findings: Vec<String>,
    /// Damaged area, when the field geometry is known (ha)
    pub damaged_area_ha: Option<f64>,
    /// Payout estimate, only produced for auto-approved claims
    pub estimated_claim: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraud_risk_ordering() {
        assert!(FraudRisk::High > FraudRisk::Medium);
        assert!(FraudRisk::Medium > FraudRisk::Low);
        assert_eq!(FraudRisk::High.to_string(), "HIGH");
    }
}
