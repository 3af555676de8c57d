//! Land-record verification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crop::CropType;
use super::thresholds::verification_tiers;
use super::vegetation::VegetationStatistics;

/// The land record under verification, as handed over by the persistence
/// collaborator. Carries everything the built-in evidence layers inspect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandRecord {
    pub record_id: String,
    /// Declared boundary ring of `(lon, lat)` vertices
    pub coordinates: Vec<(f64, f64)>,
    /// Area claimed on the record (ha)
    pub declared_area_ha: f64,
    pub crop: Option<CropType>,
    /// Supporting documents attached to the record
    pub document_refs: Vec<String>,
    pub survey_number: Option<String>,
    pub owner_name: Option<String>,
    /// Latest vegetation snapshot for the declared boundary, if imagery
    /// was available when the record was prepared
    pub vegetation: Option<VegetationStatistics>,
}

/// Result of one independently-evaluated evidence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationLayerResult {
    pub layer_name: String,
    /// 0-100
    pub score: f64,
    /// 0-100
    pub confidence: f64,
    pub insights: Vec<String>,
}

impl VerificationLayerResult {
    /// Degraded result for a layer that failed or timed out: score 0 with an
    /// explanatory insight, so the ensemble can still complete.
    pub fn failed(layer_name: &str, reason: &str) -> Self {
        Self {
            layer_name: layer_name.to_string(),
            score: 0.0,
            confidence: 0.0,
            insights: vec![format!("layer unavailable: {reason}")],
        }
    }
}

/// Trust tier for a verified land record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationTier {
    /// Auto-approved - all evidence layers agree at high confidence
    Verified,
    HighConfidence,
    Conditional,
    ReviewRequired,
}

impl VerificationTier {
    /// Map `(overall_score, confidence)` onto the fixed tier table
    pub fn from_scores(overall: f64, confidence: f64) -> Self {
        if overall >= verification_tiers::VERIFIED_SCORE
            && confidence >= verification_tiers::VERIFIED_CONFIDENCE
        {
            VerificationTier::Verified
        } else if overall >= verification_tiers::HIGH_SCORE
            && confidence >= verification_tiers::HIGH_CONFIDENCE
        {
            VerificationTier::HighConfidence
        } else if overall >= verification_tiers::CONDITIONAL_SCORE {
            VerificationTier::Conditional
        } else {
            VerificationTier::ReviewRequired
        }
    }

    pub fn is_auto_approved(self) -> bool {
        self == VerificationTier::Verified
    }

    /// Fixed recommendation string per tier
    pub fn recommendation(self) -> &'static str {
        match self {
            VerificationTier::Verified => {
                "Record verified across all evidence layers; approve without manual review"
            }
            VerificationTier::HighConfidence => {
                "Evidence strongly supports the record; spot-check before approval"
            }
            VerificationTier::Conditional => {
                "Evidence partially supports the record; approve only with supplementary documents"
            }
            VerificationTier::ReviewRequired => {
                "Evidence does not support the record; route to full manual review"
            }
        }
    }

    /// Fixed next-step list per tier
    pub fn next_steps(self) -> Vec<&'static str> {
        match self {
            VerificationTier::Verified => vec!["issue verification certificate"],
            VerificationTier::HighConfidence => {
                vec!["sample one evidence layer for spot-check", "approve on pass"]
            }
            VerificationTier::Conditional => vec![
                "request supplementary ownership documents",
                "re-run verification after upload",
            ],
            VerificationTier::ReviewRequired => vec![
                "assign to verification officer",
                "schedule field inspection if documents are inconclusive",
            ],
        }
    }
}

impl std::fmt::Display for VerificationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationTier::Verified => write!(f, "Verified"),
            VerificationTier::HighConfidence => write!(f, "HighConfidence"),
            VerificationTier::Conditional => write!(f, "Conditional"),
            VerificationTier::ReviewRequired => write!(f, "ReviewRequired"),
        }
    }
}

/// Verification pipeline state, surfaced on the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationState {
    Unverified,
    EvaluatingLayers,
    Scored,
    Approved,
    Conditional,
    ReviewRequired,
}

impl VerificationState {
    /// Terminal state implied by a tier
    pub fn from_tier(tier: VerificationTier) -> Self {
        match tier {
            VerificationTier::Verified | VerificationTier::HighConfidence => {
                VerificationState::Approved
            }
            VerificationTier::Conditional => VerificationState::Conditional,
            VerificationTier::ReviewRequired => VerificationState::ReviewRequired,
        }
    }
}

/// Final outcome owned by the ensemble scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub record_id: String,
    /// Weighted blend of layer scores, 0-100
    pub overall_score: f64,
    /// Mean of layer confidences, 0-100
    pub confidence: f64,
    pub tier: VerificationTier,
    pub state: VerificationState,
    pub recommendation: String,
    pub next_steps: Vec<String>,
    pub layer_results: Vec<VerificationLayerResult>,
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table() {
        assert_eq!(
            VerificationTier::from_scores(100.0, 100.0),
            VerificationTier::Verified
        );
        assert_eq!(
            VerificationTier::from_scores(96.0, 85.0),
            VerificationTier::HighConfidence,
            "high score with middling confidence is not auto-approved"
        );
        assert_eq!(
            VerificationTier::from_scores(88.0, 85.0),
            VerificationTier::HighConfidence
        );
        assert_eq!(
            VerificationTier::from_scores(78.0, 50.0),
            VerificationTier::Conditional
        );
        assert_eq!(
            VerificationTier::from_scores(60.0, 95.0),
            VerificationTier::ReviewRequired
        );
    }

    #[test]
    fn only_verified_auto_approves() {
        assert!(VerificationTier::Verified.is_auto_approved());
        assert!(!VerificationTier::HighConfidence.is_auto_approved());
        assert!(!VerificationTier::Conditional.is_auto_approved());
        assert!(!VerificationTier::ReviewRequired.is_auto_approved());
    }

    #[test]
    fn terminal_states_follow_tier() {
        assert_eq!(
            VerificationState::from_tier(VerificationTier::Verified),
            VerificationState::Approved
        );
        assert_eq!(
            VerificationState::from_tier(VerificationTier::ReviewRequired),
            VerificationState::ReviewRequired
        );
    }

    #[test]
    fn failed_layer_result_is_explanatory() {
        let r = VerificationLayerResult::failed("vegetation_health", "provider timeout");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.confidence, 0.0);
        assert!(r.insights[0].contains("provider timeout"));
    }
}
