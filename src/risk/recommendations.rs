//! Per-hazard recommendation generation
//!
//! A recommendation is produced for every hazard whose score crosses the
//! trigger threshold, with a priority read off the score and a fixed action
//! text per hazard. The returned list is ranked Urgent > High > Medium > Low.

use crate::types::thresholds::risk;
use crate::types::{Hazard, HazardScores, Priority, Recommendation};

/// Priority bands over a 0-10 hazard score
fn priority_for_score(score: f64) -> Priority {
    if score >= 8.0 {
        Priority::Urgent
    } else if score >= 6.5 {
        Priority::High
    } else if score >= 5.5 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Fixed action text per hazard
fn action_for(hazard: Hazard) -> &'static str {
    match hazard {
        Hazard::Waterlogging => {
            "Open field drainage channels and pause irrigation until standing water recedes"
        }
        Hazard::Drought => {
            "Schedule supplemental irrigation; apply mulch to reduce evaporation losses"
        }
        Hazard::Heat => {
            "Irrigate in early morning to cool the root zone; avoid midday field operations"
        }
        Hazard::Cold => {
            "Prepare frost protection: light irrigation before nightfall and smoke/row covers"
        }
        Hazard::Disease => {
            "Scout for fungal lesions and apply preventive fungicide within 48 hours"
        }
        Hazard::Wind => {
            "Stake or earth-up vulnerable rows; delay spraying until wind subsides"
        }
    }
}

/// Generate ranked recommendations for all triggered hazards (score ≥ 5).
pub fn for_scores(scores: &HazardScores) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = scores
        .iter()
        .filter(|(_, score)| *score >= risk::RECOMMENDATION_TRIGGER)
        .map(|(hazard, score)| Recommendation {
            hazard,
            priority: priority_for_score(score),
            action: action_for(hazard).to_string(),
        })
        .collect();
    // Highest priority first; stable sort keeps scoring order within a tier
    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    out
}
