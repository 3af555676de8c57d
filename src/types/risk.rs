//! Risk assessment output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crop::{CropType, GrowthStage, Hazard};
use super::thresholds::risk;

/// The six per-hazard scores of one evaluation, each clamped to [0, 10]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HazardScores {
    pub waterlogging: f64,
    pub drought: f64,
    pub heat: f64,
    pub cold: f64,
    pub disease: f64,
    pub wind: f64,
}

impl HazardScores {
    pub fn get(&self, hazard: Hazard) -> f64 {
        match hazard {
            Hazard::Waterlogging => self.waterlogging,
            Hazard::Drought => self.drought,
            Hazard::Heat => self.heat,
            Hazard::Cold => self.cold,
            Hazard::Disease => self.disease,
            Hazard::Wind => self.wind,
        }
    }

    /// Iterate `(hazard, score)` in scoring order
    pub fn iter(&self) -> impl Iterator<Item = (Hazard, f64)> + '_ {
        Hazard::ALL.iter().map(move |h| (*h, self.get(*h)))
    }

    /// The highest-scoring hazard. Ties resolve to the earlier hazard in
    /// scoring order, which also ranks waterlogging/drought first.
    pub fn dominant(&self) -> (Hazard, f64) {
        let mut best = (Hazard::Waterlogging, self.waterlogging);
        for (hazard, score) in self.iter() {
            if score > best.1 {
                best = (hazard, score);
            }
        }
        best
    }

    /// Fixed-weight blend of the six hazards (before forecast adjustment)
    pub fn weighted_sum(&self) -> f64 {
        self.waterlogging * risk::WEIGHT_WATERLOGGING
            + self.drought * risk::WEIGHT_DROUGHT
            + self.heat * risk::WEIGHT_HEAT
            + self.cold * risk::WEIGHT_COLD
            + self.disease * risk::WEIGHT_DISEASE
            + self.wind * risk::WEIGHT_WIND
    }

    /// Population variance across the six scores.
    ///
    /// Drives confidence: when the hazards disagree wildly the evaluation
    /// rests on fewer corroborating signals.
    pub fn variance(&self) -> f64 {
        let scores = [
            self.waterlogging,
            self.drought,
            self.heat,
            self.cold,
            self.disease,
            self.wind,
        ];
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64
    }
}

/// Alert level tier read off the overall risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Normal = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl AlertLevel {
    /// Map an overall score (0-10) onto the fixed alert bands
    pub fn from_score(score: f64) -> Self {
        if score >= risk::ALERT_CRITICAL {
            AlertLevel::Critical
        } else if score >= risk::ALERT_HIGH {
            AlertLevel::High
        } else if score >= risk::ALERT_MEDIUM {
            AlertLevel::Medium
        } else if score >= risk::ALERT_LOW {
            AlertLevel::Low
        } else {
            AlertLevel::Normal
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Normal => write!(f, "NORMAL"),
            AlertLevel::Low => write!(f, "LOW"),
            AlertLevel::Medium => write!(f, "MEDIUM"),
            AlertLevel::High => write!(f, "HIGH"),
            AlertLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Priority of a recommendation, ranked Urgent > High > Medium > Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low = 0,
    Medium = 1,
    High = 2,
    Urgent = 3,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Urgent => write!(f, "Urgent"),
        }
    }
}

/// A single actionable recommendation for a triggered hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub hazard: Hazard,
    pub priority: Priority,
    pub action: String,
}

/// Per-field, per-evaluation risk assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub field_id: String,
    pub crop: CropType,
    pub stage: GrowthStage,
    pub hazards: HazardScores,
    /// Weighted overall score plus forecast adjustment, clamped to [0, 10]
    pub overall_score: f64,
    /// [0.5, 1.0]; low inter-hazard variance means the signals agree
    pub confidence: f64,
    pub alert_level: AlertLevel,
    /// Critical-severity days found in the forecast window
    pub forecast_critical_events: usize,
    pub recommendations: Vec<Recommendation>,
    pub evaluated_at: DateTime<Utc>,
}
