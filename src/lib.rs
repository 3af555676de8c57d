//! CropSentinel: Crop Monitoring & Verification Intelligence
//!
//! Satellite-backed core for continuous crop risk assessment, deduplicated
//! alerting, insurance-claim validation, and land-record trust scoring.
//!
//! ## Architecture
//!
//! - **Spectral**: reflectance bands → vegetation index → statistics → change detection
//! - **Risk**: deterministic six-hazard crop risk model over weather and crop profiles
//! - **Alerts**: periodic sweep with per-field atomic alert deduplication
//! - **Claims**: fraud-consistency validation of damage claims against satellite evidence
//! - **Verification**: concurrent evidence-layer ensemble scoring for land records
//!
//! All scoring is rule-based arithmetic over documented thresholds - no
//! learned models, no hidden state. The only persistent cross-call state is
//! the imagery provider's access-token cache.

pub mod alerts;
pub mod claims;
pub mod config;
pub mod error;
pub mod providers;
pub mod risk;
pub mod spectral;
pub mod store;
pub mod types;
pub mod verification;

// Re-export configuration
pub use config::MonitorConfig;

// Re-export the error taxonomy
pub use error::{MonitorError, Result};

// Re-export commonly used types
pub use types::{
    Alert, AlertLevel, CropType, DamageEvidence, FraudRisk, GrowthStage, Hazard, IndexMap,
    IrrigationType, LandRecord, RiskAssessment, SoilType, VegetationStatistics,
    VerificationOutcome, VerificationTier, WeatherObservation,
};

// Re-export the pipeline entry points
pub use alerts::{AlertScheduler, EvaluationOutcome};
pub use claims::{validate_claim, ClaimInput};
pub use risk::{assess, RiskInput};
pub use spectral::{compare_maps, compare_stats, compute_index, summarize, ChangeMeasurement};
pub use verification::EnsembleScorer;

// Re-export collaborator traits
pub use providers::{ImageryProvider, WeatherProvider};
pub use store::{AlertStore, FieldStore, NotificationDispatcher, VerificationFieldStore};
