//! Shared data structures for the crop monitoring and verification core
//!
//! This module defines the core types along the two pipelines:
//! - Monitoring: SceneBands → IndexMap → VegetationStatistics → RiskAssessment → Alert
//! - Claims: VegetationStatistics pairs → DamageEvidence (fraud-classified)
//! - Verification: LandRecord → VerificationLayerResult → VerificationOutcome

mod alert;
mod crop;
mod evidence;
mod imagery;
mod risk;
// Public because it contains the fixed threshold sub-modules which are
// referenced as `types::thresholds::...` across the crate.
pub mod thresholds;
mod vegetation;
mod verification;
mod weather;

pub use alert::*;
pub use crop::*;
pub use evidence::*;
pub use imagery::*;
pub use risk::*;
pub use vegetation::*;
pub use verification::*;
pub use weather::*;
