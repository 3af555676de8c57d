//! Land-record verification: independent evidence layers + ensemble scoring
//!
//! Layers evaluate concurrently (fan-out), join at a barrier (fan-in), and
//! reduce to one weighted trust score. A failed layer degrades its own
//! contribution to zero; it never aborts the assessment.

pub mod layers;
pub mod scorer;

pub use layers::{
    default_layers, BoundaryLayer, CompletenessLayer, CoordinateLayer, DocumentLayer,
    VegetationLayer, VerificationLayer,
};
pub use scorer::EnsembleScorer;
