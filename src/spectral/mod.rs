//! Spectral processing: index computation, aggregation, change detection
//!
//! The monitoring pipeline's numerical core:
//! raw bands → index map → statistics → (risk model | claim evidence).

pub mod change;
pub mod index;
pub mod statistics;

pub use change::{compare_maps, compare_stats, damage_risk_score, ChangeMeasurement};
pub use index::compute_index;
pub use statistics::summarize;
