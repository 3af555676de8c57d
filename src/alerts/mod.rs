//! Alert scheduling and deduplication

pub mod scheduler;

pub use scheduler::{AlertScheduler, EvaluationOutcome};
