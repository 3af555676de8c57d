//! Insurance claim validation
//!
//! Cross-checks self-reported damage against satellite-measured change and
//! produces the immutable `DamageEvidence` audit record.

pub mod validator;

pub use validator::{validate_claim, ClaimInput};
