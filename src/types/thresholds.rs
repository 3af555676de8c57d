//! Vegetation, risk, fraud, and verification thresholds plus ensemble weights

/// Thresholds for vegetation index interpretation and change detection
pub mod vegetation {
    // === Index Category Breakpoints ===
    /// Index above this counts as healthy canopy
    pub const HEALTHY_MIN: f64 = 0.6;
    /// Index above this (up to healthy) counts as moderate vigor
    pub const MODERATE_MIN: f64 = 0.3;
    /// Index at or above this (up to moderate) counts as stressed; below is bare/water
    pub const STRESSED_MIN: f64 = 0.0;

    // === Temporal Change Detection ===
    /// Per-pixel index drop counted as significant damage
    pub const DAMAGE_DROP: f64 = 0.2;
    /// Per-pixel index drop counted as severe damage
    pub const SEVERE_DROP: f64 = 0.4;

    // === Claim Plausibility ===
    /// Baseline mean index below this means no healthy crop ever stood here
    pub const VIABLE_BASELINE_MEAN: f64 = 0.3;
}

/// Weights and bands for the crop risk model
pub mod risk {
    // === Hazard Weights (sum to 1.0) ===
    /// Waterlogging hazard weight (20%)
    pub const WEIGHT_WATERLOGGING: f64 = 0.20;
    /// Drought hazard weight (20%)
    pub const WEIGHT_DROUGHT: f64 = 0.20;
    /// Heat stress hazard weight (15%)
    pub const WEIGHT_HEAT: f64 = 0.15;
    /// Cold stress hazard weight (15%)
    pub const WEIGHT_COLD: f64 = 0.15;
    /// Disease risk hazard weight (15%)
    pub const WEIGHT_DISEASE: f64 = 0.15;
    /// Wind damage hazard weight (15%)
    pub const WEIGHT_WIND: f64 = 0.15;

    // === Overall Score Adjustments ===
    /// Added to the overall score per critical-severity forecast day
    pub const FORECAST_CRITICAL_BONUS: f64 = 0.5;
    /// Confidence never drops below this floor
    pub const CONFIDENCE_FLOOR: f64 = 0.5;

    // === Alert Level Bands (overall score) ===
    /// Overall score at or above this is Critical
    pub const ALERT_CRITICAL: f64 = 8.0;
    /// Overall score at or above this is High
    pub const ALERT_HIGH: f64 = 6.0;
    /// Overall score at or above this is Medium
    pub const ALERT_MEDIUM: f64 = 4.0;
    /// Overall score at or above this is Low
    pub const ALERT_LOW: f64 = 2.0;

    // === Recommendations ===
    /// Hazard score at or above this triggers a recommendation
    pub const RECOMMENDATION_TRIGGER: f64 = 5.0;

    // === Frost ===
    /// Temperature below this is frost: cold severity forced to maximum
    pub const FROST_TEMP_C: f64 = 5.0;
}

/// Forecast-day severity classification thresholds
pub mod forecast {
    /// Daily rainfall at or above this is a critical event (mm)
    pub const RAINFALL_CRITICAL_MM: f64 = 100.0;
    /// Daily rainfall at or above this is elevated (mm)
    pub const RAINFALL_ELEVATED_MM: f64 = 50.0;
    /// Temperature at or above this is a critical event (°C)
    pub const TEMP_CRITICAL_C: f64 = 42.0;
    /// Temperature at or below this is a critical cold event (°C)
    pub const TEMP_CRITICAL_LOW_C: f64 = 2.0;
    /// Wind speed at or above this is a critical event (km/h)
    pub const WIND_CRITICAL_KMH: f64 = 70.0;
    /// Wind speed at or above this is elevated (km/h)
    pub const WIND_ELEVATED_KMH: f64 = 40.0;
}

/// Fraud-consistency thresholds for claim validation
pub mod fraud {
    /// Absolute claimed-vs-computed discrepancy above this is HIGH risk (pct points)
    pub const HIGH_DISCREPANCY: f64 = 30.0;
    /// Discrepancy above this (up to HIGH) is MEDIUM risk (pct points)
    pub const MEDIUM_DISCREPANCY: f64 = 15.0;
}

/// Weights for ensemble verification layers (sum to 1.0)
pub mod verification_weights {
    /// Coordinate plausibility layer weight (20%)
    pub const COORDINATE: f64 = 0.20;
    /// Boundary geometry validity layer weight (20%)
    pub const BOUNDARY: f64 = 0.20;
    /// Document cross-reference layer weight (20%)
    pub const DOCUMENT: f64 = 0.20;
    /// Vegetation health layer weight (25%) - the only satellite-backed layer
    pub const VEGETATION: f64 = 0.25;
    /// Record completeness layer weight (15%)
    pub const COMPLETENESS: f64 = 0.15;
}

/// Tier bands for the ensemble verification outcome
pub mod verification_tiers {
    /// Overall score floor for the Verified (auto-approved) tier
    pub const VERIFIED_SCORE: f64 = 95.0;
    /// Confidence floor for the Verified tier
    pub const VERIFIED_CONFIDENCE: f64 = 90.0;
    /// Overall score floor for the HighConfidence tier
    pub const HIGH_SCORE: f64 = 85.0;
    /// Confidence floor for the HighConfidence tier
    pub const HIGH_CONFIDENCE: f64 = 80.0;
    /// Overall score floor for the Conditional tier
    pub const CONDITIONAL_SCORE: f64 = 75.0;
}

/// Scheduling, deduplication, and timeout defaults
pub mod scheduler {
    /// Overall risk score at or above this raises an alert
    pub const ALERT_THRESHOLD: f64 = 5.0;
    /// Duplicate alerts for the same field/hazard suppressed inside this window (hours)
    pub const SUPPRESSION_WINDOW_HOURS: i64 = 6;
    /// New alerts stay valid for this long (hours)
    pub const ALERT_VALIDITY_HOURS: i64 = 24;
    /// Default sweep interval (seconds)
    pub const SWEEP_INTERVAL_SECS: u64 = 3600;
    /// Per-field evaluation deadline (seconds)
    pub const FIELD_TIMEOUT_SECS: u64 = 60;
    /// Per-layer verification deadline (seconds)
    pub const LAYER_TIMEOUT_SECS: u64 = 60;
}

/// Placeholder calibration constants
///
/// These fixed confidence values stand in for calibration that the upstream
/// system never performed: the deterministic verification layers report a
/// constant confidence because no ground-truth error rates exist yet.
/// TODO: replace with confidences derived from audited verification outcomes
/// once a labelled sample of manually reviewed records is available.
pub mod calibration {
    /// Confidence reported by deterministic geometry/document layers (0-100)
    pub const DETERMINISTIC_LAYER_CONFIDENCE: f64 = 90.0;
    /// Confidence reported by the satellite vegetation layer (0-100) -
    /// lower than the deterministic layers because of cloud masking variance
    pub const VEGETATION_LAYER_CONFIDENCE: f64 = 80.0;
}
