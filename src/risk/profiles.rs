//! Crop sensitivity reference tables
//!
//! Static, validated lookup keyed by the closed `CropType` enum. Unknown
//! crop names never reach this module - they are rejected at parse time by
//! `CropType::from_str`. Base sensitivities are 1-10 per hazard; stage
//! multipliers scale them through the crop lifecycle, capped at 10.

use crate::types::{CropType, GrowthStage, Hazard};

/// Base sensitivity (1-10) per hazard for one crop
#[derive(Debug, Clone, Copy)]
pub struct HazardSensitivity {
    pub waterlogging: f64,
    pub drought: f64,
    pub heat: f64,
    pub cold: f64,
    pub disease: f64,
    pub wind: f64,
}

impl HazardSensitivity {
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
}

/// Sensitivity multiplier per growth stage
#[derive(Debug, Clone, Copy)]
pub struct StageMultipliers {
    pub germination: f64,
    pub vegetative: f64,
    pub flowering: f64,
    pub maturity: f64,
}

impl StageMultipliers {
    pub fn for_stage(&self, stage: GrowthStage) -> f64 {
        match stage {
            GrowthStage::Germination => self.germination,
            GrowthStage::Vegetative => self.vegetative,
            GrowthStage::Flowering => self.flowering,
            GrowthStage::Maturity => self.maturity,
        }
    }
}

/// Immutable sensitivity profile for one crop type
#[derive(Debug, Clone, Copy)]
pub struct CropSensitivityProfile {
    pub crop: CropType,
    /// Optimal air temperature range (°C)
    pub optimal_temp_c: (f64, f64),
    /// Optimal daily rainfall range (mm)
    pub optimal_rainfall_mm: (f64, f64),
    pub base: HazardSensitivity,
    pub stage_multipliers: StageMultipliers,
}

impl CropSensitivityProfile {
    /// Stage-adjusted sensitivity for a hazard, capped at 10
    pub fn stage_sensitivity(&self, hazard: Hazard, stage: GrowthStage) -> f64 {
        (self.base.get(hazard) * self.stage_multipliers.for_stage(stage)).min(10.0)
    }
}

/// The reference table. Values reflect broadly accepted agronomic
/// sensitivities: rice tolerates standing water but not drought, wheat
/// lodges easily under waterlogging, flowering is the fragile stage for
/// cereals, sugarcane and maize are the tall wind-exposed canopies.
static PROFILES: [CropSensitivityProfile; 6] = [
    CropSensitivityProfile {
        crop: CropType::Wheat,
        optimal_temp_c: (10.0, 25.0),
        optimal_rainfall_mm: (2.0, 8.0),
        base: HazardSensitivity {
            waterlogging: 8.0,
            drought: 6.0,
            heat: 7.0,
            cold: 4.0,
            disease: 6.0,
            wind: 5.0,
        },
        stage_multipliers: StageMultipliers {
            germination: 1.2,
            vegetative: 0.9,
            flowering: 1.35,
            maturity: 1.1,
        },
    },
    CropSensitivityProfile {
        crop: CropType::Rice,
        optimal_temp_c: (20.0, 35.0),
        optimal_rainfall_mm: (6.0, 15.0),
        base: HazardSensitivity {
            waterlogging: 2.0,
            drought: 8.0,
            heat: 5.0,
            cold: 7.0,
            disease: 7.0,
            wind: 6.0,
        },
        stage_multipliers: StageMultipliers {
            germination: 1.3,
            vegetative: 1.0,
            flowering: 1.3,
            maturity: 1.15,
        },
    },
    CropSensitivityProfile {
        crop: CropType::Maize,
        optimal_temp_c: (18.0, 32.0),
        optimal_rainfall_mm: (3.0, 9.0),
        base: HazardSensitivity {
            waterlogging: 6.0,
            drought: 7.0,
            heat: 6.0,
            cold: 6.0,
            disease: 5.0,
            wind: 7.0,
        },
        stage_multipliers: StageMultipliers {
            germination: 1.25,
            vegetative: 0.95,
            flowering: 1.4,
            maturity: 1.05,
        },
    },
    CropSensitivityProfile {
        crop: CropType::Cotton,
        optimal_temp_c: (21.0, 35.0),
        optimal_rainfall_mm: (2.0, 7.0),
        base: HazardSensitivity {
            waterlogging: 7.0,
            drought: 5.0,
            heat: 4.0,
            cold: 7.0,
            disease: 6.0,
            wind: 5.0,
        },
        stage_multipliers: StageMultipliers {
            germination: 1.2,
            vegetative: 0.9,
            flowering: 1.3,
            maturity: 1.2,
        },
    },
    CropSensitivityProfile {
        crop: CropType::Sugarcane,
        optimal_temp_c: (20.0, 34.0),
        optimal_rainfall_mm: (4.0, 12.0),
        base: HazardSensitivity {
            waterlogging: 4.0,
            drought: 6.0,
            heat: 5.0,
            cold: 8.0,
            disease: 5.0,
            wind: 8.0,
        },
        stage_multipliers: StageMultipliers {
            germination: 1.1,
            vegetative: 1.0,
            flowering: 1.2,
            maturity: 1.25,
        },
    },
    CropSensitivityProfile {
        crop: CropType::Soybean,
        optimal_temp_c: (15.0, 30.0),
        optimal_rainfall_mm: (3.0, 8.0),
        base: HazardSensitivity {
            waterlogging: 7.0,
            drought: 6.0,
            heat: 6.0,
            cold: 5.0,
            disease: 7.0,
            wind: 4.0,
        },
        stage_multipliers: StageMultipliers {
            germination: 1.3,
            vegetative: 0.95,
            flowering: 1.35,
            maturity: 1.0,
        },
    },
];

/// Profile lookup. Total over the closed crop enum - a `CropType` value
/// always has a table row.
pub fn profile(crop: CropType) -> &'static CropSensitivityProfile {
    match crop {
        CropType::Wheat => &PROFILES[0],
        CropType::Rice => &PROFILES[1],
        CropType::Maize => &PROFILES[2],
        CropType::Cotton => &PROFILES[3],
        CropType::Sugarcane => &PROFILES[4],
        CropType::Soybean => &PROFILES[5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_crop_has_a_matching_row() {
        for crop in CropType::ALL {
            assert_eq!(profile(crop).crop, crop);
        }
    }

    #[test]
    fn table_values_are_in_documented_bounds() {
        for crop in CropType::ALL {
            let p = profile(crop);
            for hazard in Hazard::ALL {
                let base = p.base.get(hazard);
                assert!(
                    (1.0..=10.0).contains(&base),
                    "{crop} {hazard} base sensitivity {base} out of 1-10"
                );
            }
            for stage in [
                GrowthStage::Germination,
                GrowthStage::Vegetative,
                GrowthStage::Flowering,
                GrowthStage::Maturity,
            ] {
                let m = p.stage_multipliers.for_stage(stage);
                assert!(
                    (0.5..=1.5).contains(&m),
                    "{crop} {stage} multiplier {m} out of 0.5-1.5"
                );
            }
            assert!(p.optimal_temp_c.0 < p.optimal_temp_c.1);
            assert!(p.optimal_rainfall_mm.0 < p.optimal_rainfall_mm.1);
        }
    }

    #[test]
    fn stage_sensitivity_caps_at_ten() {
        // Wheat waterlogging 8.0 × flowering 1.35 = 10.8 → capped
        let s = profile(CropType::Wheat).stage_sensitivity(Hazard::Waterlogging, GrowthStage::Flowering);
        assert!((s - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rice_tolerates_waterlogging_wheat_does_not() {
        let rice = profile(CropType::Rice).base.waterlogging;
        let wheat = profile(CropType::Wheat).base.waterlogging;
        assert!(rice < wheat);
    }
}
