//! Crop, soil, irrigation, and hazard enumerations
//!
//! All lookups are keyed by closed enums. Crop names arriving from the
//! outside world go through `CropType::from_str`, which rejects anything not
//! in the sensitivity tables — there is no default crop.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Crops covered by the sensitivity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropType {
    Wheat,
    Rice,
    Maize,
    Cotton,
    Sugarcane,
    Soybean,
}

impl CropType {
    /// All crops, in table order
    pub const ALL: [CropType; 6] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Maize,
        CropType::Cotton,
        CropType::Sugarcane,
        CropType::Soybean,
    ];
}

impl FromStr for CropType {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wheat" => Ok(CropType::Wheat),
            "rice" | "paddy" => Ok(CropType::Rice),
            "maize" | "corn" => Ok(CropType::Maize),
            "cotton" => Ok(CropType::Cotton),
            "sugarcane" => Ok(CropType::Sugarcane),
            "soybean" | "soya" => Ok(CropType::Soybean),
            other => Err(MonitorError::UnknownCrop(other.to_string())),
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropType::Wheat => write!(f, "Wheat"),
            CropType::Rice => write!(f, "Rice"),
            CropType::Maize => write!(f, "Maize"),
            CropType::Cotton => write!(f, "Cotton"),
            CropType::Sugarcane => write!(f, "Sugarcane"),
            CropType::Soybean => write!(f, "Soybean"),
        }
    }
}

/// Discrete crop lifecycle phase with distinct hazard sensitivities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Germination,
    Vegetative,
    Flowering,
    Maturity,
}

impl GrowthStage {
    /// Stages where the canopy carries structural load (lodging risk)
    pub fn is_structurally_vulnerable(self) -> bool {
        matches!(self, GrowthStage::Flowering | GrowthStage::Maturity)
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthStage::Germination => write!(f, "Germination"),
            GrowthStage::Vegetative => write!(f, "Vegetative"),
            GrowthStage::Flowering => write!(f, "Flowering"),
            GrowthStage::Maturity => write!(f, "Maturity"),
        }
    }
}

/// Soil texture class, driving the waterlogging drainage factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    Loam,
    Silt,
    Clay,
}

impl SoilType {
    /// Drainage factor applied to the waterlogging score.
    ///
    /// Sandy soil drains freely (0.3); clay holds standing water (0.9).
    pub fn drainage_factor(self) -> f64 {
        match self {
            SoilType::Sandy => 0.3,
            SoilType::Loam => 0.5,
            SoilType::Silt => 0.7,
            SoilType::Clay => 0.9,
        }
    }
}

/// Irrigation system on the field, mitigating drought exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrrigationType {
    Drip,
    Sprinkler,
    Canal,
    Rainfed,
}

impl IrrigationType {
    /// Drought mitigation multiplier.
    ///
    /// Drip irrigation nearly removes rainfall dependence (0.2); rainfed
    /// fields carry the full deficit (1.0).
    pub fn drought_mitigation(self) -> f64 {
        match self {
            IrrigationType::Drip => 0.2,
            IrrigationType::Sprinkler => 0.4,
            IrrigationType::Canal => 0.6,
            IrrigationType::Rainfed => 1.0,
        }
    }
}

/// Hazards scored by the crop risk model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hazard {
    Waterlogging,
    Drought,
    Heat,
    Cold,
    Disease,
    Wind,
}

impl Hazard {
    /// All hazards, in scoring order
    pub const ALL: [Hazard; 6] = [
        Hazard::Waterlogging,
        Hazard::Drought,
        Hazard::Heat,
        Hazard::Cold,
        Hazard::Disease,
        Hazard::Wind,
    ];
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hazard::Waterlogging => write!(f, "Waterlogging"),
            Hazard::Drought => write!(f, "Drought"),
            Hazard::Heat => write!(f, "Heat Stress"),
            Hazard::Cold => write!(f, "Cold Stress"),
            Hazard::Disease => write!(f, "Disease Risk"),
            Hazard::Wind => write!(f, "Wind Damage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_parsing_accepts_aliases() {
        assert_eq!("Wheat".parse::<CropType>().unwrap(), CropType::Wheat);
        assert_eq!("paddy".parse::<CropType>().unwrap(), CropType::Rice);
        assert_eq!("CORN".parse::<CropType>().unwrap(), CropType::Maize);
        assert_eq!(" soya ".parse::<CropType>().unwrap(), CropType::Soybean);
    }

    #[test]
    fn unknown_crop_is_a_hard_error() {
        let err = "quinoa".parse::<CropType>().unwrap_err();
        assert!(matches!(err, MonitorError::UnknownCrop(name) if name == "quinoa"));
    }

    #[test]
    fn drainage_ordering_sandy_to_clay() {
        assert!(SoilType::Sandy.drainage_factor() < SoilType::Loam.drainage_factor());
        assert!(SoilType::Loam.drainage_factor() < SoilType::Silt.drainage_factor());
        assert!(SoilType::Silt.drainage_factor() < SoilType::Clay.drainage_factor());
    }

    #[test]
    fn irrigation_ordering_drip_to_rainfed() {
        assert!(IrrigationType::Drip.drought_mitigation() < IrrigationType::Rainfed.drought_mitigation());
        assert!((IrrigationType::Rainfed.drought_mitigation() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn structural_vulnerability_by_stage() {
        assert!(GrowthStage::Flowering.is_structurally_vulnerable());
        assert!(GrowthStage::Maturity.is_structurally_vulnerable());
        assert!(!GrowthStage::Vegetative.is_structurally_vulnerable());
        assert!(!GrowthStage::Germination.is_structurally_vulnerable());
    }
}
