//! Verification evidence layers
//!
//! Each layer inspects one independent aspect of a land record and returns
//! a 0-100 score with a confidence. Layers know nothing about each other;
//! the ensemble scorer owns the weighting and the final tier.
//!
//! Confidence values for the built-in layers are placeholder calibration
//! constants (see `types::thresholds::calibration`), not measured error
//! rates.

use async_trait::async_trait;

use crate::error::{MonitorError, Result};
use crate::types::thresholds::{calibration, verification_weights};
use crate::types::{ring_area_hectares, BoundingBox, LandRecord, VerificationLayerResult};

/// One independently-evaluated evidence layer
#[async_trait]
pub trait VerificationLayer: Send + Sync {
    fn name(&self) -> &'static str;
    /// Fixed ensemble weight; the built-in set sums to 1.0
    fn weight(&self) -> f64;
    async fn evaluate(&self, record: &LandRecord) -> Result<VerificationLayerResult>;
}

/// Coordinate plausibility: are the declared coordinates a believable
/// field location at all?
pub struct CoordinateLayer;

#[async_trait]
impl VerificationLayer for CoordinateLayer {
    fn name(&self) -> &'static str {
        "coordinate_plausibility"
    }

    fn weight(&self) -> f64 {
        verification_weights::COORDINATE
    }

    async fn evaluate(&self, record: &LandRecord) -> Result<VerificationLayerResult> {
        let mut insights = Vec::new();

        let bbox = match BoundingBox::from_ring(&record.coordinates) {
            Ok(bbox) => bbox,
            Err(e) => {
                return Ok(VerificationLayerResult {
                    layer_name: self.name().to_string(),
                    score: 0.0,
                    confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
                    insights: vec![format!("coordinates rejected: {e}")],
                })
            }
        };

        let near_null_island = record
            .coordinates
            .iter()
            .any(|(lon, lat)| lon.abs() < 0.5 && lat.abs() < 0.5);
        let span = (bbox.max_lon - bbox.min_lon).max(bbox.max_lat - bbox.min_lat);

        let score = if near_null_island {
            insights.push("coordinates cluster at (0, 0) - likely placeholder values".to_string());
            20.0
        } else if span > 1.0 {
            insights.push(format!(
                "boundary spans {span:.2}° - implausibly large for a single field"
            ));
            40.0
        } else {
            insights.push("coordinates form a plausible field location".to_string());
            100.0
        };

        Ok(VerificationLayerResult {
            layer_name: self.name().to_string(),
            score,
            confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
            insights,
        })
    }
}

/// Boundary geometry validity: does the declared area match the geometry?
pub struct BoundaryLayer;

#[async_trait]
impl VerificationLayer for BoundaryLayer {
    fn name(&self) -> &'static str {
        "boundary_geometry"
    }

    fn weight(&self) -> f64 {
        verification_weights::BOUNDARY
    }

    async fn evaluate(&self, record: &LandRecord) -> Result<VerificationLayerResult> {
        let computed_ha = match ring_area_hectares(&record.coordinates) {
            Ok(area) => area,
            Err(e) => {
                return Ok(VerificationLayerResult {
                    layer_name: self.name().to_string(),
                    score: 0.0,
                    confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
                    insights: vec![format!("boundary geometry invalid: {e}")],
                })
            }
        };

        if record.declared_area_ha <= 0.0 {
            return Ok(VerificationLayerResult {
                layer_name: self.name().to_string(),
                score: 0.0,
                confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
                insights: vec!["record declares a non-positive area".to_string()],
            });
        }

        let deviation = (computed_ha - record.declared_area_ha).abs() / record.declared_area_ha;
        let score = if deviation <= 0.10 {
            100.0
        } else if deviation <= 0.25 {
            75.0
        } else if deviation <= 0.50 {
            50.0
        } else {
            25.0
        };

        Ok(VerificationLayerResult {
            layer_name: self.name().to_string(),
            score,
            confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
            insights: vec![format!(
                "declared {:.2} ha vs boundary-derived {computed_ha:.2} ha ({:.0}% deviation)",
                record.declared_area_ha,
                deviation * 100.0
            )],
        })
    }
}

/// Document cross-reference: supporting paperwork attached to the record
pub struct DocumentLayer;

#[async_trait]
impl VerificationLayer for DocumentLayer {
    fn name(&self) -> &'static str {
        "document_crossref"
    }

    fn weight(&self) -> f64 {
        verification_weights::DOCUMENT
    }

    async fn evaluate(&self, record: &LandRecord) -> Result<VerificationLayerResult> {
        let mut insights = Vec::new();
        let mut score: f64 = match record.document_refs.len() {
            0 => {
                insights.push("no supporting documents attached".to_string());
                0.0
            }
            1 => {
                insights.push("single supporting document attached".to_string());
                25.0
            }
            n => {
                insights.push(format!("{n} supporting documents attached"));
                40.0
            }
        };
        if record.survey_number.is_some() {
            score += 30.0;
        } else {
            insights.push("survey number missing".to_string());
        }
        if record.owner_name.is_some() {
            score += 30.0;
        } else {
            insights.push("owner name missing".to_string());
        }

        Ok(VerificationLayerResult {
            layer_name: self.name().to_string(),
            score: score.min(100.0),
            confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
            insights,
        })
    }
}

/// Vegetation health: does the satellite picture of the boundary support a
/// real cultivated field?
pub struct VegetationLayer;

#[async_trait]
impl VerificationLayer for VegetationLayer {
    fn name(&self) -> &'static str {
        "vegetation_health"
    }

    fn weight(&self) -> f64 {
        verification_weights::VEGETATION
    }

    async fn evaluate(&self, record: &LandRecord) -> Result<VerificationLayerResult> {
        let stats = record.vegetation.as_ref().ok_or_else(|| {
            MonitorError::DataUnavailable(
                "no vegetation snapshot available for this record".to_string(),
            )
        })?;

        Ok(VerificationLayerResult {
            layer_name: self.name().to_string(),
            score: stats.health_score(),
            confidence: calibration::VEGETATION_LAYER_CONFIDENCE,
            insights: vec![format!(
                "vegetation {} (mean index {:.2}, {:.0}% healthy canopy over {} pixels)",
                stats.interpretation, stats.mean, stats.healthy_pct, stats.count
            )],
        })
    }
}

/// Record completeness: how much of the expected record is filled in
pub struct CompletenessLayer;

#[async_trait]
impl VerificationLayer for CompletenessLayer {
    fn name(&self) -> &'static str {
        "record_completeness"
    }

    fn weight(&self) -> f64 {
        verification_weights::COMPLETENESS
    }

    async fn evaluate(&self, record: &LandRecord) -> Result<VerificationLayerResult> {
        let checks: [(&str, bool); 7] = [
            ("boundary coordinates", record.coordinates.len() >= 3),
            ("declared area", record.declared_area_ha > 0.0),
            ("crop assignment", record.crop.is_some()),
            ("supporting documents", !record.document_refs.is_empty()),
            ("survey number", record.survey_number.is_some()),
            ("owner name", record.owner_name.is_some()),
            ("vegetation snapshot", record.vegetation.is_some()),
        ];

        let present = checks.iter().filter(|(_, ok)| *ok).count();
        let missing: Vec<&str> = checks
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(name, _)| *name)
            .collect();

        let mut insights = vec![format!("{present} of {} record fields present", checks.len())];
        if !missing.is_empty() {
            insights.push(format!("missing: {}", missing.join(", ")));
        }

        Ok(VerificationLayerResult {
            layer_name: self.name().to_string(),
            score: present as f64 / checks.len() as f64 * 100.0,
            confidence: calibration::DETERMINISTIC_LAYER_CONFIDENCE,
            insights,
        })
    }
}

/// The default five-layer ensemble, weights summing to 1.0
pub fn default_layers() -> Vec<std::sync::Arc<dyn VerificationLayer>> {
    vec![
        std::sync::Arc::new(CoordinateLayer),
        std::sync::Arc::new(BoundaryLayer),
        std::sync::Arc::new(DocumentLayer),
        std::sync::Arc::new(VegetationLayer),
        std::sync::Arc::new(CompletenessLayer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HealthInterpretation, VegetationStatistics};

    fn square_ring() -> Vec<(f64, f64)> {
        vec![
            (77.200, 21.100),
            (77.201, 21.100),
            (77.201, 21.101),
            (77.200, 21.101),
        ]
    }

    fn complete_record() -> LandRecord {
        LandRecord {
            record_id: "rec-1".to_string(),
            coordinates: square_ring(),
            declared_area_ha: 1.15,
            crop: Some(crate::types::CropType::Wheat),
            document_refs: vec!["deed-001".to_string(), "tax-2024".to_string()],
            survey_number: Some("SN-42/3".to_string()),
            owner_name: Some("A. Farmer".to_string()),
            vegetation: Some(VegetationStatistics {
                count: 400,
                mean: 0.62,
                median: 0.64,
                min: 0.1,
                max: 0.85,
                std_dev: 0.12,
                healthy_pct: 55.0,
                moderate_pct: 35.0,
                stressed_pct: 10.0,
                bare_pct: 0.0,
                interpretation: HealthInterpretation::Excellent,
            }),
        }
    }

    #[tokio::test]
    async fn coordinate_layer_accepts_plausible_ring() {
        let result = CoordinateLayer.evaluate(&complete_record()).await.unwrap();
        assert_eq!(result.score, 100.0);
    }

    #[tokio::test]
    async fn coordinate_layer_flags_null_island() {
        let mut record = complete_record();
        record.coordinates = vec![(0.1, 0.1), (0.2, 0.1), (0.2, 0.2)];
        let result = CoordinateLayer.evaluate(&record).await.unwrap();
        assert_eq!(result.score, 20.0);
        assert!(result.insights[0].contains("placeholder"));
    }

    #[tokio::test]
    async fn coordinate_layer_scores_invalid_ring_zero() {
        let mut record = complete_record();
        record.coordinates = vec![(77.2, 21.1)];
        let result = CoordinateLayer.evaluate(&record).await.unwrap();
        assert_eq!(result.score, 0.0);
    }

    #[tokio::test]
    async fn boundary_layer_matches_declared_area() {
        let result = BoundaryLayer.evaluate(&complete_record()).await.unwrap();
        assert_eq!(result.score, 100.0, "{:?}", result.insights);
    }

    #[tokio::test]
    async fn boundary_layer_penalizes_inflated_area() {
        let mut record = complete_record();
        record.declared_area_ha = 10.0; // boundary encloses ~1.15 ha
        let result = BoundaryLayer.evaluate(&record).await.unwrap();
        assert_eq!(result.score, 25.0);
    }

    #[tokio::test]
    async fn document_layer_full_paperwork() {
        let result = DocumentLayer.evaluate(&complete_record()).await.unwrap();
        assert_eq!(result.score, 100.0);
    }

    #[tokio::test]
    async fn document_layer_bare_record() {
        let mut record = complete_record();
        record.document_refs.clear();
        record.survey_number = None;
        record.owner_name = None;
        let result = DocumentLayer.evaluate(&record).await.unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.insights.len() >= 3);
    }

    #[tokio::test]
    async fn vegetation_layer_requires_a_snapshot() {
        let mut record = complete_record();
        record.vegetation = None;
        let err = VegetationLayer.evaluate(&record).await.unwrap_err();
        assert!(matches!(err, MonitorError::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn completeness_layer_counts_missing_fields() {
        let result = CompletenessLayer
            .evaluate(&complete_record())
            .await
            .unwrap();
        assert_eq!(result.score, 100.0);

        let mut record = complete_record();
        record.vegetation = None;
        record.owner_name = None;
        let result = CompletenessLayer.evaluate(&record).await.unwrap();
        assert!((result.score - 5.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn default_layer_weights_sum_to_one() {
        let total: f64 = default_layers().iter().map(|l| l.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
