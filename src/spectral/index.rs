//! Spectral index calculation
//!
//! Converts raw per-pixel red and near-infrared reflectance into a
//! vegetation-health index map: `index = (NIR - RED) / (NIR + RED)`.
//! Pixels flagged by the scene-classification mask (cloud/water/snow/nodata)
//! are excluded from the map, not zeroed.

use tracing::debug;

use crate::error::{MonitorError, Result};
use crate::types::{IndexMap, SceneBands};

/// Compute the vegetation index map for one scene.
///
/// # Definition
///
/// For each unmasked pixel: `index = (NIR - RED) / (NIR + RED)`, clamped to
/// `[-1, 1]`. A pixel where `NIR + RED == 0` (both bands dark, typically
/// sensor dropout) gets index `0.0` - never NaN, which would poison every
/// downstream aggregate.
///
/// # Errors
///
/// - `InvalidGeometry` when band lengths disagree with the raster dimensions
/// - `InsufficientData` when masking leaves zero valid pixels (fully
///   cloud-covered scene)
pub fn compute_index(bands: &SceneBands) -> Result<IndexMap> {
    let expected = bands.width * bands.height;
    if expected == 0 {
        return Err(MonitorError::InvalidGeometry(
            "zero-sized raster".to_string(),
        ));
    }
    if bands.red.len() != expected || bands.nir.len() != expected {
        return Err(MonitorError::InvalidGeometry(format!(
            "raster is {}x{} but red has {} and nir has {} pixels",
            bands.width,
            bands.height,
            bands.red.len(),
            bands.nir.len()
        )));
    }
    if let Some(mask) = &bands.scene_class {
        if mask.len() != expected {
            return Err(MonitorError::InvalidGeometry(format!(
                "scene-class mask has {} entries for {} pixels",
                mask.len(),
                expected
            )));
        }
    }

    let mut values = Vec::with_capacity(expected);
    let mut valid = Vec::with_capacity(expected);

    for i in 0..expected {
        let masked = bands
            .scene_class
            .as_ref()
            .is_some_and(|m| !m[i].is_valid());
        if masked {
            values.push(0.0);
            valid.push(false);
            continue;
        }

        let red = bands.red[i];
        let nir = bands.nir[i];
        let sum = nir + red;
        let index = if sum == 0.0 {
            0.0
        } else {
            ((nir - red) / sum).clamp(-1.0, 1.0)
        };
        values.push(index);
        valid.push(true);
    }

    let map = IndexMap::new(
        bands.width,
        bands.height,
        values,
        valid,
        bands.bbox,
        bands.from_date,
        bands.to_date,
    )?;

    debug!(
        width = bands.width,
        height = bands.height,
        valid = map.valid_count(),
        coverage = %format!("{:.1}%", map.coverage_fraction() * 100.0),
        "index map computed"
    );

    Ok(map)
}
