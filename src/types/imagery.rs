//! Imagery types: bounding regions, scene classification, and index maps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

/// Metres per degree of latitude (mean earth radius × π/180)
const M_PER_DEG_LAT: f64 = 111_194.9;

/// Geographic bounding box in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Derive the bounding box of a polygon ring of `(lon, lat)` vertices.
    ///
    /// Rejects rings with fewer than 3 vertices or out-of-range coordinates.
    pub fn from_ring(ring: &[(f64, f64)]) -> Result<Self> {
        if ring.len() < 3 {
            return Err(MonitorError::InvalidGeometry(format!(
                "polygon ring needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        for &(lon, lat) in ring {
            if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                return Err(MonitorError::InvalidGeometry(format!(
                    "coordinate ({lon}, {lat}) outside WGS84 range"
                )));
            }
        }
        let min_lon = ring.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_lon = ring.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_lat = ring.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_lat = ring.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Center point `(lon, lat)` of the box, used for weather lookups.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

/// Planar shoelace area of a polygon ring of `(lon, lat)` vertices, in
/// hectares.
///
/// Degrees are projected to metres with a cosine-latitude correction at the
/// ring centroid. Adequate at field scale (tens to hundreds of hectares);
/// not suitable for regions spanning degrees of latitude.
pub fn ring_area_hectares(ring: &[(f64, f64)]) -> Result<f64> {
    let bbox = BoundingBox::from_ring(ring)?;
    let (_, center_lat) = bbox.center();
    let m_per_deg_lon = M_PER_DEG_LAT * center_lat.to_radians().cos();

    let mut sum = 0.0;
    for i in 0..ring.len() {
        let (x1, y1) = ring[i];
        let (x2, y2) = ring[(i + 1) % ring.len()];
        sum += (x1 * m_per_deg_lon) * (y2 * M_PER_DEG_LAT)
            - (x2 * m_per_deg_lon) * (y1 * M_PER_DEG_LAT);
    }
    let area_m2 = sum.abs() / 2.0;
    if area_m2 <= 0.0 {
        return Err(MonitorError::InvalidGeometry(
            "polygon ring has zero area".to_string(),
        ));
    }
    Ok(area_m2 / 10_000.0)
}

/// Per-pixel scene classification from the imagery provider.
///
/// Anything other than `Clear` is excluded from index statistics - masked
/// pixels carry no vegetation signal and zeroing them would drag every
/// aggregate toward bare ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneClass {
    Clear,
    Cloud,
    Water,
    Snow,
    NoData,
}

impl SceneClass {
    pub fn is_valid(self) -> bool {
        self == SceneClass::Clear
    }
}

/// Raw reflectance bands for one scene, as returned by the imagery provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneBands {
    pub width: usize,
    pub height: usize,
    /// Red band reflectance, row-major, length `width * height`
    pub red: Vec<f64>,
    /// Near-infrared band reflectance, row-major, length `width * height`
    pub nir: Vec<f64>,
    /// Optional scene-classification mask, same layout as the bands
    pub scene_class: Option<Vec<SceneClass>>,
    pub bbox: BoundingBox,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
}

/// Per-pixel vegetation-index values over a bounding region and date range.
///
/// Invalid pixels (cloud/water/snow masked) are recorded as invalid, never
/// zeroed, and are skipped by every downstream consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMap {
    width: usize,
    height: usize,
    /// Row-major index values; only meaningful where `valid` is true
    values: Vec<f64>,
    valid: Vec<bool>,
    pub bbox: BoundingBox,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
}

impl IndexMap {
    /// Assemble an index map from computed values and a validity mask.
    ///
    /// Fails with `InvalidGeometry` on dimension mismatch and with
    /// `InsufficientData` when no valid pixel remains (fully clouded scene).
    pub fn new(
        width: usize,
        height: usize,
        values: Vec<f64>,
        valid: Vec<bool>,
        bbox: BoundingBox,
        from_date: DateTime<Utc>,
        to_date: DateTime<Utc>,
    ) -> Result<Self> {
        let expected = width * height;
        if expected == 0 {
            return Err(MonitorError::InvalidGeometry(
                "zero-sized raster".to_string(),
            ));
        }
        if values.len() != expected || valid.len() != expected {
            return Err(MonitorError::InvalidGeometry(format!(
                "raster is {width}x{height} but got {} values / {} flags",
                values.len(),
                valid.len()
            )));
        }
        let valid_count = valid.iter().filter(|v| **v).count();
        if valid_count == 0 {
            return Err(MonitorError::InsufficientData {
                valid: 0,
                total: expected,
            });
        }
        Ok(Self {
            width,
            height,
            values,
            valid,
            bbox,
            from_date,
            to_date,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count including masked pixels
    pub fn total_pixels(&self) -> usize {
        self.values.len()
    }

    /// Count of valid (unmasked) pixels
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|v| **v).count()
    }

    /// Fraction of the raster that carries usable signal
    pub fn coverage_fraction(&self) -> f64 {
        self.valid_count() as f64 / self.total_pixels() as f64
    }

    /// Iterate over valid index values only
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .zip(self.valid.iter())
            .filter(|(_, ok)| **ok)
            .map(|(v, _)| *v)
    }

    /// Value at `(row, col)`, `None` when masked or out of bounds
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let i = row * self.width + col;
        self.valid[i].then(|| self.values[i])
    }

    /// Pairwise iteration over pixels valid in BOTH maps.
    ///
    /// Used by the temporal change detector; dimension agreement is the
    /// caller's contract and checked there.
    pub fn co_valid_pairs<'a>(
        &'a self,
        other: &'a IndexMap,
    ) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.values
            .iter()
            .zip(self.valid.iter())
            .zip(other.values.iter().zip(other.valid.iter()))
            .filter(|((_, a_ok), (_, b_ok))| **a_ok && **b_ok)
            .map(|((a, _), (b, _))| (*a, *b))
    }
}
