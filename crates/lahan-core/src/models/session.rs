//! Editing modes, polygon status, and session tuning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LahanError;

/// Minimum number of vertices before a boundary can close
pub const MIN_POLYGON_POINTS: usize = 3;

/// Proximity tolerance in degrees.
///
/// 0.001° is about 111 m north-south everywhere and about 110.7 m east-west
/// at 5.35° S.
pub const DEFAULT_PROXIMITY_TOLERANCE: f64 = 0.001;

/// What a pointer click means right now. Operator intent, not geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EditingMode {
    #[default]
    DrawParcel,
    PlaceWarehouse,
    DeletePoint,
}

impl fmt::Display for EditingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditingMode::DrawParcel => f.write_str("draw parcel"),
            EditingMode::PlaceWarehouse => f.write_str("place warehouse"),
            EditingMode::DeletePoint => f.write_str("delete point"),
        }
    }
}

impl FromStr for EditingMode {
    type Err = LahanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parcel" | "draw" | "lahan" => Ok(EditingMode::DrawParcel),
            "warehouse" | "gudang" => Ok(EditingMode::PlaceWarehouse),
            "delete" | "hapus" => Ok(EditingMode::DeletePoint),
            _ => Err(LahanError::validation(format!(
                "Unknown mode: {}. Use parcel, warehouse, or delete",
                s
            ))),
        }
    }
}

/// Geometric state of the vertex sequence. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolygonStatus {
    #[default]
    Drawing,
    Complete,
    Invalid,
}

impl fmt::Display for PolygonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonStatus::Drawing => f.write_str("drawing"),
            PolygonStatus::Complete => f.write_str("complete"),
            PolygonStatus::Invalid => f.write_str("invalid"),
        }
    }
}

/// Tuning shared by the drawing session and the geometry kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Proximity tolerance in degrees
    pub tolerance: f64,
    /// Check the boundary against rings already in the catalog
    pub cross_check: bool,
    pub min_points: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PROXIMITY_TOLERANCE,
            cross_check: true,
            min_points: MIN_POLYGON_POINTS,
        }
    }
}

impl SessionSettings {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_cross_check(mut self, cross_check: bool) -> Self {
        self.cross_check = cross_check;
        self
    }
}
