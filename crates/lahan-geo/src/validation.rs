use lahan_core::error::{LahanError, Result};
use lahan_core::models::{Point, Ring, MIN_POLYGON_POINTS};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// Convert into a `LahanError::InvalidGeometry` carrying the first reason
    pub fn into_result(self) -> Result<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(LahanError::InvalidGeometry {
                reason: format!("{}: {}", first.location, first.reason),
            }),
        }
    }
}

/// Validate a single location
pub fn validate_point(point: &Point) -> ValidationResult {
    let mut result = ValidationResult::valid();
    if !point.is_finite() {
        result.add_error(format!("Point{}", point), "Coordinates must be finite".to_string());
    }
    result
}

/// Validate a ring destined for, or loaded from, the store.
///
/// A persisted parcel ring must have finite coordinates, be closed, and hold
/// at least 3 distinct points.
pub fn validate_parcel_ring(ring: &Ring) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, point) in ring.points().iter().enumerate() {
        if !point.is_finite() {
            result.add_error(format!("Ring[{}]", i), "Coordinates must be finite".to_string());
        }
    }

    if !ring.is_closed() {
        result.add_error(
            "Ring".to_string(),
            "Ring must be closed (first point == last point)".to_string(),
        );
    }

    let distinct = ring.distinct_count();
    if distinct < MIN_POLYGON_POINTS {
        result.add_error(
            "Ring".to_string(),
            format!(
                "Ring must have at least {} distinct points, found {}",
                MIN_POLYGON_POINTS, distinct
            ),
        );
    }

    result
}
