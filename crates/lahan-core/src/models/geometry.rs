//! Canonical coordinate types used across all lahan crates.
//!
//! Inside the editor every coordinate is a `(latitude, longitude)` pair in
//! decimal degrees. The store speaks `[longitude, latitude]`; the helpers
//! `from_lng_lat`/`to_lng_lat` are the only place that order is swapped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a store-ordered `[lng, lat]` pair
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Self { lat: pair[1], lng: pair[0] }
    }

    /// Store-ordered `[lng, lat]` pair
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// An ordered sequence of points describing a boundary.
///
/// A ring is closed when its first and last points are identical.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Point>);

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// First point repeated as last
    pub fn is_closed(&self) -> bool {
        self.0.len() >= 2 && self.0.first() == self.0.last()
    }

    /// Close the ring by repeating its first point, if it is not closed already
    pub fn closed(mut self) -> Self {
        if !self.is_closed() {
            if let Some(first) = self.0.first().copied() {
                self.0.push(first);
            }
        }
        self
    }

    /// Number of distinct points, ignoring the closing repeat
    pub fn distinct_count(&self) -> usize {
        let mut seen: Vec<Point> = Vec::with_capacity(self.0.len());
        for point in &self.0 {
            if !seen.contains(point) {
                seen.push(*point);
            }
        }
        seen.len()
    }

    /// Store-ordered `[lng, lat]` pairs
    pub fn to_lng_lat(&self) -> Vec<[f64; 2]> {
        self.0.iter().map(Point::to_lng_lat).collect()
    }

    /// Build from store-ordered `[lng, lat]` pairs
    pub fn from_lng_lat(pairs: &[[f64; 2]]) -> Self {
        Self(pairs.iter().copied().map(Point::from_lng_lat).collect())
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}
