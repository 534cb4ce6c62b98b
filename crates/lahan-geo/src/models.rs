//! Conversions between lahan coordinate types and the `geo` crate.
//!
//! `geo` works in `x = longitude, y = latitude`; every conversion goes
//! through here so the axis order is decided once.

use geo::{Coord, LineString, Polygon};
use lahan_core::models::{Point, Ring};

pub fn to_coord(point: &Point) -> Coord<f64> {
    Coord { x: point.lng, y: point.lat }
}

pub fn from_coord(coord: Coord<f64>) -> Point {
    Point::new(coord.y, coord.x)
}

pub fn to_geo_point(point: &Point) -> geo::Point<f64> {
    geo::Point::from(to_coord(point))
}

/// Open polyline through the points, no implicit closing edge
pub fn to_line_string(points: &[Point]) -> LineString<f64> {
    LineString::new(points.iter().map(to_coord).collect())
}

/// Polygon with the points as exterior; `geo` closes the exterior itself
pub fn to_polygon(points: &[Point]) -> Polygon<f64> {
    Polygon::new(to_line_string(points), vec![])
}

/// Extension trait for Ring with geo-crate operations
pub trait RingExt {
    /// Convert to an open geo::LineString
    fn to_line_string(&self) -> LineString<f64>;

    /// Centroid of the enclosed area
    fn centroid(&self) -> Option<Point>;
}

impl RingExt for Ring {
    fn to_line_string(&self) -> LineString<f64> {
        to_line_string(self.points())
    }

    fn centroid(&self) -> Option<Point> {
        use geo::algorithm::centroid::Centroid;
        to_polygon(self.points()).centroid().map(|p| from_coord(p.0))
    }
}
