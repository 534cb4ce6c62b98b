use crate::models::to_polygon;
use geo::algorithm::geodesic_area::GeodesicArea;
use lahan_core::models::{Point, MIN_POLYGON_POINTS};

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Geodesic area of the polygon enclosed by `points`, in hectares.
///
/// The ring is closed on its first point if it is not closed already.
/// Fewer than 3 points, or any non-finite coordinate, yields 0.
/// Uses Karney's algorithm on the WGS84 ellipsoid.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < MIN_POLYGON_POINTS || !points.iter().all(Point::is_finite) {
        return 0.0;
    }

    to_polygon(points).geodesic_area_unsigned() / SQUARE_METERS_PER_HECTARE
}

#[cfg(test)]
mod tests {
    use super::*;
    use lahan_core::models::Ring;
    use proptest::prelude::*;

    /// Authalic sphere radius in meters
    const AUTHALIC_RADIUS: f64 = 6_371_007.181;

    /// Area of a lat/lng-aligned cell on the authalic sphere, in hectares:
    /// R² · Δλ · |sin φ₂ − sin φ₁|
    fn spherical_cell_hectares(lat1: f64, lat2: f64, lng1: f64, lng2: f64) -> f64 {
        let d_lambda = (lng2 - lng1).abs().to_radians();
        let d_sin = (lat2.to_radians().sin() - lat1.to_radians().sin()).abs();
        AUTHALIC_RADIUS * AUTHALIC_RADIUS * d_lambda * d_sin / SQUARE_METERS_PER_HECTARE
    }

    fn assert_within_one_percent(actual: f64, reference: f64) {
        let error = (actual - reference).abs() / reference;
        assert!(error < 0.01, "area {} ha is {:.3}% away from reference {} ha", actual, error * 100.0, reference);
    }

    fn cell(lat1: f64, lat2: f64, lng1: f64, lng2: f64) -> Vec<Point> {
        vec![
            Point::new(lat1, lng1),
            Point::new(lat1, lng2),
            Point::new(lat2, lng2),
            Point::new(lat2, lng1),
        ]
    }

    #[test]
    fn test_unit_square_matches_spherical_reference() {
        // Ellipsoidal area of the 1° cell at the equator is ~1,230,900 ha;
        // the authalic sphere gives ~1,236,370 ha (0.44% apart).
        let area = polygon_area(&cell(0.0, 1.0, 0.0, 1.0));
        assert_within_one_percent(area, spherical_cell_hectares(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_small_parcel_at_operating_latitude() {
        let area = polygon_area(&cell(-5.36, -5.35, 105.50, 105.51));
        // Roughly 122 ha
        assert!(area > 100.0 && area < 140.0);
        assert_within_one_percent(area, spherical_cell_hectares(-5.36, -5.35, 105.50, 105.51));
    }

    #[test]
    fn test_closing_point_does_not_change_area() {
        let open = cell(-5.36, -5.35, 105.50, 105.51);
        let closed = Ring::new(open.clone()).closed();
        let diff = (polygon_area(&open) - polygon_area(closed.points())).abs();
        assert!(diff < 1e-9);
    }

    #[test]
    fn test_too_few_points_have_no_area() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_non_finite_points_have_no_area() {
        let mut points = cell(0.0, 1.0, 0.0, 1.0);
        points[2] = Point::new(f64::INFINITY, 1.0);
        assert_eq!(polygon_area(&points), 0.0);
    }

    proptest! {
        #[test]
        fn prop_area_ignores_winding(
            lat in -60.0f64..60.0,
            lng in -170.0f64..170.0,
            size in 0.001f64..0.1,
        ) {
            let points = cell(lat, lat + size, lng, lng + size);
            let mut reversed = points.clone();
            reversed.reverse();

            let forward = polygon_area(&points);
            prop_assert!(forward > 0.0);
            prop_assert!((forward - polygon_area(&reversed)).abs() <= forward * 1e-9);
        }
    }
}
