use crate::models::{to_coord, to_geo_point, to_line_string, RingExt};
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Distance, Euclidean, Intersects, Line};
use lahan_core::models::{Point, Ring};

/// Intersections this close (in degrees, per axis) to a vertex are ignored
pub const VERTEX_EPSILON: f64 = 1e-4;

/// True iff the degree-space distance between `a` and `b` is strictly below `tolerance`
pub fn are_points_close(a: &Point, b: &Point, tolerance: f64) -> bool {
    Euclidean.distance(to_geo_point(a), to_geo_point(b)) < tolerance
}

/// Check whether an open polyline crosses itself.
///
/// There is no implicit closing edge. Hits within [`VERTEX_EPSILON`] of any of
/// the polyline's own vertices do not count, so adjacent edges and a ring
/// closed on its first point are never reported. Overlapping collinear edges
/// do count. Fewer than 4 points can never self-intersect.
pub fn self_intersects(points: &[Point]) -> bool {
    if points.len() < 4 {
        return false;
    }

    let segments: Vec<Line<f64>> =
        points.windows(2).map(|w| Line::new(to_coord(&w[0]), to_coord(&w[1]))).collect();

    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            match line_intersection(*a, *b) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    if !near_any_vertex(intersection, points) {
                        return true;
                    }
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    let delta = intersection.delta();
                    let overlap = delta.x.hypot(delta.y);
                    if overlap > VERTEX_EPSILON || !near_any_vertex(intersection.start, points) {
                        return true;
                    }
                }
                None => {}
            }
        }
    }

    false
}

/// Check whether an open polyline touches or crosses any of the existing rings
pub fn intersects_any<'a, I>(points: &[Point], existing: I) -> bool
where
    I: IntoIterator<Item = &'a Ring>,
{
    if points.len() < 2 {
        return false;
    }

    let polyline = to_line_string(points);
    existing.into_iter().any(|ring| ring.to_line_string().intersects(&polyline))
}

fn near_any_vertex(coord: Coord<f64>, points: &[Point]) -> bool {
    points.iter().any(|p| {
        (coord.x - p.lng).abs() < VERTEX_EPSILON && (coord.y - p.lat).abs() < VERTEX_EPSILON
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(lat, lng)| Point::new(lat, lng)).collect()
    }

    fn closed_square() -> Ring {
        Ring::new(pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]))
    }

    #[test]
    fn test_points_close_is_strict() {
        let a = Point::new(0.0, 0.0);
        assert!(are_points_close(&a, &Point::new(0.0005, 0.0005), 0.001));
        assert!(!are_points_close(&a, &Point::new(0.0, 0.001), 0.001));
        assert!(!are_points_close(&a, &Point::new(0.002, 0.0), 0.001));
    }

    #[test]
    fn test_nan_is_never_close() {
        let a = Point::new(0.0, 0.0);
        assert!(!are_points_close(&a, &Point::new(f64::NAN, 0.0), 0.001));
    }

    #[test]
    fn test_bowtie_self_intersects() {
        let bowtie = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(self_intersects(&bowtie));

        let mut closed = bowtie.clone();
        closed.push(bowtie[0]);
        assert!(self_intersects(&closed));
    }

    #[test]
    fn test_closed_square_does_not_self_intersect() {
        assert!(!self_intersects(closed_square().points()));
    }

    #[test]
    fn test_short_polylines_never_self_intersect() {
        assert!(!self_intersects(&[]));
        assert!(!self_intersects(&pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)])));
    }

    #[test]
    fn test_backtracking_edge_self_intersects() {
        // Second edge folds back over the first
        let spike = pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 0.5), (1.0, 0.5)]);
        assert!(self_intersects(&spike));
    }

    #[test]
    fn test_shared_edge_intersects_existing() {
        let existing = vec![closed_square()];
        // Runs along the square's east edge, then away from it
        let ring = pts(&[(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]);
        assert!(!self_intersects(&ring));
        assert!(intersects_any(&ring, &existing));
    }

    #[test]
    fn test_crossing_existing_ring() {
        let existing = vec![closed_square()];
        let ring = pts(&[(0.5, 0.5), (0.5, 1.5), (1.5, 1.5)]);
        assert!(intersects_any(&ring, &existing));
    }

    #[test]
    fn test_disjoint_rings_do_not_intersect() {
        let existing = vec![closed_square()];
        let ring = pts(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (6.0, 5.0), (5.0, 5.0)]);
        assert!(!intersects_any(&ring, &existing));
        assert!(!intersects_any(&ring, &[]));
    }

    #[test]
    fn test_single_point_never_intersects() {
        let existing = vec![closed_square()];
        assert!(!intersects_any(&pts(&[(0.0, 0.0)]), &existing));
    }

    proptest! {
        #[test]
        fn prop_fewer_than_four_points_never_self_intersect(
            coords in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 0..4)
        ) {
            prop_assert!(!self_intersects(&pts(&coords)));
        }

        #[test]
        fn prop_closeness_is_symmetric(
            a in (-10.0f64..10.0, -10.0f64..10.0),
            b in (-10.0f64..10.0, -10.0f64..10.0),
            tolerance in 0.0001f64..1.0,
        ) {
            let (pa, pb) = (Point::new(a.0, a.1), Point::new(b.0, b.1));
            prop_assert_eq!(
                are_points_close(&pa, &pb, tolerance),
                are_points_close(&pb, &pa, tolerance)
            );
        }

        #[test]
        fn prop_point_is_close_to_itself(lat in -90.0f64..90.0, lng in -180.0f64..180.0) {
            let p = Point::new(lat, lng);
            prop_assert!(are_points_close(&p, &p, 0.001));
        }
    }
}
