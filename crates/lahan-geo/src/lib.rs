//! Lahan Geo - Geometry kernel
//!
//! Pure functions deciding whether a boundary is still being drawn, complete,
//! or geometrically invalid: proximity, self-intersection, ring-vs-ring
//! intersection, geodesic area, and validation of persisted rings.

pub mod area;
pub mod models;
pub mod spatial;
pub mod validation;

pub use area::polygon_area;
pub use spatial::{are_points_close, intersects_any, self_intersects};
