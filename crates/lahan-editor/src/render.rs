//! Renderable projection of the session and catalog for the map surface.

use lahan_core::models::{EditingMode, Point, PolygonStatus, Ring};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::session::DrawingSession;

/// Everything the map surface needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSet {
    pub mode: EditingMode,
    /// Vertex markers of the boundary in progress
    pub vertices: Vec<Point>,
    /// Open polyline while the boundary is still being drawn
    pub pending_line: Option<Vec<Point>>,
    /// Filled ring once the boundary is complete
    pub closed_ring: Option<Vec<Point>>,
    pub warehouse_markers: Vec<Point>,
    pub parcel_rings: Vec<Ring>,
    pub status: PolygonStatus,
    pub staged_warehouse: Option<Point>,
    pub area_hectares: f64,
    /// The pending line is invalid and should be drawn as a warning
    pub crossing: bool,
}

impl RenderSet {
    pub fn build(session: &DrawingSession, catalog: &Catalog) -> Self {
        let status = session.status(catalog);
        let vertices = session.vertices().to_vec();

        let (pending_line, closed_ring) = match status {
            PolygonStatus::Complete => {
                (None, session.closed_ring(catalog).map(|ring| ring.points().to_vec()))
            }
            _ if vertices.len() >= 2 => (Some(vertices.clone()), None),
            _ => (None, None),
        };

        let mut warehouse_markers: Vec<Point> =
            catalog.warehouses_sorted().into_iter().map(|w| w.location).collect();
        if session.mode() == EditingMode::PlaceWarehouse {
            warehouse_markers.extend(session.pending_warehouse());
        }

        Self {
            mode: session.mode(),
            pending_line,
            closed_ring,
            warehouse_markers,
            parcel_rings: catalog.parcels_sorted().into_iter().map(|p| p.ring.clone()).collect(),
            status,
            staged_warehouse: session.pending_warehouse(),
            area_hectares: session.area_hectares(),
            crossing: status == PolygonStatus::Invalid,
            vertices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ClickEvent;
    use lahan_core::models::{Record, Warehouse, WarehouseId};

    #[test]
    fn test_render_while_drawing() {
        let catalog = Catalog::new();
        let mut session = DrawingSession::default();
        session.handle_click(ClickEvent::at(Point::new(0.0, 0.0)), &catalog);

        let frame = RenderSet::build(&session, &catalog);
        assert_eq!(frame.vertices.len(), 1);
        assert!(frame.pending_line.is_none());

        session.handle_click(ClickEvent::at(Point::new(0.0, 1.0)), &catalog);
        let frame = RenderSet::build(&session, &catalog);
        assert_eq!(frame.pending_line.as_ref().map(Vec::len), Some(2));
        assert!(frame.closed_ring.is_none());
        assert_eq!(frame.status, PolygonStatus::Drawing);
    }

    #[test]
    fn test_render_complete_and_markers() {
        let mut catalog = Catalog::new();
        catalog.add(Record::Warehouse(Warehouse {
            id: WarehouseId("w1".to_string()),
            name: "Gudang".to_string(),
            location: Point::new(-5.35, 105.5),
        }));

        let mut session = DrawingSession::default();
        for (lat, lng) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)] {
            session.handle_click(ClickEvent::at(Point::new(lat, lng)), &catalog);
        }
        session.set_mode(EditingMode::PlaceWarehouse);
        session.handle_click(ClickEvent::at(Point::new(-5.4, 105.6)), &catalog);

        let frame = RenderSet::build(&session, &catalog);
        assert_eq!(frame.status, PolygonStatus::Complete);
        assert!(frame.pending_line.is_none());
        assert_eq!(frame.closed_ring.as_ref().map(Vec::len), Some(4));
        assert_eq!(frame.warehouse_markers.len(), 2);
        assert!(frame.area_hectares > 0.0);
        assert!(!frame.crossing);
    }

    #[test]
    fn test_render_flags_crossing() {
        let catalog = Catalog::new();
        let mut session = DrawingSession::default();
        for (lat, lng) in [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)] {
            session.handle_click(ClickEvent::at(Point::new(lat, lng)), &catalog);
        }

        let frame = RenderSet::build(&session, &catalog);
        assert!(frame.crossing);
        assert!(frame.pending_line.is_some());
    }
}
