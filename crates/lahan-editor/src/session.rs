//! Drawing session state machine.
//!
//! The session owns the in-progress vertex sequence, the staged warehouse
//! point, the active editing mode and the draft name. Polygon status is a
//! projection computed on demand from the vertices and the catalog.

use lahan_core::models::{EditingMode, Point, PolygonStatus, Ring, SessionSettings};
use lahan_geo::{are_points_close, intersects_any, polygon_area, self_intersects};

use crate::catalog::Catalog;

/// A pointer click reported by the map surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub point: Point,
    /// Set when the operator clicked a rendered vertex directly
    pub target_vertex: Option<usize>,
}

impl ClickEvent {
    pub fn at(point: Point) -> Self {
        Self { point, target_vertex: None }
    }

    pub fn on_vertex(point: Point, index: usize) -> Self {
        Self { point, target_vertex: Some(index) }
    }
}

/// What a click did to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// A new vertex was appended
    Appended,
    /// A copy of the first vertex was appended, closing the ring
    Closed,
    /// The boundary is complete; clicks are ignored until reset
    Ignored,
    /// The staged warehouse location was replaced
    WarehouseStaged,
    /// The vertex at `index` was removed
    Removed { index: usize },
    /// Nothing was close enough to delete
    NoOp,
    /// The click carried non-finite coordinates
    Rejected,
}

impl ClickOutcome {
    /// Whether the click changed session state
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            ClickOutcome::Appended
                | ClickOutcome::Closed
                | ClickOutcome::WarehouseStaged
                | ClickOutcome::Removed { .. }
        )
    }
}

/// Mutable in-progress drawing state for one boundary or one warehouse point
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    settings: SessionSettings,
    mode: EditingMode,
    vertices: Vec<Point>,
    pending_warehouse: Option<Point>,
    draft_name: String,
    /// Bumped on every mutation; lets an in-flight save detect later edits
    revision: u64,
}

impl DrawingSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn mode(&self) -> EditingMode {
        self.mode
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn pending_warehouse(&self) -> Option<Point> {
        self.pending_warehouse
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether there is nothing in progress
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.pending_warehouse.is_none()
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    /// Switch mode without discarding any accumulated geometry
    pub fn set_mode(&mut self, mode: EditingMode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "Editing mode changed");
            self.mode = mode;
        }
    }

    /// Apply a pointer click according to the active mode
    pub fn handle_click(&mut self, event: ClickEvent, catalog: &Catalog) -> ClickOutcome {
        if !event.point.is_finite() {
            tracing::warn!(point = %event.point, "Rejected click with non-finite coordinates");
            return ClickOutcome::Rejected;
        }

        let outcome = match self.mode {
            EditingMode::DrawParcel => self.draw_click(event, catalog),
            EditingMode::PlaceWarehouse => {
                self.pending_warehouse = Some(event.point);
                ClickOutcome::WarehouseStaged
            }
            EditingMode::DeletePoint => self.delete_click(event),
        };

        if outcome.mutated() {
            self.revision += 1;
        }

        tracing::debug!(
            mode = %self.mode,
            point = %event.point,
            outcome = ?outcome,
            vertices = self.vertices.len(),
            "Click handled"
        );
        outcome
    }

    fn draw_click(&mut self, event: ClickEvent, catalog: &Catalog) -> ClickOutcome {
        if self.status(catalog) == PolygonStatus::Complete {
            return ClickOutcome::Ignored;
        }

        let point = event
            .target_vertex
            .and_then(|index| self.vertices.get(index).copied())
            .unwrap_or(event.point);

        let closes = self.vertices.len() + 1 >= self.settings.min_points
            && self
                .vertices
                .first()
                .is_some_and(|first| are_points_close(first, &point, self.settings.tolerance));

        match self.vertices.first().copied() {
            Some(first) if closes => {
                self.vertices.push(first);
                ClickOutcome::Closed
            }
            _ => {
                self.vertices.push(point);
                ClickOutcome::Appended
            }
        }
    }

    fn delete_click(&mut self, event: ClickEvent) -> ClickOutcome {
        let index = match event.target_vertex {
            Some(index) if index < self.vertices.len() => Some(index),
            Some(_) => None,
            None => self
                .vertices
                .iter()
                .position(|v| are_points_close(v, &event.point, self.settings.tolerance)),
        };

        match index {
            Some(index) => {
                self.vertices.remove(index);
                ClickOutcome::Removed { index }
            }
            None => ClickOutcome::NoOp,
        }
    }

    /// Remove the vertex at `index` regardless of proximity
    pub fn remove_vertex(&mut self, index: usize) -> Option<Point> {
        if index >= self.vertices.len() {
            return None;
        }
        self.revision += 1;
        Some(self.vertices.remove(index))
    }

    /// Clear all progress and return to parcel drawing
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.pending_warehouse = None;
        self.draft_name.clear();
        self.mode = EditingMode::DrawParcel;
        self.revision += 1;
        tracing::debug!("Session reset");
    }

    /// Derived polygon status of the current vertex sequence
    pub fn status(&self, catalog: &Catalog) -> PolygonStatus {
        let vertices = &self.vertices;
        if vertices.len() < self.settings.min_points {
            return PolygonStatus::Drawing;
        }

        if self_intersects(vertices) {
            return PolygonStatus::Invalid;
        }

        if self.settings.cross_check && intersects_any(vertices, catalog.all_parcel_rings()) {
            return PolygonStatus::Invalid;
        }

        let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
            return PolygonStatus::Drawing;
        };

        if are_points_close(first, last, self.settings.tolerance) {
            // A,B,A closes but encloses nothing
            let distinct = Ring::new(vertices[..vertices.len() - 1].to_vec()).distinct_count();
            if distinct < self.settings.min_points {
                return PolygonStatus::Invalid;
            }
            return PolygonStatus::Complete;
        }

        PolygonStatus::Drawing
    }

    /// Closed ring ready for submission, when the status is `Complete`
    pub fn closed_ring(&self, catalog: &Catalog) -> Option<Ring> {
        if self.status(catalog) != PolygonStatus::Complete {
            return None;
        }

        // The last vertex may sit near the first without equalling it once
        // earlier vertices have been removed; snap it shut.
        let mut points = self.vertices.clone();
        if let (Some(first), Some(last)) = (points.first().copied(), points.last_mut()) {
            *last = first;
        }
        Some(Ring::new(points))
    }

    /// Geodesic area of the in-progress boundary in hectares
    pub fn area_hectares(&self) -> f64 {
        polygon_area(&self.vertices)
    }
}
