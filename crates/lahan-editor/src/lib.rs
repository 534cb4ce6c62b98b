//! Lahan Editor - Interactive parcel capture
//!
//! This crate implements the drawing session state machine, the local catalog
//! of persisted records, and the coordinator that saves and deletes them
//! against the store.

pub mod catalog;
pub mod coordinator;
pub mod render;
pub mod session;

pub use catalog::Catalog;
pub use coordinator::{
    DeleteRequest, DeleteResponse, PersistenceCoordinator, SaveRequest, SaveResponse,
};
pub use render::RenderSet;
pub use session::{ClickEvent, ClickOutcome, DrawingSession};
