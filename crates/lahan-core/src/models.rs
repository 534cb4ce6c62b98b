pub mod geometry;
pub mod record;
pub mod session;

pub use geometry::{Point, Ring};
pub use record::{
    NewParcel, NewRecord, NewWarehouse, Parcel, ParcelId, Record, RecordKind, Warehouse,
    WarehouseId,
};
pub use session::{
    EditingMode, PolygonStatus, SessionSettings, DEFAULT_PROXIMITY_TOLERANCE, MIN_POLYGON_POINTS,
};
