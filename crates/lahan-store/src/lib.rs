//! Lahan Store - Storage port and adapters
//!
//! This crate defines the parcel/warehouse store port and provides an
//! in-memory adapter and an HTTP+JSON adapter for the remote store.

pub mod http;
pub mod memory;
pub mod ports;
pub mod wire;

pub use http::HttpParcelStore;
pub use memory::MemoryParcelStore;
pub use ports::ParcelStore;
