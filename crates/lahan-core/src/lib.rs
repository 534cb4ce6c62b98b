//! Lahan Core - Domain models, ports, and configuration
//!
//! This crate contains the domain types shared by every lahan crate: points,
//! rings, persisted parcel and warehouse records, editing modes, the error
//! taxonomy, layered configuration, and the ports through which the editor
//! talks to its UI collaborators.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{LahanError, Result};
