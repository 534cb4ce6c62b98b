mod gudang;
mod health;
mod lahan;

pub use gudang::{create_gudang, delete_gudang, list_gudang};
pub use health::health_check;
pub use lahan::{create_lahan, delete_lahan, list_lahan};
