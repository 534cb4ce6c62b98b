use lahan_store::ports::ParcelStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ParcelStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ParcelStore>) -> Self {
        Self { store }
    }
}
