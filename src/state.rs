//! Shared application state for all routes.

use crate::store::ProductRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Opened by the process shell at startup and closed at shutdown.
    pub store: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductRepository>) -> Self {
        AppState { store }
    }
}
