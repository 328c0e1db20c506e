//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::OperatorCatalog;

/// Shared application state.
///
/// Only read-only data lives here; each request builds its own session.
#[derive(Clone)]
pub struct AppState {
    /// Operators and their compensation schedules
    pub catalog: Arc<OperatorCatalog>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: OperatorCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
