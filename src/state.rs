//! Shared application state for all routes.

use crate::repo::StudentRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Persistence handle, injected so tests can swap in a double.
    pub repo: Arc<dyn StudentRepo>,
}

impl AppState {
    pub fn new(repo: Arc<dyn StudentRepo>) -> Self {
        Self { repo }
    }
}
