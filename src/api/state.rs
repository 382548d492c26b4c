//! Application state for the API server

use crate::{Config, RecoveryService};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clones) and provides
/// access to the recovery service and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The recovery service instance
    pub service: RecoveryService,

    /// Configuration (read access)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service: RecoveryService, config: Arc<Config>) -> Self {
        Self { service, config }
    }
}
