//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the loaded configuration and the chain connector used to open a
//! per-request connection to the selected network. Per-view dashboard state
//! (`AssetBoard`) is built per request and never shared.

use std::sync::Arc;

use crate::chain::ChainConnector;
use crate::config::DashboardConfig;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub chains: Arc<dyn ChainConnector>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<DashboardConfig>, chains: Arc<dyn ChainConnector>) -> Self {
        Self { config, chains }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
