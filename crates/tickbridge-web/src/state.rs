use std::sync::Arc;

use tickbridge_core::MarketDataSource;

/// Application state shared across handlers.
///
/// Holds the upstream source as an injected trait object so tests can
/// substitute a stub without touching process-wide state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketDataSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }
}
