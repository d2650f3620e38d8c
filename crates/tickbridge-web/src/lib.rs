//! HTTP layer for tickbridge.
//!
//! Thin axum handlers over `tickbridge-core`: route surface, error-to-status
//! mapping, and response shaping. The upstream source is injected through
//! [`state::AppState`], never reached for as a global.

pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with middleware attached.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/company-info/:symbol", get(handlers::company_info))
        .route("/api/stock-data/:symbol", get(handlers::stock_data))
        .route("/api/historical-data", post(handlers::historical_data))
        .route(
            "/api/analytical-insights",
            post(handlers::analytical_insights),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
