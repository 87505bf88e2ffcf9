//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/analyze-decision` - Decision analysis through the LLM
//! - `/api/report/pdf` - PDF export of an analysis
//! - `/api/report/html` - Report cards for an analysis
//! - `/api/health` - Health checks
//! - `/` - Decision form and report page

pub mod analyze;
pub mod health;
pub mod report;
pub mod ui;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(analyze::router(state.clone()))
        .merge(report::router(state))
        .merge(health::router())
        .merge(ui::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
