// Decision Trace - LLM-backed decision auditing with paginated PDF reports

pub mod analysis;
pub mod config;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod report;
pub mod routes;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use models::{AnalysisResult, AppState};
pub use report::{render, RenderedReport, ReportRenderer};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
