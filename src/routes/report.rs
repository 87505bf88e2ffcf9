use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::{error, info};

use crate::models::{AnalysisResult, AppState};
use crate::report::{ReportOptions, ReportRenderer};
use crate::types::{AppError, AppResult};
use crate::ui;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/report/pdf", post(export_pdf))
        .route("/api/report/html", post(report_html))
        .with_state(state)
}

async fn export_pdf(
    State(state): State<AppState>,
    Json(analysis): Json<AnalysisResult>,
) -> AppResult<Response> {
    let renderer = ReportRenderer::with_options(ReportOptions {
        product_name: state.config.report.product_name.clone(),
        generated_at: Utc::now(),
    });

    let report = renderer.render(&analysis).map_err(|e| {
        error!(error = %e, "PDF export failed");
        AppError::Report(e)
    })?;
    info!(file = %report.file_name, pages = report.page_count, "PDF exported");

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

async fn report_html(Json(analysis): Json<AnalysisResult>) -> Html<String> {
    Html(ui::report_cards(&analysis))
}
