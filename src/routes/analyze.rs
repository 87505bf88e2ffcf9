use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::models::{AnalysisResult, AppState, DecisionInput};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze-decision", post(analyze_decision))
        .with_state(state)
}

async fn analyze_decision(
    State(state): State<AppState>,
    payload: Result<Json<DecisionInput>, JsonRejection>,
) -> AppResult<Json<AnalysisResult>> {
    let Json(input) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected analysis request body");
        AppError::InvalidRequest("Request body must be a JSON object".to_string())
    })?;

    info!(
        decision_len = input.decision.len(),
        has_context = input.context.as_deref().is_some_and(|c| !c.trim().is_empty()),
        "Analysis request received"
    );

    let analysis = state.analyst.analyze(&input).await?;
    Ok(Json(analysis))
}
