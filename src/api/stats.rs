//! Statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::IndexSummary, AppState};

/// Catalog counts shown on the landing page
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalog counts and genres", body = IndexSummary)
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<IndexSummary>> {
    let summary = state.services.stats.index_summary().await?;
    Ok(Json(summary))
}
