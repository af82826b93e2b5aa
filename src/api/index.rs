//! HTML landing page

use axum::{extract::State, response::Html};

use crate::{error::AppResult, AppState};

/// Home page with catalog counts and the genre list
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let summary = state.services.stats.index_summary().await?;
    let page = state.templates.render_index(&summary)?;
    Ok(Html(page))
}
