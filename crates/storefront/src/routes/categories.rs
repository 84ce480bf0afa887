//! Category routes.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use vista_core::CategoryDto;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

const CACHE_KEY: &str = "/api/categories";

/// All categories in display order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    if let Some(cached) = state.page_cache().get(CACHE_KEY).await {
        return Ok(Json(cached.as_ref().clone()));
    }

    let response = state.cms().get_categories().await?;
    let body = serde_json::to_value(&response)
        .map_err(|e| AppError::Internal(format!("serialize categories: {e}")))?;

    state
        .page_cache()
        .insert(CACHE_KEY, body.clone(), &["categories"])
        .await;

    Ok(Json(body))
}

/// A single category by slug.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<CategoryDto> {
    let category = state
        .cms()
        .get_category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category not found: {slug}")))?;
    Ok(Json(category))
}
