//! Home page data route.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{ApiResult, AppError};
use crate::pages;
use crate::state::AppState;

const CACHE_KEY: &str = "/api/home";
const CACHE_TAGS: &[&str] = &["home", "products", "categories", "settings"];

/// Serve the assembled homepage payload.
///
/// Read-through cached: homepage settings, categories, brands, site settings,
/// and the featured category sections in one response.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    if let Some(cached) = state.page_cache().get(CACHE_KEY).await {
        return Ok(Json(cached.as_ref().clone()));
    }

    let data = pages::load_homepage(state.cms().as_ref()).await;
    let body = serde_json::to_value(&data)
        .map_err(|e| AppError::Internal(format!("serialize homepage: {e}")))?;

    state
        .page_cache()
        .insert(CACHE_KEY, body.clone(), CACHE_TAGS)
        .await;

    Ok(Json(body))
}
