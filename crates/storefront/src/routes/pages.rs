//! Content page routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use vista_core::PageDto;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

use super::LocaleQuery;

/// All pages for a locale, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult<Vec<PageDto>> {
    let locale = query.resolve(&state)?;
    Ok(Json(state.cms().get_pages(&locale).await?))
}

/// A single page by slug and locale.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult<PageDto> {
    let locale = query.resolve(&state)?;
    let page = state
        .cms()
        .get_page(&slug, &locale)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Page not found: {slug}")))?;
    Ok(Json(page))
}
