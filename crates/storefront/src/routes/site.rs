//! Site chrome routes: settings, navigation, and brands.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use vista_core::{NavigationDto, SettingsDto, SiteSettingsDto};

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

use super::LocaleQuery;

const BRANDS_CACHE_KEY: &str = "/api/brands";

/// Global site settings for a locale. Never null.
#[instrument(skip(state))]
pub async fn settings(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult<SettingsDto> {
    let locale = query.resolve(&state)?;
    Ok(Json(state.cms().get_settings(&locale).await?))
}

/// Site settings singleton (footer, business hours, banner). JSON null when
/// unconfigured.
#[instrument(skip(state))]
pub async fn site_settings(State(state): State<AppState>) -> ApiResult<Option<SiteSettingsDto>> {
    Ok(Json(state.cms().get_site_settings().await?))
}

/// Navigation for a locale.
#[instrument(skip(state))]
pub async fn navigation(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult<NavigationDto> {
    let locale = query.resolve(&state)?;
    Ok(Json(state.cms().get_navigation(&locale).await?))
}

/// Active brands in display order.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    if let Some(cached) = state.page_cache().get(BRANDS_CACHE_KEY).await {
        return Ok(Json(cached.as_ref().clone()));
    }

    let brands = state.cms().get_brands().await?;
    let body = serde_json::to_value(&brands)
        .map_err(|e| AppError::Internal(format!("serialize brands: {e}")))?;

    state
        .page_cache()
        .insert(BRANDS_CACHE_KEY, body.clone(), &["brands"])
        .await;

    Ok(Json(body))
}
