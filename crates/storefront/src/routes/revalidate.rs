//! On-demand cache revalidation hook.
//!
//! Lets CMS webhooks invalidate cached page data: a shared-secret token in
//! the query string, a `{"type": "path"|"tag", ...}` body. With no
//! recognized type, the whole page cache is flushed.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

/// Shared-secret token in the query string.
#[derive(Debug, Deserialize)]
pub struct RevalidateAuth {
    pub secret: Option<String>,
}

/// Invalidation request body.
#[derive(Debug, Default, Deserialize)]
pub struct RevalidateRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub path: Option<String>,
    pub tag: Option<String>,
}

/// Invalidate cached page data by path or tag.
#[instrument(skip(state, auth, request))]
pub async fn revalidate(
    State(state): State<AppState>,
    Query(auth): Query<RevalidateAuth>,
    Json(request): Json<RevalidateRequest>,
) -> ApiResult<Value> {
    let expected = state.config().revalidation_secret.expose_secret();
    if auth.secret.as_deref() != Some(expected) {
        return Err(AppError::Unauthorized("Invalid token".to_string()));
    }

    let now = Utc::now().timestamp_millis();

    if request.kind.as_deref() == Some("path")
        && let Some(path) = &request.path
    {
        state.page_cache().invalidate_path(path).await;
        info!(path = %path, "Revalidated path");
        return Ok(Json(json!({
            "revalidated": true,
            "type": "path",
            "path": path,
            "now": now,
        })));
    }

    if request.kind.as_deref() == Some("tag")
        && let Some(tag) = &request.tag
    {
        state.page_cache().invalidate_tag(tag);
        info!(tag = %tag, "Revalidated tag");
        return Ok(Json(json!({
            "revalidated": true,
            "type": "tag",
            "tag": tag,
            "now": now,
        })));
    }

    // No recognized type: flush everything
    state.page_cache().invalidate_all().await;
    info!("Revalidated all cached pages");
    Ok(Json(json!({
        "revalidated": true,
        "type": "default",
        "now": now,
    })))
}
