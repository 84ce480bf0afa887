//! Blog post routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vista_core::{BlogPostDto, PaginatedResponse};

use crate::cms::PostQuery;
use crate::error::{ApiResult, AppError};
use crate::seo::{self, MetaTags};
use crate::state::AppState;

/// Paging and filter parameters for the post listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub locale: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Post detail payload with SEO metadata and structured data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailData {
    pub post: BlogPostDto,
    pub meta: MetaTags,
    pub json_ld: serde_json::Value,
}

/// Paginated blog posts for a locale.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> ApiResult<PaginatedResponse<BlogPostDto>> {
    let locale = super::LocaleQuery {
        locale: query.locale.clone(),
    }
    .resolve(&state)?;

    let post_query = PostQuery {
        page: query.page,
        page_size: query.page_size,
        category: query.category,
        tag: query.tag,
    };

    Ok(Json(state.cms().get_posts(&locale, &post_query).await?))
}

/// A single post by slug and locale.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<super::LocaleQuery>,
) -> ApiResult<PostDetailData> {
    let locale = query.resolve(&state)?;
    let post = state
        .cms()
        .get_post(&slug, &locale)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post not found: {slug}")))?;

    let config = state.config();
    let meta = seo::meta_from_seo(&post.page.seo, &config.base_url, &locale);
    let json_ld = seo::article_schema(&post, &config.base_url, &locale, &config.site_name);

    Ok(Json(PostDetailData {
        post,
        meta,
        json_ld,
    }))
}
