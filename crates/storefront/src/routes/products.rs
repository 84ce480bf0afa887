//! Product listing, detail, and deals routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use vista_core::ProductDto;

use crate::catalog::ProductSort;
use crate::error::{ApiResult, AppError};
use crate::pages::{self, ListingParams, ProductDetailData, ProductListingData};
use crate::state::AppState;

/// Listing filters from the query string. Multiple categories arrive as a
/// comma-separated list and are OR-combined; everything else AND-combines.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ProductsQuery {
    fn into_params(self) -> ListingParams {
        let categories = self
            .category
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        ListingParams {
            categories,
            brand: self.brand,
            min_price: self.min_price,
            max_price: self.max_price,
            search: self.search,
            sort: self.sort.as_deref().map(ProductSort::parse).unwrap_or_default(),
        }
    }
}

/// Product listing with filters, facets, and in-memory sorting.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> ApiResult<ProductListingData> {
    let params = query.into_params();
    let data = pages::load_product_listing(state.cms().as_ref(), &params).await;
    Ok(Json(data))
}

/// Product detail with SEO metadata and structured data.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<serde_json::Value> {
    let cache_key = format!("/api/products/{slug}");
    if let Some(cached) = state.page_cache().get(&cache_key).await {
        return Ok(Json(cached.as_ref().clone()));
    }

    let data: ProductDetailData =
        pages::load_product_detail(state.cms().as_ref(), state.config(), &slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not found: {slug}")))?;

    let body = serde_json::to_value(&data)
        .map_err(|e| AppError::Internal(format!("serialize product: {e}")))?;

    let product_tag = format!("product:{slug}");
    state
        .page_cache()
        .insert(cache_key, body.clone(), &["products", product_tag.as_str()])
        .await;

    Ok(Json(body))
}

/// Discounted products, highest discount first.
#[instrument(skip(state))]
pub async fn deals(State(state): State<AppState>) -> ApiResult<Vec<ProductDto>> {
    Ok(Json(pages::load_deals(state.cms().as_ref()).await))
}
