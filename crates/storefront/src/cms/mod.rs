//! Provider-agnostic content service.
//!
//! # Architecture
//!
//! Every read operation the storefront needs is defined once on the
//! [`CmsService`] trait; page assembly, catalog rules, and route handlers
//! depend on the trait only. Two providers implement it:
//!
//! - [`sanity::SanityService`] - the content store client (GROQ over HTTP)
//! - [`payload::PayloadService`] - a stub that returns well-typed empty
//!   results until a second backend is wired up
//!
//! The active provider is selected once at bootstrap by [`factory`] and
//! carried in application state as `Arc<dyn CmsService>` - there is no
//! process-wide singleton, and swapping the backend never touches a consumer.
//!
//! # Error contract
//!
//! Not-found is `Ok(None)` for single-entity lookups, never an error. A
//! backend or network failure is an `Err(CmsError)`; this layer performs no
//! retries and no catching - callers substitute safe defaults so pages
//! degrade to empty sections. Providers own no cross-request cache; render
//! caching belongs to the HTTP layer.

pub mod factory;
pub mod payload;
pub mod sanity;

use async_trait::async_trait;
use thiserror::Error;

use vista_core::{
    BlogPostDto, BrandDto, CategoriesResponse, CategoryDto, HomepageDto, NavigationDto, PageDto,
    PaginatedResponse, ProductDto, ProductsResponse, SettingsDto, SiteSettingsDto,
};

/// Errors that can occur when talking to a content backend.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success response.
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Filters for product listings.
///
/// Filters are AND-combined when several are given. The interface is
/// single-category on purpose: OR-composition over several categories is the
/// caller's job (one query per category, union + dedup by id - see
/// `catalog::products_for_categories`).
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Category slug.
    pub category: Option<String>,
    /// Exact brand name.
    pub brand: Option<String>,
    /// Featured flag.
    pub featured: Option<bool>,
    /// Inclusive lower price bound.
    pub min_price: Option<i64>,
    /// Inclusive upper price bound.
    pub max_price: Option<i64>,
    /// Page size (default 20).
    pub limit: Option<u32>,
    /// Starting offset (default 0).
    pub offset: Option<u32>,
    /// Free-text search over name, brand, and description.
    pub search: Option<String>,
}

/// Paging and filters for blog post listings.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Page size (default 10).
    pub page_size: Option<u32>,
    /// Category slug.
    pub category: Option<String>,
    /// Tag value.
    pub tag: Option<String>,
}

/// Result type alias for provider operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// The content-provider contract.
///
/// Every operation returns DTOs, never raw backend records - this is the seam
/// that allows swapping the backend without touching rendering code.
#[async_trait]
pub trait CmsService: Send + Sync {
    /// Provider name for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Get a single page by slug and locale.
    async fn get_page(&self, slug: &str, locale: &str) -> CmsResult<Option<PageDto>>;

    /// Get all pages for a locale, newest first.
    async fn get_pages(&self, locale: &str) -> CmsResult<Vec<PageDto>>;

    /// Get global site settings for a locale.
    ///
    /// Never null: built-in defaults are returned when the backend holds no
    /// settings document.
    async fn get_settings(&self, locale: &str) -> CmsResult<SettingsDto>;

    /// Get navigation for a locale. Empty items list when none is configured.
    async fn get_navigation(&self, locale: &str) -> CmsResult<NavigationDto>;

    /// Get a single blog post by slug and locale.
    async fn get_post(&self, slug: &str, locale: &str) -> CmsResult<Option<BlogPostDto>>;

    /// Get paginated blog posts for a locale.
    async fn get_posts(
        &self,
        locale: &str,
        query: &PostQuery,
    ) -> CmsResult<PaginatedResponse<BlogPostDto>>;

    /// Get all page slugs for a locale (static path enumeration).
    async fn get_all_page_slugs(&self, locale: &str) -> CmsResult<Vec<String>>;

    /// Get all blog post slugs for a locale (static path enumeration).
    async fn get_all_post_slugs(&self, locale: &str) -> CmsResult<Vec<String>>;

    /// Get products with optional filtering. An empty result set is not an
    /// error.
    async fn get_products(&self, query: &ProductQuery) -> CmsResult<ProductsResponse>;

    /// Get a single product by slug.
    async fn get_product_by_slug(&self, slug: &str) -> CmsResult<Option<ProductDto>>;

    /// Get all product categories, in display order.
    async fn get_categories(&self) -> CmsResult<CategoriesResponse>;

    /// Get a single category by slug.
    async fn get_category_by_slug(&self, slug: &str) -> CmsResult<Option<CategoryDto>>;

    /// Get the homepage settings singleton.
    async fn get_homepage_settings(&self) -> CmsResult<Option<HomepageDto>>;

    /// Get the site settings singleton (footer, business hours, banner).
    async fn get_site_settings(&self) -> CmsResult<Option<SiteSettingsDto>>;

    /// Get active brands, in display order.
    async fn get_brands(&self) -> CmsResult<Vec<BrandDto>>;
}
