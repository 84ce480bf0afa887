//! Payload provider stub.
//!
//! Implements the `CmsService` contract with well-typed empty results so the
//! storefront renders (with empty sections) before a Payload backend is wired
//! up. Every call logs a warning; none of them error.

use async_trait::async_trait;
use tracing::warn;

use vista_core::{
    BlogPostDto, BrandDto, CategoriesResponse, CategoryDto, HomepageDto, NavigationDto, PageDto,
    PaginatedResponse, ProductDto, ProductsResponse, SettingsDto, SiteSettingsDto,
};

use super::{CmsResult, CmsService, PostQuery, ProductQuery};

/// Default page size mirrored from the product listing contract.
const DEFAULT_PRODUCT_LIMIT: u32 = 20;
/// Default page size mirrored from the post listing contract.
const DEFAULT_POST_PAGE_SIZE: u32 = 10;

/// Stub provider for a Payload backend.
#[derive(Debug, Clone, Default)]
pub struct PayloadService;

impl PayloadService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn unconfigured(operation: &str) {
        warn!(operation, "Payload provider not implemented; returning empty result");
    }
}

#[async_trait]
impl CmsService for PayloadService {
    fn name(&self) -> &'static str {
        "payload"
    }

    async fn get_page(&self, _slug: &str, _locale: &str) -> CmsResult<Option<PageDto>> {
        Self::unconfigured("get_page");
        Ok(None)
    }

    async fn get_pages(&self, _locale: &str) -> CmsResult<Vec<PageDto>> {
        Self::unconfigured("get_pages");
        Ok(Vec::new())
    }

    async fn get_settings(&self, locale: &str) -> CmsResult<SettingsDto> {
        Self::unconfigured("get_settings");
        Ok(SettingsDto::fallback(locale))
    }

    async fn get_navigation(&self, _locale: &str) -> CmsResult<NavigationDto> {
        Self::unconfigured("get_navigation");
        Ok(NavigationDto::default())
    }

    async fn get_post(&self, _slug: &str, _locale: &str) -> CmsResult<Option<BlogPostDto>> {
        Self::unconfigured("get_post");
        Ok(None)
    }

    async fn get_posts(
        &self,
        _locale: &str,
        query: &PostQuery,
    ) -> CmsResult<PaginatedResponse<BlogPostDto>> {
        Self::unconfigured("get_posts");
        Ok(PaginatedResponse::empty(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_POST_PAGE_SIZE),
        ))
    }

    async fn get_all_page_slugs(&self, _locale: &str) -> CmsResult<Vec<String>> {
        Self::unconfigured("get_all_page_slugs");
        Ok(Vec::new())
    }

    async fn get_all_post_slugs(&self, _locale: &str) -> CmsResult<Vec<String>> {
        Self::unconfigured("get_all_post_slugs");
        Ok(Vec::new())
    }

    async fn get_products(&self, query: &ProductQuery) -> CmsResult<ProductsResponse> {
        Self::unconfigured("get_products");
        Ok(ProductsResponse::empty(
            query.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT),
            query.offset.unwrap_or(0),
        ))
    }

    async fn get_product_by_slug(&self, _slug: &str) -> CmsResult<Option<ProductDto>> {
        Self::unconfigured("get_product_by_slug");
        Ok(None)
    }

    async fn get_categories(&self) -> CmsResult<CategoriesResponse> {
        Self::unconfigured("get_categories");
        Ok(CategoriesResponse::default())
    }

    async fn get_category_by_slug(&self, _slug: &str) -> CmsResult<Option<CategoryDto>> {
        Self::unconfigured("get_category_by_slug");
        Ok(None)
    }

    async fn get_homepage_settings(&self) -> CmsResult<Option<HomepageDto>> {
        Self::unconfigured("get_homepage_settings");
        Ok(None)
    }

    async fn get_site_settings(&self) -> CmsResult<Option<SiteSettingsDto>> {
        Self::unconfigured("get_site_settings");
        Ok(None)
    }

    async fn get_brands(&self) -> CmsResult<Vec<BrandDto>> {
        Self::unconfigured("get_brands");
        Ok(Vec::new())
    }
}
