//! Page-data assembly.
//!
//! Each function gathers everything one storefront route needs: independent
//! provider calls run concurrently, dependent ones run in sequence (the
//! homepage's configured product limit shapes the per-category fetches that
//! follow it). Every call is wrapped so a backend failure degrades that
//! page section to an empty default instead of failing the whole request.

use futures::future::join_all;
use serde::Serialize;
use tracing::error;

use vista_core::{
    BrandDto, CategoryDto, HomepageDto, ProductDto, ProductsResponse, SiteSettingsDto,
};

use crate::catalog::{self, ProductSort};
use crate::cms::{CmsService, ProductQuery};
use crate::config::StorefrontConfig;
use crate::seo::{self, MetaTags};

/// Products shown per homepage category section when the homepage settings
/// do not configure a limit.
const DEFAULT_SECTION_PRODUCT_LIMIT: u32 = 8;

/// Page size for unfiltered product listings.
const LISTING_FETCH_LIMIT: u32 = 50;

/// Fetch size when scanning the catalog for brand facets or deals.
const CATALOG_SCAN_LIMIT: u32 = 100;

/// One homepage category section with its products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub category: CategoryDto,
    pub products: Vec<ProductDto>,
}

/// Everything the homepage needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<HomepageDto>,
    pub categories: Vec<CategoryDto>,
    pub brands: Vec<BrandDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_settings: Option<SiteSettingsDto>,
    pub featured_sections: Vec<CategorySection>,
}

/// Everything the product listing page needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListingData {
    pub products: Vec<ProductDto>,
    pub total: u64,
    pub categories: Vec<CategoryDto>,
    /// Brand facet values for the filter sidebar.
    pub brands: Vec<String>,
    pub sort: &'static str,
}

/// Everything the product detail page needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailData {
    pub product: ProductDto,
    pub meta: MetaTags,
    pub json_ld: serde_json::Value,
}

/// Filters accepted by the product listing page.
#[derive(Debug, Clone, Default)]
pub struct ListingParams {
    /// Comma-separated category slugs (OR semantics).
    pub categories: Vec<String>,
    pub brand: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub sort: ProductSort,
}

/// Load homepage data.
///
/// Homepage settings, categories, brands, and site settings are independent
/// and fetched concurrently; the per-category product fetches follow, sized
/// by the homepage's configured limit.
pub async fn load_homepage(cms: &dyn CmsService) -> HomepageData {
    let (homepage, categories, brands, site_settings) = tokio::join!(
        cms.get_homepage_settings(),
        cms.get_categories(),
        cms.get_brands(),
        cms.get_site_settings(),
    );

    let homepage = homepage.unwrap_or_else(|e| {
        error!("Failed to fetch homepage settings: {e}");
        None
    });
    let categories = categories
        .unwrap_or_else(|e| {
            error!("Failed to fetch categories: {e}");
            vista_core::CategoriesResponse::default()
        })
        .categories;
    let brands = brands.unwrap_or_else(|e| {
        error!("Failed to fetch brands: {e}");
        Vec::new()
    });
    let site_settings = site_settings.unwrap_or_else(|e| {
        error!("Failed to fetch site settings: {e}");
        None
    });

    // The configured limit shapes the queries below, so it must resolve first.
    let product_limit = homepage
        .as_ref()
        .and_then(|h| h.highlighted_section.as_ref())
        .and_then(|s| s.product_limit)
        .unwrap_or(DEFAULT_SECTION_PRODUCT_LIMIT);

    let featured_categories: Vec<CategoryDto> = homepage
        .as_ref()
        .map(|h| h.featured_categories.clone())
        .unwrap_or_default();

    let fetches = featured_categories.iter().map(|category| {
        let query = ProductQuery {
            category: Some(category.slug.clone()),
            limit: Some(product_limit),
            ..ProductQuery::default()
        };
        async move { cms.get_products(&query).await }
    });
    let results = join_all(fetches).await;

    let featured_sections = featured_categories
        .into_iter()
        .zip(results)
        .map(|(category, result)| {
            let products = result.map_or_else(
                |e| {
                    error!(category = %category.slug, "Failed to fetch section products: {e}");
                    Vec::new()
                },
                |response| response.data,
            );
            CategorySection { category, products }
        })
        .collect();

    HomepageData {
        homepage,
        categories,
        brands,
        site_settings,
        featured_sections,
    }
}

/// Load product listing data with filters, multi-category unions, facets,
/// and in-memory sorting.
pub async fn load_product_listing(cms: &dyn CmsService, params: &ListingParams) -> ProductListingData {
    let base = ProductQuery {
        brand: params.brand.clone(),
        min_price: params.min_price,
        max_price: params.max_price,
        search: params.search.clone(),
        limit: Some(LISTING_FETCH_LIMIT),
        ..ProductQuery::default()
    };

    let products_fut = async {
        if params.categories.is_empty() {
            cms.get_products(&base).await
        } else {
            // OR semantics over categories: union client-side
            catalog::products_for_categories(cms, &params.categories, &base).await
        }
    };

    // Sidebar data is independent of the listing query
    let facet_query = ProductQuery {
        limit: Some(CATALOG_SCAN_LIMIT),
        ..ProductQuery::default()
    };
    let (products, categories, facet_products) = tokio::join!(
        products_fut,
        cms.get_categories(),
        cms.get_products(&facet_query),
    );

    let response = products.unwrap_or_else(|e| {
        error!("Failed to fetch products: {e}");
        ProductsResponse::empty(LISTING_FETCH_LIMIT, 0)
    });
    let categories = categories
        .unwrap_or_else(|e| {
            error!("Failed to fetch categories: {e}");
            vista_core::CategoriesResponse::default()
        })
        .categories;
    let brands = facet_products.map_or_else(
        |e| {
            error!("Failed to fetch brand facets: {e}");
            Vec::new()
        },
        |response| catalog::extract_brands(&response.data),
    );

    let total = response.total;
    let mut products = response.data;
    catalog::sort_products(&mut products, params.sort);

    ProductListingData {
        products,
        total,
        categories,
        brands,
        sort: params.sort.as_str(),
    }
}

/// Load product detail data, or `None` when the slug is unknown.
///
/// # Errors
///
/// Propagates backend errors; a missing product is `Ok(None)`.
pub async fn load_product_detail(
    cms: &dyn CmsService,
    config: &StorefrontConfig,
    slug: &str,
) -> crate::cms::CmsResult<Option<ProductDetailData>> {
    let Some(product) = cms.get_product_by_slug(slug).await? else {
        return Ok(None);
    };

    let meta = seo::meta_from_seo(&product.seo, &config.base_url, &config.default_locale);
    let json_ld = seo::product_schema(&product, &config.base_url, &config.currency);

    Ok(Some(ProductDetailData {
        product,
        meta,
        json_ld,
    }))
}

/// Load the deals listing: discounted products, highest discount first.
pub async fn load_deals(cms: &dyn CmsService) -> Vec<ProductDto> {
    let query = ProductQuery {
        limit: Some(CATALOG_SCAN_LIMIT),
        ..ProductQuery::default()
    };

    let products = cms.get_products(&query).await.map_or_else(
        |e| {
            error!("Failed to fetch deals: {e}");
            Vec::new()
        },
        |response| response.data,
    );

    catalog::select_deals(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use vista_core::{
        BlogPostDto, CategoriesResponse, HeroImages, NavigationDto, PageDto, PaginatedResponse,
        SectionHeading, SettingsDto,
    };

    use crate::cms::{CmsError, CmsResult, PostQuery};

    /// Provider double: homepage configured with one featured category and a
    /// section limit; product queries echo the requested limit back.
    struct SectionCms;

    #[async_trait]
    impl CmsService for SectionCms {
        fn name(&self) -> &'static str {
            "section-test"
        }

        async fn get_page(&self, _: &str, _: &str) -> CmsResult<Option<PageDto>> {
            Ok(None)
        }
        async fn get_pages(&self, _: &str) -> CmsResult<Vec<PageDto>> {
            Ok(Vec::new())
        }
        async fn get_settings(&self, locale: &str) -> CmsResult<SettingsDto> {
            Ok(SettingsDto::fallback(locale))
        }
        async fn get_navigation(&self, _: &str) -> CmsResult<NavigationDto> {
            Ok(NavigationDto::default())
        }
        async fn get_post(&self, _: &str, _: &str) -> CmsResult<Option<BlogPostDto>> {
            Ok(None)
        }
        async fn get_posts(
            &self,
            _: &str,
            _: &PostQuery,
        ) -> CmsResult<PaginatedResponse<BlogPostDto>> {
            Ok(PaginatedResponse::empty(1, 10))
        }
        async fn get_all_page_slugs(&self, _: &str) -> CmsResult<Vec<String>> {
            Ok(Vec::new())
        }
        async fn get_all_post_slugs(&self, _: &str) -> CmsResult<Vec<String>> {
            Ok(Vec::new())
        }

        async fn get_products(&self, query: &ProductQuery) -> CmsResult<ProductsResponse> {
            Ok(ProductsResponse::empty(query.limit.unwrap_or(0), 0))
        }

        async fn get_product_by_slug(&self, _: &str) -> CmsResult<Option<ProductDto>> {
            Ok(None)
        }
        async fn get_categories(&self) -> CmsResult<CategoriesResponse> {
            Err(CmsError::Api {
                status: 500,
                message: "categories down".to_string(),
            })
        }
        async fn get_category_by_slug(&self, _: &str) -> CmsResult<Option<CategoryDto>> {
            Ok(None)
        }

        async fn get_homepage_settings(&self) -> CmsResult<Option<HomepageDto>> {
            let mut category = CategoryDto::uncategorized();
            category.id = "c1".to_string();
            category.slug = "laptops".to_string();

            Ok(Some(HomepageDto {
                hero_title: None,
                hero_subtitle: None,
                hero_images: HeroImages::default(),
                featured_categories: vec![category],
                highlighted_section: Some(SectionHeading {
                    title: "Top picks".to_string(),
                    description: None,
                    product_limit: Some(4),
                }),
                categories_section: None,
                more_products_section: None,
                whatsapp_number: None,
                store_location: None,
            }))
        }
        async fn get_site_settings(&self) -> CmsResult<Option<SiteSettingsDto>> {
            Ok(None)
        }
        async fn get_brands(&self) -> CmsResult<Vec<BrandDto>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_homepage_degrades_failed_sections_to_empty() {
        let data = load_homepage(&SectionCms).await;

        // Categories fetch failed -> empty, not an error
        assert!(data.categories.is_empty());
        // Homepage itself resolved
        assert!(data.homepage.is_some());
        // One featured section per configured category
        assert_eq!(data.featured_sections.len(), 1);
        assert_eq!(data.featured_sections.first().unwrap().category.slug, "laptops");
    }

    #[tokio::test]
    async fn test_listing_with_failing_categories_still_returns_products() {
        let params = ListingParams::default();
        let data = load_product_listing(&SectionCms, &params).await;

        assert!(data.categories.is_empty());
        assert_eq!(data.sort, "featured");
        assert_eq!(data.total, 0);
    }
}
