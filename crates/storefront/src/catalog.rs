//! Consumer-side catalog rules: sorting, multi-category unions, and facets.
//!
//! These are business rules of the listing pages, not of the provider
//! contract: the `CmsService` interface stays single-category and OR
//! composition happens here, client-side.

use std::cmp::Reverse;
use std::collections::HashSet;

use futures::future::join_all;
use tracing::warn;

use vista_core::{ProductDto, ProductsResponse};

use crate::cms::{CmsResult, CmsService, ProductQuery};

/// Per-category fetch size for multi-category unions.
///
/// A union whose true size exceeds this cap per category is under-counted;
/// `products_for_categories` logs a warning when any single fetch fills the
/// cap so the truncation is observable.
pub const MULTI_CATEGORY_FETCH_LIMIT: u32 = 50;

/// Sort orders for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Featured items first, otherwise stable.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    /// Parse a sort key from a query string. Unknown keys behave as
    /// `featured`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name" => Self::Name,
            _ => Self::Featured,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Name => "name",
        }
    }
}

/// Sort products in place. All orders are stable.
pub fn sort_products(products: &mut [ProductDto], sort: ProductSort) {
    match sort {
        ProductSort::Featured => products.sort_by_key(|p| !p.featured),
        ProductSort::PriceAsc => products.sort_by_key(|p| p.price),
        ProductSort::PriceDesc => products.sort_by_key(|p| Reverse(p.price)),
        ProductSort::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
    }
}

/// Fetch products for several category slugs and union the results.
///
/// OR semantics over categories: one provider query per slug (issued
/// concurrently), results unioned and deduplicated by id preserving
/// first-seen order. Remaining filters in `base` apply to every fetch
/// (AND-combined with each category).
///
/// # Errors
///
/// Returns the first provider error; callers degrade to an empty listing.
pub async fn products_for_categories(
    cms: &dyn CmsService,
    slugs: &[String],
    base: &ProductQuery,
) -> CmsResult<ProductsResponse> {
    let queries: Vec<ProductQuery> = slugs
        .iter()
        .map(|slug| ProductQuery {
            category: Some(slug.clone()),
            limit: Some(MULTI_CATEGORY_FETCH_LIMIT),
            offset: None,
            ..base.clone()
        })
        .collect();

    let results = join_all(queries.iter().map(|query| cms.get_products(query))).await;

    let mut seen: HashSet<String> = HashSet::new();
    let mut data: Vec<ProductDto> = Vec::new();

    for (slug, result) in slugs.iter().zip(results) {
        let response = result?;
        if response.data.len() as u64 >= u64::from(MULTI_CATEGORY_FETCH_LIMIT) {
            warn!(
                category = %slug,
                limit = MULTI_CATEGORY_FETCH_LIMIT,
                "Category fetch filled the union cap; listing may under-count"
            );
        }
        for product in response.data {
            if seen.insert(product.id.clone()) {
                data.push(product);
            }
        }
    }

    let total = data.len() as u64;
    Ok(ProductsResponse {
        data,
        total,
        limit: MULTI_CATEGORY_FETCH_LIMIT,
        offset: 0,
    })
}

/// Unique non-empty brand names from a listing, sorted, for the filter
/// sidebar.
#[must_use]
pub fn extract_brands(products: &[ProductDto]) -> Vec<String> {
    let mut brands: Vec<String> = products
        .iter()
        .map(|p| p.brand.clone())
        .filter(|b| !b.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    brands.sort();
    brands
}

/// Products with an active discount, highest percentage first.
#[must_use]
pub fn select_deals(products: Vec<ProductDto>) -> Vec<ProductDto> {
    let mut deals: Vec<ProductDto> = products
        .into_iter()
        .filter(ProductDto::has_discount)
        .collect();
    deals.sort_by_key(|p| Reverse(p.discount_percent()));
    deals
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashMap;

    use vista_core::{
        BlogPostDto, BrandDto, CategoriesResponse, CategoryDto, HomepageDto, NavigationDto,
        PageDto, PaginatedResponse, SeoMetadata, SettingsDto, SiteSettingsDto,
    };

    use crate::cms::{CmsError, PostQuery};

    fn product(id: &str, name: &str, price: i64, featured: bool) -> ProductDto {
        ProductDto {
            id: id.to_string(),
            name: name.to_string(),
            slug: id.to_string(),
            sku: None,
            brand: String::new(),
            price,
            compare_at_price: None,
            description: String::new(),
            short_description: None,
            images: Vec::new(),
            category: CategoryDto::uncategorized(),
            specifications: Vec::new(),
            in_stock: true,
            featured,
            seo: SeoMetadata::default(),
            published_at: DateTime::UNIX_EPOCH,
        }
    }

    /// In-memory provider double serving fixed products per category slug.
    struct StaticCms {
        by_category: HashMap<String, Vec<ProductDto>>,
    }

    #[async_trait]
    impl CmsService for StaticCms {
        fn name(&self) -> &'static str {
            "static"
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
            let category = query.category.as_deref().unwrap_or("");
            let data = self
                .by_category
                .get(category)
                .cloned()
                .ok_or_else(|| CmsError::Api {
                    status: 500,
                    message: format!("no fixture for category {category}"),
                })?;
            let total = data.len() as u64;
            Ok(ProductsResponse {
                data,
                total,
                limit: query.limit.unwrap_or(20),
                offset: query.offset.unwrap_or(0),
            })
        }

        async fn get_product_by_slug(&self, _: &str) -> CmsResult<Option<ProductDto>> {
            Ok(None)
        }
        async fn get_categories(&self) -> CmsResult<CategoriesResponse> {
            Ok(CategoriesResponse::default())
        }
        async fn get_category_by_slug(&self, _: &str) -> CmsResult<Option<CategoryDto>> {
            Ok(None)
        }
        async fn get_homepage_settings(&self) -> CmsResult<Option<HomepageDto>> {
            Ok(None)
        }
        async fn get_site_settings(&self) -> CmsResult<Option<SiteSettingsDto>> {
            Ok(None)
        }
        async fn get_brands(&self) -> CmsResult<Vec<BrandDto>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_sort_parse_unknown_is_featured() {
        assert_eq!(ProductSort::parse("price-asc"), ProductSort::PriceAsc);
        assert_eq!(ProductSort::parse("bogus"), ProductSort::Featured);
        assert_eq!(ProductSort::parse(""), ProductSort::Featured);
    }

    #[test]
    fn test_price_sorts_are_exact_reversals_without_ties() {
        let mut asc = vec![
            product("a", "A", 300, false),
            product("b", "B", 100, false),
            product("c", "C", 200, false),
        ];
        let mut desc = asc.clone();

        sort_products(&mut asc, ProductSort::PriceAsc);
        sort_products(&mut desc, ProductSort::PriceDesc);

        let asc_ids: Vec<&str> = asc.iter().map(|p| p.id.as_str()).collect();
        let mut desc_ids: Vec<&str> = desc.iter().map(|p| p.id.as_str()).collect();
        desc_ids.reverse();
        assert_eq!(asc_ids, desc_ids);
        assert_eq!(asc_ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let mut products = vec![
            product("a", "A", 1, false),
            product("b", "B", 2, true),
            product("c", "C", 3, false),
            product("d", "D", 4, true),
        ];
        sort_products(&mut products, ProductSort::Featured);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        // Featured first in original order, then the rest in original order
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let mut products = vec![
            product("a", "zebra", 1, false),
            product("b", "Apple", 2, false),
            product("c", "mango", 3, false),
        ];
        sort_products(&mut products, ProductSort::Name);
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "mango", "zebra"]);
    }

    #[tokio::test]
    async fn test_multi_category_union_dedups_by_id() {
        let mut by_category = HashMap::new();
        by_category.insert(
            "laptops".to_string(),
            vec![product("p1", "P1", 1, false), product("p2", "P2", 2, false)],
        );
        by_category.insert(
            "gaming".to_string(),
            vec![product("p2", "P2", 2, false), product("p3", "P3", 3, false)],
        );
        let cms = StaticCms { by_category };

        let slugs = vec!["laptops".to_string(), "gaming".to_string()];
        let response = products_for_categories(&cms, &slugs, &ProductQuery::default())
            .await
            .unwrap();

        let ids: Vec<&str> = response.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(response.total, 3);

        // Superset of each single-category result
        for slug in &slugs {
            let single = cms
                .get_products(&ProductQuery {
                    category: Some(slug.clone()),
                    ..ProductQuery::default()
                })
                .await
                .unwrap();
            for p in &single.data {
                assert!(ids.contains(&p.id.as_str()));
            }
        }
    }

    #[tokio::test]
    async fn test_multi_category_propagates_backend_errors() {
        let mut by_category = HashMap::new();
        by_category.insert("laptops".to_string(), vec![product("p1", "P1", 1, false)]);
        let cms = StaticCms { by_category };

        let slugs = vec!["laptops".to_string(), "missing".to_string()];
        let result = products_for_categories(&cms, &slugs, &ProductQuery::default()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_brands_unique_sorted_non_empty() {
        let mut p1 = product("a", "A", 1, false);
        p1.brand = "Lenovo".to_string();
        let mut p2 = product("b", "B", 2, false);
        p2.brand = "Asus".to_string();
        let mut p3 = product("c", "C", 3, false);
        p3.brand = "Lenovo".to_string();
        let p4 = product("d", "D", 4, false);

        let brands = extract_brands(&[p1, p2, p3, p4]);
        assert_eq!(brands, vec!["Asus".to_string(), "Lenovo".to_string()]);
    }

    #[test]
    fn test_select_deals_orders_by_discount_desc() {
        let mut p1 = product("a", "A", 50_000, false);
        p1.compare_at_price = Some(60_000); // 17%
        let mut p2 = product("b", "B", 30_000, false);
        p2.compare_at_price = Some(60_000); // 50%
        let p3 = product("c", "C", 10_000, false); // no discount

        let deals = select_deals(vec![p1, p2, p3]);
        let ids: Vec<&str> = deals.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
