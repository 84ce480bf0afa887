//! `CmsService` implementation for the content store.
//!
//! Each operation issues one parameterized GROQ query (plus a `count()`
//! aggregate for paginated listings) with a fixed projection, then shapes the
//! result through the transformer. No cross-request cache lives here; every
//! call is a fresh query.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::instrument;

use vista_core::{
    BlogPostDto, BrandDto, CategoriesResponse, CategoryDto, HomepageDto, NavigationDto, PageDto,
    PaginatedResponse, ProductDto, ProductsResponse, SettingsDto, SiteSettingsDto,
};

use crate::cms::{CmsResult, CmsService, PostQuery, ProductQuery};
use crate::config::SanityConfig;

use super::client::{ImageUrlBuilder, SanityClient};
use super::records::{
    SanityBrand, SanityCategory, SanityHomepage, SanityNavigation, SanityPage, SanityPost,
    SanityProduct, SanitySettings, SanitySiteSettings,
};
use super::transformer::Transformer;

/// Default page size for product listings.
const DEFAULT_PRODUCT_LIMIT: u32 = 20;
/// Default page size for blog post listings.
const DEFAULT_POST_PAGE_SIZE: u32 = 10;

// =============================================================================
// Projections
// =============================================================================

const PAGE_FIELDS: &str = "\
_id, _createdAt, _updatedAt, title, slug, description, content, seo, publishedAt, locale";

const CATEGORY_FIELDS: &str = "\
_id, name, slug, description, image{ asset->, alt }, order, showInNavigation";

const PRODUCT_FIELDS: &str = "\
_id, _createdAt, name, slug, sku, brand, price, compareAtPrice, description, shortDescription, \
images[]{ asset->, alt }, \
category->{ _id, name, slug, description, image{ asset->, alt }, order, showInNavigation }, \
specifications, inStock, featured, seo, publishedAt";

const POST_FIELDS: &str = "\
_id, _createdAt, _updatedAt, title, slug, description, excerpt, content, seo, publishedAt, locale, \
featuredImage{ asset->, alt }, \
author->{ _id, name, bio, avatar{ asset->, alt }, social }, \
categories[]->{ _id, name, slug, description }, \
tags, estimatedReadingTime";

// =============================================================================
// SanityService
// =============================================================================

/// Content store provider.
#[derive(Clone)]
pub struct SanityService {
    client: SanityClient,
    transformer: Transformer,
}

impl SanityService {
    /// Create the provider from configuration.
    ///
    /// `store_name` feeds the SEO title fallback (`"{name} | {store}"`).
    #[must_use]
    pub fn new(config: &SanityConfig, store_name: &str) -> Self {
        Self {
            client: SanityClient::new(config),
            transformer: Transformer::new(ImageUrlBuilder::new(config), store_name),
        }
    }
}

#[async_trait]
impl CmsService for SanityService {
    fn name(&self) -> &'static str {
        "sanity"
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_page(&self, slug: &str, locale: &str) -> CmsResult<Option<PageDto>> {
        let groq = format!(
            "*[_type == \"page\" && slug.current == $slug && locale == $locale][0] {{ {PAGE_FIELDS} }}"
        );
        let record: Option<SanityPage> = self
            .client
            .query(&groq, json!({"slug": slug, "locale": locale}))
            .await?;
        Ok(record.map(|page| self.transformer.page(page)))
    }

    #[instrument(skip(self))]
    async fn get_pages(&self, locale: &str) -> CmsResult<Vec<PageDto>> {
        let groq = format!(
            "*[_type == \"page\" && locale == $locale] | order(publishedAt desc) {{ {PAGE_FIELDS} }}"
        );
        let records: Vec<SanityPage> = self.client.query(&groq, json!({"locale": locale})).await?;
        Ok(records
            .into_iter()
            .map(|page| self.transformer.page(page))
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_settings(&self, locale: &str) -> CmsResult<SettingsDto> {
        let groq = "*[_type == \"siteSettings\" && locale == $locale][0] { \
            siteName, siteUrl, siteDescription, logo{ asset->, alt }, favicon{ asset->, alt }, \
            social, gtmId, contactEmail, defaultLocale, supportedLocales }";
        let record: Option<SanitySettings> = self
            .client
            .query(groq, json!({"locale": locale}))
            .await?;

        // Built-in defaults when no settings document exists
        Ok(record.map_or_else(
            || SettingsDto::fallback(locale),
            |settings| self.transformer.settings(settings),
        ))
    }

    #[instrument(skip(self))]
    async fn get_navigation(&self, locale: &str) -> CmsResult<NavigationDto> {
        let groq = "*[_type == \"navigation\" && locale == $locale][0] { \
            items[] { _key, label, href, target, children[] { _key, label, href, target } } }";
        let record: Option<SanityNavigation> = self
            .client
            .query(groq, json!({"locale": locale}))
            .await?;

        Ok(record.map_or_else(NavigationDto::default, |nav| {
            self.transformer.navigation(nav)
        }))
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_post(&self, slug: &str, locale: &str) -> CmsResult<Option<BlogPostDto>> {
        let groq = format!(
            "*[_type == \"post\" && slug.current == $slug && locale == $locale][0] {{ {POST_FIELDS} }}"
        );
        let record: Option<SanityPost> = self
            .client
            .query(&groq, json!({"slug": slug, "locale": locale}))
            .await?;
        Ok(record.map(|post| self.transformer.post(post)))
    }

    #[instrument(skip(self, query))]
    async fn get_posts(
        &self,
        locale: &str,
        query: &PostQuery,
    ) -> CmsResult<PaginatedResponse<BlogPostDto>> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_POST_PAGE_SIZE);
        let start = (page - 1) * page_size;
        let end = start + page_size;

        // Build filter conditions; values travel as $params
        let mut filters = String::from("_type == \"post\" && locale == $locale");
        let mut params = Map::new();
        params.insert("locale".to_string(), json!(locale));

        if let Some(category) = &query.category {
            filters.push_str(" && $category in categories[]->slug.current");
            params.insert("category".to_string(), json!(category));
        }
        if let Some(tag) = &query.tag {
            filters.push_str(" && $tag in tags");
            params.insert("tag".to_string(), json!(tag));
        }

        let total: u64 = self
            .client
            .query(
                &format!("count(*[{filters}])"),
                Value::Object(params.clone()),
            )
            .await?;

        let groq = format!(
            "*[{filters}] | order(publishedAt desc) [{start}...{end}] {{ {POST_FIELDS} }}"
        );
        let records: Vec<SanityPost> = self.client.query(&groq, Value::Object(params)).await?;

        Ok(PaginatedResponse {
            items: records
                .into_iter()
                .map(|post| self.transformer.post(post))
                .collect(),
            total,
            page,
            page_size,
            has_more: u64::from(end) < total,
        })
    }

    #[instrument(skip(self))]
    async fn get_all_page_slugs(&self, locale: &str) -> CmsResult<Vec<String>> {
        let groq = "*[_type == \"page\" && locale == $locale].slug.current";
        let slugs: Vec<Option<String>> =
            self.client.query(groq, json!({"locale": locale})).await?;
        Ok(slugs.into_iter().flatten().collect())
    }

    #[instrument(skip(self))]
    async fn get_all_post_slugs(&self, locale: &str) -> CmsResult<Vec<String>> {
        let groq = "*[_type == \"post\" && locale == $locale].slug.current";
        let slugs: Vec<Option<String>> =
            self.client.query(groq, json!({"locale": locale})).await?;
        Ok(slugs.into_iter().flatten().collect())
    }

    #[instrument(skip(self, query))]
    async fn get_products(&self, query: &ProductQuery) -> CmsResult<ProductsResponse> {
        let limit = query.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT);
        let offset = query.offset.unwrap_or(0);
        let end = offset + limit;

        // Build filter conditions; AND-combined, values as $params
        let mut filters = String::from("_type == \"product\"");
        let mut params = Map::new();

        if let Some(category) = &query.category {
            filters.push_str(" && category->slug.current == $category");
            params.insert("category".to_string(), json!(category));
        }
        if let Some(brand) = &query.brand {
            filters.push_str(" && brand == $brand");
            params.insert("brand".to_string(), json!(brand));
        }
        if let Some(featured) = query.featured {
            filters.push_str(" && featured == $featured");
            params.insert("featured".to_string(), json!(featured));
        }
        if let Some(min_price) = query.min_price {
            filters.push_str(" && price >= $minPrice");
            params.insert("minPrice".to_string(), json!(min_price));
        }
        if let Some(max_price) = query.max_price {
            filters.push_str(" && price <= $maxPrice");
            params.insert("maxPrice".to_string(), json!(max_price));
        }
        if let Some(search) = &query.search {
            // Search across name, brand, and description
            filters.push_str(
                " && (name match $search || brand match $search || description match $search)",
            );
            params.insert("search".to_string(), json!(format!("*{search}*")));
        }

        let total: u64 = self
            .client
            .query(
                &format!("count(*[{filters}])"),
                Value::Object(params.clone()),
            )
            .await?;

        let groq = format!(
            "*[{filters}] | order(featured desc, _createdAt desc) [{offset}...{end}] {{ {PRODUCT_FIELDS} }}"
        );
        let records: Vec<SanityProduct> = self.client.query(&groq, Value::Object(params)).await?;

        Ok(ProductsResponse {
            data: records
                .into_iter()
                .map(|product| self.transformer.product(product))
                .collect(),
            total,
            limit,
            offset,
        })
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_product_by_slug(&self, slug: &str) -> CmsResult<Option<ProductDto>> {
        let groq = format!(
            "*[_type == \"product\" && slug.current == $slug][0] {{ {PRODUCT_FIELDS} }}"
        );
        let record: Option<SanityProduct> =
            self.client.query(&groq, json!({"slug": slug})).await?;
        Ok(record.map(|product| self.transformer.product(product)))
    }

    #[instrument(skip(self))]
    async fn get_categories(&self) -> CmsResult<CategoriesResponse> {
        let groq = format!(
            "*[_type == \"category\"] | order(order asc) {{ {CATEGORY_FIELDS} }}"
        );
        let records: Vec<SanityCategory> =
            self.client.query(&groq, Value::Object(Map::new())).await?;

        Ok(CategoriesResponse {
            categories: records
                .into_iter()
                .map(|category| self.transformer.category(category))
                .collect(),
        })
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_category_by_slug(&self, slug: &str) -> CmsResult<Option<CategoryDto>> {
        let groq = format!(
            "*[_type == \"category\" && slug.current == $slug][0] {{ {CATEGORY_FIELDS} }}"
        );
        let record: Option<SanityCategory> =
            self.client.query(&groq, json!({"slug": slug})).await?;
        Ok(record.map(|category| self.transformer.category(category)))
    }

    #[instrument(skip(self))]
    async fn get_homepage_settings(&self) -> CmsResult<Option<HomepageDto>> {
        let groq = "*[_type == \"homepage\"][0] { \
            heroTitle, heroSubtitle, \
            heroImages { \
                mainImages[] { asset->, alt, link }, \
                mainImage { asset->, alt, link }, \
                topImage { asset->, alt, link }, \
                bottomImage { asset->, alt, link } \
            }, \
            featuredCategories[]->{ _id, name, slug, description, image{ asset->, alt }, order, showInNavigation }, \
            highlightedSection, categoriesSection, moreProductsSection, \
            whatsappNumber, storeLocation }";
        let record: Option<SanityHomepage> =
            self.client.query(groq, Value::Object(Map::new())).await?;
        Ok(record.map(|homepage| self.transformer.homepage(homepage)))
    }

    #[instrument(skip(self))]
    async fn get_site_settings(&self) -> CmsResult<Option<SiteSettingsDto>> {
        let groq = "*[_type == \"siteSettings\"][0] { \
            footerDescription, businessHours, quickLinks, socialLinks, announcementBar }";
        let record: Option<SanitySiteSettings> =
            self.client.query(groq, Value::Object(Map::new())).await?;
        Ok(record.map(|settings| self.transformer.site_settings(settings)))
    }

    #[instrument(skip(self))]
    async fn get_brands(&self) -> CmsResult<Vec<BrandDto>> {
        let groq = "*[_type == \"brandsCarousel\" && isActive == true] | order(order asc) { \
            _id, name, logo{ asset->, alt }, order, isActive }";
        let records: Vec<SanityBrand> =
            self.client.query(groq, Value::Object(Map::new())).await?;
        Ok(records
            .into_iter()
            .map(|brand| self.transformer.brand(brand))
            .collect())
    }
}
