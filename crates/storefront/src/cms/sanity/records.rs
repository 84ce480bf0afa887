//! Typed schemas for raw content-store documents.
//!
//! Every field is tolerant (`#[serde(default)]`) so one malformed record
//! degrades to field-level defaults instead of failing a whole listing. The
//! transformer applies the semantic fallbacks on top of these.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use vista_core::SocialLinks;

/// Slug wrapper (`{"current": "..."}`); resolves to `""` when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanitySlug {
    #[serde(default)]
    pub current: String,
}

/// Image asset: either an expanded asset document (`asset->` projection,
/// carrying a CDN url and metadata) or a bare reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityAsset {
    /// Unexpanded reference (`image-{id}-{WxH}-{fmt}`).
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    /// Expanded asset document id (same format as the reference).
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// CDN url of the original asset, when expanded.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub metadata: Option<SanityAssetMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityAssetMetadata {
    #[serde(default)]
    pub dimensions: Option<SanityDimensions>,
    /// Low-quality image placeholder (data URL).
    #[serde(default)]
    pub lqip: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SanityDimensions {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// An image field on a document. Present only when it carries a resolvable
/// asset; the optional `link` is used by hero slots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityImage {
    #[serde(default)]
    pub asset: Option<SanityAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// SEO block as stored on documents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitySeo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub og_image: Option<SanityImage>,
    #[serde(default)]
    pub og_type: Option<String>,
    #[serde(default)]
    pub twitter_card: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub noindex: Option<bool>,
    #[serde(default)]
    pub nofollow: Option<bool>,
}

/// Category document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityCategory {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: SanitySlug,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<SanityImage>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub show_in_navigation: Option<bool>,
}

/// Specification row on a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanitySpecification {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

/// Product document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityProduct {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: SanitySlug,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub compare_at_price: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub images: Vec<SanityImage>,
    #[serde(default)]
    pub category: Option<SanityCategory>,
    #[serde(default)]
    pub specifications: Vec<SanitySpecification>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub seo: Option<SanitySeo>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Page document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityPage {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: SanitySlug,
    #[serde(default)]
    pub description: Option<String>,
    /// Portable text; passed through untouched.
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub seo: Option<SanitySeo>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Author reference on a blog post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityAuthor {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<SanityImage>,
    #[serde(default)]
    pub social: Option<SocialLinks>,
}

/// Blog post document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityPost {
    #[serde(flatten)]
    pub page: SanityPage,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<SanityAuthor>,
    #[serde(default)]
    pub categories: Option<Vec<SanityCategory>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<SanityImage>,
    #[serde(default)]
    pub estimated_reading_time: Option<u32>,
}

/// Global settings document for one locale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitySettings {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub site_description: Option<String>,
    #[serde(default)]
    pub logo: Option<SanityImage>,
    #[serde(default)]
    pub favicon: Option<SanityImage>,
    #[serde(default)]
    pub social: Option<SocialLinks>,
    #[serde(default)]
    pub gtm_id: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub default_locale: Option<String>,
    #[serde(default)]
    pub supported_locales: Option<Vec<String>>,
}

/// Navigation item; `_key` for array members, `_id` for references.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityNavItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<SanityNavItem>>,
}

/// Navigation document for one locale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityNavigation {
    #[serde(default)]
    pub items: Vec<SanityNavItem>,
}

/// Homepage hero block.
///
/// Carries both the carousel array and the legacy singular main image; the
/// transformer prefers the array and wraps the legacy field when only it is
/// present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityHeroImages {
    #[serde(default)]
    pub main_images: Vec<SanityImage>,
    /// Legacy singular slot, kept for older documents.
    #[serde(default)]
    pub main_image: Option<SanityImage>,
    #[serde(default)]
    pub top_image: Option<SanityImage>,
    #[serde(default)]
    pub bottom_image: Option<SanityImage>,
}

/// Free-form homepage section heading.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitySection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_limit: Option<u32>,
}

/// Homepage settings document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityHomepage {
    #[serde(default)]
    pub hero_title: Option<String>,
    #[serde(default)]
    pub hero_subtitle: Option<String>,
    #[serde(default)]
    pub hero_images: Option<SanityHeroImages>,
    #[serde(default)]
    pub featured_categories: Vec<SanityCategory>,
    #[serde(default)]
    pub highlighted_section: Option<SanitySection>,
    #[serde(default)]
    pub categories_section: Option<SanitySection>,
    #[serde(default)]
    pub more_products_section: Option<SanitySection>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub store_location: Option<String>,
}

/// Footer quick link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityQuickLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Announcement bar block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityAnnouncementBar {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

/// Site settings document (footer, business hours, banner).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitySiteSettings {
    #[serde(default)]
    pub footer_description: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub quick_links: Vec<SanityQuickLink>,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub announcement_bar: Option<SanityAnnouncementBar>,
}

/// Brand carousel document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityBrand {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<SanityImage>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_record_tolerates_missing_fields() {
        let record: SanityProduct = serde_json::from_value(json!({
            "_id": "prod-1",
            "name": "Laptop"
        }))
        .unwrap();

        assert_eq!(record.id, "prod-1");
        assert_eq!(record.slug.current, "");
        assert_eq!(record.price, 0);
        assert!(record.category.is_none());
        assert!(record.images.is_empty());
    }

    #[test]
    fn test_slug_wrapper_resolves_current() {
        let record: SanityProduct = serde_json::from_value(json!({
            "_id": "prod-1",
            "slug": {"current": "gaming-laptop", "_type": "slug"}
        }))
        .unwrap();

        assert_eq!(record.slug.current, "gaming-laptop");
    }

    #[test]
    fn test_hero_images_accepts_both_shapes() {
        let hero: SanityHeroImages = serde_json::from_value(json!({
            "mainImage": {"asset": {"_ref": "image-abc-1200x630-jpg"}, "alt": "legacy"},
            "mainImages": []
        }))
        .unwrap();

        assert!(hero.main_images.is_empty());
        assert_eq!(hero.main_image.unwrap().alt.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_post_record_flattens_page_fields() {
        let record: SanityPost = serde_json::from_value(json!({
            "_id": "post-1",
            "title": "Hello",
            "excerpt": "First post",
            "tags": ["news"]
        }))
        .unwrap();

        assert_eq!(record.page.id, "post-1");
        assert_eq!(record.page.title.as_deref(), Some("Hello"));
        assert_eq!(record.excerpt.as_deref(), Some("First post"));
        assert_eq!(record.tags, vec!["news".to_string()]);
    }
}
