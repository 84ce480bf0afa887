//! SEO metadata and structured-data builders.
//!
//! Builds the meta-tag payload a rendering client needs from a DTO's SEO
//! block, plus schema.org JSON-LD documents for the organization, website,
//! products, and blog posts.

use serde::Serialize;
use serde_json::{Value, json};

use vista_core::{BlogPostDto, ProductDto, SeoMetadata, SettingsDto, TwitterCard};

/// An OpenGraph image entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// OpenGraph tag set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraphTags {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<OgImage>,
}

/// Twitter card tag set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterTags {
    pub card: TwitterCard,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// The complete meta-tag payload for one page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Robots directive, e.g. "index, follow".
    pub robots: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    pub open_graph: OpenGraphTags,
    pub twitter: TwitterTags,
}

/// Build meta tags from an entity's SEO block.
#[must_use]
pub fn meta_from_seo(seo: &SeoMetadata, site_url: &str, locale: &str) -> MetaTags {
    let robots = format!(
        "{}, {}",
        if seo.noindex { "noindex" } else { "index" },
        if seo.nofollow { "nofollow" } else { "follow" },
    );

    let og_images = seo
        .og_image
        .iter()
        .map(|img| OgImage {
            url: img.url.clone(),
            width: img.width,
            height: img.height,
            alt: img.alt.clone(),
        })
        .collect();

    let twitter_images = seo.og_image.iter().map(|img| img.url.clone()).collect();

    MetaTags {
        title: seo.title.clone(),
        description: seo.description.clone(),
        keywords: seo.keywords.clone(),
        robots,
        canonical: seo.canonical.clone(),
        open_graph: OpenGraphTags {
            title: seo.title.clone(),
            description: seo.description.clone(),
            url: site_url.to_string(),
            site_name: seo.title.clone(),
            locale: locale.to_string(),
            kind: seo.og_type.clone(),
            images: og_images,
        },
        twitter: TwitterTags {
            card: seo.twitter_card,
            title: seo.title.clone(),
            description: seo.description.clone(),
            images: twitter_images,
        },
    }
}

// =============================================================================
// JSON-LD
// =============================================================================

/// schema.org Organization document.
#[must_use]
pub fn organization_schema(settings: &SettingsDto, site_url: &str) -> Value {
    let same_as: Vec<&String> = [
        settings.social.facebook.as_ref(),
        settings.social.twitter.as_ref(),
        settings.social.instagram.as_ref(),
        settings.social.linkedin.as_ref(),
        settings.social.youtube.as_ref(),
        settings.social.github.as_ref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": settings.site_name,
        "url": site_url,
        "description": settings.site_description,
        "sameAs": same_as,
    });

    if let Some(logo) = &settings.logo {
        schema["logo"] = json!(logo.url);
    }
    if let Some(email) = &settings.contact_email {
        schema["contactPoint"] = json!({
            "@type": "ContactPoint",
            "email": email,
            "contactType": "Customer Service",
        });
    }

    schema
}

/// schema.org WebSite document with a search action.
#[must_use]
pub fn website_schema(settings: &SettingsDto, site_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": settings.site_name,
        "url": site_url,
        "description": settings.site_description,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{site_url}/products?search={{search_term_string}}"),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// schema.org Product document with an Offer.
#[must_use]
pub fn product_schema(product: &ProductDto, site_url: &str, currency: &str) -> Value {
    let image_urls: Vec<&String> = product.images.iter().map(|img| &img.url).collect();
    let availability = if product.in_stock {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.name,
        "description": product.description,
        "image": image_urls,
        "category": product.category.name,
        "offers": {
            "@type": "Offer",
            "url": format!("{site_url}/products/{}", product.slug),
            "price": product.price,
            "priceCurrency": currency,
            "availability": availability,
        },
    });

    if !product.brand.is_empty() {
        schema["brand"] = json!({"@type": "Brand", "name": product.brand});
    }
    if let Some(sku) = &product.sku {
        schema["sku"] = json!(sku);
    }

    schema
}

/// schema.org BlogPosting document.
#[must_use]
pub fn article_schema(post: &BlogPostDto, site_url: &str, locale: &str, site_name: &str) -> Value {
    let article_url = format!("{site_url}/{locale}/blog/{}", post.page.slug);

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.page.title,
        "description": if post.page.description.is_empty() { &post.excerpt } else { &post.page.description },
        "datePublished": post.page.published_at.to_rfc3339(),
        "dateModified": post.page.updated_at.to_rfc3339(),
        "publisher": {
            "@type": "Organization",
            "name": site_name,
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": article_url,
        },
    });

    if let Some(image) = &post.featured_image {
        schema["image"] = json!(image.url);
    }
    if let Some(author) = &post.author {
        schema["author"] = json!({"@type": "Person", "name": author.name});
    }
    if !post.tags.is_empty() {
        schema["keywords"] = json!(post.tags.join(", "));
    }
    if let Some(categories) = &post.categories {
        let names: Vec<&String> = categories.iter().map(|c| &c.name).collect();
        schema["articleSection"] = json!(names.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(", "));
    }

    schema
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vista_core::{CategoryDto, ImageDto};

    fn seo() -> SeoMetadata {
        SeoMetadata {
            title: "Gaming Laptop | Vista Store".to_string(),
            description: "Fast.".to_string(),
            keywords: Some(vec!["laptop".to_string()]),
            og_image: Some(ImageDto {
                url: "https://cdn.example.com/a.jpg".to_string(),
                alt: "A".to_string(),
                width: 1200,
                height: 630,
                blur_data_url: None,
            }),
            og_type: "product".to_string(),
            twitter_card: TwitterCard::SummaryLargeImage,
            canonical: None,
            noindex: false,
            nofollow: true,
        }
    }

    #[test]
    fn test_meta_robots_directive() {
        let meta = meta_from_seo(&seo(), "https://vista.store", "en");
        assert_eq!(meta.robots, "index, nofollow");
        assert_eq!(meta.open_graph.kind, "product");
        assert_eq!(meta.open_graph.images.len(), 1);
        assert_eq!(meta.twitter.images.first().unwrap(), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_product_schema_offer() {
        let product = ProductDto {
            id: "p1".to_string(),
            name: "Gaming Laptop".to_string(),
            slug: "gaming-laptop".to_string(),
            sku: Some("GL-1".to_string()),
            brand: "Acme".to_string(),
            price: 50_000,
            compare_at_price: None,
            description: "Fast.".to_string(),
            short_description: None,
            images: Vec::new(),
            category: CategoryDto::uncategorized(),
            specifications: Vec::new(),
            in_stock: false,
            featured: false,
            seo: SeoMetadata::default(),
            published_at: chrono::DateTime::UNIX_EPOCH,
        };

        let schema = product_schema(&product, "https://vista.store", "EGP");
        assert_eq!(schema["offers"]["price"], 50_000);
        assert_eq!(schema["offers"]["priceCurrency"], "EGP");
        assert_eq!(schema["offers"]["availability"], "https://schema.org/OutOfStock");
        assert_eq!(schema["brand"]["name"], "Acme");
        assert_eq!(schema["sku"], "GL-1");
        assert_eq!(
            schema["offers"]["url"],
            "https://vista.store/products/gaming-laptop"
        );
    }

    #[test]
    fn test_organization_schema_collects_social_profiles() {
        let mut settings = SettingsDto::fallback("en");
        settings.social.facebook = Some("https://facebook.com/vista".to_string());
        settings.social.instagram = Some("https://instagram.com/vista".to_string());

        let schema = organization_schema(&settings, "https://vista.store");
        let same_as = schema["sameAs"].as_array().unwrap();
        assert_eq!(same_as.len(), 2);
        assert!(schema.get("contactPoint").is_none());
    }
}
