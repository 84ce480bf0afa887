//! Catalog value objects: products, categories, and brands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::image::ImageDto;
use super::seo::SeoMetadata;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Opaque backend id. Empty for the synthetic placeholder category.
    pub id: String,
    pub name: String,
    /// URL-safe unique identifier within the catalog.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDto>,
    /// Display order within navigation and listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub show_in_navigation: bool,
}

impl CategoryDto {
    /// The synthetic placeholder used when a product's category reference is
    /// missing or unresolved. Listings keep rendering instead of failing.
    #[must_use]
    pub fn uncategorized() -> Self {
        Self {
            id: String::new(),
            name: "Uncategorized".to_string(),
            slug: "uncategorized".to_string(),
            description: None,
            image: None,
            order: None,
            show_in_navigation: false,
        }
    }
}

/// A label/value specification row on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationDto {
    pub label: String,
    pub value: String,
}

/// A catalog product.
///
/// Prices are integers in the store currency's standard unit (no minor
/// units). The owning category is embedded by value, never by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub brand: String,
    pub price: i64,
    /// "Was" price for discount display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<i64>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Ordered product gallery; the first image doubles as the OG image.
    pub images: Vec<ImageDto>,
    pub category: CategoryDto,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<SpecificationDto>,
    pub in_stock: bool,
    pub featured: bool,
    pub seo: SeoMetadata,
    pub published_at: DateTime<Utc>,
}

impl ProductDto {
    /// Whether the product has an active discount.
    ///
    /// True only when a compare-at price is set and strictly greater than the
    /// current price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.compare_at_price.is_some_and(|compare| compare > self.price)
    }

    /// Discount percentage, rounded to the nearest integer.
    ///
    /// `round((compare_at_price - price) / compare_at_price * 100)` when a
    /// discount is active, otherwise 0. Never negative.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        match self.compare_at_price {
            Some(compare) if compare > self.price => {
                #[allow(clippy::cast_precision_loss)] // catalog prices fit f64 exactly
                let ratio = (compare - self.price) as f64 / compare as f64;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    (ratio * 100.0).round() as u32
                }
            }
            _ => 0,
        }
    }
}

/// A brand shown in the storefront brand carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDto {
    pub id: String,
    pub name: String,
    /// Brand logo, aspect-ratio preserved (never cropped).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageDto>,
    pub order: i64,
    pub is_active: bool,
}
