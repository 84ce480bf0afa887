//! Storefront chrome: homepage settings and site-wide settings singletons.

use serde::{Deserialize, Serialize};

use super::catalog::CategoryDto;
use super::content::SocialLinks;
use super::image::{HeroImage, ImageDto};

/// Fallback dimensions for the two supplementary hero slots.
const SIDE_IMAGE_WIDTH: u32 = 600;
const SIDE_IMAGE_HEIGHT: u32 = 400;

/// The hero image block on the homepage.
///
/// `main_images` is always populated: the provider wraps a legacy singular
/// main image into a one-element carousel, and falls back to a single empty
/// placeholder when nothing is configured, so consumers only ever check
/// whether individual entries have a non-empty url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImages {
    /// Hero carousel slides; never empty.
    pub main_images: Vec<HeroImage>,
    pub top_image: HeroImage,
    pub bottom_image: HeroImage,
}

impl Default for HeroImages {
    fn default() -> Self {
        Self {
            main_images: vec![HeroImage::placeholder(
                ImageDto::DEFAULT_WIDTH,
                ImageDto::DEFAULT_HEIGHT,
            )],
            top_image: HeroImage::placeholder(SIDE_IMAGE_WIDTH, SIDE_IMAGE_HEIGHT),
            bottom_image: HeroImage::placeholder(SIDE_IMAGE_WIDTH, SIDE_IMAGE_HEIGHT),
        }
    }
}

/// A free-form section heading on the homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeading {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display limit for the section's product list, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_limit: Option<u32>,
}

/// Homepage settings singleton.
///
/// Fetched fresh per page render; the content layer does not cache it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    pub hero_images: HeroImages,
    pub featured_categories: Vec<CategoryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_section: Option<SectionHeading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_section: Option<SectionHeading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_products_section: Option<SectionHeading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_location: Option<String>,
}

/// A footer quick link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLink {
    pub title: String,
    pub url: String,
}

/// Announcement bar configuration (top banner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementBar {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

/// Site settings singleton: footer, business hours, social links, banner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_links: Vec<QuickLink>,
    pub social_links: SocialLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement_bar: Option<AnnouncementBar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hero_images_are_checkable_without_null_checks() {
        let hero = HeroImages::default();
        assert_eq!(hero.main_images.len(), 1);
        assert!(hero.main_images.first().is_some_and(|h| h.image.is_empty()));
        assert_eq!(hero.top_image.image.width, 600);
        assert_eq!(hero.bottom_image.image.height, 400);
    }
}
