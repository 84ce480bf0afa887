//! SEO metadata value objects.

use serde::{Deserialize, Serialize};

use super::image::ImageDto;

/// Twitter card variant for social sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwitterCard {
    Summary,
    #[default]
    SummaryLargeImage,
    App,
    Player,
}

impl TwitterCard {
    /// Parse a backend string, defaulting to `summary_large_image` for
    /// anything unrecognized.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "summary" => Self::Summary,
            "app" => Self::App,
            "player" => Self::Player,
            _ => Self::SummaryLargeImage,
        }
    }
}

/// SEO metadata attached to every content entity.
///
/// Providers fill defaults when the backend record omits its SEO block; see
/// the transformer for the per-entity fallback rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<ImageDto>,
    /// OpenGraph object type (`website`, `article`, `product`, ...).
    pub og_type: String,
    pub twitter_card: TwitterCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    pub noindex: bool,
    pub nofollow: bool,
}

impl Default for SeoMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            keywords: None,
            og_image: None,
            og_type: "website".to_string(),
            twitter_card: TwitterCard::default(),
            canonical: None,
            noindex: false,
            nofollow: false,
        }
    }
}
