//! Content value objects: pages, blog posts, navigation, and global settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::CategoryDto;
use super::image::ImageDto;
use super::seo::SeoMetadata;

/// A marketing/content page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Opaque rich-text content (portable text); passed through untouched.
    pub content: serde_json::Value,
    pub seo: SeoMetadata,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub locale: String,
}

/// Social profile links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Global site settings for one locale.
///
/// `get_settings` never returns null: when the backend holds no document the
/// provider substitutes [`SettingsDto::fallback`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub site_name: String,
    pub site_url: String,
    pub site_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<ImageDto>,
    pub social: SocialLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtm_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub default_locale: String,
    pub supported_locales: Vec<String>,
}

impl SettingsDto {
    /// Built-in defaults used when the backend has no settings document.
    #[must_use]
    pub fn fallback(locale: &str) -> Self {
        Self {
            site_name: "My Site".to_string(),
            site_url: String::new(),
            site_description: String::new(),
            logo: None,
            favicon: None,
            social: SocialLinks::default(),
            gtm_id: None,
            contact_email: None,
            default_locale: locale.to_string(),
            supported_locales: vec![locale.to_string()],
        }
    }
}

/// Link target for navigation items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "_blank")]
    Blank,
    #[serde(rename = "_self")]
    Current,
}

/// One navigation entry, with optional one-level children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItemDto {
    pub id: String,
    pub label: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LinkTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavItemDto>>,
}

/// Site navigation. Empty items list when none is configured.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDto {
    pub items: Vec<NavItemDto>,
}

/// A blog post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<ImageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
}

/// A blog post: a page plus editorial fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDto {
    #[serde(flatten)]
    pub page: PageDto,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryDto>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<ImageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_reading_time: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fallback_uses_requested_locale() {
        let settings = SettingsDto::fallback("de");
        assert_eq!(settings.site_name, "My Site");
        assert_eq!(settings.default_locale, "de");
        assert_eq!(settings.supported_locales, vec!["de".to_string()]);
    }

    #[test]
    fn test_link_target_wire_format() {
        let json = serde_json::to_string(&LinkTarget::Blank).expect("serialize");
        assert_eq!(json, "\"_blank\"");
        let parsed: LinkTarget = serde_json::from_str("\"_self\"").expect("deserialize");
        assert_eq!(parsed, LinkTarget::Current);
    }
}
