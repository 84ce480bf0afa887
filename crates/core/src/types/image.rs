//! Image value objects.

use serde::{Deserialize, Serialize};

/// A resolved content image.
///
/// The `url` is always a fully-qualified HTTP(S) address built by the
/// provider's image helper; an image whose asset could not be resolved is
/// represented as `None` upstream, never as a broken URL here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    /// Fully-qualified image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Low-quality inline placeholder (data URL), when the backend provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_data_url: Option<String>,
}

impl ImageDto {
    /// Fallback width applied when the backend omits asset metadata.
    pub const DEFAULT_WIDTH: u32 = 1200;
    /// Fallback height applied when the backend omits asset metadata.
    pub const DEFAULT_HEIGHT: u32 = 630;

    /// An empty placeholder image (empty url, default dimensions).
    ///
    /// Consumers check `url.is_empty()` on individual entries instead of
    /// null-checking whole image lists.
    #[must_use]
    pub fn placeholder(width: u32, height: u32) -> Self {
        Self {
            url: String::new(),
            alt: String::new(),
            width,
            height,
            blur_data_url: None,
        }
    }

    /// Whether this image is an empty placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// An image with an optional click-through link (hero carousel slots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    #[serde(flatten)]
    pub image: ImageDto,
    /// Optional destination URL for the slide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl HeroImage {
    /// An empty placeholder slide.
    #[must_use]
    pub fn placeholder(width: u32, height: u32) -> Self {
        Self {
            image: ImageDto::placeholder(width, height),
            link: None,
        }
    }
}
