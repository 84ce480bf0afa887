//! GROQ-over-HTTP transport and image URL building.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cms::CmsError;
use crate::config::SanityConfig;

use super::records::SanityAsset;

/// CDN host serving image assets.
const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

/// Envelope wrapping every query response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Error body returned by the query API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: Option<String>,
}

/// Low-level client for the content store's query API.
///
/// Queries are POSTed as `{"query": ..., "params": ...}` so filter values are
/// never interpolated into the query string.
#[derive(Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<SecretString>,
}

impl SanityClient {
    /// Create a new query API client.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        // The CDN edge serves cached reads; the live host serves fresh ones.
        let host = if config.use_cdn { "apicdn" } else { "api" };
        let endpoint = format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            config.project_id, host, config.api_version, config.dataset
        );

        Self {
            http: reqwest::Client::new(),
            endpoint,
            token: config.api_token.clone(),
        }
    }

    /// Execute a GROQ query and decode its `result` into `T`.
    ///
    /// Missing results (single-document queries with no match) decode through
    /// `Option<T>` at the call site; the envelope's `result` defaults to JSON
    /// null.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend responds with a
    /// non-success status, or the result does not match `T`.
    pub async fn query<T: serde::de::DeserializeOwned>(
        &self,
        groq: &str,
        params: Value,
    ) -> Result<T, CmsError> {
        let body = serde_json::json!({
            "query": groq,
            "params": params,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CmsError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&response_text)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.description)
                .unwrap_or_else(|| response_text.chars().take(200).collect());
            tracing::error!(
                status = %status,
                message = %message,
                "Content store returned non-success status"
            );
            return Err(CmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: QueryResponse = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse content store response"
                );
                return Err(CmsError::Parse(e));
            }
        };

        debug!(query = %groq.chars().take(80).collect::<String>(), "GROQ query ok");

        serde_json::from_value(envelope.result).map_err(CmsError::Parse)
    }
}

// =============================================================================
// Image URL building
// =============================================================================

/// Parsed `image-{id}-{width}x{height}-{format}` asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedAssetRef {
    id: String,
    width: u32,
    height: u32,
    format: String,
}

/// Parse an asset reference into its parts. Returns `None` for anything that
/// does not match the `image-{id}-{WxH}-{fmt}` shape.
fn parse_asset_ref(reference: &str) -> Option<ParsedAssetRef> {
    let mut parts = reference.split('-');
    if parts.next() != Some("image") {
        return None;
    }
    let id = parts.next()?;
    let dimensions = parts.next()?;
    let format = parts.next()?;
    if parts.next().is_some() || id.is_empty() || format.is_empty() {
        return None;
    }

    let (width, height) = dimensions.split_once('x')?;
    Some(ParsedAssetRef {
        id: id.to_string(),
        width: width.parse().ok()?,
        height: height.parse().ok()?,
        format: format.to_string(),
    })
}

/// Builds CDN URLs for image assets.
///
/// General imagery is requested cropped to the target dimensions; brand logos
/// are fitted (`fit=max`) so the original aspect ratio survives. An asset
/// that cannot be resolved yields `None`, never a broken URL.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
        }
    }

    /// URL of the original asset, from the expanded document or the reference.
    fn base_url(&self, asset: &SanityAsset) -> Option<String> {
        if let Some(url) = &asset.url
            && !url.is_empty()
        {
            return Some(url.clone());
        }

        let reference = asset.reference.as_deref().or(asset.id.as_deref())?;
        let parsed = parse_asset_ref(reference)?;
        Some(format!(
            "{IMAGE_CDN}/{}/{}/{}-{}x{}.{}",
            self.project_id, self.dataset, parsed.id, parsed.width, parsed.height, parsed.format
        ))
    }

    /// URL cropped to `width`x`height`.
    #[must_use]
    pub fn cropped(&self, asset: &SanityAsset, width: u32, height: u32) -> Option<String> {
        let base = self.base_url(asset)?;
        Some(format!("{base}?w={width}&h={height}&fit=crop&auto=format"))
    }

    /// URL constrained to `width`, preserving the original aspect ratio.
    #[must_use]
    pub fn fitted(&self, asset: &SanityAsset, width: u32) -> Option<String> {
        let base = self.base_url(asset)?;
        Some(format!("{base}?w={width}&fit=max&auto=format"))
    }

    /// Intrinsic dimensions from asset metadata, else from the reference.
    #[must_use]
    pub fn dimensions(asset: &SanityAsset) -> Option<(u32, u32)> {
        if let Some(dims) = asset.metadata.as_ref().and_then(|m| m.dimensions) {
            return Some((dims.width, dims.height));
        }
        let reference = asset.reference.as_deref().or(asset.id.as_deref())?;
        let parsed = parse_asset_ref(reference)?;
        Some((parsed.width, parsed.height))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cms::sanity::records::{SanityAssetMetadata, SanityDimensions};

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
        }
    }

    fn ref_asset(reference: &str) -> SanityAsset {
        SanityAsset {
            reference: Some(reference.to_string()),
            id: None,
            url: None,
            metadata: None,
        }
    }

    #[test]
    fn test_parse_asset_ref_valid() {
        let parsed = parse_asset_ref("image-deadbeef-1200x630-jpg").unwrap();
        assert_eq!(parsed.id, "deadbeef");
        assert_eq!(parsed.width, 1200);
        assert_eq!(parsed.height, 630);
        assert_eq!(parsed.format, "jpg");
    }

    #[test]
    fn test_parse_asset_ref_rejects_malformed() {
        assert!(parse_asset_ref("file-deadbeef-pdf").is_none());
        assert!(parse_asset_ref("image-deadbeef-jpg").is_none());
        assert!(parse_asset_ref("image-deadbeef-1200x-jpg").is_none());
        assert!(parse_asset_ref("image-deadbeef-1200x630-jpg-extra").is_none());
        assert!(parse_asset_ref("").is_none());
    }

    #[test]
    fn test_cropped_url_from_reference() {
        let url = builder()
            .cropped(&ref_asset("image-deadbeef-1600x900-png"), 1200, 630)
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/abc123/production/deadbeef-1600x900.png?w=1200&h=630&fit=crop&auto=format"
        );
    }

    #[test]
    fn test_fitted_url_preserves_aspect() {
        let url = builder()
            .fitted(&ref_asset("image-deadbeef-800x200-svg"), 400)
            .unwrap();
        assert!(url.ends_with("?w=400&fit=max&auto=format"));
        assert!(!url.contains("fit=crop"));
    }

    #[test]
    fn test_expanded_asset_url_wins_over_reference() {
        let asset = SanityAsset {
            reference: None,
            id: Some("image-deadbeef-1200x630-jpg".to_string()),
            url: Some("https://cdn.sanity.io/images/abc123/production/deadbeef-1200x630.jpg".to_string()),
            metadata: None,
        };
        let url = builder().cropped(&asset, 1200, 630).unwrap();
        assert!(url.starts_with("https://cdn.sanity.io/images/abc123/production/deadbeef-1200x630.jpg?"));
    }

    #[test]
    fn test_unresolvable_asset_yields_none() {
        let asset = SanityAsset::default();
        assert!(builder().cropped(&asset, 1200, 630).is_none());
        assert!(builder().fitted(&asset, 400).is_none());
    }

    #[test]
    fn test_dimensions_prefer_metadata() {
        let asset = SanityAsset {
            reference: Some("image-deadbeef-1200x630-jpg".to_string()),
            id: None,
            url: None,
            metadata: Some(SanityAssetMetadata {
                dimensions: Some(SanityDimensions {
                    width: 3000,
                    height: 2000,
                }),
                lqip: None,
            }),
        };
        assert_eq!(ImageUrlBuilder::dimensions(&asset), Some((3000, 2000)));
    }

    #[test]
    fn test_dimensions_fall_back_to_reference() {
        let asset = ref_asset("image-deadbeef-1200x630-jpg");
        assert_eq!(ImageUrlBuilder::dimensions(&asset), Some((1200, 630)));
    }
}
