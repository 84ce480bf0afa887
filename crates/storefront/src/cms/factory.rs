//! Provider selection.
//!
//! A pure mapping from the configuration string to a provider instance,
//! evaluated once at bootstrap. Unrecognized values log a warning and fall
//! back to the default provider instead of failing startup.

use std::sync::Arc;

use tracing::warn;

use crate::config::StorefrontConfig;

use super::CmsService;
use super::payload::PayloadService;
use super::sanity::SanityService;

/// The available content providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CmsProvider {
    #[default]
    Sanity,
    Payload,
}

impl CmsProvider {
    /// Parse a provider name (case-insensitive). Unrecognized values warn and
    /// fall back to the default provider.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "sanity" => Self::Sanity,
            "payload" => Self::Payload,
            other => {
                warn!(provider = %other, "Unknown CMS provider; falling back to sanity");
                Self::Sanity
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sanity => "sanity",
            Self::Payload => "payload",
        }
    }
}

/// Construct the configured provider.
///
/// Called once at application bootstrap; the returned service is shared via
/// `AppState` rather than a process-wide singleton, so tests can substitute a
/// double.
#[must_use]
pub fn create_cms_service(config: &StorefrontConfig) -> Arc<dyn CmsService> {
    match CmsProvider::parse(&config.cms_provider) {
        CmsProvider::Sanity => Arc::new(SanityService::new(&config.sanity, &config.site_name)),
        CmsProvider::Payload => Arc::new(PayloadService::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config_with_provider(provider: &str) -> StorefrontConfig {
        StorefrontConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            site_name: "Vista Store".to_string(),
            currency: "EGP".to_string(),
            whatsapp_number: None,
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string()],
            cms_provider: provider.to_string(),
            sanity: crate::config::SanityConfig {
                project_id: "abc123".to_string(),
                dataset: "production".to_string(),
                api_version: "2024-01-01".to_string(),
                use_cdn: false,
                api_token: None,
            },
            revalidation_secret: SecretString::from("x".repeat(32)),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_parse_known_providers() {
        assert_eq!(CmsProvider::parse("sanity"), CmsProvider::Sanity);
        assert_eq!(CmsProvider::parse("Payload"), CmsProvider::Payload);
        assert_eq!(CmsProvider::parse("SANITY"), CmsProvider::Sanity);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_default() {
        assert_eq!(CmsProvider::parse("contentful"), CmsProvider::Sanity);
        assert_eq!(CmsProvider::parse(""), CmsProvider::Sanity);
    }

    #[test]
    fn test_factory_unknown_provider_returns_default_instance() {
        let service = create_cms_service(&config_with_provider("not-a-provider"));
        assert_eq!(service.name(), "sanity");
    }

    #[test]
    fn test_factory_selects_payload() {
        let service = create_cms_service(&config_with_provider("payload"));
        assert_eq!(service.name(), "payload");
    }
}
