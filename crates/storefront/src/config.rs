//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VISTA_BASE_URL` - Public URL for the storefront
//! - `REVALIDATION_SECRET` - Shared secret for the cache revalidation hook
//!   (min 32 chars, high entropy)
//!
//! ## Optional
//! - `VISTA_HOST` - Bind address (default: 127.0.0.1)
//! - `VISTA_PORT` - Listen port (default: 3000)
//! - `CMS_PROVIDER` - Content provider (`sanity` or `payload`, default: sanity)
//! - `SITE_NAME` - Store display name (default: Vista Store)
//! - `SITE_CURRENCY` - ISO 4217 currency code for prices (default: EGP)
//! - `WHATSAPP_NUMBER` - WhatsApp business number for product inquiries
//! - `DEFAULT_LOCALE` - Default content locale (default: en)
//! - `SUPPORTED_LOCALES` - Comma-separated locale list (default: en)
//! - `SANITY_PROJECT_ID` - Content store project id (default: placeholder)
//! - `SANITY_DATASET` - Content store dataset (default: production)
//! - `SANITY_API_VERSION` - Content store API version (default: 2024-01-01)
//! - `SANITY_API_TOKEN` - Content store read token (for private datasets)
//! - `SANITY_USE_CDN` - Query through the CDN edge (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Store display name (used in SEO title fallbacks)
    pub site_name: String,
    /// ISO 4217 currency code for catalog prices
    pub currency: String,
    /// WhatsApp business number for product inquiries
    pub whatsapp_number: Option<String>,
    /// Default content locale
    pub default_locale: String,
    /// Locales the storefront serves
    pub supported_locales: Vec<String>,
    /// Content provider selection string (`sanity` / `payload`)
    pub cms_provider: String,
    /// Content store (Sanity) configuration
    pub sanity: SanityConfig,
    /// Shared secret for the revalidation hook
    pub revalidation_secret: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Content store API configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct SanityConfig {
    /// Project id (subdomain of the query API)
    pub project_id: String,
    /// Dataset name (e.g., production)
    pub dataset: String,
    /// Query API version date (e.g., 2024-01-01)
    pub api_version: String,
    /// Route queries through the CDN edge
    pub use_cdn: bool,
    /// Read token for private datasets
    pub api_token: Option<SecretString>,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("use_cdn", &self.use_cdn)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("VISTA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VISTA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VISTA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VISTA_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("VISTA_BASE_URL")?;

        let site_name = get_env_or_default("SITE_NAME", "Vista Store");
        let currency = get_env_or_default("SITE_CURRENCY", "EGP");
        let whatsapp_number = get_optional_env("WHATSAPP_NUMBER");
        let default_locale = get_env_or_default("DEFAULT_LOCALE", "en");
        let supported_locales = parse_locales(
            &get_env_or_default("SUPPORTED_LOCALES", "en"),
            &default_locale,
        );

        let cms_provider = get_env_or_default("CMS_PROVIDER", "sanity");
        let sanity = SanityConfig::from_env()?;

        let revalidation_secret = get_validated_secret("REVALIDATION_SECRET")?;
        validate_secret_length(&revalidation_secret, "REVALIDATION_SECRET")?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            site_name,
            currency,
            whatsapp_number,
            default_locale,
            supported_locales,
            cms_provider,
            sanity,
            revalidation_secret,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the given locale is one the storefront serves.
    #[must_use]
    pub fn supports_locale(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|l| l == locale)
    }
}

impl SanityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let use_cdn = get_env_or_default("SANITY_USE_CDN", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SANITY_USE_CDN".to_string(), e.to_string())
            })?;

        Ok(Self {
            // Placeholder values keep the server bootable before the content
            // store is configured; queries will 404 and pages degrade to empty.
            project_id: get_env_or_default("SANITY_PROJECT_ID", "placeholder"),
            dataset: get_env_or_default("SANITY_DATASET", "production"),
            api_version: get_env_or_default("SANITY_API_VERSION", "2024-01-01"),
            use_cdn,
            api_token: get_optional_env("SANITY_API_TOKEN").map(SecretString::from),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated locale list, always including the default locale.
fn parse_locales(raw: &str, default_locale: &str) -> Vec<String> {
    let mut locales: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if !locales.iter().any(|l| l == default_locale) {
        locales.insert(0, default_locale.to_string());
    }
    locales
}

/// Validate that a shared secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            site_name: "Vista Store".to_string(),
            currency: "EGP".to_string(),
            whatsapp_number: None,
            default_locale: "en".to_string(),
            supported_locales: vec!["en".to_string()],
            cms_provider: "sanity".to_string(),
            sanity: SanityConfig {
                project_id: "abc123".to_string(),
                dataset: "production".to_string(),
                api_version: "2024-01-01".to_string(),
                use_cdn: false,
                api_token: Some(SecretString::from("sk_super_secret_token")),
            },
            revalidation_secret: SecretString::from("x".repeat(32)),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-revalidation-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_secret_length_too_short() {
        let secret = SecretString::from("short");
        let result = validate_secret_length(&secret, "TEST_SECRET");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_locales_includes_default() {
        let locales = parse_locales("ar, de", "en");
        assert_eq!(locales, vec!["en", "ar", "de"]);
    }

    #[test]
    fn test_parse_locales_no_duplicate_default() {
        let locales = parse_locales("en,ar", "en");
        assert_eq!(locales, vec!["en", "ar"]);
    }

    #[test]
    fn test_supports_locale() {
        let mut config = test_config();
        config.supported_locales = vec!["en".to_string(), "ar".to_string()];
        assert!(config.supports_locale("ar"));
        assert!(!config.supports_locale("fr"));
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_sanity_config_debug_redacts_token() {
        let config = test_config();
        let debug_output = format!("{:?}", config.sanity);

        assert!(debug_output.contains("abc123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_super_secret_token"));
    }
}
