//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::PageCache;
use crate::cms::CmsService;
use crate::cms::factory::create_cms_service;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The content provider is constructed once here
/// at bootstrap and injected everywhere through this state - there is no
/// process-wide provider singleton.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cms: Arc<dyn CmsService>,
    page_cache: PageCache,
}

impl AppState {
    /// Create application state with the configured content provider.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let cms = create_cms_service(&config);
        Self::with_cms(config, cms)
    }

    /// Create application state with an explicit provider (test doubles).
    #[must_use]
    pub fn with_cms(config: StorefrontConfig, cms: Arc<dyn CmsService>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cms,
                page_cache: PageCache::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the content provider.
    #[must_use]
    pub fn cms(&self) -> &Arc<dyn CmsService> {
        &self.inner.cms
    }

    /// Get the page-data render cache.
    #[must_use]
    pub fn page_cache(&self) -> &PageCache {
        &self.inner.page_cache
    }
}
