//! Page-data render cache.
//!
//! Owned by the HTTP layer, not the content providers: provider calls are
//! always fresh queries, and route handlers read through this cache where a
//! route's payload is stable across requests. Entries carry tags so the
//! revalidation hook can invalidate by path or by tag.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;
use tracing::warn;

/// Cache TTL for rendered page data (5 minutes).
const PAGE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached pages.
const MAX_PAGES: u64 = 1000;

/// A cached page payload with its invalidation tags.
#[derive(Debug, Clone)]
struct CachedPage {
    body: Arc<Value>,
    tags: Arc<[String]>,
}

/// Render cache keyed by request path.
#[derive(Clone)]
pub struct PageCache {
    inner: Cache<String, CachedPage>,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_PAGES)
            .time_to_live(PAGE_TTL)
            .support_invalidation_closures()
            .build();
        Self { inner }
    }

    /// Get a cached payload by request path.
    pub async fn get(&self, path: &str) -> Option<Arc<Value>> {
        self.inner.get(path).await.map(|page| page.body)
    }

    /// Insert a payload with its invalidation tags.
    pub async fn insert(&self, path: impl Into<String>, body: Value, tags: &[&str]) {
        let page = CachedPage {
            body: Arc::new(body),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        };
        self.inner.insert(path.into(), page).await;
    }

    /// Invalidate a single path.
    pub async fn invalidate_path(&self, path: &str) {
        self.inner.invalidate(path).await;
    }

    /// Invalidate every entry carrying the given tag.
    pub fn invalidate_tag(&self, tag: &str) {
        let tag = tag.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |_path, page| page.tags.iter().any(|t| *t == tag))
        {
            warn!(error = %e, "Failed to register tag invalidation predicate");
        }
    }

    /// Invalidate all cached pages.
    pub async fn invalidate_all(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = PageCache::new();
        cache
            .insert("/api/home", json!({"ok": true}), &["home"])
            .await;

        let body = cache.get("/api/home").await.unwrap();
        assert_eq!(body["ok"], true);
        assert!(cache.get("/api/other").await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_path() {
        let cache = PageCache::new();
        cache.insert("/api/home", json!(1), &["home"]).await;
        cache.invalidate_path("/api/home").await;
        assert!(cache.get("/api/home").await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_tag_removes_tagged_entries_only() {
        let cache = PageCache::new();
        cache
            .insert("/api/products/a", json!(1), &["products", "product:a"])
            .await;
        cache.insert("/api/categories", json!(2), &["categories"]).await;

        cache.invalidate_tag("products");
        cache.inner.run_pending_tasks().await;

        assert!(cache.get("/api/products/a").await.is_none());
        assert!(cache.get("/api/categories").await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = PageCache::new();
        cache.insert("/a", json!(1), &[]).await;
        cache.insert("/b", json!(2), &[]).await;
        cache.invalidate_all().await;
        assert!(cache.get("/a").await.is_none());
        assert!(cache.get("/b").await.is_none());
    }
}
