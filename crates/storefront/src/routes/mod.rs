//! Route handlers for the storefront content API.
//!
//! Aggregate page-data endpoints (`/api/home`, `/api/products`) degrade
//! failed backend calls to empty sections; entity endpoints
//! (`/api/products/{slug}`, `/api/pages/{slug}`) return 404 for unknown slugs
//! and 502 when the backend is down. Stable payloads read through the page
//! cache, which the revalidation hook invalidates by path or tag.

pub mod blog;
pub mod categories;
pub mod home;
pub mod pages;
pub mod products;
pub mod revalidate;
pub mod site;
pub mod sitemap;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::show))
        .route("/api/products", get(products::index))
        .route("/api/products/{slug}", get(products::show))
        .route("/api/deals", get(products::deals))
        .route("/api/categories", get(categories::index))
        .route("/api/categories/{slug}", get(categories::show))
        .route("/api/pages", get(pages::index))
        .route("/api/pages/{slug}", get(pages::show))
        .route("/api/posts", get(blog::index))
        .route("/api/posts/{slug}", get(blog::show))
        .route("/api/settings", get(site::settings))
        .route("/api/site-settings", get(site::site_settings))
        .route("/api/navigation", get(site::navigation))
        .route("/api/brands", get(site::brands))
        .route("/api/revalidate", post(revalidate::revalidate))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/robots.txt", get(sitemap::robots))
}

/// Locale selection query parameter shared by content routes.
#[derive(Debug, serde::Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    /// Resolve the requested locale against configuration.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a locale the storefront does not serve.
    pub fn resolve(&self, state: &AppState) -> crate::error::Result<String> {
        match &self.locale {
            None => Ok(state.config().default_locale.clone()),
            Some(locale) if state.config().supports_locale(locale) => Ok(locale.clone()),
            Some(locale) => Err(crate::error::AppError::BadRequest(format!(
                "Unsupported locale: {locale}"
            ))),
        }
    }
}
