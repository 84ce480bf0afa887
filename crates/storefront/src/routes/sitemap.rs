//! Sitemap and robots endpoints.
//!
//! The sitemap enumerates static routes plus CMS-backed slugs (pages, blog
//! posts, products) per supported locale. A failed slug fetch degrades that
//! section to empty instead of failing the whole document.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{instrument, warn};

use crate::cms::ProductQuery;
use crate::state::AppState;

/// Static storefront routes included for every locale.
const STATIC_PATHS: &[&str] = &["", "/products", "/deals", "/blog"];

/// Upper bound on product URLs enumerated in the sitemap.
const SITEMAP_PRODUCT_LIMIT: u32 = 100;

/// Serve `/sitemap.xml`.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let config = state.config();
    let cms = state.cms();
    let base = config.base_url.trim_end_matches('/');

    let mut entries: Vec<(String, &str)> = Vec::new();

    for locale in &config.supported_locales {
        for path in STATIC_PATHS {
            let priority = if path.is_empty() { "1.0" } else { "0.8" };
            entries.push((format!("{base}/{locale}{path}"), priority));
        }

        match cms.get_all_page_slugs(locale).await {
            Ok(slugs) => {
                entries.extend(
                    slugs
                        .iter()
                        .map(|slug| (format!("{base}/{locale}/{slug}"), "0.6")),
                );
            }
            Err(e) => warn!(locale = %locale, "Skipping page slugs in sitemap: {e}"),
        }

        match cms.get_all_post_slugs(locale).await {
            Ok(slugs) => {
                entries.extend(
                    slugs
                        .iter()
                        .map(|slug| (format!("{base}/{locale}/blog/{slug}"), "0.6")),
                );
            }
            Err(e) => warn!(locale = %locale, "Skipping post slugs in sitemap: {e}"),
        }
    }

    // Products are not localized
    let query = ProductQuery {
        limit: Some(SITEMAP_PRODUCT_LIMIT),
        ..ProductQuery::default()
    };
    match cms.get_products(&query).await {
        Ok(response) => {
            entries.extend(
                response
                    .data
                    .iter()
                    .filter(|p| !p.slug.is_empty())
                    .map(|p| (format!("{base}/products/{}", p.slug), "0.7")),
            );
        }
        Err(e) => warn!("Skipping product slugs in sitemap: {e}"),
    }

    let body = render_sitemap(&entries);
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

/// Serve `/robots.txt`.
#[instrument(skip(state))]
pub async fn robots(State(state): State<AppState>) -> Response {
    let base = state.config().base_url.trim_end_matches('/').to_string();
    let body = format!("User-agent: *\nAllow: /\n\nSitemap: {base}/sitemap.xml\n");
    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

fn render_sitemap(entries: &[(String, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (url, priority) in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url)));
        xml.push_str(&format!("    <priority>{priority}</priority>\n"));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sitemap_escapes_urls() {
        let entries = vec![("https://vista.store/a?b=1&c=2".to_string(), "0.8")];
        let xml = render_sitemap(&entries);
        assert!(xml.contains("<loc>https://vista.store/a?b=1&amp;c=2</loc>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.starts_with("<?xml"));
    }
}
