//! End-to-end router tests against the stub content provider.
//!
//! Exercises the HTTP surface without a network: the Payload stub returns
//! well-typed empty results, so these tests pin the degradation behavior,
//! the revalidation hook's auth, and the wire shapes.

#![allow(clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use vista_storefront::cms::payload::PayloadService;
use vista_storefront::config::{SanityConfig, StorefrontConfig};
use vista_storefront::routes;
use vista_storefront::state::AppState;

const TEST_SECRET: &str = "kJ8#mP2$vX9@qL4!wN7&zR5*tY3^bG6c";

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        site_name: "Vista Store".to_string(),
        currency: "EGP".to_string(),
        whatsapp_number: None,
        default_locale: "en".to_string(),
        supported_locales: vec!["en".to_string(), "ar".to_string()],
        cms_provider: "payload".to_string(),
        sanity: SanityConfig {
            project_id: "test".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
            api_token: None,
        },
        revalidation_secret: SecretString::from(TEST_SECRET),
        sentry_dsn: None,
    }
}

fn test_app() -> Router {
    let state = AppState::with_cms(test_config(), Arc::new(PayloadService::new()));
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::routes())
        .with_state(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_degrades_to_empty_sections() {
    let (status, body) = get_json(test_app(), "/api/home").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["categories"].as_array().unwrap().is_empty());
    assert!(body["brands"].as_array().unwrap().is_empty());
    assert!(body["featuredSections"].as_array().unwrap().is_empty());
    assert!(body.get("homepage").is_none());
}

#[tokio::test]
async fn test_products_listing_empty_but_well_typed() {
    let (status, body) = get_json(test_app(), "/api/products?sort=price-asc&category=a,b").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["products"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], 0);
    assert_eq!(body["sort"], "price-asc");
}

#[tokio::test]
async fn test_product_detail_not_found() {
    let (status, body) = get_json(test_app(), "/api/products/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Product not found")
    );
}

#[tokio::test]
async fn test_settings_fall_back_for_locale() {
    let (status, body) = get_json(test_app(), "/api/settings?locale=ar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["siteName"], "My Site");
    assert_eq!(body["defaultLocale"], "ar");
}

#[tokio::test]
async fn test_unsupported_locale_is_bad_request() {
    let (status, _) = get_json(test_app(), "/api/pages?locale=fr").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_navigation_is_empty_not_null() {
    let (status, body) = get_json(test_app(), "/api/navigation").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_site_settings_null_when_unconfigured() {
    let (status, body) = get_json(test_app(), "/api/site-settings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_posts_listing_echoes_paging() {
    let (status, body) = get_json(test_app(), "/api/posts?page=3&pageSize=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 3);
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_revalidate_rejects_bad_secret() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/revalidate?secret=wrong")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"type": "path", "path": "/api/home"}).to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revalidate_accepts_valid_secret() {
    let uri = format!("/api/revalidate?secret={}", urlencode(TEST_SECRET));
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"type": "tag", "tag": "products"}).to_string()))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["revalidated"], true);
    assert_eq!(body["type"], "tag");
}

#[tokio::test]
async fn test_robots_points_at_sitemap() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/robots.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Sitemap: http://localhost:3000/sitemap.xml"));
}

#[tokio::test]
async fn test_sitemap_includes_static_routes_per_locale() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/sitemap.xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let xml = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(xml.contains("<loc>http://localhost:3000/en</loc>"));
    assert!(xml.contains("<loc>http://localhost:3000/ar/products</loc>"));
}

/// Minimal percent-encoding for the test secret (query-string safe).
fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                char::from(b).to_string()
            }
            other => format!("%{other:02X}"),
        })
        .collect()
}
