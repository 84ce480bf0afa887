//! Pagination envelopes.

use serde::{Deserialize, Serialize};

use super::catalog::{CategoryDto, ProductDto};

/// Generic paginated envelope (blog posts and other listable content).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// An empty page with the requested paging parameters.
    #[must_use]
    pub const fn empty(page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
            has_more: false,
        }
    }
}

/// Product listing envelope.
///
/// Carries its items under `data` (not `items`) with limit/offset paging;
/// this asymmetry with [`PaginatedResponse`] is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub data: Vec<ProductDto>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl ProductsResponse {
    /// An empty result set with the requested paging parameters. Not an error.
    #[must_use]
    pub const fn empty(limit: u32, offset: u32) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            limit,
            offset,
        }
    }
}

/// Category listing envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_paginated_response() {
        let page: PaginatedResponse<String> = PaginatedResponse::empty(2, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
        assert!(!page.has_more);
    }

    #[test]
    fn test_products_response_uses_data_field() {
        let resp = ProductsResponse::empty(20, 0);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("data").is_some());
        assert!(json.get("items").is_none());
        assert_eq!(json["limit"], 20);
    }
}
