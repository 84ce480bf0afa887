//! Content store (Sanity) provider implementation.
//!
//! # Architecture
//!
//! - [`client`] - GROQ-over-HTTP transport and the image URL builder
//! - [`records`] - typed schemas for raw backend documents, validated at the
//!   deserialization boundary with field-level defaults
//! - [`transformer`] - record-to-DTO mapping with every fallback rule
//! - [`service`] - the [`CmsService`](super::CmsService) implementation:
//!   parameterized queries with fixed projections per operation
//!
//! Queries are never interpolated with user input: filter values travel as
//! out-of-band `$params` alongside the query string.

mod client;
pub mod records;
mod service;
mod transformer;

pub use client::{ImageUrlBuilder, SanityClient};
pub use service::SanityService;
