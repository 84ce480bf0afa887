//! Content DTOs crossing the provider boundary.
//!
//! JSON shape is camelCase (the documented wire contract); dates serialize as
//! ISO 8601 strings via chrono.

mod catalog;
mod content;
mod image;
mod pagination;
mod seo;
mod site;

pub use catalog::{BrandDto, CategoryDto, ProductDto, SpecificationDto};
pub use content::{
    AuthorDto, BlogPostDto, LinkTarget, NavItemDto, NavigationDto, PageDto, SettingsDto,
    SocialLinks,
};
pub use image::{HeroImage, ImageDto};
pub use pagination::{CategoriesResponse, PaginatedResponse, ProductsResponse};
pub use seo::{SeoMetadata, TwitterCard};
pub use site::{AnnouncementBar, HeroImages, HomepageDto, QuickLink, SectionHeading, SiteSettingsDto};
