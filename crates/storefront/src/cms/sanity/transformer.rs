//! Record-to-DTO transformation.
//!
//! The only component with real logic in the provider: every DTO field gets
//! its defaulting rule applied here so that one malformed or sparse record
//! never fails a listing. See the individual methods for the rules.

use chrono::{DateTime, Utc};

use vista_core::{
    AnnouncementBar, AuthorDto, BlogPostDto, BrandDto, CategoryDto, HeroImage, HeroImages,
    HomepageDto, ImageDto, LinkTarget, NavItemDto, NavigationDto, PageDto, ProductDto, QuickLink,
    SectionHeading, SeoMetadata, SettingsDto, SiteSettingsDto, SpecificationDto, TwitterCard,
};

use super::client::ImageUrlBuilder;
use super::records::{
    SanityAuthor, SanityBrand, SanityCategory, SanityHomepage, SanityImage, SanityNavItem,
    SanityNavigation, SanityPage, SanityPost, SanityProduct, SanitySeo, SanitySettings,
    SanitySiteSettings,
};

/// Width requested for brand logos (height follows the aspect ratio).
const BRAND_LOGO_WIDTH: u32 = 400;

/// Fallback dimensions for the supplementary hero slots.
const SIDE_IMAGE_WIDTH: u32 = 600;
const SIDE_IMAGE_HEIGHT: u32 = 400;

/// Converts content-store records into DTOs.
#[derive(Debug, Clone)]
pub struct Transformer {
    images: ImageUrlBuilder,
    store_name: String,
}

impl Transformer {
    #[must_use]
    pub fn new(images: ImageUrlBuilder, store_name: impl Into<String>) -> Self {
        Self {
            images,
            store_name: store_name.into(),
        }
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Transform an image field into an `ImageDto`.
    ///
    /// An image is present only if it carries a resolvable asset; otherwise
    /// the field is absent, never a broken URL. Intrinsic dimensions come
    /// from asset metadata, else the asset reference, else 1200x630.
    #[must_use]
    pub fn image(&self, record: Option<&SanityImage>) -> Option<ImageDto> {
        let record = record?;
        let asset = record.asset.as_ref()?;
        let url = self
            .images
            .cropped(asset, ImageDto::DEFAULT_WIDTH, ImageDto::DEFAULT_HEIGHT)?;

        let (width, height) = ImageUrlBuilder::dimensions(asset)
            .unwrap_or((ImageDto::DEFAULT_WIDTH, ImageDto::DEFAULT_HEIGHT));

        Some(ImageDto {
            url,
            alt: record.alt.clone().unwrap_or_default(),
            width,
            height,
            blur_data_url: asset.metadata.as_ref().and_then(|m| m.lqip.clone()),
        })
    }

    /// Transform a brand logo: fitted, never cropped.
    #[must_use]
    pub fn brand_logo(&self, record: Option<&SanityImage>) -> Option<ImageDto> {
        let record = record?;
        let asset = record.asset.as_ref()?;
        let url = self.images.fitted(asset, BRAND_LOGO_WIDTH)?;

        let (width, height) = ImageUrlBuilder::dimensions(asset)
            .unwrap_or((ImageDto::DEFAULT_WIDTH, ImageDto::DEFAULT_HEIGHT));

        Some(ImageDto {
            url,
            alt: record.alt.clone().unwrap_or_default(),
            width,
            height,
            blur_data_url: None,
        })
    }

    /// Transform a hero slot (image plus optional click-through link).
    #[must_use]
    pub fn hero_image(&self, record: Option<&SanityImage>) -> Option<HeroImage> {
        let image = self.image(record)?;
        Some(HeroImage {
            image,
            link: record.and_then(|r| r.link.clone()),
        })
    }

    // =========================================================================
    // SEO
    // =========================================================================

    /// Transform a stored SEO block, defaulting field by field.
    #[must_use]
    pub fn seo(&self, record: &SanitySeo) -> SeoMetadata {
        SeoMetadata {
            title: record.title.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            keywords: record.keywords.clone(),
            og_image: self.image(record.og_image.as_ref()),
            og_type: record
                .og_type
                .clone()
                .unwrap_or_else(|| "website".to_string()),
            twitter_card: record
                .twitter_card
                .as_deref()
                .map_or(TwitterCard::SummaryLargeImage, TwitterCard::parse),
            canonical: record.canonical.clone(),
            noindex: record.noindex.unwrap_or(false),
            nofollow: record.nofollow.unwrap_or(false),
        }
    }

    /// SEO defaults for a product whose record has no SEO block:
    /// title `"{name} | {store}"`, description from the short-or-long
    /// description, keywords `[name, brand, category]` with blanks removed
    /// (a missing category reference contributes no keyword), og image from
    /// the first product image.
    fn product_seo_defaults(&self, record: &SanityProduct, images: &[ImageDto]) -> SeoMetadata {
        let keywords: Vec<String> = [
            record.name.clone(),
            record.brand.clone(),
            record
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        ]
        .into_iter()
        .filter(|k| !k.is_empty())
        .collect();

        SeoMetadata {
            title: format!("{} | {}", record.name, self.store_name),
            description: record
                .short_description
                .clone()
                .unwrap_or_else(|| record.description.clone()),
            keywords: Some(keywords),
            og_image: images.first().cloned(),
            og_type: "product".to_string(),
            twitter_card: TwitterCard::SummaryLargeImage,
            canonical: None,
            noindex: false,
            nofollow: false,
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Transform a category record.
    #[must_use]
    pub fn category(&self, record: SanityCategory) -> CategoryDto {
        CategoryDto {
            image: self.image(record.image.as_ref()),
            id: record.id,
            name: record.name,
            slug: record.slug.current,
            description: record.description,
            order: record.order,
            show_in_navigation: record.show_in_navigation.unwrap_or(true),
        }
    }

    /// Transform a product record.
    ///
    /// A missing category reference degrades to the synthetic placeholder
    /// category instead of failing the product.
    #[must_use]
    pub fn product(&self, record: SanityProduct) -> ProductDto {
        let images: Vec<ImageDto> = record
            .images
            .iter()
            .filter_map(|img| self.image(Some(img)))
            .collect();

        let category = record
            .category
            .clone()
            .map_or_else(CategoryDto::uncategorized, |c| self.category(c));

        let seo = record.seo.as_ref().map_or_else(
            || self.product_seo_defaults(&record, &images),
            |s| self.seo(s),
        );

        let specifications = record
            .specifications
            .into_iter()
            .map(|spec| SpecificationDto {
                label: spec.label,
                value: spec.value,
            })
            .collect();

        ProductDto {
            id: record.id,
            name: record.name,
            slug: record.slug.current,
            sku: record.sku,
            brand: record.brand,
            price: record.price,
            compare_at_price: record.compare_at_price,
            description: record.description,
            short_description: record.short_description,
            images,
            category,
            specifications,
            in_stock: record.in_stock.unwrap_or(true),
            featured: record.featured.unwrap_or(false),
            seo,
            published_at: published_at(record.published_at, record.created_at),
        }
    }

    /// Transform a brand record.
    #[must_use]
    pub fn brand(&self, record: SanityBrand) -> BrandDto {
        BrandDto {
            logo: self.brand_logo(record.logo.as_ref()),
            id: record.id,
            name: record.name,
            order: record.order.unwrap_or(0),
            is_active: record.is_active.unwrap_or(true),
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Transform a page record.
    #[must_use]
    pub fn page(&self, record: SanityPage) -> PageDto {
        let seo = record
            .seo
            .as_ref()
            .map_or_else(SeoMetadata::default, |s| self.seo(s));

        PageDto {
            id: record.id,
            slug: record.slug.current,
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            content: record.content,
            seo,
            published_at: published_at(record.published_at, record.created_at),
            updated_at: record.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
            locale: record.locale.unwrap_or_else(|| "en".to_string()),
        }
    }

    /// Transform a blog post record.
    #[must_use]
    pub fn post(&self, record: SanityPost) -> BlogPostDto {
        let featured_image = self.image(record.featured_image.as_ref());
        let author = record.author.map(|a| self.author(a));
        let categories = record
            .categories
            .map(|cats| cats.into_iter().map(|c| self.category(c)).collect());

        BlogPostDto {
            page: self.page(record.page),
            excerpt: record.excerpt.unwrap_or_default(),
            author,
            categories,
            tags: record.tags,
            featured_image,
            estimated_reading_time: record.estimated_reading_time,
        }
    }

    fn author(&self, record: SanityAuthor) -> AuthorDto {
        AuthorDto {
            avatar: self.image(record.avatar.as_ref()),
            id: record.id,
            name: record.name,
            bio: record.bio,
            social: record.social,
        }
    }

    /// Transform a global settings record.
    #[must_use]
    pub fn settings(&self, record: SanitySettings) -> SettingsDto {
        SettingsDto {
            logo: self.image(record.logo.as_ref()),
            favicon: self.image(record.favicon.as_ref()),
            site_name: record.site_name.unwrap_or_else(|| "My Site".to_string()),
            site_url: record.site_url.unwrap_or_default(),
            site_description: record.site_description.unwrap_or_default(),
            social: record.social.unwrap_or_default(),
            gtm_id: record.gtm_id,
            contact_email: record.contact_email,
            default_locale: record.default_locale.unwrap_or_else(|| "en".to_string()),
            supported_locales: record
                .supported_locales
                .unwrap_or_else(|| vec!["en".to_string()]),
        }
    }

    /// Transform a navigation record.
    #[must_use]
    pub fn navigation(&self, record: SanityNavigation) -> NavigationDto {
        NavigationDto {
            items: record.items.into_iter().map(nav_item).collect(),
        }
    }

    // =========================================================================
    // Site chrome
    // =========================================================================

    /// Transform the homepage settings record.
    ///
    /// Hero carousel backward compatibility: prefer the `mainImages` array
    /// when it yields at least one resolvable image, else wrap the legacy
    /// singular `mainImage`, else emit a single empty placeholder so the
    /// carousel is never absent.
    #[must_use]
    pub fn homepage(&self, record: SanityHomepage) -> HomepageDto {
        let hero = record.hero_images.unwrap_or_default();

        let mut main_images: Vec<HeroImage> = hero
            .main_images
            .iter()
            .filter_map(|img| self.hero_image(Some(img)))
            .collect();
        if main_images.is_empty()
            && let Some(slide) = self.hero_image(hero.main_image.as_ref())
        {
            main_images.push(slide);
        }
        if main_images.is_empty() {
            main_images.push(HeroImage::placeholder(
                ImageDto::DEFAULT_WIDTH,
                ImageDto::DEFAULT_HEIGHT,
            ));
        }

        let hero_images = HeroImages {
            main_images,
            top_image: self
                .hero_image(hero.top_image.as_ref())
                .unwrap_or_else(|| HeroImage::placeholder(SIDE_IMAGE_WIDTH, SIDE_IMAGE_HEIGHT)),
            bottom_image: self
                .hero_image(hero.bottom_image.as_ref())
                .unwrap_or_else(|| HeroImage::placeholder(SIDE_IMAGE_WIDTH, SIDE_IMAGE_HEIGHT)),
        };

        let featured_categories = record
            .featured_categories
            .into_iter()
            .map(|c| self.category(c))
            .collect();

        HomepageDto {
            hero_title: record.hero_title,
            hero_subtitle: record.hero_subtitle,
            hero_images,
            featured_categories,
            highlighted_section: record.highlighted_section.map(section),
            categories_section: record.categories_section.map(section),
            more_products_section: record.more_products_section.map(section),
            whatsapp_number: record.whatsapp_number,
            store_location: record.store_location,
        }
    }

    /// Transform the site settings record.
    #[must_use]
    pub fn site_settings(&self, record: SanitySiteSettings) -> SiteSettingsDto {
        SiteSettingsDto {
            footer_description: record.footer_description,
            business_hours: record.business_hours,
            quick_links: record
                .quick_links
                .into_iter()
                .map(|l| QuickLink {
                    title: l.title,
                    url: l.url,
                })
                .collect(),
            social_links: record.social_links.unwrap_or_default(),
            announcement_bar: record.announcement_bar.map(|bar| AnnouncementBar {
                enabled: bar.enabled.unwrap_or(true),
                message: bar.message,
                background_color: bar.background_color,
                text_color: bar.text_color,
            }),
        }
    }
}

/// Published timestamp: explicit field, else document creation, else epoch.
fn published_at(published: Option<DateTime<Utc>>, created: Option<DateTime<Utc>>) -> DateTime<Utc> {
    published.or(created).unwrap_or(DateTime::UNIX_EPOCH)
}

fn section(record: super::records::SanitySection) -> SectionHeading {
    SectionHeading {
        title: record.title,
        description: record.description,
        product_limit: record.product_limit,
    }
}

fn nav_item(record: SanityNavItem) -> NavItemDto {
    let target = match record.target.as_deref() {
        Some("_blank") => Some(LinkTarget::Blank),
        Some("_self") => Some(LinkTarget::Current),
        _ => None,
    };

    NavItemDto {
        id: record.key.or(record.id).unwrap_or_default(),
        label: record.label.unwrap_or_default(),
        href: record.href.unwrap_or_default(),
        target,
        children: record
            .children
            .map(|items| items.into_iter().map(nav_item).collect()),
    }
}
