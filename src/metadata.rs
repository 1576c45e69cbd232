//! Page metadata: `<title>`, `<meta>` tags and JSON-LD structured data.
//!
//! Every page gets a [`PageMeta`] built from the catalog and build config.
//! Titles follow the `"{page} - {site}"` template; the home page uses the
//! bare site title. OpenGraph and Twitter cards are emitted only for the
//! pages that define them (home and privacy pages).

use crate::catalog::{App, Catalog};
use crate::config::ShowcaseConfig;
use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    /// `website` or `article`.
    pub kind: &'static str,
    pub url: String,
    pub image: Option<OgImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwitterCard {
    /// `summary` or `summary_large_image`.
    pub card: &'static str,
    pub title: String,
    pub description: String,
}

/// Everything that goes into a page's `<head>` besides styles and scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: Option<String>,
    pub open_graph: Option<OpenGraph>,
    pub twitter: Option<TwitterCard>,
    /// JSON-LD documents embedded as `<script type="application/ld+json">`.
    pub structured_data: Vec<Value>,
}

/// Base URL for absolute links: the catalog's `site.url` wins over `showcase.toml`.
pub fn site_url<'a>(catalog: &'a Catalog, config: &'a ShowcaseConfig) -> &'a str {
    catalog
        .site
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| u.trim_end_matches('/'))
        .unwrap_or_else(|| config.base_url())
}

fn titled(page: &str, catalog: &Catalog) -> String {
    format!("{} - {}", page, catalog.site.title)
}

pub fn home_meta(catalog: &Catalog, config: &ShowcaseConfig) -> PageMeta {
    let url = site_url(catalog, config);
    let site = &catalog.site;
    PageMeta {
        title: site.title.clone(),
        description: site.description.clone(),
        keywords: config
            .site
            .keywords
            .iter()
            .cloned()
            .chain(std::iter::once(config.site.publisher.clone()))
            .collect(),
        canonical: Some(url.to_string()),
        open_graph: Some(OpenGraph {
            title: site.title.clone(),
            description: site.description.clone(),
            kind: "website",
            url: url.to_string(),
            image: Some(OgImage {
                url: config.site.og_image.clone(),
                width: 1200,
                height: 630,
                alt: site.title.clone(),
            }),
        }),
        twitter: Some(TwitterCard {
            card: "summary_large_image",
            title: site.title.clone(),
            description: site.description.clone(),
        }),
        structured_data: vec![website_structured_data(catalog, config)],
    }
}

pub fn app_meta(app: &App, catalog: &Catalog, config: &ShowcaseConfig) -> PageMeta {
    PageMeta {
        title: titled(&app.name, catalog),
        description: app.description.clone(),
        keywords: vec![
            "app".to_string(),
            "mobile".to_string(),
            "application".to_string(),
            app.name.clone(),
        ],
        canonical: Some(format!("{}/{}", site_url(catalog, config), app.id)),
        open_graph: None,
        twitter: None,
        structured_data: vec![software_application_structured_data(app)],
    }
}

pub fn privacy_meta(app: &App, catalog: &Catalog, config: &ShowcaseConfig) -> PageMeta {
    let title = titled(&format!("{} Privacy Policy", app.name), catalog);
    let description = format!(
        "{} Privacy Policy details how we collect, use, and protect your personal information.",
        app.name
    );
    let url = format!("{}/{}/privacy", site_url(catalog, config), app.id);
    PageMeta {
        title: title.clone(),
        description: description.clone(),
        keywords: vec![
            "privacy".to_string(),
            "policy".to_string(),
            app.name.clone(),
            "data protection".to_string(),
            "personal information".to_string(),
        ],
        canonical: Some(url.clone()),
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: description.clone(),
            kind: "article",
            url,
            image: None,
        }),
        twitter: Some(TwitterCard {
            card: "summary",
            title,
            description,
        }),
        structured_data: Vec::new(),
    }
}

pub fn not_found_meta(catalog: &Catalog) -> PageMeta {
    PageMeta {
        title: titled("App Not Found", catalog),
        description: catalog.site.description.clone(),
        keywords: Vec::new(),
        canonical: None,
        open_graph: None,
        twitter: None,
        structured_data: Vec::new(),
    }
}

// ============================================================================
// Structured data
// ============================================================================

pub fn website_structured_data(catalog: &Catalog, config: &ShowcaseConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": catalog.site.title,
        "description": catalog.site.description,
        "url": site_url(catalog, config),
    })
}

pub fn software_application_structured_data(app: &App) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": app.name,
        "description": app.description,
        "applicationCategory": "UtilitiesApplication",
        "operatingSystem": "macOS",
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD",
        },
    })
}

/// Serialize JSON-LD for embedding inside `<script>`.
///
/// `</` is escaped so catalog text can never close the script element.
fn json_ld(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Render the metadata tags for `<head>`.
pub fn render_head_meta(meta: &PageMeta, config: &ShowcaseConfig) -> Markup {
    html! {
        title { (meta.title) }
        meta name="description" content=(meta.description);
        @if !meta.keywords.is_empty() {
            meta name="keywords" content=(meta.keywords.join(", "));
        }
        meta name="author" content=(config.site.author);
        meta name="creator" content=(config.site.publisher);
        meta name="publisher" content=(config.site.publisher);
        meta name="format-detection" content="telephone=no, address=no, email=no";
        @if let Some(canonical) = &meta.canonical {
            link rel="canonical" href=(canonical);
        }
        @if let Some(og) = &meta.open_graph {
            meta property="og:title" content=(og.title);
            meta property="og:description" content=(og.description);
            meta property="og:type" content=(og.kind);
            meta property="og:url" content=(og.url);
            @if let Some(image) = &og.image {
                meta property="og:image" content=(image.url);
                meta property="og:image:width" content=(image.width);
                meta property="og:image:height" content=(image.height);
                meta property="og:image:alt" content=(image.alt);
            }
        }
        @if let Some(twitter) = &meta.twitter {
            meta name="twitter:card" content=(twitter.card);
            meta name="twitter:title" content=(twitter.title);
            meta name="twitter:description" content=(twitter.description);
        }
        @for data in &meta.structured_data {
            script type="application/ld+json" { (PreEscaped(json_ld(data))) }
        }
    }
}
