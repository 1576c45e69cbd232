//! HTML site generation.
//!
//! Loads the catalog and build config from the site root, renders every
//! [`Route`] and writes the output tree.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero with the site title and a grid of app cards
//! - **App pages** (`/{id}/index.html`): features, downloads, screenshot carousel
//! - **Privacy pages** (`/{id}/privacy/index.html`): the app's privacy policy
//! - **Not found** (`/404.html`): fallback with a link home
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── assets/
//! │   ├── style.0a1b2c3d.css      # colors from showcase.toml + static/style.css
//! │   ├── carousel.4e5f6a7b.js
//! │   └── version.8c9d0e1f.js
//! ├── images/                     # copied from public/
//! └── pixel-notes/
//!     ├── index.html
//!     └── privacy/
//!         └── index.html
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. The
//! carousel markup is laid out from [`Carousel`] so the frame ring and
//! indicators match what `static/carousel.js` drives at runtime.

use crate::assets::{self, Assets};
use crate::carousel::{Carousel, Playback, Timings};
use crate::catalog::{self, App, Catalog, CatalogError, ListedSection, Section};
use crate::config::{self, ConfigError, ShowcaseConfig};
use crate::metadata::{self, PageMeta};
use crate::sitemap;
use crate::types::{self, Route, RouteKind};
use crate::version_lookup;
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("route {0} refers to an app missing from the catalog")]
    MissingApp(String),
}

/// Summary of a finished build, consumed by [`crate::output`].
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub site_title: String,
    pub routes: Vec<Route>,
    /// Asset hrefs, e.g. `/assets/style.0a1b2c3d.css`.
    pub assets: Vec<String>,
    /// Files copied from `public/`.
    pub public_files: usize,
    /// Apps with at least one screenshot, by id, with their screenshot count.
    pub carousels: Vec<(String, usize)>,
}

/// Everything a page renderer needs besides the page's own data.
struct PageContext<'a> {
    catalog: &'a Catalog,
    config: &'a ShowcaseConfig,
    assets: &'a Assets,
}

/// Build the site in `site_root` into `output_dir`.
pub fn generate(site_root: &Path, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    let config = config::load_config(site_root)?;
    let catalog = catalog::load_catalog(site_root)?;
    let today = chrono::Utc::now().date_naive();
    generate_site(&catalog, &config, site_root, output_dir, today)
}

/// Build an already-loaded catalog. `lastmod` dates the sitemap entries.
pub fn generate_site(
    catalog: &Catalog,
    config: &ShowcaseConfig,
    site_root: &Path,
    output_dir: &Path,
    lastmod: NaiveDate,
) -> Result<BuildReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let public_files = assets::copy_public(site_root, output_dir)?;

    let assets = Assets::build(&config::generate_color_css(&config.colors));
    assets.write(output_dir)?;

    let ctx = PageContext {
        catalog,
        config,
        assets: &assets,
    };
    let routes = types::routes(catalog);
    for route in &routes {
        let page = render_route(route, &ctx)?;
        let path = output_dir.join(&route.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, page.into_string())?;
    }

    let base_url = metadata::site_url(catalog, config);
    fs::write(
        output_dir.join("sitemap.xml"),
        sitemap::render_sitemap(&routes, base_url, lastmod)?,
    )?;
    fs::write(output_dir.join("robots.txt"), sitemap::render_robots(base_url))?;

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        site_title: catalog.site.title.clone(),
        routes,
        assets: assets.iter().map(|a| a.href.clone()).collect(),
        public_files,
        carousels: catalog
            .apps
            .iter()
            .filter(|app| !app.screenshots.is_empty())
            .map(|app| (app.id.clone(), app.screenshots.len()))
            .collect(),
    })
}

fn render_route(route: &Route, ctx: &PageContext) -> Result<Markup, GenerateError> {
    let app = |id: &str| {
        ctx.catalog
            .find_app(id)
            .ok_or_else(|| GenerateError::MissingApp(route.path.clone()))
    };
    Ok(match &route.kind {
        RouteKind::Home => render_index(ctx),
        RouteKind::App(id) => render_app_page(app(id)?, ctx),
        RouteKind::Privacy(id) => render_privacy_page(app(id)?, ctx),
        RouteKind::NotFound => render_not_found(ctx),
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    meta: &PageMeta,
    ctx: &PageContext,
    scripts: &[&str],
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (metadata::render_head_meta(meta, ctx.config))
                link rel="stylesheet" href=(ctx.assets.stylesheet.href);
                @for src in scripts {
                    script src=(src) defer {}
                }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn app_icon(app: &App, large: bool) -> Markup {
    html! {
        div.app-icon.large[large] {
            img src=(app.icon) alt={ (app.name) " icon" };
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page with the app grid
fn render_index(ctx: &PageContext) -> Markup {
    let site = &ctx.catalog.site;
    let content = html! {
        div.home-backdrop {}
        div.home-veil {}
        main.home-page {
            header.hero {
                h1 { (site.title) }
                p { (site.description) }
            }
            div.app-grid {
                @for app in &ctx.catalog.apps {
                    a.app-card href={ "/" (app.id) "/" } {
                        (app_icon(app, false))
                        h2 { (app.name) }
                        p { (app.description) }
                    }
                }
            }
        }
    };

    base_document(
        &metadata::home_meta(ctx.catalog, ctx.config),
        ctx,
        &[],
        Some("home"),
        content,
    )
}

/// Renders an app landing page
fn render_app_page(app: &App, ctx: &PageContext) -> Markup {
    let lookup_id = version_lookup::lookup_id(app);
    let mut scripts = vec![ctx.assets.carousel_js.href.as_str()];
    if lookup_id.is_some() {
        scripts.push(ctx.assets.version_js.href.as_str());
    }

    let content = html! {
        main.container.app-page {
            nav.breadcrumb {
                a href="/" { "← " (ctx.catalog.site.title) }
            }
            header.app-header {
                (app_icon(app, true))
                h1 { (app.name) }
                p { (app.description) }
                @if !app.details.is_empty() {
                    p.app-details { (app.details) }
                }
                @if let Some(id) = &lookup_id {
                    p.version-info.muted
                        data-appstore-id=(id)
                        data-lookup-endpoint=(version_lookup::LOOKUP_ENDPOINT) {
                        (version_lookup::PLACEHOLDER)
                    }
                }
            }
            @if app.has_download_links() {
                div.downloads {
                    @for (label, url) in app.download.links() {
                        a.download-button href=(url) target="_blank" rel="noopener noreferrer" {
                            (label)
                        }
                    }
                }
            }
            section.features {
                h2 { "Main Features" }
                @for feature in &app.features {
                    div.feature {
                        @if let Some(icon) = &feature.icon {
                            span.feature-icon { (icon) }
                        }
                        div {
                            h3 { (feature.title) }
                            @if let Some(description) = &feature.description {
                                p { (description) }
                            }
                        }
                    }
                }
            }
            (render_carousel(app, ctx.config))
        }
        footer.site-footer {
            a href={ "/" (app.id) "/privacy/" } { "Privacy Policy" }
        }
    };

    base_document(
        &metadata::app_meta(app, ctx.catalog, ctx.config),
        ctx,
        &scripts,
        None,
        content,
    )
}

fn playback_attr(playback: Playback) -> &'static str {
    match playback {
        Playback::Static => "static",
        Playback::Autoplaying => "autoplaying",
        Playback::Paused { .. } => "paused",
        Playback::Modal => "modal",
    }
}

/// Renders the screenshot carousel for an app.
///
/// Frames follow the display ring, indicators one per real image. Timings are
/// handed to the browser runtime through `data-*` attributes.
pub fn render_carousel(app: &App, config: &ShowcaseConfig) -> Markup {
    let carousel = Carousel::new(app.screenshots.clone(), Timings::from(&config.carousel));
    let timings = carousel.timings();
    let count = carousel.len();
    let alt = |frame: usize| {
        let index = carousel.index_of_frame(frame).unwrap_or(0);
        format!("{} screenshot {}", app.name, index + 1)
    };

    html! {
        section.carousel
            data-count=(count)
            data-autoplay-interval=(timings.autoplay_interval.as_millis())
            data-quiet-period=(timings.quiet_period.as_millis())
            data-settle-delay=(timings.settle_delay.as_millis())
            data-current=(carousel.current_index())
            data-playback=(playback_attr(carousel.playback())) {
            h2 { "Screenshots" }
            div.carousel-window {
                div.carousel-viewport {
                    @for (frame, src) in carousel.ring().into_iter().enumerate() {
                        div.carousel-frame data-frame=(frame) {
                            img src=(src) alt=(alt(frame)) loading="lazy";
                        }
                    }
                }
                @if carousel.is_padded() {
                    div.carousel-fade.left {}
                    div.carousel-fade.right {}
                }
            }
            div.carousel-indicators {
                @for indicator in carousel.indicators() {
                    button.carousel-dot.active[indicator.active]
                        type="button"
                        data-index=(indicator.index)
                        aria-label={ "Go to screenshot " (indicator.index + 1) }
                        aria-current=(if indicator.active { "true" } else { "false" }) {}
                }
            }
            @if !carousel.is_empty() {
                div.carousel-modal hidden {
                    div.carousel-modal-content {
                        button.carousel-close type="button" aria-label="Close" { "×" }
                        @if carousel.is_padded() {
                            button.carousel-prev type="button" aria-label="Previous screenshot" { "‹" }
                            button.carousel-next type="button" aria-label="Next screenshot" { "›" }
                        }
                        img.carousel-modal-image src="" alt="";
                        div.carousel-counter {}
                    }
                }
            }
        }
    }
}

fn listed_section(section: &ListedSection) -> Markup {
    html! {
        section {
            h2 { (section.title) }
            p { (section.content) }
            @if !section.items.is_empty() {
                ul {
                    @for item in &section.items {
                        li { (item) }
                    }
                }
            }
        }
    }
}

fn plain_section(section: &Section) -> Markup {
    html! {
        section {
            h2 { (section.title) }
            p { (section.content) }
        }
    }
}

/// Renders an app's privacy policy
fn render_privacy_page(app: &App, ctx: &PageContext) -> Markup {
    let policy = &app.privacy_policy;
    let contact = &policy.contact_us;

    let content = html! {
        main.container.privacy-page {
            nav.breadcrumb {
                a href={ "/" (app.id) "/" } { "← " (app.name) }
            }
            h1 { (app.name) " Privacy Policy" }
            p.muted { "Last updated: " (policy.last_updated) }
            (listed_section(&policy.information_we_collect))
            (listed_section(&policy.how_we_use_information))
            (listed_section(&policy.information_sharing))
            (listed_section(&policy.third_party_services))
            (plain_section(&policy.data_security))
            (listed_section(&policy.your_rights))
            p { "To exercise the above rights, please contact us through the contact information below." }
            section {
                h2 { (contact.title) }
                p { (contact.content) }
                p { "Email: " a href={ "mailto:" (contact.email) } { (contact.email) } }
                p { "Address: " (contact.address) }
            }
            (plain_section(&policy.changes_to_privacy_policy))
        }
        footer.site-footer {
            a href={ "/" (app.id) "/" } {
                (app_icon(app, false))
            }
        }
    };

    base_document(
        &metadata::privacy_meta(app, ctx.catalog, ctx.config),
        ctx,
        &[],
        None,
        content,
    )
}

/// Renders the not-found page
fn render_not_found(ctx: &PageContext) -> Markup {
    let content = html! {
        main.not-found {
            h1 { "App Not Found" }
            p.muted { "The page you are looking for does not exist." }
            a href="/" { "← Back to " (ctx.catalog.site.title) }
        }
    };

    base_document(
        &metadata::not_found_meta(ctx.catalog),
        ctx,
        &[],
        None,
        content,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn with_ctx<R>(catalog: &Catalog, f: impl FnOnce(&PageContext) -> R) -> R {
        let config = default_config();
        let assets = Assets::build(&config::generate_color_css(&config.colors));
        let ctx = PageContext {
            catalog,
            config: &config,
            assets: &assets,
        };
        f(&ctx)
    }

    fn app_page(catalog: &Catalog, id: &str) -> String {
        with_ctx(catalog, |ctx| {
            render_app_page(find_app(catalog, id), ctx).into_string()
        })
    }

    fn privacy_page(catalog: &Catalog, id: &str) -> String {
        with_ctx(catalog, |ctx| {
            render_privacy_page(find_app(catalog, id), ctx).into_string()
        })
    }

    #[test]
    fn base_document_includes_doctype_and_stylesheet() {
        let catalog = sample_catalog();
        let html = with_ctx(&catalog, |ctx| render_not_found(ctx).into_string());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"rel="stylesheet" href="/assets/style."#));
    }

    // =========================================================================
    // Home
    // =========================================================================

    #[test]
    fn index_lists_every_app() {
        let catalog = sample_catalog();
        let html = with_ctx(&catalog, |ctx| render_index(ctx).into_string());
        assert_eq!(count_occurrences(&html, r#"class="app-card""#), 3);
        assert_in_order(&html, &[r#"href="/pixel-notes/""#, r#"href="/tally/""#, r#"href="/quiet/""#]);
        assert!(html.contains("<title>SelfStudio</title>"));
        assert!(html.contains(r#""@type":"WebSite""#));
    }

    // =========================================================================
    // App page
    // =========================================================================

    #[test]
    fn app_page_shows_version_placeholder_with_store_link() {
        let catalog = sample_catalog();
        let html = app_page(&catalog, "pixel-notes");
        assert!(html.contains("Loading version info..."));
        assert!(html.contains(r#"data-appstore-id="1234567890""#));
        assert!(html.contains(r#"data-lookup-endpoint="https://itunes.apple.com/lookup""#));
        assert!(html.contains("/assets/version."));
    }

    #[test]
    fn app_page_without_store_link_has_no_version_line() {
        let catalog = sample_catalog();
        let html = app_page(&catalog, "quiet");
        assert!(!html.contains("Loading version info..."));
        assert!(!html.contains("/assets/version."));
    }

    #[test]
    fn download_buttons_only_for_configured_links() {
        let catalog = sample_catalog();
        let html = app_page(&catalog, "pixel-notes");
        assert_eq!(count_occurrences(&html, r#"class="download-button""#), 2);
        assert_in_order(&html, &[">App Store<", ">APK<"]);
        assert!(!html.contains(">Google Play<"));

        let html = app_page(&catalog, "tally");
        assert!(!html.contains(r#"class="downloads""#));
    }

    #[test]
    fn features_render_title_only_entries() {
        let catalog = sample_catalog();
        let html = app_page(&catalog, "pixel-notes");
        assert!(html.contains("<h2>Main Features</h2>"));
        assert_eq!(count_occurrences(&html, r#"class="feature""#), 3);
        assert!(html.contains("<h3>Dark mode</h3>"));
    }

    #[test]
    fn features_heading_shown_without_features() {
        let catalog = sample_catalog();
        let html = app_page(&catalog, "quiet");
        assert!(html.contains("<h2>Main Features</h2>"));
        assert_eq!(count_occurrences(&html, r#"class="feature""#), 0);
    }

    #[test]
    fn app_page_links_to_privacy_policy() {
        let catalog = sample_catalog();
        let html = app_page(&catalog, "tally");
        assert!(html.contains(r#"<a href="/tally/privacy/">Privacy Policy</a>"#));
        assert!(html.contains("<title>Tally - SelfStudio</title>"));
    }

    // =========================================================================
    // Carousel markup
    // =========================================================================

    #[test]
    fn carousel_frames_follow_padded_ring() {
        let catalog = sample_catalog();
        let app = find_app(&catalog, "pixel-notes");
        let html = render_carousel(app, &default_config()).into_string();

        assert!(html.contains(r#"data-count="3""#));
        assert!(html.contains(r#"data-autoplay-interval="5000""#));
        assert!(html.contains(r#"data-quiet-period="3000""#));
        assert!(html.contains(r#"data-settle-delay="50""#));
        assert!(html.contains(r#"data-playback="autoplaying""#));
        assert_eq!(count_occurrences(&html, r#"class="carousel-frame""#), 5);
        assert_in_order(
            &html,
            &[
                "/images/pixel-notes/3.svg",
                "/images/pixel-notes/1.svg",
                "/images/pixel-notes/2.svg",
                "/images/pixel-notes/3.svg",
                "/images/pixel-notes/1.svg",
            ],
        );
        assert_eq!(count_occurrences(&html, "carousel-dot"), 3);
        assert_eq!(count_occurrences(&html, r#"class="carousel-dot active""#), 1);
        assert!(html.contains("carousel-prev"));
    }

    #[test]
    fn padding_frames_carry_real_alt_text() {
        let catalog = sample_catalog();
        let app = find_app(&catalog, "pixel-notes");
        let html = render_carousel(app, &default_config()).into_string();
        // Frame 0 shows the last image, frame 4 the first.
        assert_in_order(
            &html,
            &[
                "Pixel Notes screenshot 3",
                "Pixel Notes screenshot 1",
                "Pixel Notes screenshot 2",
                "Pixel Notes screenshot 3",
                "Pixel Notes screenshot 1",
            ],
        );
    }

    #[test]
    fn single_screenshot_is_static() {
        let catalog = sample_catalog();
        let app = find_app(&catalog, "tally");
        let html = render_carousel(app, &default_config()).into_string();
        assert!(html.contains(r#"data-playback="static""#));
        assert_eq!(count_occurrences(&html, r#"class="carousel-frame""#), 1);
        assert_eq!(count_occurrences(&html, "carousel-dot"), 1);
        assert!(!html.contains("carousel-prev"));
        assert!(!html.contains("carousel-fade"));
    }

    #[test]
    fn no_screenshots_renders_empty_carousel() {
        let catalog = sample_catalog();
        let app = find_app(&catalog, "quiet");
        let html = render_carousel(app, &default_config()).into_string();
        assert!(html.contains(r#"data-count="0""#));
        assert!(!html.contains("carousel-frame"));
        assert!(!html.contains("carousel-dot"));
        assert!(!html.contains("carousel-modal"));
    }

    #[test]
    fn carousel_timings_come_from_config() {
        let catalog = sample_catalog();
        let app = find_app(&catalog, "pixel-notes");
        let mut config = default_config();
        config.carousel.autoplay_interval_ms = 1500;
        config.carousel.settle_delay_ms = 80;
        let html = render_carousel(app, &config).into_string();
        assert!(html.contains(r#"data-autoplay-interval="1500""#));
        assert!(html.contains(r#"data-settle-delay="80""#));
    }

    // =========================================================================
    // Privacy page
    // =========================================================================

    #[test]
    fn privacy_sections_render_in_order() {
        let catalog = sample_catalog();
        let app = find_app(&catalog, "pixel-notes");
        let policy = &app.privacy_policy;
        let html = privacy_page(&catalog, "pixel-notes");

        assert!(html.contains("<h1>Pixel Notes Privacy Policy</h1>"));
        assert!(html.contains(&format!("Last updated: {}", policy.last_updated)));
        assert_in_order(
            &html,
            &[
                &policy.information_we_collect.title,
                "<li>Device model</li>",
                "<li>Crash reports</li>",
                &policy.how_we_use_information.title,
                &policy.information_sharing.title,
                &policy.third_party_services.title,
                &policy.data_security.title,
                &policy.your_rights.title,
                "To exercise the above rights, please contact us through the contact information below.",
                &policy.contact_us.title,
                &policy.contact_us.email,
                &policy.contact_us.address,
                &policy.changes_to_privacy_policy.title,
            ],
        );
    }

    #[test]
    fn privacy_footer_links_back_to_app() {
        let catalog = sample_catalog();
        let html = privacy_page(&catalog, "tally");
        assert!(html.contains(r#"<footer class="site-footer"><a href="/tally/">"#));
        assert!(html.contains(r#"property="og:type" content="article""#));
    }

    #[test]
    fn not_found_links_home() {
        let catalog = sample_catalog();
        let html = with_ctx(&catalog, |ctx| render_not_found(ctx).into_string());
        assert!(html.contains("<h1>App Not Found</h1>"));
        assert!(html.contains(r#"<a href="/">"#));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut catalog = sample_catalog();
        catalog.apps[0].name = "<script>alert('xss')</script>".to_string();
        let html = app_page(&catalog, "pixel-notes");

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Full build
    // =========================================================================

    #[test]
    fn generate_writes_full_tree() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let report = generate(site.path(), out.path()).unwrap();

        for file in [
            "index.html",
            "404.html",
            "sitemap.xml",
            "robots.txt",
            "pixel-notes/index.html",
            "pixel-notes/privacy/index.html",
            "tally/index.html",
            "quiet/privacy/index.html",
            "images/pixel-notes/1.svg",
        ] {
            assert!(out.path().join(file).exists(), "missing {file}");
        }
        assert_eq!(report.routes.len(), 8);
        assert_eq!(report.public_files, 8);
        assert_eq!(report.assets.len(), 3);
        assert!(report.assets.iter().all(|a| out.path().join(a.trim_start_matches('/')).exists()));
        assert_eq!(
            report.carousels,
            vec![("pixel-notes".to_string(), 3), ("tally".to_string(), 1)]
        );
    }

    #[test]
    fn generate_uses_site_config() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        generate(site.path(), out.path()).unwrap();

        let page = fs::read_to_string(out.path().join("pixel-notes/index.html")).unwrap();
        assert!(page.contains(r#"data-autoplay-interval="1500""#));
        assert!(page.contains(r#"data-quiet-period="1000""#));

        let sitemap = fs::read_to_string(out.path().join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://apps.example.com/pixel-notes/privacy</loc>"));
        assert!(!sitemap.contains("404"));
    }

    #[test]
    fn generate_site_dates_sitemap() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let catalog = sample_catalog();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        generate_site(&catalog, &default_config(), site.path(), out.path(), date).unwrap();

        let sitemap = fs::read_to_string(out.path().join("sitemap.xml")).unwrap();
        assert_eq!(count_occurrences(&sitemap, "<lastmod>2025-03-14</lastmod>"), 7);
    }

    #[test]
    fn generate_rejects_invalid_catalog() {
        let site = setup_site();
        fs::write(site.path().join("config.json"), "{ not json").unwrap();
        let out = TempDir::new().unwrap();
        let err = generate(site.path(), out.path()).unwrap_err();
        assert!(matches!(err, GenerateError::Catalog(CatalogError::Json(_))));
    }
}
