//! # App Showcase
//!
//! A static site generator for the marketing site of a small app catalog.
//! One JSON file describes the apps; the output is a home page, a landing
//! page and a privacy policy per app, a 404 page, a sitemap, and a looping
//! screenshot carousel on every landing page.
//!
//! # Site Layout
//!
//! ```text
//! site/
//! ├── config.json        # App catalog (required)
//! ├── showcase.toml      # Build config: base URL, carousel timings, colors (optional)
//! └── public/            # Copied verbatim to the output root
//!     └── images/
//! ```
//!
//! # Pipeline
//!
//! ```text
//! load     config.json + showcase.toml  →  Catalog, ShowcaseConfig
//! route    Catalog                      →  [Route]
//! render   Route                        →  HTML (maud)
//! write    dist/{…}/index.html, assets/, sitemap.xml, robots.txt
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | `config.json` schema, parsing and validation |
//! | [`config`] | `showcase.toml` loading, stock-default merging, validation, CSS generation |
//! | [`carousel`] | Headless screenshot carousel controller: display ring, playback, modal viewer |
//! | [`types`] | Route table shared by generation, sitemap and CLI output |
//! | [`generate`] | Renders every route with Maud and writes the output tree |
//! | [`metadata`] | Titles, `<meta>` tags, OpenGraph/Twitter cards, JSON-LD |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`version_lookup`] | App Store id resolution for the client-side version badge |
//! | [`assets`] | Fingerprinted CSS/JS and the `public/` copy |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Carousel, Two Hosts
//!
//! The carousel's rules live in [`carousel::Carousel`], a deterministic state
//! machine driven by a virtual clock. The generator uses it to lay out the
//! frame ring and indicators; `static/carousel.js` performs the same
//! transitions in the browser and reads its timings from `data-*` attributes
//! the generator writes. Every behavior the page shows can be unit-tested
//! without a browser.
//!
//! ## Trailing-Slash URLs
//!
//! Every page is written as `{path}/index.html`, so `/pixel-notes/` and
//! `/pixel-notes/privacy/` work on any static file host without rewrites.
//!
//! ## Client-Side Version Badge
//!
//! The App Store version line is fetched by the visitor's browser at view
//! time (JSONP against the iTunes lookup API), so a build never goes stale
//! when a new version ships.

pub mod assets;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod metadata;
pub mod output;
pub mod sitemap;
pub mod types;
pub mod version_lookup;

#[cfg(test)]
pub(crate) mod test_helpers;
