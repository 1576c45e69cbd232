//! Route types shared by page generation, the sitemap and CLI output.
//!
//! Every generated page is described by a [`Route`] before anything is
//! rendered, so the sitemap, the build report and the writer all agree on
//! the same list.

use crate::catalog::Catalog;
use serde::Serialize;

/// What a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "app", rename_all = "snake_case")]
pub enum RouteKind {
    Home,
    App(String),
    Privacy(String),
    NotFound,
}

/// `<changefreq>` values used in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// A single generated page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub kind: RouteKind,
    /// URL path with trailing slash (`/`, `/pixel-notes/`), or the file
    /// name for pages outside the tree (`/404.html`).
    pub path: String,
    /// Output file relative to the output directory.
    pub file: String,
    /// Sitemap entry, `None` for pages that are not indexed.
    pub sitemap: Option<(ChangeFrequency, f32)>,
}

impl Route {
    /// URL path as listed in the sitemap: no trailing slash except the root.
    pub fn canonical_path(&self) -> &str {
        match self.path.as_str() {
            "/" => "",
            p => p.trim_end_matches('/'),
        }
    }
}

/// All routes for a catalog, in sitemap order: home, then each app page
/// followed by its privacy page, then the not-found page.
pub fn routes(catalog: &Catalog) -> Vec<Route> {
    let mut routes = vec![Route {
        kind: RouteKind::Home,
        path: "/".to_string(),
        file: "index.html".to_string(),
        sitemap: Some((ChangeFrequency::Weekly, 1.0)),
    }];
    for app in &catalog.apps {
        routes.push(Route {
            kind: RouteKind::App(app.id.clone()),
            path: format!("/{}/", app.id),
            file: format!("{}/index.html", app.id),
            sitemap: Some((ChangeFrequency::Weekly, 0.8)),
        });
        routes.push(Route {
            kind: RouteKind::Privacy(app.id.clone()),
            path: format!("/{}/privacy/", app.id),
            file: format!("{}/privacy/index.html", app.id),
            sitemap: Some((ChangeFrequency::Monthly, 0.5)),
        });
    }
    routes.push(Route {
        kind: RouteKind::NotFound,
        path: "/404.html".to_string(),
        file: "404.html".to_string(),
        sitemap: None,
    });
    routes
}
