//! App catalog: the JSON document that drives every page.
//!
//! The catalog lives at `config.json` in the site root and uses camelCase
//! keys:
//!
//! ```json
//! {
//!   "site": { "title": "SelfStudio", "description": "Small tools, done well" },
//!   "apps": [
//!     {
//!       "id": "pixel-notes",
//!       "appstoreId": "id1234567890",
//!       "name": "Pixel Notes",
//!       "description": "Notes in pixels",
//!       "details": "Works offline.",
//!       "icon": "/images/pixel-notes/icon.png",
//!       "screenshots": ["/images/pixel-notes/1.png", "/images/pixel-notes/2.png"],
//!       "download": { "appStore": "https://apps.apple.com/app/id1234567890" },
//!       "features": [{ "title": "Fast", "description": "Opens instantly", "icon": "⚡" }],
//!       "privacyPolicy": { "lastUpdated": "2025-01-01", "...": "..." }
//!     }
//!   ],
//!   "contact": { "email": "hello@selfstudio.fun", "address": "Shanghai" }
//! }
//! ```
//!
//! A feature may also be given as a bare string, which becomes a title-only
//! feature. Screenshot lists may be empty.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the catalog file inside the site root.
pub const CATALOG_FILENAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub site: Site,
    pub apps: Vec<App>,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub title: String,
    pub description: String,
    /// Overrides `site.url` from `showcase.toml` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    /// URL slug: `/{id}/` and `/{id}/privacy/`.
    pub id: String,
    /// App Store id, either bare digits or any string containing `id<digits>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appstore_id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub details: String,
    pub icon: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub download: Download,
    #[serde(default)]
    pub features: Vec<Feature>,
    pub privacy_policy: PrivacyPolicy,
}

impl App {
    /// Whether any download button should be shown.
    pub fn has_download_links(&self) -> bool {
        !self.download.links().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_play: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apk: Option<String>,
}

impl Download {
    /// `(label, url)` for each configured, non-empty link in display order.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("App Store", &self.app_store),
            ("Google Play", &self.google_play),
            ("APK", &self.apk),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.as_deref()
                .filter(|u| !u.trim().is_empty())
                .map(|u| (label, u))
        })
        .collect()
    }
}

/// A feature bullet. Accepts either an object or a bare title string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "FeatureRepr")]
pub struct Feature {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureRepr {
    Title(String),
    Full {
        title: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        icon: Option<String>,
    },
}

impl From<FeatureRepr> for Feature {
    fn from(repr: FeatureRepr) -> Self {
        match repr {
            FeatureRepr::Title(title) => Feature {
                title,
                description: None,
                icon: None,
            },
            FeatureRepr::Full {
                title,
                description,
                icon,
            } => Feature {
                title,
                description,
                icon,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyPolicy {
    pub last_updated: String,
    pub information_we_collect: ListedSection,
    pub how_we_use_information: ListedSection,
    pub information_sharing: ListedSection,
    pub third_party_services: ListedSection,
    pub data_security: Section,
    pub your_rights: ListedSection,
    pub contact_us: ContactSection,
    pub changes_to_privacy_policy: Section,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSection {
    pub title: String,
    pub content: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl Catalog {
    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check app ids are present, URL-safe and unique, and the site has a title.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.site.title.trim().is_empty() {
            return Err(CatalogError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if let Some(url) = self.site.url.as_deref().map(str::trim) {
            if !url.is_empty() && !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(CatalogError::Validation(format!(
                    "site.url must start with http:// or https:// (got \"{url}\")"
                )));
            }
        }
        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.id.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "app \"{}\" has an empty id",
                    app.name
                )));
            }
            if !is_url_safe(&app.id) {
                return Err(CatalogError::Validation(format!(
                    "app id \"{}\" may only contain letters, digits, '-' and '_'",
                    app.id
                )));
            }
            if !seen.insert(app.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate app id \"{}\"",
                    app.id
                )));
            }
        }
        Ok(())
    }

    pub fn find_app(&self, id: &str) -> Option<&App> {
        self.apps.iter().find(|app| app.id == id)
    }
}

fn is_url_safe(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Load `config.json` from the site root.
pub fn load_catalog(root: &Path) -> Result<Catalog, CatalogError> {
    let path = root.join(CATALOG_FILENAME);
    let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Catalog::from_json(&content)
}
