//! Shared test utilities for the app-showcase test suite.
//!
//! Provides fixture setup, catalog lookups and a few HTML assertions used
//! across module tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let catalog = load_catalog(tmp.path()).unwrap();
//! let app = find_app(&catalog, "pixel-notes");
//! assert_eq!(app.screenshots.len(), 3);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::{App, Catalog};
use crate::config::ShowcaseConfig;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// The fixture catalog as raw JSON.
pub fn sample_catalog_json() -> String {
    include_str!("../fixtures/site/config.json").to_string()
}

/// The fixture catalog, parsed and validated.
pub fn sample_catalog() -> Catalog {
    Catalog::from_json(&sample_catalog_json()).unwrap()
}

/// Stock build config.
pub fn default_config() -> ShowcaseConfig {
    ShowcaseConfig::default()
}

// =========================================================================
// Catalog lookups (panic with a clear message on miss)
// =========================================================================

/// Find an app by id. Panics if not found.
pub fn find_app<'a>(catalog: &'a Catalog, id: &str) -> &'a App {
    catalog.find_app(id).unwrap_or_else(|| {
        let ids: Vec<&str> = catalog.apps.iter().map(|a| a.id.as_str()).collect();
        panic!("app '{id}' not found. Available: {ids:?}")
    })
}

// =========================================================================
// HTML assertions
// =========================================================================

/// Count non-overlapping occurrences of `needle` in `html`.
pub fn count_occurrences(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

/// Assert that `needles` appear in `html` in the given order.
pub fn assert_in_order(html: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match html[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("'{needle}' not found after byte {from}"),
        }
    }
}
