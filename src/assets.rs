//! Static assets: fingerprinted CSS/JS and the `public/` directory.
//!
//! The stylesheet and scripts are embedded at compile time and written to
//! `assets/` under a content-addressed name (`carousel.3f9a1c2b.js`), so a
//! new build never serves a stale script from a browser or CDN cache.
//! Everything under the site's `public/` directory is copied verbatim to the
//! output root (icons, screenshots, social images).

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CSS_STATIC: &str = include_str!("../static/style.css");
const CAROUSEL_JS: &str = include_str!("../static/carousel.js");
const VERSION_JS: &str = include_str!("../static/version.js");

/// Name of the directory copied verbatim to the output root.
pub const PUBLIC_DIR: &str = "public";

/// A generated asset and the URL pages reference it by.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Absolute URL path, e.g. `/assets/style.0a1b2c3d.css`.
    pub href: String,
    pub contents: String,
}

impl Asset {
    /// Build an asset named `{stem}.{hash8}.{ext}` from its contents.
    pub fn fingerprinted(stem: &str, ext: &str, contents: String) -> Self {
        let hash = content_hash(contents.as_bytes());
        Self {
            href: format!("/assets/{stem}.{}.{ext}", &hash[..8]),
            contents,
        }
    }

    /// Output file relative to the output directory.
    pub fn file(&self) -> &str {
        self.href.trim_start_matches('/')
    }
}

/// The asset bundle referenced by every page.
#[derive(Debug, Clone)]
pub struct Assets {
    pub stylesheet: Asset,
    pub carousel_js: Asset,
    pub version_js: Asset,
}

impl Assets {
    /// Build the bundle; `color_css` is prepended to the static stylesheet.
    pub fn build(color_css: &str) -> Self {
        Self {
            stylesheet: Asset::fingerprinted("style", "css", format!("{color_css}\n\n{CSS_STATIC}")),
            carousel_js: Asset::fingerprinted("carousel", "js", CAROUSEL_JS.to_string()),
            version_js: Asset::fingerprinted("version", "js", VERSION_JS.to_string()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        [&self.stylesheet, &self.carousel_js, &self.version_js].into_iter()
    }

    /// Write every asset under `output_dir`, returning the files written.
    pub fn write(&self, output_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for asset in self.iter() {
            let path = output_dir.join(asset.file());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &asset.contents)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// SHA-256 of `bytes` as a hex string.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Copy `{site_root}/public/` into `output_dir`, preserving layout.
///
/// Returns the number of files copied; a missing `public/` copies nothing.
pub fn copy_public(site_root: &Path, output_dir: &Path) -> io::Result<usize> {
    let public = site_root.join(PUBLIC_DIR);
    if !public.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(&public).follow_links(true) {
        let entry = entry.map_err(io::Error::other)?;
        let Ok(rel) = entry.path().strip_prefix(&public) else {
            continue;
        };
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn fingerprint_changes_with_contents() {
        let a = Asset::fingerprinted("style", "css", "body{}".into());
        let b = Asset::fingerprinted("style", "css", "body{color:red}".into());
        assert_ne!(a.href, b.href);
        assert!(a.href.starts_with("/assets/style."));
        assert!(a.href.ends_with(".css"));
    }

    #[test]
    fn fingerprint_is_stable() {
        let a = Asset::fingerprinted("carousel", "js", "x".into());
        let b = Asset::fingerprinted("carousel", "js", "x".into());
        assert_eq!(a.href, b.href);
        assert_eq!(a.file(), a.href.trim_start_matches('/'));
    }

    #[test]
    fn content_hash_is_sha256_hex() {
        assert_eq!(
            content_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn stylesheet_includes_color_css() {
        let assets = Assets::build(":root { --color-accent: #abcdef; }");
        assert!(assets.stylesheet.contents.contains("#abcdef"));
        assert!(assets.stylesheet.contents.contains(".carousel"));
    }

    #[test]
    fn write_creates_assets_dir() {
        let tmp = TempDir::new().unwrap();
        let assets = Assets::build("");
        let written = assets.write(tmp.path()).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn copy_public_preserves_layout() {
        let site = setup_site();
        let out = TempDir::new().unwrap();
        let copied = copy_public(site.path(), out.path()).unwrap();
        assert_eq!(copied, 8);
        assert!(out.path().join("images/pixel-notes/2.svg").exists());
        assert!(out.path().join("images/quiet-icon.svg").exists());
    }

    #[test]
    fn copy_public_without_dir_is_noop() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        assert_eq!(copy_public(site.path(), out.path()).unwrap(), 0);
    }
}
