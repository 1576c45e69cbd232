//! Build configuration module.
//!
//! Handles loading, validating, and merging `showcase.toml`. The file lives
//! next to the catalog in the site root and is entirely optional: stock
//! defaults are serialized to a TOML table and the user file is merged on top.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! url = "https://selfstudio.fun"  # Base URL for sitemap and canonical links
//! keywords = ["app", "mobile", "application", "software", "macOS", "iOS", "Android"]
//! author = "CodeEagle"
//! publisher = "SelfStudio"
//! og_image = "/images/og-image.jpg"  # 1200x630 social card
//!
//! [carousel]
//! autoplay_interval_ms = 5000     # Time between automatic advances
//! quiet_period_ms = 3000          # Pause after manual navigation
//! settle_delay_ms = 50            # Debounce before the loop boundary jump
//!
//! [colors]
//! accent = "#f97316"
//! background = "#ffffff"
//! text = "#111827"
//! text_muted = "#4b5563"
//! border = "#e5e7eb"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [carousel]
//! autoplay_interval_ms = 8000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the build configuration file inside the site root.
pub const CONFIG_FILENAME: &str = "showcase.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `showcase.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Site-wide URL and `<meta>` settings.
    pub site: SiteSettings,
    /// Screenshot carousel timings.
    pub carousel: CarouselConfig,
    /// Palette injected as CSS custom properties.
    pub colors: ColorConfig,
}

impl ShowcaseConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.site.url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "site.url must start with http:// or https:// (got \"{url}\")"
            )));
        }
        let carousel = &self.carousel;
        if carousel.autoplay_interval_ms == 0
            || carousel.quiet_period_ms == 0
            || carousel.settle_delay_ms == 0
        {
            return Err(ConfigError::Validation(
                "carousel durations must be greater than zero".into(),
            ));
        }
        if carousel.settle_delay_ms >= carousel.autoplay_interval_ms {
            return Err(ConfigError::Validation(
                "carousel.settle_delay_ms must be shorter than carousel.autoplay_interval_ms"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }
}

/// Site-wide URL and metadata settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Base URL the site is served from. The catalog's `site.url` wins when set.
    pub url: String,
    /// Keywords for the home page `<meta name="keywords">`.
    pub keywords: Vec<String>,
    pub author: String,
    pub publisher: String,
    /// Image shared by OpenGraph/Twitter cards for the home page.
    pub og_image: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: "https://selfstudio.fun".to_string(),
            keywords: ["app", "mobile", "application", "software", "macOS", "iOS", "Android"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            author: "CodeEagle".to_string(),
            publisher: "SelfStudio".to_string(),
            og_image: "/images/og-image.jpg".to_string(),
        }
    }
}

/// Screenshot carousel timings, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Time between automatic advances.
    pub autoplay_interval_ms: u64,
    /// Delay after manual navigation or closing the viewer before autoplay resumes.
    pub quiet_period_ms: u64,
    /// Debounce before the instant jump off a padding frame. Tuned to
    /// browser scroll-snap settling time.
    pub settle_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 5000,
            quiet_period_ms: 3000,
            settle_delay_ms: 50,
        }
    }
}

/// Color palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Highlight color: active indicator, hover borders, links.
    pub accent: String,
    pub background: String,
    pub text: String,
    /// Secondary text (descriptions, footer links).
    pub text_muted: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: "#f97316".to_string(),
            background: "#ffffff".to_string(),
            text: "#111827".to_string(),
            text_muted: "#4b5563".to_string(),
            border: "#e5e7eb".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ShowcaseConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `showcase.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ShowcaseConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ShowcaseConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `showcase.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<ShowcaseConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}

/// Returns a fully-commented stock `showcase.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# app-showcase Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Base URL the site is served from. Used for sitemap.xml, robots.txt and
# canonical/OpenGraph URLs. A `url` in the catalog's "site" object wins.
url = "https://selfstudio.fun"

# Keywords for the home page.
keywords = ["app", "mobile", "application", "software", "macOS", "iOS", "Android"]

# <meta name="author"> and <meta name="publisher">.
author = "CodeEagle"
publisher = "SelfStudio"

# Social card image for the home page (1200x630), relative to the site root.
og_image = "/images/og-image.jpg"

# ---------------------------------------------------------------------------
# Screenshot carousel
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic advances.
autoplay_interval_ms = 5000

# Milliseconds of inactivity after manual navigation (or closing the
# enlarged viewer) before autoplay resumes.
quiet_period_ms = 3000

# Milliseconds to wait for scroll snapping to settle before silently
# jumping from a loop padding frame to the real one.
settle_delay_ms = 50

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
accent = "#f97316"        # Active indicator, hover borders
background = "#ffffff"
text = "#111827"
text_muted = "#4b5563"    # Descriptions, footer links
border = "#e5e7eb"
"##
}

/// Generate CSS custom properties from the color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-accent: {accent};
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
}}"#,
        accent = colors.accent,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
    )
}
