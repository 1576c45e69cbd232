//! CLI output formatting for every command.
//!
//! Output is information-centric: each app is shown by its positional index
//! and name, with ids, files and counts as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Catalog
//! SelfStudio (3 apps)
//! 001 Pixel Notes
//!     Id: pixel-notes
//!     Screenshots: 3
//!     Downloads: App Store, APK
//!     Version badge: 1234567890
//!
//! Config
//!     url: https://apps.example.com
//!     carousel: 1500ms autoplay, 1000ms quiet, 50ms settle
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 pixel-notes → pixel-notes/index.html
//!     Carousel: 3 screenshots
//!     Privacy → pixel-notes/privacy/index.html
//! Not found → 404.html
//!
//! Assets
//!     /assets/style.0a1b2c3d.css
//!
//! Generated 8 pages, 3 assets, 8 public files for SelfStudio
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::Catalog;
use crate::config::ShowcaseConfig;
use crate::generate::BuildReport;
use crate::types::{Route, RouteKind};
use crate::version_lookup;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the result of loading and validating a site.
pub fn format_check_output(catalog: &Catalog, config: &ShowcaseConfig) -> Vec<String> {
    let mut lines = vec![
        "Catalog".to_string(),
        format!(
            "{} ({})",
            catalog.site.title,
            plural(catalog.apps.len(), "app", "apps")
        ),
    ];

    for (i, app) in catalog.apps.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), app.name));
        lines.push(format!("{}Id: {}", indent(1), app.id));
        lines.push(format!("{}Screenshots: {}", indent(1), app.screenshots.len()));
        let links = app.download.links();
        if !links.is_empty() {
            let labels: Vec<&str> = links.iter().map(|(label, _)| *label).collect();
            lines.push(format!("{}Downloads: {}", indent(1), labels.join(", ")));
        }
        if let Some(id) = version_lookup::lookup_id(app) {
            lines.push(format!("{}Version badge: {}", indent(1), id));
        }
    }

    let carousel = &config.carousel;
    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!(
        "{}url: {}",
        indent(1),
        crate::metadata::site_url(catalog, config)
    ));
    lines.push(format!(
        "{}carousel: {}ms autoplay, {}ms quiet, {}ms settle",
        indent(1),
        carousel.autoplay_interval_ms,
        carousel.quiet_period_ms,
        carousel.settle_delay_ms
    ));
    lines
}

pub fn print_check_output(catalog: &Catalog, config: &ShowcaseConfig) {
    for line in format_check_output(catalog, config) {
        println!("{}", line);
    }
}

// ============================================================================
// routes
// ============================================================================

/// Format the route table: URL path, output file and sitemap entry.
pub fn format_routes(routes: &[Route]) -> Vec<String> {
    let width = routes.iter().map(|r| r.path.len()).max().unwrap_or(0);
    routes
        .iter()
        .map(|route| {
            let sitemap = match route.sitemap {
                Some((freq, priority)) => format!("{} {:.1}", freq.as_str(), priority),
                None => "not indexed".to_string(),
            };
            format!(
                "{:<width$}  {}  ({})",
                route.path,
                route.file,
                sitemap,
                width = width
            )
        })
        .collect()
}

pub fn print_routes(routes: &[Route]) {
    for line in format_routes(routes) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format build output: every written page, the assets, and a summary.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut app_pos = 0;

    for route in &report.routes {
        match &route.kind {
            RouteKind::Home => lines.push(format!("Home → {}", route.file)),
            RouteKind::App(id) => {
                app_pos += 1;
                lines.push(format!("{} {} → {}", format_index(app_pos), id, route.file));
                if let Some((_, count)) = report.carousels.iter().find(|(app, _)| app == id) {
                    lines.push(format!(
                        "{}Carousel: {}",
                        indent(1),
                        plural(*count, "screenshot", "screenshots")
                    ));
                }
            }
            RouteKind::Privacy(_) => {
                lines.push(format!("{}Privacy → {}", indent(1), route.file));
            }
            RouteKind::NotFound => lines.push(format!("Not found → {}", route.file)),
        }
    }

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for href in &report.assets {
            lines.push(format!("{}{}", indent(1), href));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {} for {}",
        plural(report.routes.len(), "page", "pages"),
        plural(report.assets.len(), "asset", "assets"),
        plural(report.public_files, "public file", "public files"),
        report.site_title
    ));
    lines.push(format!("Site written to {}", report.output_dir.display()));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
