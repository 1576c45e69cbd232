//! `sitemap.xml` and `robots.txt` emission.
//!
//! Each indexed [`Route`] becomes one `<url>` entry with the build date as
//! `<lastmod>`. Priorities and change frequencies come from the route table
//! in [`crate::types::routes`].

use crate::types::Route;
use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render `sitemap.xml` for `routes` under `base_url` (no trailing slash).
pub fn render_sitemap(routes: &[Route], base_url: &str, lastmod: NaiveDate) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    for route in routes {
        let Some((freq, priority)) = route.sitemap else {
            continue;
        };
        let loc = format!("{}{}", base_url, route.canonical_path());
        let priority = format!("{priority:.1}");

        writer.write_event(Event::Start(BytesStart::new("url")))?;
        for (name, text) in [
            ("loc", loc.as_str()),
            ("lastmod", lastmod.as_str()),
            ("changefreq", freq.as_str()),
            ("priority", priority.as_str()),
        ] {
            writer
                .create_element(name)
                .write_text_content(BytesText::new(text))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    xml.push('\n');
    Ok(xml)
}

/// Render `robots.txt`: allow everything and point at the sitemap.
pub fn render_robots(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}
