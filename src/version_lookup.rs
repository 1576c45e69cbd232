//! App Store version badge.
//!
//! The version line under an app's title is filled in by the visitor's
//! browser: `static/version.js` issues a JSONP request to the iTunes lookup
//! API (the API does not send CORS headers) and rewrites the placeholder.
//! This module resolves, at build time, the numeric id the script needs.

use crate::catalog::App;

/// iTunes lookup endpoint; the script appends `?id=…&callback=…`.
pub const LOOKUP_ENDPOINT: &str = "https://itunes.apple.com/lookup";

/// Placeholder text shown until (or unless) the lookup succeeds.
pub const PLACEHOLDER: &str = "Loading version info...";

/// Extract the numeric App Store id from a configured value.
///
/// Returns the digits of the first `id<digits>` match, so both
/// `"id1234567890"` and `"https://apps.apple.com/app/foo/id1234567890"`
/// yield `"1234567890"`. Anything else is returned unchanged.
pub fn numeric_app_id(value: &str) -> &str {
    let bytes = value.as_bytes();
    let mut search = 0;
    while let Some(pos) = value[search..].find("id") {
        let start = search + pos + 2;
        let end = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |n| start + n);
        if end > start {
            return &value[start..end];
        }
        search = start;
    }
    value
}

/// The id to look up for `app`, if it has an App Store presence.
///
/// The badge is only shown for apps with an App Store download link; the id
/// comes from `appstoreId` or, failing that, from the link itself.
pub fn lookup_id(app: &App) -> Option<String> {
    let store_link = app
        .download
        .app_store
        .as_deref()
        .filter(|link| !link.trim().is_empty())?;
    let source = app
        .appstore_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(store_link);
    Some(numeric_app_id(source.trim()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn extracts_digits_after_id_prefix() {
        assert_eq!(numeric_app_id("id1234567890"), "1234567890");
    }

    #[test]
    fn extracts_from_store_url() {
        assert_eq!(
            numeric_app_id("https://apps.apple.com/cn/app/pixel-notes/id987654?mt=8"),
            "987654"
        );
    }

    #[test]
    fn skips_id_without_digits() {
        // "idea" contains "id" but no digits follow it.
        assert_eq!(numeric_app_id("idea-id42"), "42");
    }

    #[test]
    fn bare_value_passes_through() {
        assert_eq!(numeric_app_id("1234567890"), "1234567890");
        assert_eq!(numeric_app_id("com.example.app"), "com.example.app");
    }

    #[test]
    fn lookup_requires_app_store_link() {
        let catalog = sample_catalog();
        assert_eq!(
            lookup_id(find_app(&catalog, "pixel-notes")).as_deref(),
            Some("1234567890")
        );
        assert_eq!(lookup_id(find_app(&catalog, "tally")), None);
        assert_eq!(lookup_id(find_app(&catalog, "quiet")), None);
    }

    #[test]
    fn lookup_falls_back_to_store_link() {
        let catalog = sample_catalog();
        let mut app = find_app(&catalog, "pixel-notes").clone();
        app.appstore_id = None;
        app.download.app_store = Some("https://apps.apple.com/app/x/id555".into());
        assert_eq!(lookup_id(&app).as_deref(), Some("555"));
    }
}
