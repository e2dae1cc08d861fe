//! Map-link rewriting for generated plan text
//!
//! The model tags place names with the `[Name](maps)` placeholder pattern.
//! This module rewrites every such placeholder into a markdown link against
//! the Google Maps search endpoint and leaves all other text untouched.

use regex::Regex;
use std::sync::LazyLock;

/// Map search endpoint; the place name is appended as the `query` parameter
const MAPS_SEARCH_ENDPOINT: &str = "https://www.google.com/maps/search/?api=1&query=";

// One or more characters up to the next closing bracket, followed by the
// literal `(maps)` token. Case-sensitive.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(maps\)").expect("placeholder pattern is valid"));

/// Replace every `[Name](maps)` placeholder with a map-search link.
///
/// Total function: text without placeholders is returned unchanged, and one
/// pass is idempotent because rewritten spans no longer match the pattern.
#[must_use]
pub fn linkify(text: &str) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            format!("[{name}]({})", map_search_url(name))
        })
        .into_owned()
}

/// Build the map-search URL for a place name.
///
/// Spaces are rendered as `+`; everything else is percent-encoded so names
/// containing `&`, `#` or `/` produce well-formed URLs.
#[must_use]
pub fn map_search_url(name: &str) -> String {
    let query = urlencoding::encode(name).replace("%20", "+");
    format!("{MAPS_SEARCH_ENDPOINT}{query}")
}
