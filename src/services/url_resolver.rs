//! Address bar input resolution and display helpers.
//!
//! Turns free-form user input into a navigable URL and derives the display
//! name and fallback favicon the sidebar shows before a surface reports its own.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::types::tab::{DEFAULT_TAB_URL, NEW_TAB_TITLE};

/// Where empty address bar input goes.
pub const EMPTY_INPUT_URL: &str = "https://www.google.com";

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

fn domain_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)^\w+[\w.-]*\.[a-z]{2,}(?:/.*)?$").ok())
        .as_ref()
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves address bar input into a URL.
///
/// Full http(s) URLs and `about:` pages pass through, bare domains get an
/// `https://` prefix, anything else becomes a search using `search_url`.
pub fn normalize_url(input: &str, search_url: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return EMPTY_INPUT_URL.to_string();
    }
    if has_http_scheme(trimmed) || trimmed.starts_with("about:") {
        return trimmed.to_string();
    }
    if domain_pattern().is_some_and(|p| p.is_match(trimmed)) {
        return format!("https://{}", trimmed);
    }
    search_url_for(trimmed, search_url)
}

/// Search results address for `query`, form-encoded onto `search_url`.
pub fn search_url_for(query: &str, search_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{}{}", search_url, encoded)
}

/// Host of `url`, tolerating a missing scheme.
pub fn host_of(url: &str) -> Option<String> {
    let candidate = if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    Url::parse(&candidate)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_string()))
        .filter(|h| !h.is_empty())
}

/// Favicon service URL for the page's host, or empty when none applies.
///
/// Display fallback only; a tab's cached favicon comes from surface events.
pub fn favicon_url(url: &str) -> String {
    if url.trim().is_empty() || url == DEFAULT_TAB_URL || url.starts_with("about:") {
        return String::new();
    }
    match host_of(url) {
        Some(host) if host != "localhost" => format!("{}?domain={}&sz=32", FAVICON_SERVICE, host),
        _ => String::new(),
    }
}

/// Short name for a page, used as a title placeholder in listings.
pub fn domain_name(url: &str) -> String {
    if url.trim().is_empty() || url == DEFAULT_TAB_URL {
        return NEW_TAB_TITLE.to_string();
    }
    if let Some(host) = host_of(url) {
        let name = host.strip_prefix("www.").unwrap_or(&host);
        if !name.is_empty() {
            return name.to_string();
        }
    }
    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    match without_www.split('/').next() {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => NEW_TAB_TITLE.to_string(),
    }
}
