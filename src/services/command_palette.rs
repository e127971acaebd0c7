//! Command palette: quick tab switcher that doubles as an address prompt.

use crate::services::url_resolver;
use crate::types::tab::{TabId, TabSnapshot};

/// What submitting the palette should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// Open a new tab at this resolved address.
    Open(String),
    /// Switch to an existing tab.
    Select(TabId),
    Nothing,
}

/// Tabs whose title (or URL, for untitled tabs) contains `query`, ignoring case.
pub fn filter_tabs<'a>(tabs: &'a [TabSnapshot], query: &str) -> Vec<&'a TabSnapshot> {
    if query.is_empty() {
        return tabs.iter().collect();
    }
    let q = query.to_lowercase();
    tabs.iter()
        .filter(|t| {
            let label = if t.title.is_empty() { &t.url } else { &t.title };
            label.to_lowercase().contains(&q)
        })
        .collect()
}

/// A typed query wins over the highlighted tab.
pub fn submit(query: &str, selected: Option<TabId>, search_url: &str) -> PaletteOutcome {
    if !query.trim().is_empty() {
        return PaletteOutcome::Open(url_resolver::normalize_url(query, search_url));
    }
    match selected {
        Some(id) => PaletteOutcome::Select(id),
        None => PaletteOutcome::Nothing,
    }
}
