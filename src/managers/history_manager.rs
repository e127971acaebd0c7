//! History Manager for ShyNav.
//!
//! Implements `HistoryManagerTrait`: the in-memory browsing history of the
//! current session, most recent visit first.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::services::url_resolver;
use crate::types::history::HistoryEntry;
use crate::types::settings::HistorySettings;

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str, title: Option<&str>) -> Option<String>;
    fn search_history(&self, query: &str) -> Vec<&HistoryEntry>;
    fn list_history(&self) -> &[HistoryEntry];
    fn delete_entry(&mut self, id: &str) -> bool;
    fn clear_all(&mut self);
}

/// Most-recent-first visit list with duplicate suppression and a size cap.
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    limit: usize,
    dedupe_secs: i64,
}

impl HistoryManager {
    pub fn new(settings: &HistorySettings) -> Self {
        Self {
            entries: Vec::new(),
            limit: settings.limit,
            dedupe_secs: settings.dedupe_secs,
        }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Records a visit at an explicit time. Returns the new entry id, or
    /// `None` when the visit was skipped (internal page or recent duplicate).
    pub fn record_visit_at(&mut self, url: &str, title: Option<&str>, now: i64) -> Option<String> {
        if url.trim().is_empty() || url.starts_with("about:") {
            return None;
        }

        let recent_duplicate = self
            .entries
            .iter()
            .any(|e| e.url == url && now - e.visited_at < self.dedupe_secs);
        if recent_duplicate {
            return None;
        }

        let title = title
            .filter(|t| !t.trim().is_empty())
            .map(|t| t.to_string())
            .or_else(|| url_resolver::host_of(url))
            .unwrap_or_else(|| url.to_string());

        let id = Uuid::new_v4().to_string();
        self.entries.insert(
            0,
            HistoryEntry {
                id: id.clone(),
                url: url.to_string(),
                title,
                favicon: url_resolver::favicon_url(url),
                visited_at: now,
            },
        );
        self.entries.truncate(self.limit);
        Some(id)
    }

    /// Replaces the placeholder title of the latest visit to `url` once the
    /// page reports its real one.
    pub fn retitle(&mut self, url: &str, title: &str) -> bool {
        if title.trim().is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.url == url) {
            Some(entry) => {
                entry.title = title.to_string();
                true
            }
            None => false,
        }
    }
}

impl HistoryManagerTrait for HistoryManager {
    fn record_visit(&mut self, url: &str, title: Option<&str>) -> Option<String> {
        self.record_visit_at(url, title, Self::now())
    }

    /// Case-insensitive match on title or URL.
    fn search_history(&self, query: &str) -> Vec<&HistoryEntry> {
        let q = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&q) || e.url.to_lowercase().contains(&q))
            .collect()
    }

    fn list_history(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn delete_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn clear_all(&mut self) {
        self.entries.clear();
    }
}
