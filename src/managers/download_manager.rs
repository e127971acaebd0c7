//! Download Manager for ShyNav.
//!
//! Keeps the downloads list shown in the navigation view. Entries come from
//! `DownloadStarted` notifications; the transfer itself stays with the surface.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::types::download::{DownloadEntry, DownloadStatus};
use crate::types::notification::Notification;
use crate::types::tab::TabId;

/// Trait defining download list operations.
pub trait DownloadManagerTrait {
    fn record_download(&mut self, tab_id: TabId, filename: &str, url: &str, size: u64) -> String;
    fn mark_completed(&mut self, id: &str) -> bool;
    fn remove_download(&mut self, id: &str) -> bool;
    fn clear(&mut self);
    fn list_downloads(&self) -> &[DownloadEntry];
    fn get_download(&self, id: &str) -> Option<&DownloadEntry>;
}

/// Most-recent-first download list with a size cap.
pub struct DownloadManager {
    downloads: Vec<DownloadEntry>,
    limit: usize,
}

impl DownloadManager {
    pub fn new(limit: usize) -> Self {
        Self {
            downloads: Vec::new(),
            limit,
        }
    }

    fn now_ts() -> i64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
    }

    /// Records the download carried by `notification`, ignoring other kinds.
    pub fn observe(&mut self, notification: &Notification) -> Option<String> {
        match notification {
            Notification::DownloadStarted {
                id,
                filename,
                url,
                total_bytes,
            } => Some(self.record_download(*id, filename, url, *total_bytes)),
            _ => None,
        }
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn record_download(&mut self, tab_id: TabId, filename: &str, url: &str, size: u64) -> String {
        let id = Uuid::new_v4().to_string();
        log::info!("download started in tab {}: {} ({} bytes)", tab_id, filename, size);
        self.downloads.insert(
            0,
            DownloadEntry {
                id: id.clone(),
                tab_id,
                filename: filename.to_string(),
                url: url.to_string(),
                size,
                started_at: Self::now_ts(),
                status: DownloadStatus::Started,
            },
        );
        self.downloads.truncate(self.limit);
        id
    }

    fn mark_completed(&mut self, id: &str) -> bool {
        match self.downloads.iter_mut().find(|d| d.id == id) {
            Some(entry) => {
                entry.status = DownloadStatus::Completed;
                true
            }
            None => false,
        }
    }

    fn remove_download(&mut self, id: &str) -> bool {
        let before = self.downloads.len();
        self.downloads.retain(|d| d.id != id);
        self.downloads.len() != before
    }

    fn clear(&mut self) {
        self.downloads.clear();
    }

    fn list_downloads(&self) -> &[DownloadEntry] {
        &self.downloads
    }

    fn get_download(&self, id: &str) -> Option<&DownloadEntry> {
        self.downloads.iter().find(|d| d.id == id)
    }
}
