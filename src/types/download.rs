use serde::{Deserialize, Serialize};

use super::tab::TabId;

/// Status of a download as seen by the downloads list.
///
/// The transfer itself is owned by the surface; the list only records that it
/// started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Started,
    Completed,
}

/// A download reported by a tab's surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadEntry {
    pub id: String,
    pub tab_id: TabId,
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub started_at: i64,
    pub status: DownloadStatus,
}
