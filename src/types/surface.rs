use serde::{Deserialize, Serialize};

use super::tab::TabId;

/// Raw event emitted by a content surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    Navigated { url: String },
    TitleChanged { title: String },
    FaviconChanged { icons: Vec<String> },
    LoadStarted,
    LoadStopped,
    DownloadStarted {
        filename: String,
        url: String,
        total_bytes: u64,
    },
}

/// A surface event tagged with the tab whose surface emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceEnvelope {
    pub tab_id: TabId,
    pub event: SurfaceEvent,
}
