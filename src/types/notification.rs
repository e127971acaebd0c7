use serde::{Deserialize, Serialize};

use super::tab::{TabId, TabSnapshot};

/// Push notification delivered to the UI layer.
///
/// The set is closed: every change the orchestration core can report has a
/// variant here with a fixed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    TabCreated {
        tab: TabSnapshot,
    },
    TabClosed {
        id: TabId,
    },
    ActiveTabChanged {
        id: TabId,
    },
    NavigationChanged {
        id: TabId,
        url: String,
        can_go_back: bool,
        can_go_forward: bool,
    },
    TitleChanged {
        id: TabId,
        title: String,
    },
    FaviconChanged {
        id: TabId,
        favicon: String,
    },
    LoadingChanged {
        id: TabId,
        is_loading: bool,
    },
    DownloadStarted {
        id: TabId,
        filename: String,
        url: String,
        total_bytes: u64,
    },
}

impl Notification {
    /// The tab this notification concerns.
    pub fn tab_id(&self) -> TabId {
        match self {
            Notification::TabCreated { tab } => tab.id,
            Notification::TabClosed { id }
            | Notification::ActiveTabChanged { id }
            | Notification::NavigationChanged { id, .. }
            | Notification::TitleChanged { id, .. }
            | Notification::FaviconChanged { id, .. }
            | Notification::LoadingChanged { id, .. }
            | Notification::DownloadStarted { id, .. } => *id,
        }
    }
}
