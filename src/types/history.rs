use serde::{Deserialize, Serialize};

/// A single visited page in the browsing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Display favicon derived from the host, empty when none applies.
    pub favicon: String,
    pub visited_at: i64,
}
