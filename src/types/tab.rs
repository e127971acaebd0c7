use std::fmt;

use serde::{Deserialize, Serialize};

/// Address a freshly created tab loads when no URL is given.
pub const DEFAULT_TAB_URL: &str = "about:blank";

/// Title shown until the surface reports one.
pub const NEW_TAB_TITLE: &str = "New Tab";

/// Title used when the surface reports an empty one.
pub const UNTITLED: &str = "Untitled";

/// Identity of a tab. Allocated monotonically by the registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl TabId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TabId {
    fn from(value: u64) -> Self {
        TabId(value)
    }
}

/// Point-in-time copy of a tab's cached state, detached from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub is_loading: bool,
    pub is_active: bool,
}
