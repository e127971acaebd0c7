use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellSettings {
    pub general: GeneralSettings,
    pub history: HistorySettings,
    pub downloads: DownloadSettings,
    pub logging: LoggingSettings,
    pub shortcuts: HashMap<String, String>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            history: HistorySettings::default(),
            downloads: DownloadSettings::default(),
            logging: LoggingSettings::default(),
            shortcuts: Self::default_shortcuts(),
        }
    }
}

impl ShellSettings {
    /// Returns the default keyboard shortcuts, keyed by shell action name.
    pub fn default_shortcuts() -> HashMap<String, String> {
        let mut shortcuts = HashMap::new();
        shortcuts.insert("open_palette".to_string(), "Ctrl+T".to_string());
        shortcuts.insert("toggle_sidebar".to_string(), "Ctrl+S".to_string());
        shortcuts.insert("close_tab".to_string(), "Ctrl+W".to_string());
        shortcuts.insert("reload".to_string(), "Ctrl+R".to_string());
        shortcuts.insert("back".to_string(), "Alt+Left".to_string());
        shortcuts.insert("forward".to_string(), "Alt+Right".to_string());
        shortcuts.insert("stop_loading".to_string(), "Escape".to_string());
        shortcuts.insert("next_tab".to_string(), "Ctrl+Tab".to_string());
        shortcuts.insert("prev_tab".to_string(), "Ctrl+Shift+Tab".to_string());
        shortcuts
    }
}

/// General browsing behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Address opened by a new tab when the user gives none.
    pub new_tab_url: String,
    /// Search prefix; the percent-encoded query is appended.
    pub search_url: String,
    #[serde(default)]
    pub developer_mode: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            new_tab_url: "about:blank".to_string(),
            search_url: "https://www.google.com/search?q=".to_string(),
            developer_mode: false,
        }
    }
}

/// History list limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySettings {
    pub limit: usize,
    /// Window in which a repeat visit to the same URL is not recorded again.
    pub dedupe_secs: i64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: 1000,
            dedupe_secs: 5 * 60,
        }
    }
}

/// Downloads list limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadSettings {
    pub limit: usize,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self { limit: 500 }
    }
}

/// Logging configuration. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
