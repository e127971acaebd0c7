//! Shortcut Manager for ShyNav.
//!
//! Maps accelerators delivered by the host window to shell actions, with
//! conflict detection and platform-specific modifier key adaptation.

use std::collections::HashMap;

use crate::types::command::ShellAction;
use crate::types::errors::ShortcutError;

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError>;
    fn unregister_shortcut(&mut self, action: &str) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: &str) -> Option<&str>;
    fn list_shortcuts(&self) -> &HashMap<String, String>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String>;
    fn get_default_shortcuts(&self) -> HashMap<String, String>;
    fn resolve(&self, keys: &str) -> Option<ShellAction>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<String, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        let mut mgr = Self {
            shortcuts: HashMap::new(),
        };
        mgr.shortcuts = mgr.get_default_shortcuts();
        mgr
    }

    /// Starts from the defaults and applies user bindings on top. Bindings for
    /// unknown actions or that conflict with an earlier one are skipped.
    pub fn from_bindings(bindings: &HashMap<String, String>) -> Self {
        let mut mgr = Self::new();
        let mut names: Vec<&String> = bindings.keys().collect();
        names.sort();
        for action in names {
            if let Err(e) = mgr.register_shortcut(action, &bindings[action]) {
                log::warn!("ignoring shortcut for {}: {}", action, e);
            }
        }
        mgr
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("CmdOrCtrl+", "Cmd+").replace("Ctrl+", "Cmd+")
        } else {
            keys.replace("CmdOrCtrl+", "Ctrl+")
        }
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError> {
        if ShellAction::from_name(action).is_none() {
            return Err(ShortcutError::UnknownAction(action.to_string()));
        }
        if keys.is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        if let Some(conflicting_action) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'", keys, conflicting_action
            )));
        }

        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts.insert(action.to_string(), adapted);
        Ok(())
    }

    fn unregister_shortcut(&mut self, action: &str) -> Result<(), ShortcutError> {
        self.shortcuts.remove(action)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(action.to_string()))
    }

    fn get_shortcut(&self, action: &str) -> Option<&str> {
        self.shortcuts.get(action).map(|s| s.as_str())
    }

    fn list_shortcuts(&self) -> &HashMap<String, String> {
        &self.shortcuts
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = self.get_default_shortcuts();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String> {
        let adapted = Self::adapt_for_platform(keys);
        for (action, bound_keys) in &self.shortcuts {
            if bound_keys.eq_ignore_ascii_case(&adapted) {
                if let Some(exclude) = exclude_action {
                    if action == exclude {
                        continue;
                    }
                }
                return Some(action.clone());
            }
        }
        None
    }

    fn get_default_shortcuts(&self) -> HashMap<String, String> {
        let defaults = vec![
            ("open_palette", "Ctrl+T"),
            ("toggle_sidebar", "Ctrl+S"),
            ("close_tab", "Ctrl+W"),
            ("reload", "Ctrl+R"),
            ("back", "Alt+Left"),
            ("forward", "Alt+Right"),
            ("stop_loading", "Escape"),
            ("next_tab", "Ctrl+Tab"),
            ("prev_tab", "Ctrl+Shift+Tab"),
        ];

        defaults.into_iter()
            .map(|(a, k)| (a.to_string(), Self::adapt_for_platform(k)))
            .collect()
    }

    /// Shell action bound to the accelerator `keys`, if any.
    fn resolve(&self, keys: &str) -> Option<ShellAction> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(_, bound)| bound.eq_ignore_ascii_case(&adapted))
            .and_then(|(action, _)| ShellAction::from_name(action))
    }
}
