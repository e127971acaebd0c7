// ShyNav Settings Engine
// Loads, saves and edits the shell settings file. Settings live as JSON at
// the platform config path unless SHYNAV_CONFIG points elsewhere.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ShellSettings;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "SHYNAV_CONFIG";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ShellSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ShellSettings;
    fn get_value(&self, key: &str) -> Result<Value, SettingsError>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

pub struct SettingsEngine {
    config_path: String,
    settings: ShellSettings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, else `$SHYNAV_CONFIG`, else
    /// `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override
            .or_else(|| std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| {
                platform::get_config_dir()
                    .join("settings.json")
                    .to_string_lossy()
                    .to_string()
            });

        Self {
            config_path,
            settings: ShellSettings::default(),
        }
    }

    /// Engine holding `settings` without a backing file read. Saves still go
    /// to `path`.
    pub fn with_settings(path: String, settings: ShellSettings) -> Self {
        Self {
            config_path: path,
            settings,
        }
    }

    fn to_json(&self) -> Result<Value, SettingsError> {
        serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })
    }

    fn split_key(key: &str) -> Result<Vec<&str>, SettingsError> {
        let parts: Vec<&str> = key.split('.').collect();
        if key.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return Err(SettingsError::InvalidKey(format!("Malformed key '{}'", key)));
        }
        Ok(parts)
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// A missing file yields defaults; a malformed one is an error.
    fn load(&mut self) -> Result<ShellSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            log::debug!("no settings at {}, using defaults", self.config_path);
            self.settings = ShellSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        log::info!("settings loaded from {}", self.config_path);
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &ShellSettings {
        &self.settings
    }

    /// Reads one value by dot path, e.g. `history.limit`.
    fn get_value(&self, key: &str) -> Result<Value, SettingsError> {
        let parts = Self::split_key(key)?;
        let json = self.to_json()?;
        parts
            .iter()
            .try_fold(&json, |node, part| node.get(*part))
            .cloned()
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))
    }

    /// Updates one value by dot path and persists the result.
    ///
    /// The edited document must still deserialize into [`ShellSettings`],
    /// so type mismatches are rejected before anything is written. Keys under
    /// `shortcuts` may be added; everywhere else the key must already exist.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let parts = Self::split_key(key)?;
        let mut json = self.to_json()?;

        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => return Err(SettingsError::InvalidKey("Key cannot be empty".to_string())),
        };
        let mut current = &mut json;
        for part in parents {
            current = current.get_mut(*part).ok_or_else(|| {
                SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))
            })?;
        }
        let in_shortcuts = parents == ["shortcuts"];
        match current {
            Value::Object(map) => {
                if !map.contains_key(*last) && !in_shortcuts {
                    return Err(SettingsError::InvalidKey(format!(
                        "Key '{}' not found in settings",
                        key
                    )));
                }
                map.insert(last.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Cannot navigate to key '{}': intermediate value is not an object",
                    key
                )));
            }
        }

        self.settings = serde_json::from_value(json).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ShellSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
