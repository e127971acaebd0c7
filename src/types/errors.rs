use std::fmt;

// === SurfaceError ===

/// Errors reported by a content surface or its provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The provider could not create a new surface.
    CreationFailed(String),
    /// The surface refused or failed to start a navigation.
    NavigationFailed(String),
    /// The surface has already been destroyed.
    Destroyed,
    /// The host rejected an operation on the surface.
    Host(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::CreationFailed(msg) => write!(f, "Surface creation failed: {}", msg),
            SurfaceError::NavigationFailed(url) => write!(f, "Navigation failed: {}", url),
            SurfaceError::Destroyed => write!(f, "Surface already destroyed"),
            SurfaceError::Host(msg) => write!(f, "Surface host error: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug)]
pub enum ShortcutError {
    /// Shortcut for the given action was not found.
    NotFound(String),
    /// The shortcut keys conflict with an existing binding.
    Conflict(String),
    /// The provided key combination is invalid.
    InvalidKeys(String),
    /// The action name does not map to any shell action.
    UnknownAction(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::NotFound(action) => {
                write!(f, "Shortcut not found for action: {}", action)
            }
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(keys) => write!(f, "Invalid shortcut keys: {}", keys),
            ShortcutError::UnknownAction(action) => write!(f, "Unknown shell action: {}", action),
        }
    }
}

impl std::error::Error for ShortcutError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
