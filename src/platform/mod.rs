// Platform-specific locations for ShyNav's files.
//
// Only the configuration directory is needed: history and downloads are kept
// in memory for the lifetime of the process.

use std::env;
use std::path::PathBuf;

const APP_DIR_UNIX: &str = "shynav";
#[cfg(not(target_os = "linux"))]
const APP_DIR_DESKTOP: &str = "ShyNav";

/// Returns the platform-specific configuration directory for ShyNav.
///
/// - **Linux**: `$XDG_CONFIG_HOME/shynav`, else `~/.config/shynav`
/// - **macOS**: `~/Library/Application Support/ShyNav`
/// - **Windows**: `%APPDATA%/ShyNav`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux_config_dir(
            env::var("XDG_CONFIG_HOME").ok(),
            env::var("HOME").ok(),
        )
    }
    #[cfg(target_os = "macos")]
    {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join(APP_DIR_DESKTOP)
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
        PathBuf::from(appdata).join(APP_DIR_DESKTOP)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        linux_config_dir(None, env::var("HOME").ok())
    }
}

/// XDG lookup, split out so it can be checked without touching the process
/// environment.
#[cfg_attr(any(target_os = "macos", target_os = "windows"), allow(dead_code))]
fn linux_config_dir(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    match xdg_config_home.filter(|p| !p.is_empty()) {
        Some(xdg) => PathBuf::from(xdg).join(APP_DIR_UNIX),
        None => {
            let home = home.unwrap_or_else(|| String::from("/tmp"));
            PathBuf::from(home).join(".config").join(APP_DIR_UNIX)
        }
    }
}
