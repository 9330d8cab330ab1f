// SPDX-License-Identifier: MPL-2.0
//! Configuration directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override**: parameter to `_with_override()` functions
//! 2. **Environment variable**: `PHOTO_SESSION_CONFIG_DIR`
//! 3. **Platform default**: via the `dirs` crate, with the app name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "PhotoSession";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PHOTO_SESSION_CONFIG_DIR";

/// Returns the application config directory.
///
/// - Linux: `~/.config/PhotoSession/`
/// - macOS: `~/Library/Application Support/PhotoSession/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\PhotoSession\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
