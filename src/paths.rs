//! Centralized path definitions for bizpulse
//!
//! Single source of truth for where configuration is looked up.
//!
//! ## Lookup Order
//!
//! ```text
//! --config <PATH>                       # explicit flag
//! $BIZPULSE_CONFIG                      # environment override
//! ./bizpulse.toml                       # project-local file
//! ~/.config/bizpulse/config.toml        # user-level file (XDG)
//! ```
//!
//! The first candidate that exists wins. An explicit flag or environment
//! path is returned even when missing so the caller can report it.

use std::path::{Path, PathBuf};

/// Project configuration filename
pub const CONFIG_FILE: &str = "bizpulse.toml";

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BIZPULSE_CONFIG";

/// User config directory name
const GLOBAL_DIR: &str = "bizpulse";

/// User config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Path to `./bizpulse.toml`
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Get the user-level bizpulse directory.
///
/// Returns `~/.config/bizpulse/` on Linux, the platform equivalent elsewhere.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(GLOBAL_DIR))
}

/// Get the user-level config file path.
#[must_use]
pub fn global_config() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Resolve which config file to read, if any
#[must_use]
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let local = project_config();
    if local.exists() {
        return Some(local);
    }
    global_config().filter(|path| path.exists())
}
