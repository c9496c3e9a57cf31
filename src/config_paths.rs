//! Where panelstack keeps its configuration
//!
//! - Unix/macOS: `$XDG_CONFIG_HOME/panelstack/`, else `~/.config/panelstack/`
//! - Windows: `%APPDATA%\panelstack\`

use std::{env, path::PathBuf};

const APP_DIR: &str = "panelstack";

/// Base directory for the config file and logs, if one can be determined
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

/// Tuning file read by `PanelConfig::load`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}
