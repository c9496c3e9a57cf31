//! Command-line argument parsing for the scenario runner

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::PanelConfig;

/// Floating panel stack simulator
#[derive(Parser, Debug)]
#[command(name = "panelstack", version, about = "Run a scripted floating panel scenario")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/panelstack/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Print the scenario report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write debug logs to the log directory
    #[arg(long)]
    pub log: bool,

    /// Group name the scenario presents its panels under
    #[arg(long, default_value = "main")]
    pub group: String,
}

impl CliArgs {
    /// Resolve the configuration the run should use
    ///
    /// An explicit `--config` must load; the default location falls back to
    /// built-in defaults.
    pub fn load_config(&self) -> Result<PanelConfig> {
        match &self.config {
            Some(path) => PanelConfig::load_from(path),
            None => Ok(PanelConfig::load()),
        }
    }
}
