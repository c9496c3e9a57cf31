//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging panel
//! settling, gesture handling and stack coordination.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=panel=debug` - state diffs from `update_panel`
//! - `RUST_LOG=panelstack::presentation=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/panelstack/logs/panelstack.log` with daily rotation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::panel::{Distance, Fraction, PanelPositionController, RestPosition};

/// Initialize tracing subscriber with console and optional file logging
///
/// Console output respects RUST_LOG (default `warn`). The file layer always
/// logs at debug level.
pub fn init(log_to_file: bool) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = if log_to_file {
        match logs_dir() {
            Ok(logs_dir) => {
                let file_appender = tracing_appender::rolling::daily(logs_dir, "panelstack.log");
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(EnvFilter::new("debug")),
                )
            }
            Err(e) => {
                eprintln!("Warning: Could not initialize file logging: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// `<config dir>/logs`, created on demand
fn logs_dir() -> Result<PathBuf> {
    let logs = crate::config_paths::config_dir()
        .context("No config directory available")?
        .join("logs");
    std::fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create {}", logs.display()))?;
    Ok(logs)
}

/// Lightweight snapshot of controller state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot {
    pub position: RestPosition,
    pub offset: Distance,
    pub ratio: Fraction,
    pub animating: bool,
    pub dragging: bool,
    pub minimized: bool,
}

impl PanelSnapshot {
    pub fn from_controller(controller: &PanelPositionController) -> Self {
        Self {
            position: controller.position(),
            offset: controller.current_offset(),
            ratio: controller.current_ratio(),
            animating: controller.is_animating(),
            dragging: controller.is_dragging(),
            minimized: controller.is_minimized(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &PanelSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.position != other.position {
            changes.push(format!("position: {} → {}", self.position, other.position));
        }
        if self.offset != other.offset {
            changes.push(format!("offset: {:.1} → {:.1}", self.offset, other.offset));
        }
        if self.animating != other.animating {
            changes.push(format!("animating: {}", other.animating));
        }
        if self.dragging != other.dragging {
            changes.push(format!("dragging: {}", other.dragging));
        }
        if self.minimized != other.minimized {
            changes.push(format!("minimized: {}", other.minimized));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
