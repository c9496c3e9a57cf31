//! Panel tuning persistence
//!
//! Stores thresholds and timings in `~/.config/panelstack/config.yaml`

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::panel::{AnimationTuning, SnapTuning};
use crate::presentation::PresentationTuning;

/// Tuning shared by every panel of a stage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub snap: SnapTuning,
    #[serde(default)]
    pub animation: AnimationTuning,
    #[serde(default)]
    pub presentation: PresentationTuning,
}

impl PanelConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load and sanitize config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Clamp out-of-range values, logging each correction
    pub fn sanitized(mut self) -> Self {
        let snap = &mut self.snap;
        if !(0.0..=1.0).contains(&snap.toggle_ratio) {
            tracing::warn!("snap.toggle_ratio {} out of range, clamping", snap.toggle_ratio);
            snap.toggle_ratio = if snap.toggle_ratio.is_nan() {
                SnapTuning::default().toggle_ratio
            } else {
                snap.toggle_ratio.clamp(0.0, 1.0)
            };
        }
        if !(snap.fling_threshold.is_finite() && snap.fling_threshold > 0.0) {
            tracing::warn!("snap.fling_threshold {} invalid, using default", snap.fling_threshold);
            snap.fling_threshold = SnapTuning::default().fling_threshold;
        }

        let animation = &mut self.animation;
        if animation.max_duration_ms < animation.min_duration_ms {
            tracing::warn!(
                "animation.max_duration_ms {} below min {}, swapping",
                animation.max_duration_ms,
                animation.min_duration_ms
            );
            std::mem::swap(&mut animation.min_duration_ms, &mut animation.max_duration_ms);
        }
        if !animation.reference_distance.is_finite() || animation.reference_distance < 0.0 {
            tracing::warn!(
                "animation.reference_distance {} invalid, using default",
                animation.reference_distance
            );
            animation.reference_distance = AnimationTuning::default().reference_distance;
        }

        let presentation = &mut self.presentation;
        if !(0.0..=1.0).contains(&presentation.base_overlay_alpha) {
            tracing::warn!(
                "presentation.base_overlay_alpha {} out of range, clamping",
                presentation.base_overlay_alpha
            );
            presentation.base_overlay_alpha = if presentation.base_overlay_alpha.is_nan() {
                PresentationTuning::default().base_overlay_alpha
            } else {
                presentation.base_overlay_alpha.clamp(0.0, 1.0)
            };
        }
        if !presentation.minimization_offset.is_finite() {
            presentation.minimization_offset = PresentationTuning::default().minimization_offset;
        }

        self
    }
}
