//! Settle transitions and their timing

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::position::{Distance, Fraction, RestPosition};

/// Easing curve applied to transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve (cubic variants)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = 2.0 * t - 2.0;
                    0.5 * t1 * t1 * t1 + 1.0
                }
            }
        }
    }
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Timing knobs for settle animations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTuning {
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
    /// Floor applied when the settle was triggered by a fling
    #[serde(default = "default_fling_min_duration_ms")]
    pub fling_min_duration_ms: u64,
    /// Travel distance at which `max_duration_ms` applies
    #[serde(default = "default_reference_distance")]
    pub reference_distance: Distance,
    #[serde(default)]
    pub easing: Easing,
}

fn default_min_duration_ms() -> u64 {
    120
}

fn default_max_duration_ms() -> u64 {
    450
}

fn default_fling_min_duration_ms() -> u64 {
    180
}

fn default_reference_distance() -> Distance {
    500.0
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            fling_min_duration_ms: default_fling_min_duration_ms(),
            reference_distance: default_reference_distance(),
            easing: Easing::default(),
        }
    }
}

impl AnimationTuning {
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }

    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms.max(self.min_duration_ms))
    }

    /// Duration for travelling `distance`
    ///
    /// Plain settles scale with the square root of the distance between the
    /// min and max durations. A fling travels at its own speed but never
    /// faster than `fling_min_duration_ms`.
    pub fn duration_for(&self, distance: Distance, fling_speed: Option<f64>) -> Duration {
        let min = self.min_duration();
        let max = self.max_duration();
        let distance = distance.abs();

        if !distance.is_finite() || distance == 0.0 {
            return min;
        }

        if let Some(speed) = fling_speed.map(f64::abs).filter(|s| s.is_finite() && *s > 0.0) {
            let floor = Duration::from_millis(self.fling_min_duration_ms).min(max);
            let travel = Duration::try_from_secs_f64(distance / speed).unwrap_or(max);
            return travel.clamp(floor, max);
        }

        if self.reference_distance <= 0.0 || distance >= self.reference_distance {
            return max;
        }

        let normalized = (distance / self.reference_distance).sqrt();
        let min_ms = min.as_secs_f64() * 1000.0;
        let max_ms = max.as_secs_f64() * 1000.0;
        Duration::from_secs_f64(lerp(min_ms, max_ms, normalized) / 1000.0)
    }
}

/// What started a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOrigin {
    /// Released drag resolved through the snap resolver
    Drag,
    /// `scroll_to`, minimize, restore or dismiss
    Programmatic,
}

/// An in-flight settle animation
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: RestPosition,
    pub to: RestPosition,
    pub from_offset: Distance,
    pub to_offset: Distance,
    pub from_ratio: Fraction,
    pub to_ratio: Fraction,
    pub duration: Duration,
    pub easing: Easing,
    /// `Some(true)` entering a full-screen `Full`, `Some(false)` leaving it
    pub full_screen: Option<bool>,
    pub origin: TransitionOrigin,
}

impl Transition {
    pub fn distance(&self) -> Distance {
        (self.to_offset - self.from_offset).abs()
    }

    pub fn offset_at(&self, progress: f64) -> Distance {
        lerp(self.from_offset, self.to_offset, self.easing.apply(progress))
    }

    pub fn ratio_at(&self, progress: f64) -> Fraction {
        lerp(self.from_ratio, self.to_ratio, self.easing.apply(progress))
    }
}
