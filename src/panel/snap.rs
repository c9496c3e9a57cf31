//! Snap point resolution
//!
//! Picks the rest point a panel settles at after a drag. Pure: identical
//! inputs always produce identical output.

use serde::{Deserialize, Serialize};

use super::position::{Distance, Fraction};

/// A candidate rest point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub ratio: Fraction,
    /// Larger offset = more hidden
    pub offset: Distance,
}

impl SnapPoint {
    pub fn new(ratio: Fraction, offset: Distance) -> Self {
        Self { ratio, offset }
    }
}

/// Thresholds driving the resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapTuning {
    /// Hysteresis fraction of a bracket
    #[serde(default = "default_toggle_ratio")]
    pub toggle_ratio: Fraction,
    /// Speed (offset units per second) above which a fling beats position
    #[serde(default = "default_fling_threshold")]
    pub fling_threshold: f64,
}

fn default_toggle_ratio() -> Fraction {
    0.3
}

fn default_fling_threshold() -> f64 {
    1200.0
}

impl Default for SnapTuning {
    fn default() -> Self {
        Self {
            toggle_ratio: default_toggle_ratio(),
            fling_threshold: default_fling_threshold(),
        }
    }
}

impl SnapTuning {
    pub fn is_fling(&self, velocity: f64) -> bool {
        velocity.abs() > self.fling_threshold
    }
}

/// Resolve the rest point to animate to
///
/// `candidates` must be sorted ascending by offset. `velocity` is expressed in
/// offset space: positive means closing (offset growing), negative opening.
/// `going_up` is the drag direction, true when the panel was becoming more
/// visible. Returns `None` for an empty candidate list or a non-finite offset.
pub fn resolve(
    candidates: &[SnapPoint],
    current_offset: Distance,
    velocity: f64,
    going_up: bool,
    tuning: &SnapTuning,
) -> Option<SnapPoint> {
    debug_assert!(
        candidates.windows(2).all(|w| w[0].offset <= w[1].offset),
        "snap candidates must be sorted by offset"
    );

    if !current_offset.is_finite() {
        return None;
    }

    let first = *candidates.first()?;
    let last = *candidates.last()?;

    if current_offset <= first.offset {
        return Some(first);
    }
    if current_offset >= last.offset {
        return Some(last);
    }

    let (a, b) = candidates
        .windows(2)
        .find(|w| current_offset >= w[0].offset && current_offset <= w[1].offset)
        .map(|w| (w[0], w[1]))?;

    if velocity.is_finite() && tuning.is_fling(velocity) {
        return Some(if velocity > 0.0 { b } else { a });
    }

    let interval = b.offset - a.offset;
    if interval <= 0.0 {
        return Some(a);
    }

    let distance_from_a = (a.offset - current_offset).abs();
    let toggle = tuning.toggle_ratio.clamp(0.0, 1.0);
    let threshold = if going_up {
        (1.0 - toggle) * interval
    } else {
        toggle * interval
    };

    Some(if distance_from_a > threshold { b } else { a })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_points() -> Vec<SnapPoint> {
        vec![SnapPoint::new(1.0, 0.0), SnapPoint::new(0.0, 100.0)]
    }

    fn tuning() -> SnapTuning {
        SnapTuning {
            toggle_ratio: 0.3,
            fling_threshold: 1000.0,
        }
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(resolve(&[], 10.0, 0.0, false, &tuning()), None);
    }

    #[test]
    fn test_nan_offset_is_rejected() {
        assert_eq!(resolve(&two_points(), f64::NAN, 0.0, false, &tuning()), None);
    }

    #[test]
    fn test_single_candidate() {
        let only = [SnapPoint::new(0.5, 50.0)];
        assert_eq!(resolve(&only, 10.0, 0.0, true, &tuning()), Some(only[0]));
        assert_eq!(resolve(&only, 90.0, 5000.0, true, &tuning()), Some(only[0]));
    }

    #[test]
    fn test_hysteresis_going_up() {
        let points = two_points();
        assert_eq!(
            resolve(&points, 75.0, 0.0, true, &tuning()),
            Some(points[1])
        );
        assert_eq!(
            resolve(&points, 65.0, 0.0, true, &tuning()),
            Some(points[0])
        );
    }

    #[test]
    fn test_hysteresis_going_down() {
        let points = two_points();
        assert_eq!(
            resolve(&points, 75.0, 0.0, false, &tuning()),
            Some(points[1])
        );
        assert_eq!(
            resolve(&points, 20.0, 0.0, false, &tuning()),
            Some(points[0])
        );
    }

    #[test]
    fn test_slow_velocity_does_not_fling() {
        let points = two_points();
        assert_eq!(
            resolve(&points, 20.0, 999.0, false, &tuning()),
            Some(points[0])
        );
    }

    #[test]
    fn test_picks_bracket_among_many() {
        let points = [
            SnapPoint::new(1.0, 0.0),
            SnapPoint::new(0.5, 200.0),
            SnapPoint::new(0.0, 400.0),
        ];
        assert_eq!(
            resolve(&points, 250.0, 0.0, false, &tuning()),
            Some(points[1])
        );
        assert_eq!(
            resolve(&points, 300.0, 0.0, false, &tuning()),
            Some(points[2])
        );
    }
}
