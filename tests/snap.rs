//! Snap resolver properties
//!
//! Determinism, boundary clamping, hysteresis and fling override.

use panelstack::panel::snap::resolve;
use panelstack::panel::{SnapPoint, SnapTuning};

fn tuning() -> SnapTuning {
    SnapTuning {
        toggle_ratio: 0.3,
        fling_threshold: 1000.0,
    }
}

/// Near candidate at offset 0, far candidate at offset 1 (interval normalized to 1)
fn unit_bracket() -> [SnapPoint; 2] {
    [SnapPoint::new(1.0, 0.0), SnapPoint::new(0.0, 1.0)]
}

fn three_points() -> [SnapPoint; 3] {
    [
        SnapPoint::new(1.0, 0.0),
        SnapPoint::new(0.5, 300.0),
        SnapPoint::new(0.0, 600.0),
    ]
}

// ========================================================================
// Determinism
// ========================================================================

#[test]
fn test_resolve_is_deterministic() {
    let points = three_points();
    let inputs = [
        (120.0, 0.0, true),
        (120.0, 0.0, false),
        (450.0, -800.0, true),
        (451.0, 5000.0, false),
    ];
    for (offset, velocity, going_up) in inputs {
        let first = resolve(&points, offset, velocity, going_up, &tuning());
        for _ in 0..10 {
            assert_eq!(resolve(&points, offset, velocity, going_up, &tuning()), first);
        }
    }
}

// ========================================================================
// Boundary clamp
// ========================================================================

#[test]
fn test_below_smallest_returns_first() {
    let points = three_points();
    for velocity in [0.0, 5000.0, -5000.0] {
        assert_eq!(
            resolve(&points, -40.0, velocity, false, &tuning()),
            Some(points[0])
        );
    }
}

#[test]
fn test_above_largest_returns_last() {
    let points = three_points();
    for velocity in [0.0, 5000.0, -5000.0] {
        assert_eq!(
            resolve(&points, 900.0, velocity, true, &tuning()),
            Some(points[2])
        );
    }
}

// ========================================================================
// Hysteresis
// ========================================================================

#[test]
fn test_going_up_at_75_percent_picks_far() {
    let points = unit_bracket();
    assert_eq!(resolve(&points, 0.75, 0.0, true, &tuning()), Some(points[1]));
}

#[test]
fn test_going_up_at_65_percent_picks_near() {
    let points = unit_bracket();
    assert_eq!(resolve(&points, 0.65, 0.0, true, &tuning()), Some(points[0]));
}

#[test]
fn test_going_down_at_75_percent_picks_far() {
    let points = unit_bracket();
    assert_eq!(resolve(&points, 0.75, 0.0, false, &tuning()), Some(points[1]));
}

#[test]
fn test_going_down_at_20_percent_picks_near() {
    let points = unit_bracket();
    assert_eq!(resolve(&points, 0.2, 0.0, false, &tuning()), Some(points[0]));
}

// ========================================================================
// Fling override
// ========================================================================

#[test]
fn test_closing_fling_beats_position() {
    let points = three_points();
    // 1% of the bracket away from the opening edge
    assert_eq!(
        resolve(&points, 303.0, 1500.0, true, &tuning()),
        Some(points[2])
    );
}

#[test]
fn test_opening_fling_beats_position() {
    let points = three_points();
    // 1% of the bracket away from the closing edge
    assert_eq!(
        resolve(&points, 597.0, -1500.0, false, &tuning()),
        Some(points[1])
    );
}

#[test]
fn test_velocity_at_threshold_is_not_a_fling() {
    let points = three_points();
    assert_eq!(
        resolve(&points, 303.0, 1000.0, false, &tuning()),
        Some(points[1])
    );
}
