//! Panel controller behaviour driven through the message loop

mod common;

use std::time::Duration;

use common::{host, settled_controller, Hook, RecordingDelegate};
use panelstack::commands::Cmd;
use panelstack::config::PanelConfig;
use panelstack::host::FixedContent;
use panelstack::messages::PanelMsg;
use panelstack::panel::{
    HostGeometry, PanelContext, PanelPositionController, Point, RestPosition, TransitionOrigin,
};
use panelstack::presentation::ControllerId;
use panelstack::update::update_panel;

/// A point inside the lower part of the host, always within the panel frame
fn grip() -> Point {
    Point::new(200.0, 780.0)
}

fn drag(controller: &mut PanelPositionController, deltas: &[f64]) {
    update_panel(controller, PanelMsg::BeginDrag);
    for delta in deltas {
        update_panel(
            controller,
            PanelMsg::UpdateDrag {
                delta: *delta,
                pointer: grip(),
            },
        );
    }
}

// ========================================================================
// Re-entrancy
// ========================================================================

#[test]
fn test_second_release_while_animating_is_ignored() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    drag(&mut c, &[100.0]);
    let ratio_before = c.current_ratio();

    let first = update_panel(&mut c, PanelMsg::EndDrag { velocity: 0.0 }).unwrap();
    assert_eq!(first.transitions().len(), 1);
    assert!(c.is_animating());

    let second = update_panel(&mut c, PanelMsg::EndDrag { velocity: -3000.0 });
    assert!(second.is_none());
    assert_eq!(c.current_ratio(), ratio_before);
    assert_eq!(c.in_flight().unwrap().to, RestPosition::Full);
}

#[test]
fn test_gesture_input_ignored_while_animating() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    update_panel(
        &mut c,
        PanelMsg::ScrollTo {
            position: RestPosition::Full,
            animated: true,
        },
    );
    let offset = c.current_offset();

    update_panel(&mut c, PanelMsg::BeginDrag);
    assert!(!c.is_dragging());
    let cmd = update_panel(
        &mut c,
        PanelMsg::UpdateDrag {
            delta: 50.0,
            pointer: grip(),
        },
    );
    assert!(cmd.is_none());
    assert_eq!(c.current_offset(), offset);

    assert!(update_panel(&mut c, PanelMsg::Minimize { inset: 40.0 }).is_none());
    assert!(!c.is_minimized());
}

#[test]
fn test_frames_follow_transition_and_finish_commits() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    update_panel(
        &mut c,
        PanelMsg::ScrollTo {
            position: RestPosition::Full,
            animated: true,
        },
    );

    update_panel(&mut c, PanelMsg::AnimationFrame { progress: 1.0 });
    assert_eq!(c.current_offset(), 0.0);
    assert_eq!(c.position(), RestPosition::Partial);

    update_panel(&mut c, PanelMsg::TransitionFinished);
    assert_eq!(c.position(), RestPosition::Full);
    assert_eq!(c.current_ratio(), 1.0);
    assert!(!c.is_animating());

    // Nothing left to finish
    assert!(update_panel(&mut c, PanelMsg::TransitionFinished).is_none());
}

// ========================================================================
// Drag release
// ========================================================================

#[test]
fn test_slow_release_past_toggle_snaps_open() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    // Partial sits at offset 300; 220 up leaves 80 from Full
    drag(&mut c, &[120.0, 100.0]);
    let cmd = update_panel(&mut c, PanelMsg::EndDrag { velocity: 0.0 }).unwrap();
    let (_, transition) = cmd.transitions()[0];
    assert_eq!(transition.to, RestPosition::Full);
    assert_eq!(transition.origin, TransitionOrigin::Drag);
}

#[test]
fn test_short_release_returns_to_partial() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    drag(&mut c, &[30.0]);
    let cmd = update_panel(&mut c, PanelMsg::EndDrag { velocity: 0.0 }).unwrap();
    assert_eq!(cmd.transitions()[0].1.to, RestPosition::Partial);
}

#[test]
fn test_closing_fling_dismisses() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    drag(&mut c, &[-10.0]);
    let cmd = update_panel(&mut c, PanelMsg::EndDrag { velocity: -4000.0 }).unwrap();
    assert_eq!(cmd.transitions()[0].1.to, RestPosition::Hidden);
}

#[test]
fn test_non_dismissible_panel_never_settles_hidden() {
    let context = PanelContext::default().with_dismissible(false);
    let mut c = settled_controller(context, RestPosition::Partial);
    drag(&mut c, &[-250.0]);
    let cmd = update_panel(&mut c, PanelMsg::EndDrag { velocity: -4000.0 }).unwrap();
    assert_eq!(cmd.transitions()[0].1.to, RestPosition::Partial);
}

#[test]
fn test_fling_duration_has_a_floor() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    drag(&mut c, &[5.0]);
    update_panel(&mut c, PanelMsg::EndDrag { velocity: 5000.0 });

    let transition = c.in_flight().unwrap();
    assert_eq!(transition.to, RestPosition::Full);
    assert_eq!(
        transition.duration,
        Duration::from_millis(PanelConfig::default().animation.fling_min_duration_ms)
    );
}

#[test]
fn test_drag_settle_reports_magnetic_scroll() {
    let (delegate, log) = RecordingDelegate::new();
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    c.set_delegate(Some(Box::new(delegate)));

    drag(&mut c, &[30.0]);
    update_panel(&mut c, PanelMsg::EndDrag { velocity: 0.0 });
    update_panel(&mut c, PanelMsg::TransitionFinished);

    let log = log.borrow();
    assert!(log.contains(&Hook::DidPan(270.0)));
    assert_eq!(
        log.last(),
        Some(&Hook::MagneticScroll(RestPosition::Partial))
    );
}

#[test]
fn test_programmatic_settle_skips_magnetic_scroll() {
    let (delegate, log) = RecordingDelegate::new();
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    c.set_delegate(Some(Box::new(delegate)));

    update_panel(
        &mut c,
        PanelMsg::ScrollTo {
            position: RestPosition::Full,
            animated: true,
        },
    );
    update_panel(&mut c, PanelMsg::TransitionFinished);

    let log = log.borrow();
    assert!(matches!(
        log.first(),
        Some(Hook::WillAnimate(RestPosition::Partial, RestPosition::Full, _))
    ));
    assert_eq!(
        log.last(),
        Some(&Hook::DidSettle(RestPosition::Partial, RestPosition::Full))
    );
    assert!(!log.iter().any(|h| matches!(h, Hook::MagneticScroll(_))));
}

// ========================================================================
// Full-screen mimicry
// ========================================================================

#[test]
fn test_full_screen_toggles_at_finish_when_entering() {
    let (delegate, log) = RecordingDelegate::new();
    let context = PanelContext::default().with_full_screen_mimic(true);
    let mut c = settled_controller(context, RestPosition::Partial);
    c.set_delegate(Some(Box::new(delegate)));

    update_panel(
        &mut c,
        PanelMsg::ScrollTo {
            position: RestPosition::Full,
            animated: true,
        },
    );
    assert!(!c.is_full_screen());
    assert!(!log.borrow().contains(&Hook::FullScreen(true)));

    update_panel(&mut c, PanelMsg::TransitionFinished);
    assert!(c.is_full_screen());
    assert_eq!(
        log.borrow().iter().filter(|h| **h == Hook::FullScreen(true)).count(),
        1
    );
}

#[test]
fn test_full_screen_toggles_at_start_when_leaving() {
    let (delegate, log) = RecordingDelegate::new();
    let context = PanelContext::default().with_full_screen_mimic(true);
    let mut c = settled_controller(context, RestPosition::Full);
    assert!(c.is_full_screen());
    c.set_delegate(Some(Box::new(delegate)));

    update_panel(
        &mut c,
        PanelMsg::ScrollTo {
            position: RestPosition::Partial,
            animated: true,
        },
    );
    assert!(!c.is_full_screen());
    assert_eq!(
        log.borrow().as_slice()[1..],
        [Hook::FullScreen(false)]
    );
}

// ========================================================================
// Geometry edge cases
// ========================================================================

#[test]
fn test_degenerate_geometry_keeps_ratio_finite() {
    let mut c = PanelPositionController::new(
        ControllerId::new(7),
        PanelContext::default(),
        FixedContent(600.0),
        &PanelConfig::default(),
    );
    assert!(update_panel(&mut c, PanelMsg::Layout(HostGeometry::new(400.0, 0.0))).is_none());
    assert!(c.frame().is_none());

    update_panel(&mut c, PanelMsg::BeginDrag);
    assert!(update_panel(
        &mut c,
        PanelMsg::UpdateDrag {
            delta: 20.0,
            pointer: grip()
        }
    )
    .is_none());
    assert!(update_panel(&mut c, PanelMsg::EndDrag { velocity: 0.0 }).is_none());
    assert!(c.current_ratio().is_finite());
    assert!(c.current_offset().is_finite());
}

#[test]
fn test_degenerate_relayout_keeps_previous_frame() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Partial);
    let frame = c.frame();
    update_panel(&mut c, PanelMsg::Layout(HostGeometry::new(f64::NAN, 800.0)));
    assert_eq!(c.frame(), frame);
    assert_eq!(c.current_offset(), 300.0);
}

#[test]
fn test_content_taller_than_host_is_capped() {
    let mut c = PanelPositionController::new(
        ControllerId::new(8),
        PanelContext::default(),
        FixedContent(5000.0),
        &PanelConfig::default(),
    );
    c.layout(host());
    assert_eq!(c.visible_height_at(RestPosition::Full), Some(800.0));
}

#[test]
fn test_nested_scroll_reset_only_on_first_downward_sample() {
    let mut c = settled_controller(PanelContext::default(), RestPosition::Full);
    update_panel(&mut c, PanelMsg::NestedScrolled { offset: 90.0 });

    update_panel(&mut c, PanelMsg::BeginDrag);
    let first = update_panel(
        &mut c,
        PanelMsg::UpdateDrag {
            delta: -5.0,
            pointer: grip(),
        },
    )
    .unwrap();
    assert!(matches!(first, Cmd::Batch(ref cmds) if cmds.contains(&Cmd::ResetNestedScroll(c.id()))));

    update_panel(&mut c, PanelMsg::NestedScrolled { offset: 30.0 });
    let second = update_panel(
        &mut c,
        PanelMsg::UpdateDrag {
            delta: -5.0,
            pointer: grip(),
        },
    )
    .unwrap();
    assert_eq!(second, Cmd::Redraw(c.id()));
}
