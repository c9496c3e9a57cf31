//! Update functions for the Elm-style architecture
//!
//! All panel state transformations flow through `update_panel`.

use crate::commands::Cmd;
use crate::messages::PanelMsg;
use crate::panel::PanelPositionController;

#[cfg(debug_assertions)]
use crate::tracing::PanelSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Dispatch a message to a panel controller
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update_panel(controller: &mut PanelPositionController, msg: PanelMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(controller, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(controller, msg)
    }
}

fn update_inner(controller: &mut PanelPositionController, msg: PanelMsg) -> Option<Cmd> {
    match msg {
        PanelMsg::Layout(geometry) => controller.layout(geometry),
        PanelMsg::BeginDrag => {
            controller.begin_drag();
            None
        }
        PanelMsg::UpdateDrag { delta, pointer } => controller.update_drag(delta, pointer),
        PanelMsg::EndDrag { velocity } => controller.end_drag(velocity),
        PanelMsg::ScrollTo { position, animated } => controller.scroll_to(position, animated),
        PanelMsg::Minimize { inset } => controller.minimize(inset),
        PanelMsg::Restore => controller.restore(),
        PanelMsg::NestedScrolled { offset } => {
            controller.nested_scrolled(offset);
            None
        }
        PanelMsg::AnimationFrame { progress } => {
            controller.animation_frame(progress);
            None
        }
        PanelMsg::TransitionFinished => controller.finish_transition(),
    }
}

#[cfg(debug_assertions)]
fn update_traced(controller: &mut PanelPositionController, msg: PanelMsg) -> Option<Cmd> {
    // Per-frame messages would drown the log
    let is_noisy = matches!(
        msg,
        PanelMsg::UpdateDrag { .. } | PanelMsg::AnimationFrame { .. }
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update_panel", panel = %controller.id(), msg = %msg_name).entered())
    };

    let before = PanelSnapshot::from_controller(controller);
    let result = update_inner(controller, msg);

    if !is_noisy {
        let after = PanelSnapshot::from_controller(controller);
        if let Some(diff) = before.diff(&after) {
            debug!(target: "panel", %diff, "state changed");
        }
    }

    result
}

/// Variant name of a message, without its payload
#[cfg(debug_assertions)]
fn msg_type_name(msg: &PanelMsg) -> String {
    let full = format!("{:?}", msg);
    full.split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap_or_default()
        .to_string()
}
