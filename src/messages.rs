//! Message types for the Elm-style architecture
//!
//! All panel state changes flow through these message types.

use crate::panel::{Distance, HostGeometry, Point, RestPosition};
use crate::presentation::ControllerId;

/// Messages handled by a single panel controller
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    /// Host bounds changed (layout pass)
    Layout(HostGeometry),

    // === Gesture ===
    /// Pan gesture began on the panel
    BeginDrag,
    /// Pan moved by `delta` since the previous sample (positive = upward)
    UpdateDrag { delta: Distance, pointer: Point },
    /// Pan ended with `velocity` in points/s (positive = upward)
    EndDrag { velocity: f64 },

    // === Programmatic ===
    /// Move to a rest position without consulting the snap resolver
    ScrollTo { position: RestPosition, animated: bool },
    /// Drop to `Peek` with the given visible height
    Minimize { inset: Distance },
    /// Return from a minimize to the expanded position
    Restore,

    /// Nested scroll view content offset reported by the host
    NestedScrolled { offset: Distance },

    // === Animation driver ===
    /// Progress of the in-flight transition in `[0, 1]`
    AnimationFrame { progress: f64 },
    /// The host finished animating the in-flight transition
    TransitionFinished,
}

/// Top-level message routed through a `PanelStage`
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Message for one live panel
    Panel(ControllerId, PanelMsg),
    /// Animate a panel out, tearing it down once hidden
    Dismiss(ControllerId),
    /// Tear a panel down immediately
    Remove(ControllerId),
}

impl Msg {
    pub fn panel(id: ControllerId, msg: PanelMsg) -> Self {
        Msg::Panel(id, msg)
    }

    pub fn drag(id: ControllerId, delta: Distance, pointer: Point) -> Self {
        Msg::Panel(id, PanelMsg::UpdateDrag { delta, pointer })
    }

    pub fn finished(id: ControllerId) -> Self {
        Msg::Panel(id, PanelMsg::TransitionFinished)
    }
}
