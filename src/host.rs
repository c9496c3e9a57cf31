//! Interfaces to the host integration layer
//!
//! The host supplies content measurements and receives lifecycle hooks.
//! Rendering, gesture recognition and the actual animation driver stay on the
//! host side.

use std::time::Duration;

use crate::panel::{Distance, Fraction, RestPosition};

/// Content collaborator that reports its natural height
pub trait ContentMeasure {
    /// Intrinsic height of the content laid out at `for_width`
    fn measured_height(&self, for_width: Distance) -> Distance;
}

impl<F> ContentMeasure for F
where
    F: Fn(Distance) -> Distance,
{
    fn measured_height(&self, for_width: Distance) -> Distance {
        self(for_width)
    }
}

/// Content with a height that does not depend on width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedContent(pub Distance);

impl ContentMeasure for FixedContent {
    fn measured_height(&self, _for_width: Distance) -> Distance {
        self.0
    }
}

/// Lifecycle hooks fired by a panel controller
///
/// All methods default to no-ops so hosts implement only what they need.
pub trait PanelDelegate {
    /// A settle transition is about to start
    fn will_animate(&mut self, _from: RestPosition, _to: RestPosition, _duration: Duration) {}

    /// Called for every animation frame of a transition
    fn animate_alongside(&mut self, _offset: Distance, _ratio: Fraction) {}

    /// The panel came to rest
    fn did_settle(&mut self, _from: RestPosition, _to: RestPosition) {}

    /// A settle that followed a released drag finished
    fn did_animate_magnetic_scroll(&mut self, _to: RestPosition) {}

    /// Interactive drag moved the panel
    fn did_pan(&mut self, _offset: Distance, _ratio: Fraction) {}

    /// Full-screen mimicry toggled (corner radius, backdrop)
    fn full_screen_changed(&mut self, _full_screen: bool) {}
}

/// Delegate that forwards hooks to the tracing log
#[derive(Debug, Default, Clone)]
pub struct TracingDelegate {
    pub label: String,
}

impl TracingDelegate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PanelDelegate for TracingDelegate {
    fn will_animate(&mut self, from: RestPosition, to: RestPosition, duration: Duration) {
        tracing::info!(panel = %self.label, %from, %to, ?duration, "will animate");
    }

    fn did_settle(&mut self, from: RestPosition, to: RestPosition) {
        tracing::info!(panel = %self.label, %from, %to, "settled");
    }

    fn full_screen_changed(&mut self, full_screen: bool) {
        tracing::debug!(panel = %self.label, full_screen, "full screen mimicry changed");
    }
}
