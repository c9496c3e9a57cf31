//! Live geometry and settle state machine of one panel

use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::host::{ContentMeasure, PanelDelegate};
use crate::presentation::ControllerId;

use super::context::PanelContext;
use super::drag::DragTracker;
use super::geometry::{HostGeometry, PanelSpan, Point, Rect};
use super::position::{Distance, DragDirection, Fraction, RestPosition};
use super::snap::{self, SnapPoint, SnapTuning};
use super::transition::{AnimationTuning, Transition, TransitionOrigin};

/// Sibling request that arrived while a transition was in flight
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    Minimize(Distance),
    Restore,
}

/// Drives a single panel between its rest positions
///
/// Owned by whichever host view displays the panel. Offsets follow
/// `PanelSpan`: 0 is fully expanded, `full_height` is hidden.
pub struct PanelPositionController {
    id: ControllerId,
    context: PanelContext,
    content: Box<dyn ContentMeasure>,
    delegate: Option<Box<dyn PanelDelegate>>,
    snap: SnapTuning,
    animation: AnimationTuning,

    geometry: Option<HostGeometry>,
    span: Option<PanelSpan>,

    /// Last rest position the panel settled at
    position: RestPosition,
    current_offset: Distance,
    current_ratio: Fraction,

    in_flight: Option<Transition>,
    drag: DragTracker,

    /// Visible height at `Peek` while minimized by a sibling
    minimized_inset: Option<Distance>,
    nested_scroll_offset: Distance,
    /// Scroll skipped because of degenerate geometry, replayed on next layout
    pending_scroll: Option<(RestPosition, bool)>,
    /// Latest minimize/restore received mid-transition, replayed when it ends
    deferred: Option<Deferred>,
    full_screen: bool,
}

impl std::fmt::Debug for PanelPositionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelPositionController")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("current_offset", &self.current_offset)
            .field("current_ratio", &self.current_ratio)
            .field("is_animating", &self.is_animating())
            .field("minimized_inset", &self.minimized_inset)
            .finish()
    }
}

impl PanelPositionController {
    /// Create a hidden controller; it needs a `layout` before it can move
    pub fn new(
        id: ControllerId,
        context: PanelContext,
        content: impl ContentMeasure + 'static,
        config: &PanelConfig,
    ) -> Self {
        let config = config.sanitized();
        Self {
            id,
            context: context.checked(),
            content: Box::new(content),
            delegate: None,
            snap: config.snap,
            animation: config.animation,
            geometry: None,
            span: None,
            position: RestPosition::Hidden,
            current_offset: 0.0,
            current_ratio: 0.0,
            in_flight: None,
            drag: DragTracker::new(),
            minimized_inset: None,
            nested_scroll_offset: 0.0,
            pending_scroll: None,
            deferred: None,
            full_screen: false,
        }
    }

    pub fn with_delegate(mut self, delegate: Box<dyn PanelDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn set_delegate(&mut self, delegate: Option<Box<dyn PanelDelegate>>) {
        self.delegate = delegate;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn context(&self) -> &PanelContext {
        &self.context
    }

    pub fn position(&self) -> RestPosition {
        self.position
    }

    pub fn current_offset(&self) -> Distance {
        self.current_offset
    }

    pub fn current_ratio(&self) -> Fraction {
        self.current_ratio
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized_inset.is_some()
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn drag_direction(&self) -> Option<DragDirection> {
        self.drag.direction()
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }

    /// Whether a minimize or restore waits for the in-flight transition
    pub fn has_deferred_request(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn nested_scroll_offset(&self) -> Distance {
        self.nested_scroll_offset
    }

    /// Current frame in host coordinates, if laid out
    pub fn frame(&self) -> Option<Rect> {
        let geometry = self.geometry.as_ref()?;
        Some(self.span?.frame(geometry, self.current_offset))
    }

    /// Visible height of the panel at `position`, if laid out
    pub fn visible_height_at(&self, position: RestPosition) -> Option<Distance> {
        let span = self.span?;
        Some(span.visible_height(self.rest_offset(position, &span)))
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    fn compute_span(&self, geometry: &HostGeometry) -> Option<PanelSpan> {
        let full_height = if self.context.mimics_full_screen_when_full {
            geometry.height
        } else {
            let measured = self.content.measured_height(geometry.width);
            let max = geometry.max_panel_height();
            if measured.is_finite() {
                (measured + geometry.safe_area.bottom).min(max)
            } else {
                max
            }
        };
        PanelSpan::new(full_height)
    }

    fn rest_offset(&self, position: RestPosition, span: &PanelSpan) -> Distance {
        let bottom = self
            .geometry
            .as_ref()
            .map(|g| g.safe_area.bottom)
            .unwrap_or(0.0);
        let visible = match position {
            RestPosition::Hidden => 0.0,
            RestPosition::Peek => {
                self.minimized_inset
                    .or(self.context.peek_inset)
                    .unwrap_or(0.0)
                    + bottom
            }
            RestPosition::Partial => self.context.partial_inset + bottom,
            RestPosition::Full => span.full_height,
        };
        span.offset_for_visible(visible)
    }

    fn is_reachable(&self, position: RestPosition) -> bool {
        self.context.is_legal(position) || (position == RestPosition::Peek && self.is_minimized())
    }

    /// Rest points a released drag may settle at, ascending by offset
    fn snap_candidates(&self, span: &PanelSpan) -> Vec<(RestPosition, SnapPoint)> {
        let mut candidates: Vec<(RestPosition, SnapPoint)> = self
            .context
            .drag_candidates(self.is_minimized())
            .into_iter()
            .map(|position| {
                let offset = self.rest_offset(position, span);
                (position, SnapPoint::new(span.ratio(offset), offset))
            })
            .collect();
        candidates.sort_by(|a, b| a.1.offset.total_cmp(&b.1.offset));
        candidates
    }

    /// Apply a layout pass
    ///
    /// Degenerate bounds are skipped; the previous layout stays in effect.
    pub fn layout(&mut self, geometry: HostGeometry) -> Option<Cmd> {
        if geometry.is_degenerate() {
            tracing::debug!(panel = %self.id, ?geometry, "Degenerate host geometry, skipping layout");
            return None;
        }

        self.geometry = Some(geometry);
        self.span = self.compute_span(&geometry);
        let Some(span) = self.span else {
            tracing::debug!(panel = %self.id, "Panel has no height, skipping layout");
            return None;
        };

        if self.is_animating() || self.is_dragging() {
            self.current_offset = span.clamp_offset(self.current_offset);
        } else {
            self.current_offset = self.rest_offset(self.position, &span);
        }
        self.current_ratio = span.ratio(self.current_offset);

        let replay = self
            .pending_scroll
            .take()
            .and_then(|(position, animated)| self.scroll_to(position, animated));
        Cmd::batch([Some(Cmd::Redraw(self.id)), replay])
    }

    // ------------------------------------------------------------------
    // Gesture
    // ------------------------------------------------------------------

    pub fn begin_drag(&mut self) {
        if self.is_animating() {
            tracing::debug!(panel = %self.id, "begin_drag ignored while animating");
            return;
        }
        self.drag.begin();
    }

    /// Move the panel by `delta` (positive = upward)
    ///
    /// A pointer that leaves the panel's frame ends the drag with zero
    /// velocity instead of updating it.
    pub fn update_drag(&mut self, delta: Distance, pointer: Point) -> Option<Cmd> {
        if self.is_animating() {
            return None;
        }
        if !self.drag.is_active() {
            tracing::warn!(panel = %self.id, "update_drag without begin_drag, ignoring");
            return None;
        }
        let (Some(span), Some(geometry)) = (self.span, self.geometry) else {
            tracing::debug!(panel = %self.id, "update_drag before layout, ignoring");
            return None;
        };
        if !delta.is_finite() {
            return None;
        }

        let next_offset = span.clamp_offset(self.current_offset - delta);
        if !span.frame(&geometry, next_offset).contains(pointer) {
            tracing::debug!(panel = %self.id, ?pointer, "Pointer left panel, settling");
            return self.end_drag(0.0);
        }

        let reset = if self.drag.is_first_sample() && delta < 0.0 && self.nested_scroll_offset > 0.0
        {
            self.nested_scroll_offset = 0.0;
            Some(Cmd::ResetNestedScroll(self.id))
        } else {
            None
        };

        self.drag.record(delta);
        self.current_offset = next_offset;
        self.current_ratio = span.ratio(next_offset);
        tracing::trace!(panel = %self.id, offset = self.current_offset, ratio = self.current_ratio, "pan");

        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_pan(self.current_offset, self.current_ratio);
        }

        Cmd::batch([reset, Some(Cmd::Redraw(self.id))])
    }

    /// Release the drag with `velocity` in points/s (positive = upward)
    pub fn end_drag(&mut self, velocity: f64) -> Option<Cmd> {
        if self.is_animating() {
            tracing::debug!(panel = %self.id, "end_drag ignored while animating");
            return None;
        }

        let going_up = self
            .drag
            .direction()
            .map(|d| d.is_up())
            .unwrap_or(false);
        self.drag.end();

        let span = self.span?;
        let candidates = self.snap_candidates(&span);
        let points: Vec<SnapPoint> = candidates.iter().map(|(_, p)| *p).collect();

        // Resolver works in offset space where closing is positive
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let offset_velocity = -velocity;

        let target = snap::resolve(
            &points,
            self.current_offset,
            offset_velocity,
            going_up,
            &self.snap,
        )?;
        let index = points.iter().position(|p| *p == target)?;
        let position = candidates[index].0;
        let fling = self
            .snap
            .is_fling(offset_velocity)
            .then_some(velocity.abs());

        tracing::debug!(
            panel = %self.id,
            from = %self.position,
            to = %position,
            velocity,
            going_up,
            "Drag released"
        );
        self.start_transition(position, target.offset, true, TransitionOrigin::Drag, fling)
    }

    pub fn nested_scrolled(&mut self, offset: Distance) {
        if offset.is_finite() {
            self.nested_scroll_offset = offset;
        }
    }

    // ------------------------------------------------------------------
    // Programmatic moves
    // ------------------------------------------------------------------

    /// Move to `position` directly, bypassing the snap resolver
    pub fn scroll_to(&mut self, position: RestPosition, animated: bool) -> Option<Cmd> {
        if self.is_animating() {
            tracing::debug!(panel = %self.id, %position, "scroll_to ignored while animating");
            return None;
        }
        if !self.is_reachable(position) {
            tracing::warn!(panel = %self.id, %position, "scroll_to an illegal position, ignoring");
            return None;
        }
        let Some(span) = self.span else {
            tracing::debug!(panel = %self.id, %position, "No valid geometry, deferring scroll");
            self.pending_scroll = Some((position, animated));
            return None;
        };

        let target_offset = self.rest_offset(position, &span);
        if !self.is_dragging() && (span.ratio(target_offset) - self.current_ratio).abs() <= f64::EPSILON
        {
            self.position = position;
            return None;
        }

        self.drag.end();
        self.start_transition(
            position,
            target_offset,
            animated,
            TransitionOrigin::Programmatic,
            None,
        )
    }

    /// Drop to `Peek` showing `inset` of the panel
    ///
    /// Arriving mid-transition, the request is held and replayed once the
    /// panel settles. A later `restore` replaces it.
    pub fn minimize(&mut self, inset: Distance) -> Option<Cmd> {
        let inset = if inset.is_finite() { inset.max(0.0) } else { 0.0 };
        if self.is_animating() {
            tracing::debug!(panel = %self.id, inset, "minimize deferred until settled");
            self.deferred = Some(Deferred::Minimize(inset));
            return None;
        }
        self.minimized_inset = Some(inset);
        self.scroll_to(RestPosition::Peek, true)
    }

    /// Leave `Peek` for the context's expanded position
    pub fn restore(&mut self) -> Option<Cmd> {
        if self.is_animating() {
            self.deferred = match self.deferred {
                // The minimize never took effect, so the pair cancels out
                Some(Deferred::Minimize(_)) if !self.is_minimized() => None,
                _ => Some(Deferred::Restore),
            };
            tracing::debug!(panel = %self.id, deferred = ?self.deferred, "restore deferred until settled");
            return None;
        }
        if self.minimized_inset.take().is_none() {
            tracing::debug!(panel = %self.id, "restore on a panel that is not minimized");
        }
        self.scroll_to(self.context.expanded_position(), true)
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn start_transition(
        &mut self,
        to: RestPosition,
        to_offset: Distance,
        animated: bool,
        origin: TransitionOrigin,
        fling_speed: Option<f64>,
    ) -> Option<Cmd> {
        let span = self.span?;
        let from = self.position;
        let full_screen = if self.context.mimics_full_screen_when_full {
            let entering = to == RestPosition::Full;
            (entering != self.full_screen).then_some(entering)
        } else {
            None
        };

        if !animated {
            self.current_offset = to_offset;
            self.current_ratio = span.ratio(to_offset);
            self.position = to;
            if let Some(full_screen) = full_screen {
                self.set_full_screen(full_screen);
            }
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_settle(from, to);
            }
            return Some(Cmd::Redraw(self.id));
        }

        let distance = (to_offset - self.current_offset).abs();
        let transition = Transition {
            from,
            to,
            from_offset: self.current_offset,
            to_offset,
            from_ratio: self.current_ratio,
            to_ratio: span.ratio(to_offset),
            duration: self.animation.duration_for(distance, fling_speed),
            easing: self.animation.easing,
            full_screen,
            origin,
        };

        tracing::debug!(
            panel = %self.id,
            %from,
            %to,
            duration = ?transition.duration,
            "Starting transition"
        );

        if let Some(delegate) = self.delegate.as_mut() {
            delegate.will_animate(from, to, transition.duration);
        }
        if full_screen == Some(false) {
            self.set_full_screen(false);
        }

        self.in_flight = Some(transition.clone());
        Some(Cmd::Animate {
            panel: self.id,
            transition,
        })
    }

    /// Sync with the host's animation at `progress` in `[0, 1]`
    pub fn animation_frame(&mut self, progress: f64) {
        let Some(transition) = self.in_flight.as_ref() else {
            return;
        };
        let progress = if progress.is_finite() { progress } else { 1.0 };
        self.current_offset = transition.offset_at(progress);
        self.current_ratio = transition.ratio_at(progress);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.animate_alongside(self.current_offset, self.current_ratio);
        }
    }

    /// Commit the in-flight transition
    pub fn finish_transition(&mut self) -> Option<Cmd> {
        let Some(transition) = self.in_flight.take() else {
            tracing::debug!(panel = %self.id, "No transition in flight to finish");
            return None;
        };

        self.current_offset = transition.to_offset;
        self.current_ratio = transition.to_ratio;
        self.position = transition.to;
        if transition.full_screen == Some(true) {
            self.set_full_screen(true);
        }

        tracing::debug!(panel = %self.id, from = %transition.from, to = %transition.to, "Settled");
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_settle(transition.from, transition.to);
            if transition.origin == TransitionOrigin::Drag {
                delegate.did_animate_magnetic_scroll(transition.to);
            }
        }

        // A hidden panel is on its way out
        let replay = match self.deferred.take() {
            Some(deferred) if transition.to == RestPosition::Hidden => {
                tracing::debug!(panel = %self.id, ?deferred, "Dropping request for hidden panel");
                None
            }
            Some(Deferred::Minimize(inset)) => self.minimize(inset),
            Some(Deferred::Restore) => self.restore(),
            None => None,
        };
        Cmd::batch([Some(Cmd::Redraw(self.id)), replay])
    }

    fn set_full_screen(&mut self, full_screen: bool) {
        if self.full_screen == full_screen {
            return;
        }
        self.full_screen = full_screen;
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.full_screen_changed(full_screen);
        }
    }
}
