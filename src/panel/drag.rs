//! Drag gesture bookkeeping
//!
//! Keeps the last two cumulative translations of the active gesture. They are
//! only used to infer the drag direction for snap hysteresis.

use super::position::{Distance, DragDirection};

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    active: bool,
    /// Translation accumulated since `begin`, positive = upward
    translation: Distance,
    last_translation: Option<Distance>,
    previous_translation: Option<Distance>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.active = true;
        self.clear_samples();
    }

    pub fn end(&mut self) {
        self.active = false;
        self.clear_samples();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether no delta has been recorded since `begin`
    pub fn is_first_sample(&self) -> bool {
        self.last_translation.is_none()
    }

    pub fn record(&mut self, delta: Distance) {
        self.translation += delta;
        self.previous_translation = self.last_translation;
        self.last_translation = Some(self.translation);
    }

    pub fn translation(&self) -> Distance {
        self.translation
    }

    pub fn direction(&self) -> Option<DragDirection> {
        let last = self.last_translation?;
        let previous = self.previous_translation.unwrap_or(0.0);
        if last > previous {
            Some(DragDirection::Up)
        } else if last < previous {
            Some(DragDirection::Down)
        } else {
            None
        }
    }

    fn clear_samples(&mut self) {
        self.translation = 0.0;
        self.last_translation = None;
        self.previous_translation = None;
    }
}
