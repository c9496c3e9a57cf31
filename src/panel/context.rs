//! Per-presentation panel configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::position::{Distance, RestPosition};

/// Configuration errors detected when a context is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContextError {
    #[error("initial position {initial} is not legal (legal: {legal:?})")]
    IllegalInitialPosition {
        initial: RestPosition,
        legal: Vec<RestPosition>,
    },
    #[error("partial inset must be a finite, non-negative distance (got {0})")]
    InvalidPartialInset(Distance),
}

/// Immutable configuration of a single presentation
///
/// `Hidden` is always legal. `Partial` and `Full` depend on the support flags,
/// `Peek` on `peek_inset` (a minimized panel can always reach it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelContext {
    pub initial_position: RestPosition,
    pub supports_partial: bool,
    pub supports_full: bool,
    /// Visible height at `Partial`, above the bottom safe area
    pub partial_inset: Distance,
    /// Reaching `Full` covers the whole host and drops rounded corners
    pub mimics_full_screen_when_full: bool,
    /// Visible height at `Peek` when the panel is not minimized by a sibling
    #[serde(default)]
    pub peek_inset: Option<Distance>,
    /// Whether dragging may settle the panel at `Hidden`
    #[serde(default = "default_dismissible")]
    pub dismissible: bool,
}

fn default_dismissible() -> bool {
    true
}

impl Default for PanelContext {
    fn default() -> Self {
        Self {
            initial_position: RestPosition::Partial,
            supports_partial: true,
            supports_full: true,
            partial_inset: 300.0,
            mimics_full_screen_when_full: false,
            peek_inset: None,
            dismissible: true,
        }
    }
}

impl PanelContext {
    /// Create a context that opens at `initial` with partial and full support
    pub fn new(initial: RestPosition, partial_inset: Distance) -> Self {
        Self {
            initial_position: initial,
            partial_inset,
            ..Self::default()
        }
    }

    pub fn with_partial(mut self, supported: bool) -> Self {
        self.supports_partial = supported;
        self
    }

    pub fn with_full(mut self, supported: bool) -> Self {
        self.supports_full = supported;
        self
    }

    pub fn with_full_screen_mimic(mut self, mimic: bool) -> Self {
        self.mimics_full_screen_when_full = mimic;
        self
    }

    pub fn with_peek_inset(mut self, inset: Distance) -> Self {
        self.peek_inset = Some(inset);
        self
    }

    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    /// Whether `position` may be used as a rest point for this presentation
    pub fn is_legal(&self, position: RestPosition) -> bool {
        match position {
            RestPosition::Hidden => true,
            RestPosition::Peek => self.peek_inset.is_some(),
            RestPosition::Partial => self.supports_partial,
            RestPosition::Full => self.supports_full,
        }
    }

    /// Legal positions, least visible first
    pub fn legal_positions(&self) -> Vec<RestPosition> {
        RestPosition::ALL
            .into_iter()
            .filter(|p| self.is_legal(*p))
            .collect()
    }

    /// Positions an interactive drag may settle at
    pub fn drag_candidates(&self, minimized: bool) -> Vec<RestPosition> {
        RestPosition::ALL
            .into_iter()
            .filter(|p| match p {
                RestPosition::Hidden => self.dismissible,
                RestPosition::Peek => minimized || self.peek_inset.is_some(),
                RestPosition::Partial => self.supports_partial,
                RestPosition::Full => self.supports_full,
            })
            .collect()
    }

    /// Position a minimized panel returns to
    pub fn expanded_position(&self) -> RestPosition {
        match self.initial_position {
            RestPosition::Partial | RestPosition::Full => self.initial_position,
            _ if self.supports_full => RestPosition::Full,
            _ if self.supports_partial => RestPosition::Partial,
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ContextError> {
        if self.supports_partial && !(self.partial_inset.is_finite() && self.partial_inset >= 0.0) {
            return Err(ContextError::InvalidPartialInset(self.partial_inset));
        }
        if !self.is_legal(self.initial_position) {
            return Err(ContextError::IllegalInitialPosition {
                initial: self.initial_position,
                legal: self.legal_positions(),
            });
        }
        Ok(())
    }

    /// Nearest legal position to `position` in visibility order
    ///
    /// Ties resolve toward the more visible position.
    pub fn nearest_legal(&self, position: RestPosition) -> RestPosition {
        let target = position as i32;
        self.legal_positions()
            .into_iter()
            .min_by_key(|p| ((*p as i32 - target).abs(), -(*p as i32)))
            .unwrap_or(RestPosition::Hidden)
    }

    /// Coerce the context into a consistent state
    pub fn clamp_to_legal(mut self) -> Self {
        if !(self.partial_inset.is_finite() && self.partial_inset >= 0.0) {
            self.partial_inset = 0.0;
        }
        self.initial_position = self.nearest_legal(self.initial_position);
        self
    }

    /// Validate at construction time
    ///
    /// Debug builds panic on a configuration error; release builds log it and
    /// clamp to the nearest legal state.
    pub fn checked(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                if cfg!(debug_assertions) {
                    panic!("invalid panel context: {}", e);
                }
                tracing::error!("Invalid panel context, clamping: {}", e);
                self.clamp_to_legal()
            }
        }
    }
}
