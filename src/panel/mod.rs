//! Panel system - draggable, bottom-anchored panels
//!
//! A panel rests at one of a few discrete positions and can be dragged
//! between them. On release it settles at the rest point picked by the
//! velocity-aware snap resolver.
//!
//! ## Architecture
//!
//! - `RestPosition`: Hidden, Peek, Partial or Full
//! - `PanelContext`: which positions a presentation may use
//! - `PanelSpan`: offset/ratio math for a laid-out panel
//! - `snap::resolve`: pure snap point selection with fling and hysteresis
//! - `DragTracker`: last two gesture samples, for drag direction
//! - `PanelPositionController`: live geometry and settle state machine
//!
//! ## Integration
//!
//! Controllers are driven through `update::update_panel` with `PanelMsg`s and
//! answer with `Cmd`s. Stacking across panels lives in `presentation`.

mod context;
mod controller;
mod drag;
mod geometry;
mod position;
pub mod snap;
mod transition;

pub use context::{ContextError, PanelContext};
pub use controller::PanelPositionController;
pub use drag::DragTracker;
pub use geometry::{HostGeometry, Insets, PanelSpan, Point, Rect};
pub use position::{Distance, DragDirection, Fraction, RestPosition};
pub use snap::{SnapPoint, SnapTuning};
pub use transition::{AnimationTuning, Easing, Transition, TransitionOrigin};
