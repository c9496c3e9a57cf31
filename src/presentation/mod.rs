//! Cross-panel presentation coordination
//!
//! Panels presented under the same `GroupId` form a stack. Presenting a panel
//! can minimize the one below it; dismissing it restores that panel. Backdrop
//! dimming fades with stack depth.
//!
//! - `PresentationCoordinator`: stack bookkeeping, returns `Delivery`s
//! - `PanelStage`: owns live controllers and routes deliveries to them

mod coordinator;
mod handle;
mod stage;

pub use coordinator::{Delivery, PanelEvent, PresentationCoordinator, PresentationTuning};
pub use handle::{ControllerId, GroupId, PanelHandle};
pub use stage::PanelStage;
