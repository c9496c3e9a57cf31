//! panelstack - floating panel stack coordination
//!
//! This crate provides the state machines behind draggable, bottom-anchored
//! panels: rest positions, velocity-aware snapping, and group-scoped stacking
//! where presenting a panel minimizes the one below it. Rendering and gesture
//! recognition stay with the host, which talks to the crate through the
//! Elm-style `PanelMsg` / `Cmd` pair.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod host;
pub mod messages;
pub mod panel;
pub mod presentation;
pub mod scenario;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PanelConfig;
pub use messages::{Msg, PanelMsg};
pub use panel::{PanelContext, PanelPositionController, RestPosition};
pub use presentation::{PanelStage, PresentationCoordinator};
