//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.

use crate::panel::{Fraction, Transition};
use crate::presentation::ControllerId;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Relayout the panel at its current offset
    Redraw(ControllerId),
    /// Run a settle transition; reply with frames and `TransitionFinished`
    Animate {
        panel: ControllerId,
        transition: Transition,
    },
    /// Zero the content offset of the panel's nested scroll view
    ResetNestedScroll(ControllerId),
    /// Update backdrop dimming behind a panel
    SetBackdrop { panel: ControllerId, alpha: Fraction },
    /// Detach the panel's view from the host
    Detach(ControllerId),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine optional commands, dropping empties and inlining nested batches
    pub fn batch(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
        let mut flat: Vec<Cmd> = Vec::new();
        for cmd in cmds.into_iter().flatten() {
            match cmd {
                Cmd::None => {}
                Cmd::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Cmd::Batch(flat)),
        }
    }

    /// All transitions requested by this command, in order
    pub fn transitions(&self) -> Vec<(ControllerId, &Transition)> {
        match self {
            Cmd::Animate { panel, transition } => vec![(*panel, transition)],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.transitions()).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the host needs to touch its views
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw(_) => true,
            Cmd::Animate { .. } => true,
            Cmd::ResetNestedScroll(_) => false,
            Cmd::SetBackdrop { .. } => true,
            Cmd::Detach(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Panels detached by this command
    pub fn detached(&self) -> Vec<ControllerId> {
        match self {
            Cmd::Detach(id) => vec![*id],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.detached()).collect(),
            _ => Vec::new(),
        }
    }
}
