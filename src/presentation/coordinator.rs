//! Group-scoped presentation stacks
//!
//! The coordinator tracks which panels are presented in each group and tells
//! siblings to minimize or restore. It only ever holds `PanelHandle` values;
//! deliveries are returned to the caller, who routes them to the live
//! controllers. All operations run on the host's control thread.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::panel::{Distance, Fraction};

use super::handle::{ControllerId, GroupId, PanelHandle};

/// Knobs for stacking behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationTuning {
    /// Backdrop alpha behind the topmost panel of a group
    #[serde(default = "default_base_overlay_alpha")]
    pub base_overlay_alpha: Fraction,
    /// Subtracted from the new panel's inset to size the minimized predecessor
    #[serde(default = "default_minimization_offset")]
    pub minimization_offset: Distance,
}

fn default_base_overlay_alpha() -> Fraction {
    0.4
}

fn default_minimization_offset() -> Distance {
    8.0
}

impl Default for PresentationTuning {
    fn default() -> Self {
        Self {
            base_overlay_alpha: default_base_overlay_alpha(),
            minimization_offset: default_minimization_offset(),
        }
    }
}

/// Reaction a sibling must perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    Minimize { inset: Distance },
    Restore,
}

/// One event addressed to one live panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivery {
    pub recipient: ControllerId,
    pub event: PanelEvent,
}

#[derive(Debug, Default)]
pub struct PresentationCoordinator {
    tuning: PresentationTuning,
    next_id: u64,
    /// Presented handles per group, most recent last
    active_groups: BTreeMap<GroupId, Vec<PanelHandle>>,
    /// Handles presented without a group
    ungrouped: Vec<PanelHandle>,
    /// Every live handle in presentation order
    order: Vec<ControllerId>,
    /// Minimized handle -> handle whose presentation minimized it
    minimized_by: HashMap<ControllerId, ControllerId>,
}

impl PresentationCoordinator {
    pub fn new(tuning: PresentationTuning) -> Self {
        Self {
            tuning,
            ..Self::default()
        }
    }

    pub fn tuning(&self) -> &PresentationTuning {
        &self.tuning
    }

    /// Allocate a handle for a panel about to be presented
    pub fn register(&mut self, group_id: Option<GroupId>, minimizes_previous: bool) -> PanelHandle {
        self.next_id += 1;
        PanelHandle::new(ControllerId::new(self.next_id), group_id, minimizes_previous)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_presented(&self, id: ControllerId) -> bool {
        self.order.contains(&id)
    }

    pub fn handle(&self, id: ControllerId) -> Option<&PanelHandle> {
        self.active_groups
            .values()
            .flatten()
            .chain(self.ungrouped.iter())
            .find(|h| h.controller_id == id)
    }

    /// Handles of `group`, bottom first
    pub fn group_stack(&self, group: &GroupId) -> &[PanelHandle] {
        self.active_groups
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupId> {
        self.active_groups.keys()
    }

    pub fn live_count(&self) -> usize {
        self.order.len()
    }

    /// Whether `id` is currently minimized because of a sibling
    pub fn is_minimized(&self, id: ControllerId) -> bool {
        self.minimized_by.contains_key(&id)
    }

    /// 0 for the topmost handle of its group, growing toward the bottom
    ///
    /// Ungrouped handles are always at depth 0.
    pub fn stack_depth(&self, id: ControllerId) -> Option<usize> {
        let handle = self.handle(id)?;
        match &handle.group_id {
            Some(group) => {
                let stack = self.group_stack(group);
                let index = stack.iter().position(|h| h.controller_id == id)?;
                Some(stack.len() - 1 - index)
            }
            None => Some(0),
        }
    }

    /// Backdrop dimming for a handle: `base / (depth + 1)`
    pub fn backdrop_alpha(&self, id: ControllerId) -> Fraction {
        match self.stack_depth(id) {
            Some(depth) => self.tuning.base_overlay_alpha / (depth as f64 + 1.0),
            None => {
                tracing::debug!(panel = %id, "backdrop_alpha for unknown panel");
                0.0
            }
        }
    }

    // ------------------------------------------------------------------
    // Broadcasts
    // ------------------------------------------------------------------

    /// Record `handle` as presented and compute sibling reactions
    ///
    /// Only the handle directly below the new one reacts, and only when the
    /// new handle asks to minimize its predecessor.
    pub fn notify_presenting(&mut self, handle: &PanelHandle, initial_inset: Distance) -> Vec<Delivery> {
        let id = handle.controller_id;
        if self.is_presented(id) {
            tracing::warn!(panel = %id, "Panel presented twice, ignoring");
            return Vec::new();
        }

        let scope: Vec<ControllerId> = match &handle.group_id {
            Some(group) => {
                let stack = self.active_groups.entry(group.clone()).or_default();
                stack.push(handle.clone());
                stack.iter().map(|h| h.controller_id).collect()
            }
            None => {
                self.ungrouped.push(handle.clone());
                let mut all = self.order.clone();
                all.push(id);
                all
            }
        };
        self.order.push(id);

        tracing::debug!(
            panel = %id,
            group = ?handle.group_id,
            scope = scope.len(),
            "Presenting"
        );

        let mut deliveries = Vec::new();
        let predecessor = scope.len().checked_sub(2).map(|i| scope[i]);
        for recipient in scope.iter().copied().filter(|r| *r != id) {
            if Some(recipient) != predecessor || !handle.should_minimize_previous {
                continue;
            }
            if self.minimized_by.contains_key(&recipient) {
                tracing::debug!(panel = %recipient, "Already minimized");
                continue;
            }
            let inset = (initial_inset - self.tuning.minimization_offset).max(0.0);
            self.minimized_by.insert(recipient, id);
            deliveries.push(Delivery {
                recipient,
                event: PanelEvent::Minimize { inset },
            });
        }
        deliveries
    }

    /// Remove the handle for `id` and compute restores
    ///
    /// Idempotent: dismissing an unknown handle is a logged no-op.
    pub fn notify_dismissed(&mut self, id: ControllerId) -> Vec<Delivery> {
        let Some(handle) = self.handle(id).cloned() else {
            tracing::debug!(panel = %id, "Dismiss for a panel that is not presented, ignoring");
            return Vec::new();
        };

        match &handle.group_id {
            Some(group) => {
                if let Some(stack) = self.active_groups.get_mut(group) {
                    stack.retain(|h| h.controller_id != id);
                    if stack.is_empty() {
                        self.active_groups.remove(group);
                    }
                }
            }
            None => self.ungrouped.retain(|h| h.controller_id != id),
        }
        self.order.retain(|other| *other != id);
        self.minimized_by.remove(&id);

        let mut orphans: Vec<ControllerId> = self
            .minimized_by
            .iter()
            .filter(|(_, minimizer)| **minimizer == id)
            .map(|(minimized, _)| *minimized)
            .collect();
        orphans.sort();

        let mut deliveries = Vec::new();
        for orphan in orphans {
            match self.successor(orphan, handle.group_id.as_ref()) {
                Some(above) => {
                    tracing::debug!(panel = %orphan, now_held_by = %above, "Minimize record handed over");
                    self.minimized_by.insert(orphan, above);
                }
                None => {
                    self.minimized_by.remove(&orphan);
                    deliveries.push(Delivery {
                        recipient: orphan,
                        event: PanelEvent::Restore,
                    });
                }
            }
        }

        tracing::debug!(panel = %id, restores = deliveries.len(), "Dismissed");
        deliveries
    }

    /// Handle directly above `id` in the scope of `group`
    fn successor(&self, id: ControllerId, group: Option<&GroupId>) -> Option<ControllerId> {
        let sequence: Vec<ControllerId> = match group {
            Some(group) => self
                .group_stack(group)
                .iter()
                .map(|h| h.controller_id)
                .collect(),
            None => self.order.clone(),
        };
        let index = sequence.iter().position(|other| *other == id)?;
        sequence.get(index + 1).copied()
    }
}
