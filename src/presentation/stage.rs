//! Host shim that owns live controllers
//!
//! `PanelStage` is the single entry point a screen needs: it creates
//! controllers, keeps the coordinator informed and routes its deliveries.

use std::collections::BTreeMap;

use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::host::{ContentMeasure, PanelDelegate};
use crate::messages::{Msg, PanelMsg};
use crate::panel::{Fraction, HostGeometry, PanelContext, PanelPositionController, RestPosition};
use crate::update::update_panel;

use super::coordinator::{Delivery, PanelEvent, PresentationCoordinator};
use super::handle::{ControllerId, GroupId, PanelHandle};

#[derive(Debug)]
pub struct PanelStage {
    config: PanelConfig,
    geometry: HostGeometry,
    coordinator: PresentationCoordinator,
    panels: BTreeMap<ControllerId, PanelPositionController>,
}

impl PanelStage {
    pub fn new(config: PanelConfig, geometry: HostGeometry) -> Self {
        let config = config.sanitized();
        Self {
            coordinator: PresentationCoordinator::new(config.presentation),
            config,
            geometry,
            panels: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &PresentationCoordinator {
        &self.coordinator
    }

    pub fn controller(&self, id: ControllerId) -> Option<&PanelPositionController> {
        self.panels.get(&id)
    }

    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut PanelPositionController> {
        self.panels.get_mut(&id)
    }

    pub fn live_panels(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.panels.keys().copied()
    }

    pub fn stack_depth(&self, id: ControllerId) -> Option<usize> {
        self.coordinator.stack_depth(id)
    }

    pub fn backdrop_alpha(&self, id: ControllerId) -> Fraction {
        self.coordinator.backdrop_alpha(id)
    }

    /// Present a new panel and animate it to its initial position
    pub fn present(
        &mut self,
        context: PanelContext,
        group: Option<GroupId>,
        minimizes_previous: bool,
        content: impl ContentMeasure + 'static,
        delegate: Option<Box<dyn PanelDelegate>>,
    ) -> (PanelHandle, Option<Cmd>) {
        let handle = self.coordinator.register(group, minimizes_previous);
        let id = handle.controller_id;

        let mut controller = PanelPositionController::new(id, context, content, &self.config);
        controller.set_delegate(delegate);
        let laid_out = controller.layout(self.geometry);

        let initial = controller.context().initial_position;
        let initial_inset = controller
            .visible_height_at(initial)
            .unwrap_or(controller.context().partial_inset);
        let show = controller.scroll_to(initial, true);
        self.panels.insert(id, controller);

        tracing::info!(panel = %id, group = ?handle.group_id, %initial, "Presenting panel");

        let deliveries = self.coordinator.notify_presenting(&handle, initial_inset);
        let routed = self.deliver(deliveries);
        let backdrops = self.backdrop_cmds(handle.group_id.as_ref());

        (handle, Cmd::batch([laid_out, show, routed, backdrops]))
    }

    /// Main update function - dispatches to the addressed panel
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::Panel(id, panel_msg) => self.update_panel(id, panel_msg),
            Msg::Dismiss(id) => self.dismiss(id),
            Msg::Remove(id) => self.remove(id),
        }
    }

    fn update_panel(&mut self, id: ControllerId, msg: PanelMsg) -> Option<Cmd> {
        let Some(controller) = self.panels.get_mut(&id) else {
            tracing::debug!(panel = %id, ?msg, "Message for a panel that is gone");
            return None;
        };

        let was_visible = controller.position().is_visible();
        let was_hiding = controller
            .in_flight()
            .is_some_and(|t| t.to == RestPosition::Hidden);
        let cmd = update_panel(controller, msg);

        // Only a move that actually reached `Hidden` ends the presentation;
        // a panel that never got a valid layout is still waiting to show
        let settled_hidden = controller.position() == RestPosition::Hidden
            && !controller.is_animating()
            && (was_hiding || was_visible);
        if settled_hidden {
            return Cmd::batch([cmd, self.teardown(id)]);
        }
        cmd
    }

    /// Animate a panel to `Hidden`; it is torn down when the transition ends
    pub fn dismiss(&mut self, id: ControllerId) -> Option<Cmd> {
        let Some(controller) = self.panels.get_mut(&id) else {
            tracing::debug!(panel = %id, "Dismiss for a panel that is gone");
            return None;
        };
        if controller.is_animating() {
            tracing::debug!(panel = %id, "Dismiss ignored while animating");
            return None;
        }
        match controller.scroll_to(RestPosition::Hidden, true) {
            Some(cmd) if controller.is_animating() => Some(cmd),
            cmd => Cmd::batch([cmd, self.teardown(id)]),
        }
    }

    /// Tear a panel down immediately; repeated calls are no-ops
    pub fn remove(&mut self, id: ControllerId) -> Option<Cmd> {
        self.teardown(id)
    }

    /// Relayout every live panel
    pub fn set_geometry(&mut self, geometry: HostGeometry) -> Option<Cmd> {
        self.geometry = geometry;
        let cmds: Vec<Option<Cmd>> = self
            .panels
            .values_mut()
            .map(|c| c.layout(geometry))
            .collect();
        Cmd::batch(cmds)
    }

    fn teardown(&mut self, id: ControllerId) -> Option<Cmd> {
        let group = self
            .coordinator
            .handle(id)
            .and_then(|h| h.group_id.clone());
        let detached = self.panels.remove(&id).map(|_| Cmd::Detach(id));

        let deliveries = self.coordinator.notify_dismissed(id);
        let routed = self.deliver(deliveries);
        let backdrops = self.backdrop_cmds(group.as_ref());

        if detached.is_some() {
            tracing::info!(panel = %id, "Panel torn down");
        }
        Cmd::batch([detached, routed, backdrops])
    }

    /// Apply coordinator deliveries in order
    fn deliver(&mut self, deliveries: Vec<Delivery>) -> Option<Cmd> {
        let mut cmds = Vec::with_capacity(deliveries.len());
        for delivery in deliveries {
            let Some(controller) = self.panels.get_mut(&delivery.recipient) else {
                tracing::warn!(panel = %delivery.recipient, ?delivery.event, "Delivery to a panel that is gone");
                continue;
            };
            let cmd = match delivery.event {
                PanelEvent::Minimize { inset } => controller.minimize(inset),
                PanelEvent::Restore => controller.restore(),
            };
            cmds.push(cmd);
        }
        Cmd::batch(cmds)
    }

    fn backdrop_cmds(&self, group: Option<&GroupId>) -> Option<Cmd> {
        let Some(group) = group else {
            return None;
        };
        let cmds: Vec<Option<Cmd>> = self
            .coordinator
            .group_stack(group)
            .iter()
            .map(|h| {
                Some(Cmd::SetBackdrop {
                    panel: h.controller_id,
                    alpha: self.coordinator.backdrop_alpha(h.controller_id),
                })
            })
            .collect();
        Cmd::batch(cmds)
    }
}
