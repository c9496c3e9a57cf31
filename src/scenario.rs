//! Scripted two-panel walkthrough used by the `panelstack` binary
//!
//! Plays the host's part: it runs every requested transition to completion
//! and records stack depth and dimming after each step.

use std::collections::VecDeque;

use serde::Serialize;

use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::host::{FixedContent, TracingDelegate};
use crate::messages::{Msg, PanelMsg};
use crate::panel::{Fraction, HostGeometry, Insets, PanelContext, Point, RestPosition};
use crate::presentation::{ControllerId, GroupId, PanelStage};

#[derive(Debug, Clone, Serialize)]
pub struct PanelReport {
    pub id: u64,
    pub position: RestPosition,
    pub ratio: Fraction,
    pub depth: Option<usize>,
    pub backdrop_alpha: Fraction,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioStep {
    pub label: String,
    pub panels: Vec<PanelReport>,
}

/// Run every transition requested by `cmd`, including follow-ups
///
/// Returns the ids of panels detached along the way.
pub fn settle_all(stage: &mut PanelStage, cmd: Option<Cmd>) -> Vec<ControllerId> {
    let mut detached = Vec::new();
    let mut queue: VecDeque<Cmd> = cmd.into_iter().collect();

    while let Some(cmd) = queue.pop_front() {
        detached.extend(cmd.detached());
        let panels: Vec<ControllerId> = cmd.transitions().into_iter().map(|(id, _)| id).collect();
        for id in panels {
            stage.update(Msg::panel(id, PanelMsg::AnimationFrame { progress: 0.5 }));
            if let Some(next) = stage.update(Msg::finished(id)) {
                queue.push_back(next);
            }
        }
    }
    detached
}

fn snapshot(stage: &PanelStage, label: &str) -> ScenarioStep {
    let panels = stage
        .live_panels()
        .filter_map(|id| {
            let controller = stage.controller(id)?;
            Some(PanelReport {
                id: id.raw(),
                position: controller.position(),
                ratio: controller.current_ratio(),
                depth: stage.stack_depth(id),
                backdrop_alpha: stage.backdrop_alpha(id),
            })
        })
        .collect();
    ScenarioStep {
        label: label.to_string(),
        panels,
    }
}

/// Present A, stack B on top, drag B, dismiss B
pub fn run(config: PanelConfig, group: &str) -> Vec<ScenarioStep> {
    let geometry = HostGeometry::new(390.0, 844.0).with_safe_area(Insets::new(47.0, 34.0));
    let mut stage = PanelStage::new(config, geometry);
    let group = GroupId::new(group);
    let mut steps = Vec::new();

    let (a, cmd) = stage.present(
        PanelContext::new(RestPosition::Partial, 320.0),
        Some(group.clone()),
        false,
        FixedContent(640.0),
        Some(Box::new(TracingDelegate::new("A"))),
    );
    settle_all(&mut stage, cmd);
    steps.push(snapshot(&stage, "present A"));

    let (b, cmd) = stage.present(
        PanelContext::new(RestPosition::Partial, 260.0),
        Some(group),
        true,
        FixedContent(560.0),
        Some(Box::new(TracingDelegate::new("B"))),
    );
    settle_all(&mut stage, cmd);
    steps.push(snapshot(&stage, "present B over A"));

    let b_id = b.controller_id;
    stage.update(Msg::panel(b_id, PanelMsg::BeginDrag));
    for _ in 0..8 {
        stage.update(Msg::drag(b_id, 25.0, Point::new(195.0, 700.0)));
    }
    let cmd = stage.update(Msg::panel(b_id, PanelMsg::EndDrag { velocity: 400.0 }));
    settle_all(&mut stage, cmd);
    steps.push(snapshot(&stage, "drag B up"));

    let cmd = stage.update(Msg::Dismiss(b_id));
    settle_all(&mut stage, cmd);
    steps.push(snapshot(&stage, "dismiss B"));

    tracing::debug!(panel = %a.controller_id, "Scenario finished");
    steps
}
