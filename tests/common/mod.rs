//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use panelstack::config::PanelConfig;
use panelstack::host::{FixedContent, PanelDelegate};
use panelstack::panel::{Distance, Fraction, HostGeometry, PanelContext, PanelPositionController, RestPosition};
use panelstack::presentation::ControllerId;

/// Hook invocations captured by `RecordingDelegate`
#[derive(Debug, Clone, PartialEq)]
pub enum Hook {
    WillAnimate(RestPosition, RestPosition, Duration),
    Alongside(Distance),
    DidSettle(RestPosition, RestPosition),
    MagneticScroll(RestPosition),
    DidPan(Distance),
    FullScreen(bool),
}

/// Delegate that appends every hook to a shared log
#[derive(Debug, Clone, Default)]
pub struct RecordingDelegate {
    pub log: Rc<RefCell<Vec<Hook>>>,
}

impl RecordingDelegate {
    pub fn new() -> (Self, Rc<RefCell<Vec<Hook>>>) {
        let delegate = Self::default();
        let log = delegate.log.clone();
        (delegate, log)
    }
}

impl PanelDelegate for RecordingDelegate {
    fn will_animate(&mut self, from: RestPosition, to: RestPosition, duration: Duration) {
        self.log.borrow_mut().push(Hook::WillAnimate(from, to, duration));
    }

    fn animate_alongside(&mut self, offset: Distance, _ratio: Fraction) {
        self.log.borrow_mut().push(Hook::Alongside(offset));
    }

    fn did_settle(&mut self, from: RestPosition, to: RestPosition) {
        self.log.borrow_mut().push(Hook::DidSettle(from, to));
    }

    fn did_animate_magnetic_scroll(&mut self, to: RestPosition) {
        self.log.borrow_mut().push(Hook::MagneticScroll(to));
    }

    fn did_pan(&mut self, offset: Distance, _ratio: Fraction) {
        self.log.borrow_mut().push(Hook::DidPan(offset));
    }

    fn full_screen_changed(&mut self, full_screen: bool) {
        self.log.borrow_mut().push(Hook::FullScreen(full_screen));
    }
}

/// 400x800 host without safe-area insets
pub fn host() -> HostGeometry {
    HostGeometry::new(400.0, 800.0)
}

/// Controller for 600pt of content, laid out and settled at `position`
pub fn settled_controller(context: PanelContext, position: RestPosition) -> PanelPositionController {
    let mut controller = PanelPositionController::new(
        ControllerId::new(1),
        context,
        FixedContent(600.0),
        &PanelConfig::default(),
    );
    controller.layout(host());
    controller.scroll_to(position, false);
    assert_eq!(controller.position(), position);
    controller
}
