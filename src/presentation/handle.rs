//! Lightweight identifiers for live presentations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique id of one panel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(u64);

impl ControllerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Caller-defined namespace for panels that coordinate with each other
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the coordinator knows about a presented panel
///
/// Value type: the coordinator never holds the controller itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelHandle {
    pub controller_id: ControllerId,
    pub group_id: Option<GroupId>,
    /// Presenting this panel minimizes the one directly below it
    pub should_minimize_previous: bool,
}

impl PanelHandle {
    pub fn new(
        controller_id: ControllerId,
        group_id: Option<GroupId>,
        should_minimize_previous: bool,
    ) -> Self {
        Self {
            controller_id,
            group_id,
            should_minimize_previous,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.controller_id
    }
}
