//! Rest positions a panel can settle at

use serde::{Deserialize, Serialize};

/// Length along the panel's drag axis, in logical points
pub type Distance = f64;

/// Value in `[0, 1]`
pub type Fraction = f64;

/// A legal resting state of a panel
///
/// Ordered from least to most visible, so `Hidden < Peek < Partial < Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestPosition {
    /// Fully off screen
    Hidden,
    /// Minimized "tip" shown while another panel sits on top
    Peek,
    /// Half-height position, sized by `PanelContext::partial_inset`
    Partial,
    /// Expanded to the content height (or the whole host when mimicking full screen)
    Full,
}

impl RestPosition {
    /// All positions, least visible first
    pub const ALL: [RestPosition; 4] = [
        RestPosition::Hidden,
        RestPosition::Peek,
        RestPosition::Partial,
        RestPosition::Full,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            RestPosition::Hidden => "hidden",
            RestPosition::Peek => "peek",
            RestPosition::Partial => "partial",
            RestPosition::Full => "full",
        }
    }

    /// Whether the panel occupies any of the host at this position
    pub fn is_visible(&self) -> bool {
        !matches!(self, RestPosition::Hidden)
    }
}

impl std::fmt::Display for RestPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.display_name())
    }
}

/// Drag direction inferred from the last two gesture samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    /// Panel becoming more visible
    Up,
    /// Panel becoming less visible
    Down,
}

impl DragDirection {
    pub fn is_up(&self) -> bool {
        matches!(self, DragDirection::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_ordered_by_visibility() {
        assert!(RestPosition::Hidden < RestPosition::Peek);
        assert!(RestPosition::Peek < RestPosition::Partial);
        assert!(RestPosition::Partial < RestPosition::Full);
        assert!(!RestPosition::Hidden.is_visible());
        assert!(RestPosition::Peek.is_visible());
    }

    #[test]
    fn test_position_yaml_names() {
        let yaml = serde_yaml::to_string(&RestPosition::Partial).unwrap();
        assert_eq!(yaml.trim(), "partial");
        let parsed: RestPosition = serde_yaml::from_str("full").unwrap();
        assert_eq!(parsed, RestPosition::Full);
    }
}
