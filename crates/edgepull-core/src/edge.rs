//! Edge identifiers and the small value types shared across the crate.

use std::fmt;

/// One of the two pullable edges of a vertical scroll view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Pulling down past the top of the content (refresh).
    Top,
    /// Pulling up past the bottom of the content (load more).
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 2] = [Edge::Top, Edge::Bottom];
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => f.write_str("top"),
            Edge::Bottom => f.write_str("bottom"),
        }
    }
}

/// When a pull past an edge turns into a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TriggerBehavior {
    /// Fire as soon as the pull reaches the trigger height, finger still down.
    Instant,
    /// Fire on release, if the pull is at or beyond the trigger height then.
    #[default]
    OverThreshold,
}

/// Extra scrollable space the host keeps around its content while an edge
/// is busy, so the indicator stays on screen.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        bottom: 0.0,
    };

    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }
}
