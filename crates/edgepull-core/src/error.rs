use thiserror::Error;

use crate::edge::Edge;

/// Errors reported by the programmatic entry points of
/// [`PullController`](crate::PullController).
///
/// Event handling never fails; the same conditions hit on the gesture path
/// are logged instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PullError {
    /// A trigger fired but nothing is bound to run for this edge.
    #[error("no action bound for the {0} edge")]
    ActionNotBound(Edge),
    /// The edge is switched off in its configuration.
    #[error("the {0} edge is disabled")]
    EdgeDisabled(Edge),
    /// A configured height is negative or not finite.
    #[error("invalid {field} for the {edge} edge: {value}")]
    InvalidConfig {
        edge: Edge,
        field: &'static str,
        value: f32,
    },
}
