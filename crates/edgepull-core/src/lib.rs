//! Edge-pull state machine for scroll views.
//!
//! This crate turns a stream of scroll-offset samples into pull-to-refresh
//! (top edge) and pull-to-load (bottom edge) behavior: progress reporting,
//! trigger decisions, busy tracking and the snap-back to rest once the
//! triggered work is done. Rendering, layout and animation stay with the
//! host, which plugs in through [`ScrollHost`].

mod config;
mod controller;
mod edge;
mod error;
mod geometry;
mod host;
mod state;
mod trigger;

pub use config::*;
pub use controller::*;
pub use edge::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use state::*;
pub use trigger::*;

pub mod prelude {
    pub use crate::config::{EdgeConfig, PullConfig};
    pub use crate::controller::PullController;
    pub use crate::edge::{Edge, EdgeInsets, TriggerBehavior};
    pub use crate::error::PullError;
    pub use crate::host::{HapticPerformer, PullHooks, ScrollEvent, ScrollHost};
    pub use crate::state::PullPhase;
}
