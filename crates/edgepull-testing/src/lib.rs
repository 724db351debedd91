//! Testing utilities for edgepull.
//!
//! Provides an in-memory scroll host with a manual frame clock, a hook
//! recorder, and a robot that performs pull gestures against them.

pub mod assertions;
pub mod host;
pub mod recorder;
pub mod robot;

pub use host::*;
pub use recorder::*;
pub use robot::*;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::host::{HostCommand, TestScrollHost, FRAME_NANOS};
    pub use crate::recorder::{HookEvent, RecordingHooks};
    pub use crate::robot::{PullRobot, DRAG_STEPS};
}
