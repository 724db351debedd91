//! Robot-style driver for pull gestures.
//!
//! `PullRobot` wires a [`TestScrollHost`], a [`PullController`] and a
//! [`RecordingHooks`] together and drives them the way a user would:
//! press, drag past an edge, release, and wait for the scroll view to come
//! to rest.
//!
//! # Example
//!
//! ```
//! use edgepull_core::{Edge, PullConfig};
//! use edgepull_testing::PullRobot;
//!
//! let robot = PullRobot::new(500.0, 500.0, PullConfig::default()).unwrap();
//! robot.pull_top(50.0);
//! assert!(robot.controller().is_refreshing());
//! assert_eq!(robot.action_count(Edge::Top), 1);
//!
//! robot.controller().stop_refreshing();
//! robot.settle();
//! assert!(!robot.controller().is_refreshing());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use edgepull_core::{Edge, PullConfig, PullController, PullError, ScrollHost};

use crate::host::TestScrollHost;
use crate::recorder::RecordingHooks;

/// Intermediate samples emitted by a drag, not counting the start.
pub const DRAG_STEPS: usize = 10;

pub struct PullRobot {
    host: Rc<TestScrollHost>,
    controller: PullController,
    recorder: Rc<RecordingHooks>,
    invocations: Rc<RefCell<Vec<Edge>>>,
}

impl PullRobot {
    /// Creates a host of the given size, attaches a controller and binds
    /// recording actions to both edges.
    pub fn new(
        viewport_height: f32,
        content_height: f32,
        config: PullConfig,
    ) -> Result<Self, PullError> {
        let host = TestScrollHost::new(viewport_height, content_height);
        let controller = PullController::attach(host.clone() as Rc<dyn ScrollHost>, config)?;
        let recorder = RecordingHooks::new();
        controller.set_hooks(recorder.clone());
        controller.set_haptics(recorder.clone());

        let robot = Self {
            host,
            controller,
            recorder,
            invocations: Rc::new(RefCell::new(Vec::new())),
        };
        for edge in Edge::ALL {
            robot.set_action(edge, |_| {});
        }
        Ok(robot)
    }

    pub fn host(&self) -> &Rc<TestScrollHost> {
        &self.host
    }

    pub fn controller(&self) -> &PullController {
        &self.controller
    }

    pub fn recorder(&self) -> &Rc<RecordingHooks> {
        &self.recorder
    }

    /// Binds `action` to `edge`. Invocations are still counted.
    pub fn set_action(&self, edge: Edge, mut action: impl FnMut(Edge) + 'static) {
        let invocations = Rc::clone(&self.invocations);
        self.controller.set_action(edge, move |edge| {
            invocations.borrow_mut().push(edge);
            action(edge);
        });
    }

    /// How many times the action of `edge` has run.
    pub fn action_count(&self, edge: Edge) -> usize {
        self.invocations
            .borrow()
            .iter()
            .filter(|invoked| **invoked == edge)
            .count()
    }

    /// Puts a finger down.
    pub fn press(&self) {
        self.host.begin_gesture();
    }

    /// Moves the content to `offset` in one sample.
    pub fn drag_to(&self, offset: f32) {
        self.host.scroll_to(offset);
    }

    /// Moves the content from its current offset to `offset` in evenly
    /// spaced samples.
    pub fn drag_through(&self, offset: f32, steps: usize) {
        let from = self.host.offset();
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.host.scroll_to(from + (offset - from) * t);
        }
    }

    /// Lifts the finger and lets the view bounce back to its resting bounds,
    /// which include the inset of any busy edge. The bounce is not stepped;
    /// call [`settle`](Self::settle) for that.
    pub fn release(&self) {
        self.host.end_gesture();
        self.host.bounce_to_rest(self.controller.content_insets());
    }

    /// A full gesture pulling `distance` past the top edge.
    pub fn pull_top(&self, distance: f32) {
        self.press();
        self.drag_through(-distance, DRAG_STEPS);
        self.release();
    }

    /// A full gesture pulling `distance` past the bottom edge.
    pub fn pull_bottom(&self, distance: f32) {
        let target = self.host.max_offset() + distance;
        self.press();
        self.drag_through(target, DRAG_STEPS);
        self.release();
    }

    /// Runs pending animations to completion. Returns the frames stepped.
    pub fn settle(&self) -> usize {
        self.host.run_animations()
    }

    /// Stops `edge` and waits for the snap-back.
    pub fn stop_and_settle(&self, edge: Edge) {
        self.controller.stop(edge);
        self.settle();
    }
}
