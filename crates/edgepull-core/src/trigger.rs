//! Trigger decisions.
//!
//! Pure decision logic, kept apart from the state machine so both behaviors
//! can be checked against synthetic progress sequences.

use crate::edge::TriggerBehavior;

/// Progress magnitude at which a pull counts as complete.
pub const TRIGGER_PROGRESS: f32 = 1.0;

/// A progress reading handed to the policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PullSample {
    /// Progress while the finger is still down.
    Drag(f32),
    /// Progress at the moment the finger is lifted.
    Release(f32),
}

/// Decides whether a pull turns into a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TriggerPolicy {
    behavior: TriggerBehavior,
}

impl TriggerPolicy {
    pub fn new(behavior: TriggerBehavior) -> Self {
        Self { behavior }
    }

    pub fn behavior(&self) -> TriggerBehavior {
        self.behavior
    }

    /// `crossed_once` is the per-gesture latch: once an instant pull has
    /// reached the threshold, later samples of the same gesture never fire.
    pub fn should_fire(&self, sample: PullSample, crossed_once: bool) -> bool {
        match (self.behavior, sample) {
            (TriggerBehavior::Instant, PullSample::Drag(progress)) => {
                !crossed_once && reaches_threshold(progress)
            }
            (TriggerBehavior::Instant, PullSample::Release(_)) => false,
            (TriggerBehavior::OverThreshold, PullSample::Drag(_)) => false,
            (TriggerBehavior::OverThreshold, PullSample::Release(progress)) => {
                reaches_threshold(progress)
            }
        }
    }
}

pub fn reaches_threshold(progress: f32) -> bool {
    progress.abs() >= TRIGGER_PROGRESS
}
