//! Time-based offset tweens.

use crate::easing::Easing;

/// Duration, easing and start delay of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    fn duration_nanos(&self) -> u64 {
        self.duration_millis.saturating_mul(1_000_000).max(1)
    }

    fn delay_nanos(&self) -> u64 {
        self.delay_millis.saturating_mul(1_000_000)
    }
}

impl Default for AnimationSpec {
    /// A quarter second decelerating snap, close to the platform scroll
    /// animation it stands in for.
    fn default() -> Self {
        Self::tween(250, Easing::LinearOutSlowIn)
    }
}

/// One sampled frame of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    pub value: f32,
    pub finished: bool,
}

/// Animates a scalar offset from `start` to `target`.
///
/// The first sampled frame becomes time zero, so a tween can be created
/// before the host knows the time of its next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTween {
    start: f32,
    target: f32,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
}

impl OffsetTween {
    pub fn new(start: f32, target: f32, spec: AnimationSpec) -> Self {
        Self {
            start,
            target,
            spec,
            start_time_nanos: None,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn sample(&mut self, frame_time_nanos: u64) -> TweenFrame {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start_time);
        let delay = self.spec.delay_nanos();
        if elapsed < delay {
            return TweenFrame {
                value: self.start,
                finished: false,
            };
        }

        let linear = ((elapsed - delay) as f32 / self.spec.duration_nanos() as f32).clamp(0.0, 1.0);
        if linear >= 1.0 {
            return TweenFrame {
                value: self.target,
                finished: true,
            };
        }
        let eased = self.spec.easing.transform(linear);
        TweenFrame {
            value: self.start + (self.target - self.start) * eased,
            finished: false,
        }
    }
}

#[cfg(test)]
#[path = "tests/tween_tests.rs"]
mod tests;
