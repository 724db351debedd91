//! Assertion helpers for pull tests.

use edgepull_core::{Edge, PullController, PullPhase};

use crate::recorder::{HookEvent, RecordingHooks};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_phase(controller: &PullController, edge: Edge, expected: PullPhase) {
    let actual = controller.phase(edge);
    assert_eq!(actual, expected, "{edge} edge phase");
}

/// Assert that the non-progress hook events match `expected` exactly.
pub fn assert_transitions(recorder: &RecordingHooks, expected: &[HookEvent]) {
    let actual = recorder.transitions();
    assert_eq!(actual.as_slice(), expected, "hook transitions");
}

/// Assert that every reported progress value for `edge` is finite.
pub fn assert_progress_finite(recorder: &RecordingHooks, edge: Edge) {
    for progress in recorder.progress_updates(edge) {
        assert!(progress.is_finite(), "{edge} edge reported {progress}");
    }
}
