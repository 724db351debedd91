//! Pull-to-refresh driven through the robot and the frame clock.

use edgepull_core::{Edge, EdgeConfig, EdgeInsets, PullConfig, PullPhase, TriggerBehavior};
use edgepull_testing::prelude::*;

fn instant_top() -> PullConfig {
    PullConfig::default().with_top(EdgeConfig::refresh().with_trigger_behavior(TriggerBehavior::Instant))
}

#[test]
fn full_refresh_cycle_with_frame_driven_snap_back() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");

    robot.pull_top(50.0);

    let controller = robot.controller();
    assert!(controller.is_refreshing());
    assert_phase(controller, Edge::Top, PullPhase::Active);
    assert_eq!(robot.action_count(Edge::Top), 1);
    assert_approx_eq(controller.progress(Edge::Top), 1.25, 1e-4, "release progress");
    assert_eq!(controller.content_insets().get(Edge::Top), 40.0);
    assert_eq!(controller.content_insets().get(Edge::Bottom), 0.0);

    // the view rests with the indicator inset visible
    robot.settle();
    assert_eq!(robot.host().offset(), -40.0);
    assert!(controller.is_refreshing());

    robot.stop_and_settle(Edge::Top);
    assert_eq!(robot.host().offset(), 0.0);
    assert!(!controller.is_refreshing());
    assert_eq!(controller.content_insets(), EdgeInsets::ZERO);
    assert_eq!(robot.host().commands(), vec![HostCommand::AnimateTo(0.0)]);
    assert_transitions(
        robot.recorder(),
        &[
            HookEvent::Haptic(Edge::Top),
            HookEvent::EnterBusy(Edge::Top),
            HookEvent::ExitBusy(Edge::Top),
        ],
    );
    assert!(robot
        .recorder()
        .events()
        .iter()
        .all(|event| event.edge() == Edge::Top));
}

#[test]
fn short_pull_bounces_back_without_refreshing() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");

    robot.pull_top(30.0);
    assert!(!robot.controller().is_refreshing());
    assert_eq!(robot.recorder().last_progress(Edge::Top), Some(0.75));

    robot.settle();
    assert_eq!(robot.host().offset(), 0.0);
    assert_phase(robot.controller(), Edge::Top, PullPhase::Idle);
    assert_eq!(robot.recorder().last_progress(Edge::Top), Some(0.0));
    assert_eq!(robot.action_count(Edge::Top), 0);
    assert!(robot.recorder().transitions().is_empty());
}

#[test]
fn reported_progress_grows_with_the_pull() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");

    robot.press();
    robot.drag_through(-80.0, 8);

    let updates = robot.recorder().progress_updates(Edge::Top);
    assert_eq!(updates.len(), 8);
    assert!(updates.windows(2).all(|pair| pair[0] < pair[1]));
    assert_approx_eq(*updates.last().expect("progress reported"), 2.0, 1e-4, "final progress");
    assert_progress_finite(robot.recorder(), Edge::Top);
}

#[test]
fn instant_refresh_fires_once_while_the_finger_oscillates() {
    let robot = PullRobot::new(500.0, 1000.0, instant_top()).expect("valid config");

    robot.press();
    for offset in [-30.0, -41.0, -39.0, -45.0, -38.0, -60.0] {
        robot.drag_to(offset);
    }
    assert!(robot.controller().is_refreshing());
    assert_eq!(robot.action_count(Edge::Top), 1);

    robot.release();
    robot.settle();
    assert_eq!(robot.action_count(Edge::Top), 1);
    assert_eq!(robot.recorder().enter_busy_count(Edge::Top), 1);
    assert_eq!(robot.recorder().haptic_count(Edge::Top), 1);
}

#[test]
fn instant_latch_rearms_on_the_next_gesture() {
    let robot = PullRobot::new(500.0, 1000.0, instant_top()).expect("valid config");

    robot.pull_top(50.0);
    assert_eq!(robot.action_count(Edge::Top), 1);
    robot.stop_and_settle(Edge::Top);
    assert!(!robot.controller().is_refreshing());

    robot.pull_top(50.0);
    assert_eq!(robot.action_count(Edge::Top), 2);
    assert!(robot.controller().is_refreshing());
}

#[test]
fn programmatic_refresh_is_idempotent_and_settles_at_rest() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");
    let controller = robot.controller();

    controller.begin_refreshing().expect("top edge is enabled");
    controller.begin_refreshing().expect("second begin is ignored");
    assert_eq!(robot.action_count(Edge::Top), 1);

    robot.stop_and_settle(Edge::Top);
    assert!(!controller.is_refreshing());
    // already at rest, nothing to animate
    assert!(robot.host().commands().is_empty());
    assert_transitions(
        robot.recorder(),
        &[HookEvent::EnterBusy(Edge::Top), HookEvent::ExitBusy(Edge::Top)],
    );
}

#[test]
fn stop_before_anything_started_is_ignored() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");

    robot.stop_and_settle(Edge::Top);
    robot.stop_and_settle(Edge::Bottom);

    assert_phase(robot.controller(), Edge::Top, PullPhase::Idle);
    assert!(robot.recorder().transitions().is_empty());
    assert!(robot.host().commands().is_empty());
}

#[test]
fn stop_from_inside_the_action_completes_the_cycle() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");
    let stopper = robot.controller().clone();
    robot.set_action(Edge::Top, move |_| stopper.stop_refreshing());

    robot.pull_top(50.0);
    assert_phase(robot.controller(), Edge::Top, PullPhase::Settling);
    assert_eq!(robot.host().animation_target(), Some(0.0));

    robot.settle();
    assert_phase(robot.controller(), Edge::Top, PullPhase::Idle);
    assert_eq!(robot.host().offset(), 0.0);
    assert_transitions(
        robot.recorder(),
        &[
            HookEvent::Haptic(Edge::Top),
            HookEvent::EnterBusy(Edge::Top),
            HookEvent::ExitBusy(Edge::Top),
        ],
    );
}

#[test]
fn no_progress_or_haptics_while_refreshing() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");
    robot.pull_top(50.0);
    robot.settle();
    robot.recorder().clear();

    // pull again while the first refresh is still running
    robot.pull_top(90.0);
    robot.settle();

    assert!(robot.recorder().events().is_empty());
    assert_eq!(robot.action_count(Edge::Top), 1);
}

#[test]
fn disabling_the_top_edge_ignores_pulls() {
    let robot = PullRobot::new(500.0, 1000.0, PullConfig::default()).expect("valid config");
    robot
        .controller()
        .configure(Edge::Top, EdgeConfig::refresh().with_enabled(false))
        .expect("valid config");

    robot.pull_top(80.0);
    robot.settle();

    assert!(!robot.controller().is_refreshing());
    assert!(robot.recorder().events().is_empty());
    assert!(robot.controller().begin_refreshing().is_err());
}
