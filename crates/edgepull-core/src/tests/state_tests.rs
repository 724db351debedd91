use super::*;
use crate::edge::TriggerBehavior;

fn top(behavior: TriggerBehavior) -> PullState {
    PullState::new(Edge::Top, EdgeConfig::refresh().with_trigger_behavior(behavior))
}

fn activate(state: &mut PullState) {
    assert!(state.trigger());
    state.activate();
    assert_eq!(state.phase(), PullPhase::Active);
}

#[test]
fn pulling_and_returning_moves_between_idle_and_pulling() {
    let mut state = top(TriggerBehavior::OverThreshold);
    assert_eq!(state.phase(), PullPhase::Idle);

    let outcome = state.observe(0.4);
    assert_eq!(state.phase(), PullPhase::Pulling);
    assert!(outcome.report);
    assert!(!outcome.fire);

    // leaving the zone reports the final zero once
    let outcome = state.observe(0.0);
    assert_eq!(state.phase(), PullPhase::Idle);
    assert!(outcome.report);

    let outcome = state.observe(0.0);
    assert!(!outcome.report);
}

#[test]
fn instant_fires_once_per_gesture() {
    let mut state = top(TriggerBehavior::Instant);
    state.begin_gesture();

    let fired: Vec<bool> = [0.5, 1.02, 0.9, 1.4, 0.95, 1.1]
        .into_iter()
        .map(|progress| state.observe(progress).fire)
        .collect();
    assert_eq!(fired, vec![false, true, false, false, false, false]);
    assert!(state.crossed_once());
}

#[test]
fn latch_survives_dropping_below_threshold_until_next_gesture() {
    let mut state = top(TriggerBehavior::Instant);
    state.begin_gesture();
    assert!(state.observe(1.2).fire);
    state.observe(0.3);
    state.observe(0.0);
    assert!(state.crossed_once());
    assert!(!state.observe(1.5).fire);

    state.begin_gesture();
    assert!(!state.crossed_once());
    assert!(state.observe(1.5).fire);
}

#[test]
fn over_threshold_fires_on_release_only() {
    let mut state = top(TriggerBehavior::OverThreshold);
    state.begin_gesture();
    for progress in [0.5, 1.0, 2.5] {
        assert!(!state.observe(progress).fire);
    }
    assert!(state.release());

    state.observe(0.8);
    assert!(!state.release());
}

#[test]
fn crossing_is_detected_in_both_directions() {
    let mut state = top(TriggerBehavior::OverThreshold);
    assert!(!state.observe(0.99).crossed_threshold);
    assert!(state.observe(1.01).crossed_threshold);
    assert!(!state.observe(1.3).crossed_threshold);
    assert!(state.observe(0.7).crossed_threshold);
}

#[test]
fn busy_edge_neither_reports_nor_fires() {
    let mut state = top(TriggerBehavior::Instant);
    activate(&mut state);

    let outcome = state.observe(1.5);
    assert!(!outcome.report);
    assert!(!outcome.fire);
    assert!(!state.release());
    assert_eq!(state.phase(), PullPhase::Active);
}

#[test]
fn trigger_is_idempotent_while_busy() {
    let mut state = top(TriggerBehavior::OverThreshold);
    assert!(state.trigger());
    assert_eq!(state.phase(), PullPhase::Triggered);
    assert!(!state.trigger());
    state.activate();
    assert!(!state.trigger());
}

#[test]
fn stop_before_trigger_is_a_no_op() {
    let mut state = top(TriggerBehavior::OverThreshold);
    let geometry = ScrollGeometry::new(-20.0, 500.0, 1000.0);
    assert_eq!(state.request_stop(&geometry), None);

    state.observe(0.5);
    assert_eq!(state.request_stop(&geometry), None);
    assert_eq!(state.phase(), PullPhase::Pulling);
}

#[test]
fn top_stop_animates_to_zero_only_when_above_content() {
    let mut state = top(TriggerBehavior::OverThreshold);
    activate(&mut state);
    let plan = state
        .request_stop(&ScrollGeometry::new(-40.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert_eq!(plan.target, Some(0.0));
    assert_eq!(state.phase(), PullPhase::Settling);
    assert!(state.is_active());

    // a second stop while settling is ignored
    assert_eq!(
        state.request_stop(&ScrollGeometry::new(-40.0, 500.0, 1000.0)),
        None
    );

    assert!(state.finish_settle(plan.ticket));
    assert_eq!(state.phase(), PullPhase::Idle);
    assert!(!state.is_active());

    activate(&mut state);
    let plan = state
        .request_stop(&ScrollGeometry::new(120.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert_eq!(plan.target, None);
}

#[test]
fn bottom_stop_returns_to_the_last_page() {
    let mut state = PullState::new(Edge::Bottom, EdgeConfig::load().with_enabled(true));
    activate(&mut state);
    let plan = state
        .request_stop(&ScrollGeometry::new(540.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert_eq!(plan.target, Some(500.0));

    assert!(state.finish_settle(plan.ticket));
    activate(&mut state);
    // content grew under the indicator, nothing to scroll back
    let plan = state
        .request_stop(&ScrollGeometry::new(540.0, 500.0, 1200.0))
        .expect("stop accepted");
    assert_eq!(plan.target, None);
}

#[test]
fn stale_settle_ticket_is_ignored() {
    let mut state = top(TriggerBehavior::OverThreshold);
    activate(&mut state);
    let first = state
        .request_stop(&ScrollGeometry::new(-40.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert!(state.finish_settle(first.ticket));

    activate(&mut state);
    let second = state
        .request_stop(&ScrollGeometry::new(-40.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert!(!state.finish_settle(first.ticket));
    assert_eq!(state.phase(), PullPhase::Settling);
    assert!(state.finish_settle(second.ticket));
}

#[test]
fn stop_from_inside_the_action_wins_over_activation() {
    let mut state = top(TriggerBehavior::OverThreshold);
    assert!(state.trigger());
    let plan = state.request_stop(&ScrollGeometry::new(0.0, 500.0, 1000.0));
    assert!(plan.is_some());
    state.activate();
    assert_eq!(state.phase(), PullPhase::Settling);
}

#[test]
fn memo_snaps_when_growth_pushes_the_old_position_off_screen() {
    let memo = SettleMemo {
        prior_content_height: 1000.0,
        prior_offset: -50.0,
    };
    // 1200 - 1000 - 50 = 150, |-50| < |150|
    assert_eq!(
        memo.reconcile(&ScrollGeometry::new(-50.0, 500.0, 1200.0)),
        Reconciliation::Snap(150.0)
    );
    // 1020 - 1000 - 50 = -30, |-50| >= |-30|
    assert_eq!(
        memo.reconcile(&ScrollGeometry::new(-50.0, 500.0, 1020.0)),
        Reconciliation::Animate
    );
}

#[test]
fn memo_keeps_animating_when_content_shrinks() {
    let memo = SettleMemo {
        prior_content_height: 1000.0,
        prior_offset: -50.0,
    };
    // 700 - 1000 - 50 = -350 would park the view far above the top
    assert_eq!(
        memo.reconcile(&ScrollGeometry::new(-50.0, 500.0, 700.0)),
        Reconciliation::Animate
    );
    assert_eq!(
        memo.reconcile(&ScrollGeometry::new(-50.0, 500.0, 0.0)),
        Reconciliation::Animate
    );
}

#[test]
fn shrink_while_settling_updates_the_memo_without_snapping() {
    let mut state = top(TriggerBehavior::OverThreshold);
    activate(&mut state);
    state
        .request_stop(&ScrollGeometry::new(-50.0, 500.0, 1000.0))
        .expect("stop accepted");

    assert_eq!(state.reconcile(&ScrollGeometry::new(-50.0, 500.0, 700.0)), None);
    let memo = state.settle_memo().expect("settling keeps a memo");
    assert_eq!(memo.prior_content_height, 700.0);
    assert_eq!(memo.prior_offset, -50.0);

    // growth measured from the shrunk height
    assert_eq!(
        state.reconcile(&ScrollGeometry::new(-40.0, 500.0, 900.0)),
        Some(160.0)
    );
}

#[test]
fn reconcile_applies_only_to_a_settling_top_edge() {
    let mut state = top(TriggerBehavior::OverThreshold);
    assert_eq!(state.edge(), Edge::Top);
    let grown = ScrollGeometry::new(-50.0, 500.0, 1200.0);
    assert_eq!(state.reconcile(&grown), None);

    activate(&mut state);
    assert_eq!(state.reconcile(&grown), None);
    assert!(state.settle_memo().is_none());

    state
        .request_stop(&ScrollGeometry::new(-50.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert_eq!(state.reconcile(&grown), Some(150.0));
    // same height again: already absorbed
    assert_eq!(
        state.reconcile(&ScrollGeometry::new(150.0, 500.0, 1200.0)),
        None
    );

    let mut bottom = PullState::new(Edge::Bottom, EdgeConfig::load().with_enabled(true));
    activate(&mut bottom);
    bottom
        .request_stop(&ScrollGeometry::new(540.0, 500.0, 1000.0))
        .expect("stop accepted");
    assert_eq!(
        bottom.reconcile(&ScrollGeometry::new(540.0, 500.0, 1400.0)),
        None
    );
}

#[test]
fn disabling_an_idle_edge_clears_progress() {
    let mut state = top(TriggerBehavior::OverThreshold);
    state.observe(0.6);
    state.set_config(EdgeConfig::refresh().with_enabled(false));
    assert_eq!(state.phase(), PullPhase::Idle);
    assert_eq!(state.progress(), 0.0);

    let mut busy = top(TriggerBehavior::OverThreshold);
    activate(&mut busy);
    busy.set_config(EdgeConfig::refresh().with_enabled(false));
    assert_eq!(busy.phase(), PullPhase::Active);
}
