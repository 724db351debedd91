//! Per-edge pull state machine.
//!
//! ```text
//! Idle <-> Pulling -> Triggered -> Active -> Settling -> Idle
//! ```
//!
//! `PullState` only decides; it never calls out. The controller turns its
//! answers into hook calls and host commands.

use crate::config::EdgeConfig;
use crate::edge::Edge;
use crate::geometry::ScrollGeometry;
use crate::trigger::{reaches_threshold, PullSample, TriggerPolicy, TRIGGER_PROGRESS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PullPhase {
    /// At rest, nothing pulled.
    #[default]
    Idle,
    /// Pulled past the edge, not triggered.
    Pulling,
    /// The trigger fired and the action is being invoked.
    Triggered,
    /// The action is running; waits for an explicit stop.
    Active,
    /// Stop received, snap-back to rest in flight.
    Settling,
}

impl PullPhase {
    /// The refreshing / loading flag: set from the trigger until the
    /// snap-back completes.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            PullPhase::Triggered | PullPhase::Active | PullPhase::Settling
        )
    }
}

/// What a single progress sample produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SampleOutcome {
    /// The indicator should be updated with the new progress.
    pub report: bool,
    /// Progress moved across the trigger height, in either direction.
    pub crossed_threshold: bool,
    /// The trigger policy fired.
    pub fire: bool,
}

/// Geometry captured when a stop starts, used to keep the visible rows in
/// place if the content grows while snapping back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleMemo {
    pub prior_content_height: f32,
    pub prior_offset: f32,
}

/// How a content height change during settling is absorbed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reconciliation {
    /// Jump straight to this offset; the old position is off screen anyway.
    Snap(f32),
    /// Keep animating to rest.
    Animate,
}

impl SettleMemo {
    pub fn new(geometry: &ScrollGeometry) -> Self {
        Self {
            prior_content_height: geometry.content_height,
            prior_offset: geometry.offset,
        }
    }

    /// `corrected = content - prior_content + offset`; snap when the content
    /// grew and that lands further from zero than where the settle started.
    /// A shrink, or a correction that would stay above the top, keeps
    /// animating to rest.
    pub fn reconcile(&self, geometry: &ScrollGeometry) -> Reconciliation {
        if geometry.content_height <= self.prior_content_height {
            return Reconciliation::Animate;
        }
        let corrected =
            geometry.content_height - self.prior_content_height + geometry.offset;
        if corrected >= 0.0 && self.prior_offset.abs() < corrected.abs() {
            Reconciliation::Snap(corrected)
        } else {
            Reconciliation::Animate
        }
    }
}

/// A stop accepted by [`PullState::request_stop`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopPlan {
    /// Identifies this settle; stale completions carry an older ticket.
    pub ticket: u64,
    /// Offset to animate back to, or `None` when already at rest.
    pub target: Option<f32>,
}

/// State of one edge.
#[derive(Clone, Debug)]
pub struct PullState {
    edge: Edge,
    config: EdgeConfig,
    policy: TriggerPolicy,
    phase: PullPhase,
    progress: f32,
    last_progress: f32,
    crossed_once: bool,
    memo: Option<SettleMemo>,
    settle_ticket: u64,
}

impl PullState {
    pub fn new(edge: Edge, config: EdgeConfig) -> Self {
        Self {
            edge,
            config,
            policy: TriggerPolicy::new(config.trigger_behavior),
            phase: PullPhase::Idle,
            progress: 0.0,
            last_progress: 0.0,
            crossed_once: false,
            memo: None,
            settle_ticket: 0,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Replaces the configuration. Busy state is kept; a disabled edge that
    /// is busy still waits for its stop.
    pub fn set_config(&mut self, config: EdgeConfig) {
        self.config = config;
        self.policy = TriggerPolicy::new(config.trigger_behavior);
        if !config.enabled && !self.phase.is_busy() {
            self.phase = PullPhase::Idle;
            self.progress = 0.0;
            self.last_progress = 0.0;
        }
    }

    pub fn phase(&self) -> PullPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn crossed_once(&self) -> bool {
        self.crossed_once
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn settle_memo(&self) -> Option<&SettleMemo> {
        self.memo.as_ref()
    }

    /// A new drag started: clear the per-gesture fields.
    pub fn begin_gesture(&mut self) {
        self.crossed_once = false;
        self.last_progress = 0.0;
    }

    /// Feeds one progress sample taken while the finger may still be down.
    pub fn observe(&mut self, progress: f32) -> SampleOutcome {
        let previous = self.last_progress;
        self.progress = progress;
        self.last_progress = progress;

        let crossed_threshold =
            (previous >= TRIGGER_PROGRESS) != (progress >= TRIGGER_PROGRESS);

        if self.phase.is_busy() {
            return SampleOutcome {
                report: false,
                crossed_threshold,
                fire: false,
            };
        }

        let next = if progress > 0.0 {
            PullPhase::Pulling
        } else {
            PullPhase::Idle
        };
        if next != self.phase {
            log::debug!("{} edge: {:?} -> {:?}", self.edge, self.phase, next);
            self.phase = next;
        }

        let fire = self
            .policy
            .should_fire(PullSample::Drag(progress), self.crossed_once);
        if reaches_threshold(progress) {
            self.crossed_once = true;
        }

        SampleOutcome {
            report: progress > 0.0 || previous > 0.0,
            crossed_threshold,
            fire,
        }
    }

    /// The finger was lifted. Returns whether the policy fires.
    pub fn release(&self) -> bool {
        !self.phase.is_busy()
            && self
                .policy
                .should_fire(PullSample::Release(self.progress), self.crossed_once)
    }

    /// Enters `Triggered`. Returns `false` if the edge is already busy.
    pub fn trigger(&mut self) -> bool {
        if self.phase.is_busy() {
            return false;
        }
        log::debug!("{} edge: {:?} -> Triggered", self.edge, self.phase);
        self.phase = PullPhase::Triggered;
        true
    }

    /// `Triggered -> Active`, once the action has been invoked. A stop that
    /// arrived from inside the action wins.
    pub fn activate(&mut self) {
        if self.phase == PullPhase::Triggered {
            self.phase = PullPhase::Active;
        }
    }

    /// Starts settling. Returns `None` when there is nothing to stop.
    pub fn request_stop(&mut self, geometry: &ScrollGeometry) -> Option<StopPlan> {
        if !matches!(self.phase, PullPhase::Triggered | PullPhase::Active) {
            return None;
        }
        log::debug!("{} edge: {:?} -> Settling", self.edge, self.phase);
        self.phase = PullPhase::Settling;
        self.memo = Some(SettleMemo::new(geometry));
        self.settle_ticket += 1;

        let target = match self.edge {
            Edge::Top => (geometry.offset < 0.0).then_some(0.0),
            Edge::Bottom => {
                let rest = geometry.max_offset();
                (geometry.offset > rest).then_some(rest)
            }
        };
        Some(StopPlan {
            ticket: self.settle_ticket,
            target,
        })
    }

    /// Checks a sample taken while settling against the memo. Only the top
    /// edge reconciles: refreshing prepends content, loading appends it
    /// below the viewport where it cannot shift anything.
    pub fn reconcile(&mut self, geometry: &ScrollGeometry) -> Option<f32> {
        if self.edge != Edge::Top || self.phase != PullPhase::Settling {
            return None;
        }
        let memo = self.memo.as_mut()?;
        if geometry.content_height == memo.prior_content_height {
            return None;
        }
        let decision = memo.reconcile(geometry);
        memo.prior_content_height = geometry.content_height;
        match decision {
            Reconciliation::Snap(offset) => {
                memo.prior_offset = offset;
                Some(offset)
            }
            Reconciliation::Animate => None,
        }
    }

    /// Finishes the settle identified by `ticket`. Returns `false` for a
    /// stale or unexpected completion.
    pub fn finish_settle(&mut self, ticket: u64) -> bool {
        if self.phase != PullPhase::Settling || ticket != self.settle_ticket {
            return false;
        }
        log::debug!("{} edge: Settling -> Idle", self.edge);
        self.phase = PullPhase::Idle;
        self.memo = None;
        true
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
