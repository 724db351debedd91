//! Pull controller.
//!
//! Owns the top and bottom [`PullState`]s, listens to the host and fans the
//! results out to hooks, haptics, actions and host scroll commands.
//!
//! The controller is a cheap `Rc` handle. No internal borrow is held while a
//! collaborator runs, so hosts may deliver events re-entrantly and actions
//! may call `stop_*` before they return.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::config::{EdgeConfig, PullConfig};
use crate::edge::{Edge, EdgeInsets};
use crate::error::PullError;
use crate::geometry::ScrollGeometry;
use crate::host::{
    HapticPerformer, NoHaptics, NoopHooks, PullAction, PullHooks, ScrollEvent, ScrollHost,
};
use crate::state::{PullPhase, PullState};

/// Side effects computed under the borrow and executed after it is released.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Effect {
    Progress(Edge, f32),
    Haptic(Edge),
    EnterBusy(Edge),
    Action(Edge),
    Activate(Edge),
    AnimateTo { edge: Edge, offset: f32, ticket: u64 },
    SnapTo(f32),
    Settled { edge: Edge, ticket: u64 },
}

type Effects = SmallVec<[Effect; 4]>;

struct ControllerInner {
    host: Rc<dyn ScrollHost>,
    hooks: Rc<dyn PullHooks>,
    haptics: Rc<dyn HapticPerformer>,
    top: PullState,
    bottom: PullState,
    refresh_action: Option<PullAction>,
    load_action: Option<PullAction>,
}

impl ControllerInner {
    fn state(&self, edge: Edge) -> &PullState {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
        }
    }

    fn state_mut(&mut self, edge: Edge) -> &mut PullState {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }

    fn action_slot(&mut self, edge: Edge) -> &mut Option<PullAction> {
        match edge {
            Edge::Top => &mut self.refresh_action,
            Edge::Bottom => &mut self.load_action,
        }
    }

    fn any_busy(&self) -> bool {
        self.top.is_active() || self.bottom.is_active()
    }

    fn begin(&mut self, edge: Edge, effects: &mut Effects) -> Result<(), PullError> {
        if !self.state(edge).config().enabled {
            return Err(PullError::EdgeDisabled(edge));
        }
        if self.state(edge).is_active() {
            return Ok(());
        }
        if self.action_slot(edge).is_none() {
            return Err(PullError::ActionNotBound(edge));
        }
        if self.state_mut(edge).trigger() {
            effects.push(Effect::EnterBusy(edge));
            effects.push(Effect::Action(edge));
            effects.push(Effect::Activate(edge));
        }
        Ok(())
    }

    fn begin_from_gesture(&mut self, edge: Edge, effects: &mut Effects) {
        if let Err(err) = self.begin(edge, effects) {
            log::warn!("pull trigger ignored: {err}");
        }
    }

    fn on_offset_changed(&mut self, geometry: ScrollGeometry) -> Effects {
        let mut effects = Effects::new();

        if let Some(offset) = self.top.reconcile(&geometry) {
            log::debug!(
                "content height changed while settling, snapping to {offset} (was {})",
                geometry.offset
            );
            // the snap posts its own offset change; sample that one instead
            effects.push(Effect::SnapTo(offset));
            return effects;
        }

        let haptics_allowed = !self.any_busy();
        let mut fired: SmallVec<[Edge; 2]> = SmallVec::new();

        for edge in Edge::ALL {
            let state = self.state_mut(edge);
            let config = *state.config();
            if !config.enabled {
                continue;
            }
            let progress = geometry.progress(edge, config.trigger_height());
            let outcome = state.observe(progress);
            log::trace!("{edge} edge progress {progress:.3}");

            if outcome.report {
                effects.push(Effect::Progress(edge, progress));
            }
            if outcome.crossed_threshold && haptics_allowed && config.haptics_enabled {
                effects.push(Effect::Haptic(edge));
            }
            if outcome.fire {
                fired.push(edge);
            }
        }

        for edge in fired {
            self.begin_from_gesture(edge, &mut effects);
        }
        effects
    }

    fn on_gesture_began(&mut self) {
        self.top.begin_gesture();
        self.bottom.begin_gesture();
    }

    fn on_gesture_ended(&mut self) -> Effects {
        let mut effects = Effects::new();
        for edge in Edge::ALL {
            let state = self.state(edge);
            if state.config().enabled && state.release() {
                self.begin_from_gesture(edge, &mut effects);
            }
        }
        effects
    }

    fn stop(&mut self, edge: Edge) -> Effects {
        let mut effects = Effects::new();
        let geometry = ScrollGeometry::capture(self.host.as_ref());
        if let Some(plan) = self.state_mut(edge).request_stop(&geometry) {
            effects.push(match plan.target {
                Some(offset) => Effect::AnimateTo {
                    edge,
                    offset,
                    ticket: plan.ticket,
                },
                None => Effect::Settled {
                    edge,
                    ticket: plan.ticket,
                },
            });
        }
        effects
    }
}

/// Drives pull-to-refresh and pull-to-load for one scroll host.
#[derive(Clone)]
pub struct PullController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl PullController {
    /// Creates a controller for `host` and subscribes to its events.
    pub fn attach(host: Rc<dyn ScrollHost>, config: PullConfig) -> Result<Self, PullError> {
        config.validate()?;
        let inner = ControllerInner {
            host: Rc::clone(&host),
            hooks: Rc::new(NoopHooks),
            haptics: Rc::new(NoHaptics),
            top: PullState::new(Edge::Top, config.top),
            bottom: PullState::new(Edge::Bottom, config.bottom),
            refresh_action: None,
            load_action: None,
        };
        let controller = Self {
            inner: Rc::new(RefCell::new(inner)),
        };

        let weak = Rc::downgrade(&controller.inner);
        host.subscribe(Rc::new(move |event| {
            if let Some(inner) = weak.upgrade() {
                PullController { inner }.handle_event(event);
            }
        }));
        Ok(controller)
    }

    pub fn set_hooks(&self, hooks: Rc<dyn PullHooks>) {
        self.inner.borrow_mut().hooks = hooks;
    }

    pub fn set_haptics(&self, haptics: Rc<dyn HapticPerformer>) {
        self.inner.borrow_mut().haptics = haptics;
    }

    /// Binds the work to run when `edge` triggers, replacing any previous one.
    pub fn set_action(&self, edge: Edge, action: impl FnMut(Edge) + 'static) {
        *self.inner.borrow_mut().action_slot(edge) = Some(Box::new(action));
    }

    pub fn clear_action(&self, edge: Edge) {
        self.inner.borrow_mut().action_slot(edge).take();
    }

    /// Applies a new configuration to one edge.
    pub fn configure(&self, edge: Edge, config: EdgeConfig) -> Result<(), PullError> {
        config.validate(edge)?;
        self.inner.borrow_mut().state_mut(edge).set_config(config);
        Ok(())
    }

    pub fn config(&self, edge: Edge) -> EdgeConfig {
        *self.inner.borrow().state(edge).config()
    }

    pub fn phase(&self, edge: Edge) -> PullPhase {
        self.inner.borrow().state(edge).phase()
    }

    /// Latest progress sample for `edge`.
    pub fn progress(&self, edge: Edge) -> f32 {
        self.inner.borrow().state(edge).progress()
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.borrow().top.is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().bottom.is_active()
    }

    /// Space the host should keep around its content so busy indicators
    /// stay visible.
    pub fn content_insets(&self) -> EdgeInsets {
        let inner = self.inner.borrow();
        let inset = |state: &PullState| {
            if state.is_active() {
                state.config().element_height
            } else {
                0.0
            }
        };
        EdgeInsets {
            top: inset(&inner.top),
            bottom: inset(&inner.bottom),
        }
    }

    /// Entry point for host events. Called by the subscription made in
    /// [`attach`](Self::attach); hosts that deliver events by hand may call
    /// it directly.
    pub fn handle_event(&self, event: ScrollEvent) {
        let effects = {
            let mut inner = self.inner.borrow_mut();
            match event {
                ScrollEvent::OffsetChanged => {
                    let geometry = ScrollGeometry::capture(inner.host.as_ref());
                    inner.on_offset_changed(geometry)
                }
                ScrollEvent::GestureBegan => {
                    inner.on_gesture_began();
                    Effects::new()
                }
                ScrollEvent::GestureEnded => inner.on_gesture_ended(),
            }
        };
        self.run(effects);
    }

    pub fn begin_refreshing(&self) -> Result<(), PullError> {
        self.begin(Edge::Top)
    }

    pub fn stop_refreshing(&self) {
        self.stop(Edge::Top);
    }

    pub fn begin_loading(&self) -> Result<(), PullError> {
        self.begin(Edge::Bottom)
    }

    pub fn stop_loading(&self) {
        self.stop(Edge::Bottom);
    }

    /// Triggers `edge` programmatically. Does nothing if it is already busy.
    pub fn begin(&self, edge: Edge) -> Result<(), PullError> {
        let mut effects = Effects::new();
        self.inner.borrow_mut().begin(edge, &mut effects)?;
        self.run(effects);
        Ok(())
    }

    /// Ends the busy state of `edge` and scrolls back to rest. Does nothing
    /// unless the edge is triggered or active.
    pub fn stop(&self, edge: Edge) {
        let effects = self.inner.borrow_mut().stop(edge);
        self.run(effects);
    }

    fn run(&self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Progress(edge, progress) => {
                    self.hooks().on_progress_update(edge, progress);
                }
                Effect::Haptic(edge) => {
                    let haptics = Rc::clone(&self.inner.borrow().haptics);
                    haptics.perform(edge);
                }
                Effect::EnterBusy(edge) => {
                    self.hooks().on_enter_busy(edge);
                }
                Effect::Action(edge) => self.invoke_action(edge),
                Effect::Activate(edge) => {
                    self.inner.borrow_mut().state_mut(edge).activate();
                }
                Effect::AnimateTo {
                    edge,
                    offset,
                    ticket,
                } => {
                    let weak = Rc::downgrade(&self.inner);
                    self.host().animate_offset_to(
                        offset,
                        Box::new(move || Self::complete_settle(&weak, edge, ticket)),
                    );
                }
                Effect::SnapTo(offset) => {
                    self.host().set_offset_immediate(offset);
                }
                Effect::Settled { edge, ticket } => {
                    self.finish_settle(edge, ticket);
                }
            }
        }
    }

    fn invoke_action(&self, edge: Edge) {
        let action = self.inner.borrow_mut().action_slot(edge).take();
        let Some(mut action) = action else {
            log::warn!("{edge} edge action was unbound before it could run");
            return;
        };
        log::info!("{edge} edge triggered, running action");
        action(edge);
        // the action may have bound a replacement for itself
        let mut inner = self.inner.borrow_mut();
        let slot = inner.action_slot(edge);
        if slot.is_none() {
            *slot = Some(action);
        }
    }

    fn complete_settle(weak: &Weak<RefCell<ControllerInner>>, edge: Edge, ticket: u64) {
        if let Some(inner) = weak.upgrade() {
            PullController { inner }.finish_settle(edge, ticket);
        }
    }

    fn finish_settle(&self, edge: Edge, ticket: u64) {
        let finished = self.inner.borrow_mut().state_mut(edge).finish_settle(ticket);
        if finished {
            log::info!("{edge} edge settled");
            self.hooks().on_exit_busy(edge);
        }
    }

    fn hooks(&self) -> Rc<dyn PullHooks> {
        Rc::clone(&self.inner.borrow().hooks)
    }

    fn host(&self) -> Rc<dyn ScrollHost> {
        Rc::clone(&self.inner.borrow().host)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
