//! Hook recorder.

use std::cell::RefCell;
use std::rc::Rc;

use edgepull_core::{Edge, HapticPerformer, PullHooks};

/// A single callback observed by [`RecordingHooks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HookEvent {
    Progress(Edge, f32),
    EnterBusy(Edge),
    ExitBusy(Edge),
    Haptic(Edge),
}

impl HookEvent {
    pub fn edge(&self) -> Edge {
        match *self {
            HookEvent::Progress(edge, _)
            | HookEvent::EnterBusy(edge)
            | HookEvent::ExitBusy(edge)
            | HookEvent::Haptic(edge) => edge,
        }
    }
}

/// Records every hook call and haptic pulse in order.
///
/// Install the same instance as both hooks and haptic performer to get a
/// single interleaved log.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    events: RefCell<Vec<HookEvent>>,
}

impl RecordingHooks {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Events other than progress updates.
    pub fn transitions(&self) -> Vec<HookEvent> {
        self.events
            .borrow()
            .iter()
            .copied()
            .filter(|event| !matches!(event, HookEvent::Progress(..)))
            .collect()
    }

    pub fn progress_updates(&self, edge: Edge) -> Vec<f32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                HookEvent::Progress(e, progress) if e == edge => Some(progress),
                _ => None,
            })
            .collect()
    }

    pub fn last_progress(&self, edge: Edge) -> Option<f32> {
        self.progress_updates(edge).last().copied()
    }

    pub fn enter_busy_count(&self, edge: Edge) -> usize {
        self.count(HookEvent::EnterBusy(edge))
    }

    pub fn exit_busy_count(&self, edge: Edge) -> usize {
        self.count(HookEvent::ExitBusy(edge))
    }

    pub fn haptic_count(&self, edge: Edge) -> usize {
        self.count(HookEvent::Haptic(edge))
    }

    fn count(&self, wanted: HookEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == wanted)
            .count()
    }

    fn push(&self, event: HookEvent) {
        log::trace!("hook {event:?}");
        self.events.borrow_mut().push(event);
    }
}

impl PullHooks for RecordingHooks {
    fn on_progress_update(&self, edge: Edge, progress: f32) {
        self.push(HookEvent::Progress(edge, progress));
    }

    fn on_enter_busy(&self, edge: Edge) {
        self.push(HookEvent::EnterBusy(edge));
    }

    fn on_exit_busy(&self, edge: Edge) {
        self.push(HookEvent::ExitBusy(edge));
    }
}

impl HapticPerformer for RecordingHooks {
    fn perform(&self, edge: Edge) {
        self.push(HookEvent::Haptic(edge));
    }
}
