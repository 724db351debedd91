//! Host abstraction traits.
//!
//! The controller never touches a platform view tree. Everything it needs
//! from the scrollable surface goes through [`ScrollHost`], and everything
//! it reports back goes through [`PullHooks`] and [`HapticPerformer`].

use std::rc::Rc;

use crate::edge::Edge;

/// Notifications a host delivers to its subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The visible offset or the content bounds changed.
    OffsetChanged,
    /// A new drag started (finger or pointer down).
    GestureBegan,
    /// The drag input ended (finger or pointer up).
    GestureEnded,
}

/// Subscriber callback. Hosts may call it re-entrantly, for example from
/// inside [`ScrollHost::set_offset_immediate`].
pub type ScrollHandler = Rc<dyn Fn(ScrollEvent)>;

/// Runs once a requested offset animation is over.
pub type OffsetCompletion = Box<dyn FnOnce()>;

/// The scrollable surface the controller is attached to.
///
/// All calls happen on the UI thread. Hosts that receive input on other
/// threads must marshal onto it before notifying subscribers.
pub trait ScrollHost {
    /// Distance from the top of the content to the top of the viewport.
    /// Negative while pulled past the top.
    fn visible_offset(&self) -> f32;

    fn viewport_height(&self) -> f32;

    fn content_height(&self) -> f32;

    /// Registers a subscriber. Events are delivered synchronously.
    fn subscribe(&self, handler: ScrollHandler);

    /// Smoothly scrolls to `offset` and calls `completion` when done, or
    /// right away if already there. A later [`set_offset_immediate`]
    /// supersedes the animation; the superseded completion must still run.
    ///
    /// [`set_offset_immediate`]: ScrollHost::set_offset_immediate
    fn animate_offset_to(&self, offset: f32, completion: OffsetCompletion);

    /// Jumps to `offset` without animating.
    fn set_offset_immediate(&self, offset: f32);
}

/// Visual callbacks. Every method has an empty default, implement only the
/// ones the indicator needs.
pub trait PullHooks {
    /// A new progress sample for an idle or pulling edge.
    fn on_progress_update(&self, edge: Edge, progress: f32) {
        let _ = (edge, progress);
    }

    /// The edge was triggered; start the busy animation.
    fn on_enter_busy(&self, edge: Edge) {
        let _ = edge;
    }

    /// The edge has settled back to rest; stop the busy animation.
    fn on_exit_busy(&self, edge: Edge) {
        let _ = edge;
    }
}

/// Hooks that ignore every callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl PullHooks for NoopHooks {}

/// Haptic feedback hardware.
pub trait HapticPerformer {
    /// One generic pulse, sent when a pull crosses its trigger height.
    fn perform(&self, edge: Edge);
}

/// Haptic performer for hosts without haptic hardware.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl HapticPerformer for NoHaptics {
    fn perform(&self, _edge: Edge) {}
}

/// Work to run when an edge triggers: the refresh or load action.
pub type PullAction = Box<dyn FnMut(Edge)>;
