//! In-memory scroll host.
//!
//! `TestScrollHost` plays the part of a platform scroll view: it stores the
//! offset and content bounds, delivers events synchronously, and runs
//! requested offset animations on a manual frame clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use edgepull_animation::{AnimationSpec, OffsetTween};
use edgepull_core::{
    EdgeInsets, OffsetCompletion, ScrollEvent, ScrollGeometry, ScrollHandler, ScrollHost,
};

/// One frame at 60 FPS.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound for [`TestScrollHost::run_animations`].
const MAX_FRAMES: usize = 10_000;

/// A scroll command the controller (or a test) issued to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostCommand {
    AnimateTo(f32),
    SetImmediate(f32),
}

struct RunningAnimation {
    tween: OffsetTween,
    completion: OffsetCompletion,
}

struct HostState {
    offset: f32,
    viewport_height: f32,
    content_height: f32,
    animation: Option<RunningAnimation>,
    commands: Vec<HostCommand>,
    emitted: usize,
}

pub struct TestScrollHost {
    state: RefCell<HostState>,
    handlers: RefCell<Vec<ScrollHandler>>,
    frame_time_nanos: Cell<u64>,
    animation_spec: Cell<AnimationSpec>,
}

impl TestScrollHost {
    pub fn new(viewport_height: f32, content_height: f32) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(HostState {
                offset: 0.0,
                viewport_height,
                content_height,
                animation: None,
                commands: Vec::new(),
                emitted: 0,
            }),
            handlers: RefCell::new(Vec::new()),
            frame_time_nanos: Cell::new(0),
            animation_spec: Cell::new(AnimationSpec::default()),
        })
    }

    /// Spec used for offset animations requested from now on.
    pub fn set_animation_spec(&self, spec: AnimationSpec) {
        self.animation_spec.set(spec);
    }

    pub fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry::capture(self)
    }

    pub fn offset(&self) -> f32 {
        self.state.borrow().offset
    }

    /// Largest resting offset: the bottom of the content at the bottom of
    /// the viewport.
    pub fn max_offset(&self) -> f32 {
        self.geometry().max_offset()
    }

    /// Commands received so far, oldest first.
    pub fn commands(&self) -> Vec<HostCommand> {
        self.state.borrow().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Number of `OffsetChanged` events delivered so far.
    pub fn emitted_offset_changes(&self) -> usize {
        self.state.borrow().emitted
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().animation.is_some()
    }

    /// Target of the running animation, if any.
    pub fn animation_target(&self) -> Option<f32> {
        self.state
            .borrow()
            .animation
            .as_ref()
            .map(|running| running.tween.target())
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos.get()
    }

    /// Moves the offset as a user scroll or drag would.
    pub fn scroll_to(&self, offset: f32) {
        self.state.borrow_mut().offset = offset;
        self.emit(ScrollEvent::OffsetChanged);
    }

    pub fn begin_gesture(&self) {
        self.emit(ScrollEvent::GestureBegan);
    }

    pub fn end_gesture(&self) {
        self.emit(ScrollEvent::GestureEnded);
    }

    /// Inserts rows above the current ones. The offset is kept, so the rows
    /// on screen move down by `height` the way a table reload moves them.
    pub fn prepend_content(&self, height: f32) {
        self.state.borrow_mut().content_height += height;
        self.emit(ScrollEvent::OffsetChanged);
    }

    /// Adds rows below the current ones.
    pub fn append_content(&self, height: f32) {
        self.state.borrow_mut().content_height += height;
        self.emit(ScrollEvent::OffsetChanged);
    }

    pub fn set_content_height(&self, height: f32) {
        self.state.borrow_mut().content_height = height;
        self.emit(ScrollEvent::OffsetChanged);
    }

    pub fn set_viewport_height(&self, height: f32) {
        self.state.borrow_mut().viewport_height = height;
        self.emit(ScrollEvent::OffsetChanged);
    }

    /// Elastic bounce after the finger lifts: animates back inside the
    /// content bounds grown by `insets`. Does nothing when already inside
    /// or while another offset animation is running.
    pub fn bounce_to_rest(&self, insets: EdgeInsets) {
        if self.is_animating() {
            return;
        }
        let geometry = self.geometry();
        let top_rest = -insets.top;
        let bottom_rest = geometry.max_offset() + insets.bottom;
        let target = if geometry.offset < top_rest {
            top_rest
        } else if geometry.offset > bottom_rest {
            bottom_rest
        } else {
            return;
        };
        log::trace!("bouncing from {} to {target}", geometry.offset);
        self.start_animation(target, Box::new(|| {}), false);
    }

    /// Advances the frame clock and steps the running animation, if any.
    /// Returns whether an animation is still running afterwards.
    pub fn advance_frame(&self, nanos: u64) -> bool {
        let now = self.frame_time_nanos.get().saturating_add(nanos);
        self.frame_time_nanos.set(now);

        let (finished, completion) = {
            let mut state = self.state.borrow_mut();
            let Some(running) = state.animation.as_mut() else {
                return false;
            };
            let frame = running.tween.sample(now);
            state.offset = frame.value;
            if frame.finished {
                (true, state.animation.take().map(|running| running.completion))
            } else {
                (false, None)
            }
        };

        self.emit(ScrollEvent::OffsetChanged);
        if let Some(completion) = completion {
            completion();
        }
        !finished && self.is_animating()
    }

    /// Steps frames until no animation is running. Returns the number of
    /// frames stepped.
    pub fn run_animations(&self) -> usize {
        let mut frames = 0;
        while self.is_animating() && frames < MAX_FRAMES {
            self.advance_frame(FRAME_NANOS);
            frames += 1;
        }
        if self.is_animating() {
            log::warn!("animation still running after {MAX_FRAMES} frames");
        }
        frames
    }

    fn start_animation(&self, offset: f32, completion: OffsetCompletion, record: bool) {
        let superseded = {
            let mut state = self.state.borrow_mut();
            if record {
                state.commands.push(HostCommand::AnimateTo(offset));
            }
            let tween = OffsetTween::new(state.offset, offset, self.animation_spec.get());
            state
                .animation
                .replace(RunningAnimation { tween, completion })
        };
        if let Some(previous) = superseded {
            (previous.completion)();
        }
    }

    fn emit(&self, event: ScrollEvent) {
        if event == ScrollEvent::OffsetChanged {
            self.state.borrow_mut().emitted += 1;
        }
        let handlers = self.handlers.borrow().clone();
        for handler in handlers {
            handler(event);
        }
    }
}

impl ScrollHost for TestScrollHost {
    fn visible_offset(&self) -> f32 {
        self.state.borrow().offset
    }

    fn viewport_height(&self) -> f32 {
        self.state.borrow().viewport_height
    }

    fn content_height(&self) -> f32 {
        self.state.borrow().content_height
    }

    fn subscribe(&self, handler: ScrollHandler) {
        self.handlers.borrow_mut().push(handler);
    }

    fn animate_offset_to(&self, offset: f32, completion: OffsetCompletion) {
        if self.offset() == offset && !self.is_animating() {
            self.state
                .borrow_mut()
                .commands
                .push(HostCommand::AnimateTo(offset));
            completion();
            return;
        }
        self.start_animation(offset, completion, true);
    }

    fn set_offset_immediate(&self, offset: f32) {
        let superseded = {
            let mut state = self.state.borrow_mut();
            state.commands.push(HostCommand::SetImmediate(offset));
            state.offset = offset;
            state.animation.take()
        };
        self.emit(ScrollEvent::OffsetChanged);
        if let Some(previous) = superseded {
            (previous.completion)();
        }
    }
}
