use crate::recorder::CallbackRecorder;
use cardswipe_core::{Clock, DefaultScheduler, ManualClock, Runtime, NANOS_PER_MILLI};
use cardswipe_foundation::{InteractionLock, PointerId};
use cardswipe_ui::{GestureController, LayerNode, SwipeOptions};
use cardswipe_ui_graphics::Point;
use std::rc::Rc;
use std::sync::Arc;

/// Frame spacing used by [`GestureTestRule::advance_frame`].
pub const FRAME_INTERVAL_MS: u64 = 16;

const MAX_PUMPED_FRAMES: usize = 1_000;

/// Headless harness for exercising a gesture controller in tests.
///
/// Owns a runtime, a manual clock kept in step with the frame times it
/// drains, a private interaction lock, the card node and a controller bound
/// to all of them. Every controller callback is recorded.
pub struct GestureTestRule {
    runtime: Runtime,
    clock: ManualClock,
    lock: InteractionLock,
    node: LayerNode,
    controller: GestureController,
    recorder: CallbackRecorder,
}

impl GestureTestRule {
    pub fn new() -> Self {
        Self::with_options(SwipeOptions::default())
    }

    pub fn with_options(options: SwipeOptions) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let clock = ManualClock::new();
        let lock = InteractionLock::new();
        let node = LayerNode::new();
        let controller = GestureController::new(
            node.clone(),
            runtime.frame_clock(),
            lock.clone(),
            Rc::new(clock.clone()),
        );
        controller.update_options(options);
        let recorder = CallbackRecorder::new();
        controller.set_callbacks(recorder.callbacks(&node, &lock));

        Self {
            runtime,
            clock,
            lock,
            node,
            controller,
            recorder,
        }
    }

    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    pub fn node(&self) -> &LayerNode {
        &self.node
    }

    pub fn lock(&self) -> &InteractionLock {
        &self.lock
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn recorder(&self) -> &CallbackRecorder {
        &self.recorder
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Card translation.
    pub fn card_position(&self) -> Point {
        self.node.translation()
    }

    /// Advance the clock without producing a frame.
    pub fn advance_time(&self, millis: u64) {
        self.clock.advance(millis as f64);
    }

    /// Advance the clock by one frame interval and drain frame callbacks.
    pub fn advance_frame(&self) {
        self.clock.advance(FRAME_INTERVAL_MS as f64);
        let frame_time_nanos = (self.clock.now_millis() as u64) * NANOS_PER_MILLI;
        self.runtime.drain_frame_callbacks(frame_time_nanos);
    }

    /// Produce frames until nothing is scheduled. Returns the number of frames.
    pub fn pump_until_idle(&self) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            frames += 1;
            if frames > MAX_PUMPED_FRAMES {
                panic!("pump_until_idle: still animating after {MAX_PUMPED_FRAMES} frames");
            }
            self.advance_frame();
        }
        frames
    }

    pub fn press(&self, id: PointerId, x: f32, y: f32) -> bool {
        self.controller.pointer_down(id, Point::new(x, y))
    }

    pub fn move_to(&self, id: PointerId, x: f32, y: f32) -> bool {
        self.controller.pointer_move(id, Point::new(x, y))
    }

    pub fn release(&self, id: PointerId, x: f32, y: f32) -> bool {
        self.controller.pointer_up(id, Point::new(x, y))
    }

    pub fn cancel(&self, id: PointerId) -> bool {
        self.controller.pointer_cancel(id)
    }

    /// Press at `from`, move linearly to `to` in `steps` moves spaced
    /// `step_ms` apart, and keep the pointer down.
    pub fn drag_without_release(
        &self,
        id: PointerId,
        from: Point,
        to: Point,
        steps: u32,
        step_ms: u64,
    ) {
        self.press(id, from.x, from.y);
        for step in 1..=steps {
            self.advance_time(step_ms);
            let t = step as f32 / steps as f32;
            let position = from + (to - from) * t;
            self.move_to(id, position.x, position.y);
        }
    }

    /// Linear drag followed by a release at `to`, without pumping frames.
    pub fn drag(&self, id: PointerId, from: Point, to: Point, steps: u32, step_ms: u64) {
        self.drag_without_release(id, from, to, steps, step_ms);
        self.release(id, to.x, to.y);
    }

    /// Press and release at the same point after `hold_ms`.
    pub fn tap(&self, id: PointerId, x: f32, y: f32, hold_ms: u64) {
        self.press(id, x, y);
        self.advance_time(hold_ms);
        self.release(id, x, y);
    }
}

impl Default for GestureTestRule {
    fn default() -> Self {
        Self::new()
    }
}
