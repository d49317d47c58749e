//! Gesture controller: pointer input in, card motion and callbacks out.
//!
//! One controller drives one [`LayerNode`]. A press captures a single pointer
//! and takes the interaction lock; moves write the card's layer directly; the
//! release is classified by the predictor and handed to the animator as an
//! exit or a snap-back. The lock is released, and swipe callbacks fire, only
//! once that animation has finished.
//!
//! Options and callbacks sit in [`Owned`] slots and are read each time they
//! are needed, so replacing them mid-gesture takes effect immediately.

use crate::layer_node::LayerNode;
use crate::options::{SwipeCallbacks, SwipeOptions};
use cardswipe_animation::{
    drag_visuals, exit_animation, snap_back_animation, AnimationState, InertialAnimator,
    SwipeDirection,
};
use cardswipe_core::{Clock, FrameClock, Owned, SystemClock};
use cardswipe_foundation::{
    global_interaction_lock, GestureIntent, GesturePredictor, InteractionLock,
    PointerEvent, PointerEventKind, PointerId,
};
use cardswipe_ui_graphics::{AxisBounds, GraphicsLayer, Point, Velocity};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Share of the drag applied past a bound.
pub const OVERDRAG_RESISTANCE: f32 = 0.3;

#[derive(Clone, Copy, Debug)]
struct ActiveGesture {
    pointer: PointerId,
    /// Pointer position at press.
    origin: Point,
    /// Card translation at press.
    base: Point,
}

struct ControllerInner {
    node: LayerNode,
    lock: InteractionLock,
    clock: Rc<dyn Clock>,
    options: Owned<SwipeOptions>,
    callbacks: Owned<SwipeCallbacks>,
    predictor: RefCell<GesturePredictor>,
    animator: InertialAnimator,
    gesture: Cell<Option<ActiveGesture>>,
    holds_lock: Cell<bool>,
    animating: Cell<bool>,
}

/// Shared handle; clones drive the same card.
#[derive(Clone)]
pub struct GestureController {
    inner: Rc<ControllerInner>,
}

impl GestureController {
    pub fn new(
        node: LayerNode,
        frame_clock: FrameClock,
        lock: InteractionLock,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let options = SwipeOptions::default();
        let predictor = GesturePredictor::new(Rc::clone(&clock))
            .with_thresholds(options.predictor_thresholds());
        let animator = InertialAnimator::new(frame_clock, Default::default());
        let inner = Rc::new(ControllerInner {
            node,
            lock,
            clock,
            options: Owned::new(options),
            callbacks: Owned::default(),
            predictor: RefCell::new(predictor),
            animator,
            gesture: Cell::new(None),
            holds_lock: Cell::new(false),
            animating: Cell::new(false),
        });

        let weak = Rc::downgrade(&inner);
        inner.animator.on_frame(move |state| {
            if let Some(inner) = weak.upgrade() {
                inner.on_animation_frame(state);
            }
        });

        Self { inner }
    }

    /// Controller on the thread's global lock and the system clock.
    pub fn with_defaults(node: LayerNode, frame_clock: FrameClock) -> Self {
        Self::new(
            node,
            frame_clock,
            global_interaction_lock(),
            Rc::new(SystemClock::new()),
        )
    }

    pub fn node(&self) -> &LayerNode {
        &self.inner.node
    }

    pub fn interaction_lock(&self) -> &InteractionLock {
        &self.inner.lock
    }

    pub fn options(&self) -> SwipeOptions {
        self.inner.options.get()
    }

    pub fn update_options(&self, options: SwipeOptions) {
        self.inner.options.replace(options);
    }

    pub fn set_callbacks(&self, callbacks: SwipeCallbacks) {
        self.inner.callbacks.replace(callbacks);
    }

    pub fn update_callbacks(&self, f: impl FnOnce(SwipeCallbacks) -> SwipeCallbacks) {
        let current = self.inner.callbacks.get();
        self.inner.callbacks.replace(f(current));
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.gesture.get().is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.animating.get()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.inner.animator.state()
    }

    /// Route a pointer event. Returns whether the controller consumed it.
    pub fn handle_event(&self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.id, event.position),
            PointerEventKind::Move => self.pointer_move(event.id, event.position),
            PointerEventKind::Up => self.pointer_up(event.id, event.position),
            PointerEventKind::Cancel => self.pointer_cancel(event.id),
        }
    }

    pub fn pointer_down(&self, id: PointerId, position: Point) -> bool {
        let inner = &self.inner;
        let options = inner.options.get();
        if options.disabled {
            log::trace!("pointer {id} down ignored: controller disabled");
            return false;
        }
        if let Some(active) = inner.gesture.get() {
            log::debug!(
                "pointer {id} down rejected: pointer {} already captured",
                active.pointer
            );
            return false;
        }

        if inner.animator.stop() {
            log::debug!("pointer {id} caught the card mid-animation");
        }
        inner.animating.set(false);

        let base = inner.node.translation();
        inner.gesture.set(Some(ActiveGesture {
            pointer: id,
            origin: position,
            base,
        }));
        inner.acquire_lock();
        inner.node.set_externally_driven(true);
        {
            let mut predictor = inner.predictor.borrow_mut();
            predictor.set_thresholds(options.predictor_thresholds());
            predictor.start_at(position.x, position.y, inner.clock.now_millis());
        }
        log::debug!("drag started by pointer {id} at ({:.1}, {:.1})", position.x, position.y);

        if let Some(callback) = inner.callbacks.with(|c| c.on_drag_start.clone()) {
            callback();
        }
        true
    }

    pub fn pointer_move(&self, id: PointerId, position: Point) -> bool {
        let inner = &self.inner;
        let Some(active) = inner.captured(id) else {
            log::trace!("pointer {id} move ignored");
            return false;
        };
        let options = inner.options.get();
        let constrained = options.axis.constrain(position, active.origin);
        let state = inner.predictor.borrow_mut().update_at(
            constrained.x,
            constrained.y,
            inner.clock.now_millis(),
        );

        let mut offset = active.base + state.delta() * options.drag_elasticity;
        if let Some(bounds) = options.bounds {
            offset.x = rubber_band(offset.x, bounds.x);
            offset.y = rubber_band(offset.y, bounds.y);
        }
        inner.node.set_layer(drag_layer(offset));
        true
    }

    pub fn pointer_up(&self, id: PointerId, position: Point) -> bool {
        let inner = &self.inner;
        let Some(active) = inner.captured(id) else {
            log::trace!("pointer {id} up ignored");
            return false;
        };
        inner.gesture.set(None);

        let options = inner.options.get();
        let now = inner.clock.now_millis();
        let state = {
            let mut predictor = inner.predictor.borrow_mut();
            let released_at = options.axis.constrain(position, active.origin);
            let moved = predictor
                .latest()
                .is_some_and(|sample| sample.position() != released_at);
            if moved {
                predictor.update_at(released_at.x, released_at.y, now);
            }
            predictor.end_at(now).unwrap_or_default()
        };

        if let Some(callback) = inner.callbacks.with(|c| c.on_drag_end.clone()) {
            callback(state.intent);
        }

        match state.intent {
            GestureIntent::Tap => ControllerInner::finish_tap(inner, active),
            intent => {
                let from = inner.node.translation();
                let direction = match intent {
                    GestureIntent::Swipe => {
                        options.swipe_direction(state.delta_x, state.velocity_x)
                    }
                    _ => None,
                };
                match direction {
                    Some(direction) => {
                        ControllerInner::launch_exit(inner, direction, from, state.velocity())
                    }
                    None => ControllerInner::launch_snap_back(inner, from, state.velocity()),
                }
            }
        }
        true
    }

    pub fn pointer_cancel(&self, id: PointerId) -> bool {
        let inner = &self.inner;
        if inner.captured(id).is_none() {
            log::trace!("pointer {id} cancel ignored");
            return false;
        }
        inner.gesture.set(None);
        inner.predictor.borrow_mut().cancel();
        log::debug!("drag by pointer {id} cancelled");

        if let Some(callback) = inner.callbacks.with(|c| c.on_drag_end.clone()) {
            callback(GestureIntent::Cancel);
        }
        let from = inner.node.translation();
        ControllerInner::launch_snap_back(inner, from, Velocity::ZERO);
        true
    }

    /// Programmatic exit from the current position with no initial velocity.
    /// Ignored while disabled or while a pointer is down.
    pub fn trigger_swipe(&self, direction: SwipeDirection) -> bool {
        let inner = &self.inner;
        if inner.options.with(|o| o.disabled) {
            log::trace!("trigger_swipe ignored: controller disabled");
            return false;
        }
        if inner.gesture.get().is_some() {
            log::trace!("trigger_swipe ignored: drag in progress");
            return false;
        }
        inner.animator.stop();
        inner.acquire_lock();
        inner.node.set_externally_driven(true);
        let from = inner.node.translation();
        ControllerInner::launch_exit(inner, direction, from, Velocity::ZERO);
        true
    }

    /// Stop everything and put the card back at rest.
    pub fn reset(&self) {
        let inner = &self.inner;
        inner.animator.stop();
        inner.gesture.set(None);
        inner.predictor.borrow_mut().cancel();
        inner.node.set_layer(GraphicsLayer::NEUTRAL);
        inner.node.set_externally_driven(false);
        inner.animating.set(false);
        inner.release_lock();
        log::debug!("controller reset");
    }
}

impl ControllerInner {
    fn captured(&self, id: PointerId) -> Option<ActiveGesture> {
        self.gesture.get().filter(|active| active.pointer == id)
    }

    fn acquire_lock(&self) {
        self.lock.lock();
        self.holds_lock.set(true);
    }

    fn release_lock(&self) {
        if self.holds_lock.replace(false) && self.lock.is_locked() {
            self.lock.unlock();
        }
    }

    /// A tap on a card caught away from rest springs it home; the lock is
    /// then held until that snap-back completes.
    fn finish_tap(this: &Rc<Self>, active: ActiveGesture) {
        this.node.set_layer(drag_layer(active.base));
        log::debug!("tap");
        if active.base == Point::ZERO {
            this.node.set_externally_driven(false);
            this.release_lock();
        }
        if let Some(callback) = this.callbacks.with(|c| c.on_tap.clone()) {
            callback();
        }
        // on_tap may have reset the card or started an exit of its own.
        let from = this.node.translation();
        if from != Point::ZERO && !this.animating.get() {
            Self::launch_snap_back(this, from, Velocity::ZERO);
        }
    }

    fn launch_exit(this: &Rc<Self>, direction: SwipeDirection, from: Point, velocity: Velocity) {
        let params = this.options.with(|o| o.exit_params());
        let launch = exit_animation(from, velocity, direction, &params);

        let weak = Rc::downgrade(this);
        this.animator.on_threshold(move || {
            if let Some(inner) = weak.upgrade() {
                log::debug!("swipe {direction:?} committed");
                if let Some(callback) = inner.callbacks.with(|c| c.on_swipe_committed.clone()) {
                    callback(direction);
                }
            }
        });
        this.animator.on_complete(Self::completion(this, Some(direction)));
        this.animating.set(true);
        log::debug!("exit {direction:?} from ({:.1}, {:.1})", from.x, from.y);
        this.animator.launch(launch);
    }

    fn launch_snap_back(this: &Rc<Self>, from: Point, velocity: Velocity) {
        let spring = this.options.with(|o| o.spring);
        let launch = snap_back_animation(from, velocity, spring);
        this.animator.on_complete(Self::completion(this, None));
        this.animating.set(true);
        log::debug!("snap back from ({:.1}, {:.1})", from.x, from.y);
        this.animator.launch(launch);
    }

    fn completion(this: &Rc<Self>, direction: Option<SwipeDirection>) -> impl FnOnce() + 'static {
        let weak: Weak<Self> = Rc::downgrade(this);
        move || {
            if let Some(inner) = weak.upgrade() {
                inner.finish_animation(direction);
            }
        }
    }

    fn finish_animation(&self, direction: Option<SwipeDirection>) {
        self.animating.set(false);
        self.node.set_externally_driven(false);
        if let Some(callback) = self.callbacks.with(|c| c.on_animation_complete.clone()) {
            callback();
        }
        self.release_lock();
        if let Some(direction) = direction {
            log::debug!("swiped {direction:?}");
            if let Some(callback) = self.callbacks.with(|c| c.on_swipe(direction)) {
                callback();
            }
        }
    }

    fn on_animation_frame(&self, state: &AnimationState) {
        self.node.set_layer(state.to_layer());
        if let Some(callback) = self.callbacks.with(|c| c.on_animation_frame.clone()) {
            callback(state);
        }
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.release_lock();
    }
}

fn drag_layer(offset: Point) -> GraphicsLayer {
    let visuals = drag_visuals(offset.x);
    GraphicsLayer {
        translation_x: offset.x,
        translation_y: offset.y,
        rotation: visuals.rotation,
        scale: visuals.scale,
        alpha: visuals.opacity,
    }
}

/// Past a bound the card moves at [`OVERDRAG_RESISTANCE`] of the drag.
pub fn rubber_band(value: f32, bounds: AxisBounds) -> f32 {
    let overflow = bounds.overflow(value);
    if overflow == 0.0 {
        value
    } else {
        bounds.clamp(value) + overflow * OVERDRAG_RESISTANCE
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
