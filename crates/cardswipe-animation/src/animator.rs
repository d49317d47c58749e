//! Frame-driven animator for a released card.
//!
//! `InertialAnimator` owns one [`AnimationRun`] and advances it from a
//! [`FrameTimer`]. Listeners are invoked after the internal borrow is
//! released, so they may call back into the animator (stop it, restart it,
//! read its state).

use crate::factory::AnimationLaunch;
use crate::frame_timer::FrameTimer;
use crate::run::{AnimationRun, AnimatorPhase, TickOutcome};
use crate::state::{AnimationConfig, AnimationState};
use cardswipe_core::FrameClock;
use cardswipe_ui_graphics::{Point, Velocity};
use std::cell::RefCell;
use std::rc::Rc;

type FrameListener = Rc<dyn Fn(&AnimationState)>;
type OnceListener = Box<dyn FnOnce()>;

struct AnimatorInner {
    run: AnimationRun,
    on_frame: Option<FrameListener>,
    on_complete: Option<OnceListener>,
    on_threshold: Option<OnceListener>,
}

/// Shared handle; clones drive the same run.
#[derive(Clone)]
pub struct InertialAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
    timer: FrameTimer,
}

impl InertialAnimator {
    pub fn new(clock: FrameClock, config: AnimationConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                run: AnimationRun::new(config),
                on_frame: None,
                on_complete: None,
                on_threshold: None,
            })),
            timer: FrameTimer::new(clock),
        }
    }

    /// Configuration for the next `start`. Stops a run in flight.
    pub fn set_config(&self, config: AnimationConfig) {
        self.timer.stop();
        self.inner.borrow_mut().run.set_config(config);
    }

    pub fn config(&self) -> AnimationConfig {
        *self.inner.borrow().run.config()
    }

    /// Called with the state after every tick, for every run.
    pub fn on_frame(&self, listener: impl Fn(&AnimationState) + 'static) {
        self.inner.borrow_mut().on_frame = Some(Rc::new(listener));
    }

    /// Called once when the next run finishes on its own.
    pub fn on_complete(&self, listener: impl FnOnce() + 'static) {
        self.inner.borrow_mut().on_complete = Some(Box::new(listener));
    }

    /// Called once when `|x|` first passes half the exit distance.
    pub fn on_threshold(&self, listener: impl FnOnce() + 'static) {
        self.inner.borrow_mut().on_threshold = Some(Box::new(listener));
    }

    pub fn start(&self, from: Point, velocity: Velocity) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.run.start(from, velocity);
            log::debug!(
                "animation started: {:?} from ({:.1}, {:.1}) at ({:.0}, {:.0}) px/s",
                inner.run.phase(),
                from.x,
                from.y,
                velocity.x,
                velocity.y
            );
        }
        let weak = Rc::downgrade(&self.inner);
        self.timer.start(move |dt_ms| match weak.upgrade() {
            Some(inner) => !tick_inner(&inner, dt_ms).finished,
            None => false,
        });
    }

    /// Apply a prepared configuration and start it.
    pub fn launch(&self, launch: AnimationLaunch) {
        self.set_config(launch.config);
        self.start(launch.from, launch.velocity);
    }

    /// Halt immediately. Pending completion and threshold listeners are
    /// dropped without being called. Returns whether a run was in flight.
    pub fn stop(&self) -> bool {
        self.timer.stop();
        let (was_running, on_complete, on_threshold) = {
            let mut inner = self.inner.borrow_mut();
            let was_running = inner.run.stop();
            (was_running, inner.on_complete.take(), inner.on_threshold.take())
        };
        drop(on_complete);
        drop(on_threshold);
        if was_running {
            log::debug!("animation stopped before completion");
        }
        was_running
    }

    pub fn state(&self) -> AnimationState {
        *self.inner.borrow().run.state()
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.inner.borrow().run.phase()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().run.is_running()
    }

    /// Advance by `dt_ms` outside the frame loop and dispatch listeners.
    pub fn tick(&self, dt_ms: f32) -> TickOutcome {
        let outcome = tick_inner(&self.inner, dt_ms);
        if outcome.finished {
            self.timer.stop();
        }
        outcome
    }
}

fn tick_inner(inner: &Rc<RefCell<AnimatorInner>>, dt_ms: f32) -> TickOutcome {
    let (outcome, state, on_frame, on_threshold, on_complete) = {
        let mut guard = inner.borrow_mut();
        if !guard.run.is_running() {
            return TickOutcome::default();
        }
        let outcome = guard.run.tick(dt_ms);
        let on_threshold = if outcome.threshold_crossed {
            guard.on_threshold.take()
        } else {
            None
        };
        let on_complete = if outcome.finished {
            guard.on_complete.take()
        } else {
            None
        };
        (
            outcome,
            *guard.run.state(),
            guard.on_frame.clone(),
            on_threshold,
            on_complete,
        )
    };

    if let Some(listener) = on_frame {
        listener(&state);
    }
    if let Some(listener) = on_threshold {
        listener();
    }
    if outcome.finished {
        log::debug!("animation finished at ({:.1}, {:.1})", state.x, state.y);
        if let Some(listener) = on_complete {
            listener();
        }
    }
    outcome
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
