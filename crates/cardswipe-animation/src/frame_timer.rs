//! Per-frame tick loop on top of the runtime frame clock.
//!
//! The timer re-registers itself on every frame, the same way the scroll
//! fling driver chains `with_frame_nanos` calls, and hands the tick closure
//! the elapsed milliseconds since the previous frame.

use cardswipe_core::{FrameCallbackRegistration, FrameClock, NANOS_PER_MILLI};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Delta handed to the first tick of a run, one 60 Hz frame.
pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;

/// Longest delta a tick ever sees. Larger gaps come from a suspended host.
pub const MAX_FRAME_DELTA_MS: f32 = 64.0;

/// Clamp a raw frame delta into `[0, MAX_FRAME_DELTA_MS]`.
pub fn clamp_frame_delta(dt_ms: f32) -> f32 {
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        return 0.0;
    }
    dt_ms.min(MAX_FRAME_DELTA_MS)
}

type TickFn = Box<dyn FnMut(f32) -> bool + 'static>;

#[derive(Default)]
struct TimerInner {
    running: bool,
    generation: u64,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

/// Calls a tick closure once per frame until it returns `false` or the timer
/// is stopped. Clones share the same loop.
#[derive(Clone)]
pub struct FrameTimer {
    inner: Rc<RefCell<TimerInner>>,
    clock: FrameClock,
}

impl FrameTimer {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimerInner::default())),
            clock,
        }
    }

    /// Start a new loop, replacing any loop already running.
    pub fn start(&self, tick: impl FnMut(f32) -> bool + 'static) {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.running = true;
            inner.last_frame_nanos = None;
            inner.registration = None;
            inner.generation
        };
        let tick: Rc<RefCell<TickFn>> = Rc::new(RefCell::new(Box::new(tick)));
        schedule_next_frame(Rc::downgrade(&self.inner), self.clock.clone(), tick, generation);
    }

    /// Halt future ticks. Safe to call from inside a tick.
    pub fn stop(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            inner.running = false;
            inner.generation += 1;
            inner.registration.take()
        };
        drop(registration);
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }
}

fn schedule_next_frame(
    timer: Weak<RefCell<TimerInner>>,
    clock: FrameClock,
    tick: Rc<RefCell<TickFn>>,
    generation: u64,
) {
    let Some(strong) = timer.upgrade() else {
        return;
    };
    let clock_for_next = clock.clone();
    let timer_for_frame = timer.clone();

    let registration = clock.with_frame_nanos(move |frame_time_nanos| {
        let Some(inner) = timer_for_frame.upgrade() else {
            return;
        };

        let dt_ms = {
            let mut state = inner.borrow_mut();
            if !state.running || state.generation != generation {
                return;
            }
            // Our own registration has already fired.
            state.registration = None;
            let raw = match state.last_frame_nanos {
                Some(previous) => {
                    frame_time_nanos.saturating_sub(previous) as f32 / NANOS_PER_MILLI as f32
                }
                None => NOMINAL_FRAME_MS,
            };
            state.last_frame_nanos = Some(frame_time_nanos);
            if raw > MAX_FRAME_DELTA_MS {
                log::debug!("frame delta {raw:.1}ms clamped to {MAX_FRAME_DELTA_MS}ms");
            }
            clamp_frame_delta(raw)
        };

        let keep_going = {
            let mut tick = tick.borrow_mut();
            (&mut **tick)(dt_ms)
        };

        let still_current = {
            let state = inner.borrow();
            state.running && state.generation == generation
        };
        if !still_current {
            return;
        }
        if keep_going {
            schedule_next_frame(timer_for_frame, clock_for_next, tick, generation);
        } else {
            inner.borrow_mut().running = false;
        }
    });

    strong.borrow_mut().registration = Some(registration);
}
