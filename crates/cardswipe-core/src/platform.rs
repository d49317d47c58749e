//! Platform abstraction traits for runtime services.
//!
//! These traits let the host decide when frames happen and what time it is,
//! so the gesture engine can run under a windowing system, a browser, or a
//! deterministic test harness without depending directly on `std` time APIs.

use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Schedules work for the runtime.
///
/// Implementations are responsible for making the host produce another frame
/// after a frame callback has been registered.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timestamps for gesture samples.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_millis(&self) -> f64;

    /// Milliseconds elapsed since `since`, never negative.
    fn elapsed_millis(&self, since: f64) -> f64 {
        (self.now_millis() - since).max(0.0)
    }
}

/// Wall clock backed by `web_time::Instant`, which also works on wasm.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, millis: f64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let observer = clock.clone();
        clock.advance(16.0);
        clock.advance(4.0);
        assert_eq!(observer.now_millis(), 20.0);
        assert_eq!(observer.elapsed_millis(5.0), 15.0);
        assert_eq!(observer.elapsed_millis(50.0), 0.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(second >= first);
    }
}
