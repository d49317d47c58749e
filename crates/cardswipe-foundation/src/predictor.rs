//! Gesture prediction: velocity and intent for one pointer gesture.
//!
//! The predictor keeps the origin of the gesture and a short window of recent
//! samples. Deltas are measured from the origin; velocity comes from the
//! impulse estimate over the whole window so one jittery sample does not
//! decide the outcome of a release.

use crate::gesture_constants::{
    ASSUME_STOPPED_MS, HORIZON_MS, MAX_FLING_VELOCITY, SWIPE_DISTANCE_THRESHOLD,
    SWIPE_VELOCITY_THRESHOLD, TAP_MAX_DISTANCE, TAP_MAX_DURATION_MS,
};
use crate::velocity::{clamp_velocity, impulse_velocity};
use cardswipe_core::{Clock, SystemClock};
use cardswipe_ui_graphics::{Point, Velocity};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
}

impl GestureSample {
    pub fn new(x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureIntent {
    Tap,
    Swipe,
    /// Also the provisional intent of every mid-gesture state.
    #[default]
    Cancel,
}

impl fmt::Display for GestureIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureIntent::Tap => "tap",
            GestureIntent::Swipe => "swipe",
            GestureIntent::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// Derived state of the gesture. Velocities are px/sec.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureState {
    pub delta_x: f32,
    pub delta_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub intent: GestureIntent,
}

impl GestureState {
    pub fn delta(&self) -> Point {
        Point::new(self.delta_x, self.delta_y)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.velocity_x, self.velocity_y)
    }

    pub fn distance(&self) -> f32 {
        self.delta().length()
    }

    pub fn speed(&self) -> f32 {
        self.velocity().speed()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictorThresholds {
    pub swipe_distance: f32,
    pub swipe_velocity: f32,
    pub tap_max_distance: f32,
    pub tap_max_duration_ms: f64,
}

impl PredictorThresholds {
    pub fn with_swipe_distance(mut self, distance: f32) -> Self {
        self.swipe_distance = distance;
        self
    }

    pub fn with_swipe_velocity(mut self, velocity: f32) -> Self {
        self.swipe_velocity = velocity;
        self
    }

    pub fn with_tap_max_distance(mut self, distance: f32) -> Self {
        self.tap_max_distance = distance;
        self
    }

    pub fn with_tap_max_duration_ms(mut self, duration_ms: f64) -> Self {
        self.tap_max_duration_ms = duration_ms;
        self
    }

    /// Tap is checked first, then swipe by path length or speed.
    ///
    /// `path_length` is the distance travelled along the pointer path, so a
    /// drag that comes back toward its origin still counts every pixel.
    pub fn classify(&self, path_length: f32, speed: f32, elapsed_ms: f64) -> GestureIntent {
        if path_length < self.tap_max_distance && elapsed_ms < self.tap_max_duration_ms {
            GestureIntent::Tap
        } else if path_length > self.swipe_distance || speed > self.swipe_velocity {
            GestureIntent::Swipe
        } else {
            GestureIntent::Cancel
        }
    }
}

impl Default for PredictorThresholds {
    fn default() -> Self {
        Self {
            swipe_distance: SWIPE_DISTANCE_THRESHOLD,
            swipe_velocity: SWIPE_VELOCITY_THRESHOLD,
            tap_max_distance: TAP_MAX_DISTANCE,
            tap_max_duration_ms: TAP_MAX_DURATION_MS,
        }
    }
}

pub struct GesturePredictor {
    clock: Rc<dyn Clock>,
    thresholds: PredictorThresholds,
    origin: Option<GestureSample>,
    samples: VecDeque<GestureSample>,
    latest: Option<GestureSample>,
    path_length: f32,
}

impl GesturePredictor {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            thresholds: PredictorThresholds::default(),
            origin: None,
            samples: VecDeque::new(),
            latest: None,
            path_length: 0.0,
        }
    }

    pub fn with_thresholds(mut self, thresholds: PredictorThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> PredictorThresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: PredictorThresholds) {
        self.thresholds = thresholds;
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn origin(&self) -> Option<GestureSample> {
        self.origin
    }

    /// Most recent sample of the active gesture, including the origin.
    pub fn latest(&self) -> Option<GestureSample> {
        self.latest
    }

    /// Distance travelled along the pointer path of the active gesture.
    pub fn path_length(&self) -> f32 {
        self.path_length
    }

    /// Samples currently inside the velocity window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &GestureSample> + '_ {
        self.samples.iter()
    }

    pub fn start(&mut self, x: f32, y: f32) {
        self.start_at(x, y, self.clock.now_millis());
    }

    /// Reset history and record the origin of a new gesture.
    pub fn start_at(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        let origin = GestureSample::new(x, y, timestamp_ms);
        self.origin = Some(origin);
        self.samples.clear();
        self.samples.push_back(origin);
        self.latest = Some(origin);
        self.path_length = 0.0;
        log::trace!("gesture started at ({x:.1}, {y:.1})");
    }

    pub fn update(&mut self, x: f32, y: f32) -> GestureState {
        self.update_at(x, y, self.clock.now_millis())
    }

    /// Append a sample and return the provisional state. Without an active
    /// gesture the sample becomes the origin.
    pub fn update_at(&mut self, x: f32, y: f32, timestamp_ms: f64) -> GestureState {
        let Some(origin) = self.origin else {
            log::trace!("update without an active gesture, starting one");
            self.start_at(x, y, timestamp_ms);
            return GestureState::default();
        };

        let sample = GestureSample::new(x, y, timestamp_ms);
        let previous = self.latest.unwrap_or(origin);
        self.path_length += sample.position().distance_to(previous.position());
        self.samples.push_back(sample);
        self.latest = Some(sample);
        self.trim(timestamp_ms);

        let velocity = self.window_velocity();
        GestureState {
            delta_x: x - origin.x,
            delta_y: y - origin.y,
            velocity_x: velocity.x,
            velocity_y: velocity.y,
            intent: GestureIntent::Cancel,
        }
    }

    pub fn end(&mut self) -> Option<GestureState> {
        self.end_at(self.clock.now_millis())
    }

    /// Classify the gesture released at `timestamp_ms` and clear history.
    /// `None` when no gesture is active.
    pub fn end_at(&mut self, timestamp_ms: f64) -> Option<GestureState> {
        let origin = self.origin.take()?;
        self.trim(timestamp_ms);

        // The window may be empty after a long pause; the latest sample is not.
        let newest = self.latest.take().unwrap_or(origin);
        let velocity = if timestamp_ms - newest.timestamp_ms > ASSUME_STOPPED_MS {
            Velocity::ZERO
        } else {
            self.window_velocity()
        };

        let delta = newest.position() - origin.position();
        let elapsed_ms = (timestamp_ms - origin.timestamp_ms).max(0.0);
        let intent = self
            .thresholds
            .classify(self.path_length, velocity.speed(), elapsed_ms);

        self.samples.clear();
        self.path_length = 0.0;

        let state = GestureState {
            delta_x: delta.x,
            delta_y: delta.y,
            velocity_x: velocity.x,
            velocity_y: velocity.y,
            intent,
        };
        log::debug!(
            "gesture ended as {intent}: delta ({:.1}, {:.1}) velocity ({:.0}, {:.0})",
            state.delta_x,
            state.delta_y,
            state.velocity_x,
            state.velocity_y
        );
        Some(state)
    }

    /// Drop the gesture without classifying it.
    pub fn cancel(&mut self) {
        if self.origin.take().is_some() {
            log::trace!("gesture cancelled");
        }
        self.latest = None;
        self.samples.clear();
        self.path_length = 0.0;
    }

    fn trim(&mut self, now_ms: f64) {
        while let Some(oldest) = self.samples.front() {
            if now_ms - oldest.timestamp_ms > HORIZON_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    fn window_velocity(&self) -> Velocity {
        let vx = impulse_velocity(self.samples.iter().map(|s| (s.timestamp_ms, s.x)));
        let vy = impulse_velocity(self.samples.iter().map(|s| (s.timestamp_ms, s.y)));
        Velocity::new(
            clamp_velocity(vx, MAX_FLING_VELOCITY),
            clamp_velocity(vy, MAX_FLING_VELOCITY),
        )
    }
}

impl Default for GesturePredictor {
    fn default() -> Self {
        Self::new(Rc::new(SystemClock::new()))
    }
}

#[cfg(test)]
#[path = "tests/predictor_tests.rs"]
mod tests;
