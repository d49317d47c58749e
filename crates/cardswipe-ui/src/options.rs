//! Controller configuration and callbacks.

use cardswipe_animation::physics::DEFAULT_DECELERATION_RATE;
use cardswipe_animation::state::{DEFAULT_EXIT_DISTANCE, DEFAULT_MIN_EXIT_VELOCITY};
use cardswipe_animation::{AnimationState, ExitParams, SpringParams, SwipeDirection};
use cardswipe_foundation::gesture_constants::{
    DEFAULT_DRAG_ELASTICITY, SWIPE_DISTANCE_THRESHOLD, SWIPE_VELOCITY_THRESHOLD,
};
use cardswipe_foundation::{GestureIntent, PredictorThresholds};
use cardswipe_ui_graphics::{DragBounds, Point};
use std::fmt;
use std::rc::Rc;

/// Axes the card follows while dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SwipeAxis {
    #[default]
    X,
    Y,
    Both,
}

impl SwipeAxis {
    /// Pin the locked axis of `position` to `origin`.
    pub fn constrain(self, position: Point, origin: Point) -> Point {
        match self {
            SwipeAxis::X => Point::new(position.x, origin.y),
            SwipeAxis::Y => Point::new(origin.x, position.y),
            SwipeAxis::Both => position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeOptions {
    pub axis: SwipeAxis,
    pub swipe_distance_threshold: f32,
    pub swipe_velocity_threshold: f32,
    /// Fraction of finger travel applied to the card.
    pub drag_elasticity: f32,
    /// Drag limits; the card resists movement past them.
    pub bounds: Option<DragBounds>,
    pub spring: SpringParams,
    pub deceleration_rate: f32,
    pub exit_distance: f32,
    pub min_exit_velocity: f32,
    pub disabled: bool,
}

impl SwipeOptions {
    pub fn with_axis(mut self, axis: SwipeAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_swipe_distance_threshold(mut self, distance: f32) -> Self {
        self.swipe_distance_threshold = distance;
        self
    }

    pub fn with_swipe_velocity_threshold(mut self, velocity: f32) -> Self {
        self.swipe_velocity_threshold = velocity;
        self
    }

    pub fn with_drag_elasticity(mut self, elasticity: f32) -> Self {
        self.drag_elasticity = elasticity;
        self
    }

    pub fn with_bounds(mut self, bounds: DragBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_deceleration_rate(mut self, rate: f32) -> Self {
        self.deceleration_rate = rate;
        self
    }

    pub fn with_exit_distance(mut self, distance: f32) -> Self {
        self.exit_distance = distance;
        self
    }

    pub fn with_min_exit_velocity(mut self, velocity: f32) -> Self {
        self.min_exit_velocity = velocity;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn predictor_thresholds(&self) -> PredictorThresholds {
        PredictorThresholds::default()
            .with_swipe_distance(self.swipe_distance_threshold)
            .with_swipe_velocity(self.swipe_velocity_threshold)
    }

    pub fn exit_params(&self) -> ExitParams {
        ExitParams::default()
            .with_exit_distance(self.exit_distance)
            .with_min_exit_velocity(self.min_exit_velocity)
            .with_deceleration_rate(self.deceleration_rate)
    }

    /// Horizontal commit rule: velocity first, then displacement.
    pub fn swipe_direction(&self, delta_x: f32, velocity_x: f32) -> Option<SwipeDirection> {
        if velocity_x.abs() > self.swipe_velocity_threshold {
            SwipeDirection::from_sign(velocity_x)
        } else if delta_x.abs() > self.swipe_distance_threshold {
            SwipeDirection::from_sign(delta_x)
        } else {
            None
        }
    }
}

impl Default for SwipeOptions {
    fn default() -> Self {
        Self {
            axis: SwipeAxis::X,
            swipe_distance_threshold: SWIPE_DISTANCE_THRESHOLD,
            swipe_velocity_threshold: SWIPE_VELOCITY_THRESHOLD,
            drag_elasticity: DEFAULT_DRAG_ELASTICITY,
            bounds: None,
            spring: SpringParams::SNAP_BACK,
            deceleration_rate: DEFAULT_DECELERATION_RATE,
            exit_distance: DEFAULT_EXIT_DISTANCE,
            min_exit_velocity: DEFAULT_MIN_EXIT_VELOCITY,
            disabled: false,
        }
    }
}

type Callback = Rc<dyn Fn()>;

/// Listener set read by the controller each time it fires one.
#[derive(Clone, Default)]
pub struct SwipeCallbacks {
    pub(crate) on_drag_start: Option<Callback>,
    pub(crate) on_drag_end: Option<Rc<dyn Fn(GestureIntent)>>,
    pub(crate) on_tap: Option<Callback>,
    pub(crate) on_swipe_left: Option<Callback>,
    pub(crate) on_swipe_right: Option<Callback>,
    pub(crate) on_animation_frame: Option<Rc<dyn Fn(&AnimationState)>>,
    pub(crate) on_animation_complete: Option<Callback>,
    pub(crate) on_swipe_committed: Option<Rc<dyn Fn(SwipeDirection)>>,
}

impl SwipeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_drag_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_drag_start = Some(Rc::new(f));
        self
    }

    pub fn on_drag_end(mut self, f: impl Fn(GestureIntent) + 'static) -> Self {
        self.on_drag_end = Some(Rc::new(f));
        self
    }

    pub fn on_tap(mut self, f: impl Fn() + 'static) -> Self {
        self.on_tap = Some(Rc::new(f));
        self
    }

    pub fn on_swipe_left(mut self, f: impl Fn() + 'static) -> Self {
        self.on_swipe_left = Some(Rc::new(f));
        self
    }

    pub fn on_swipe_right(mut self, f: impl Fn() + 'static) -> Self {
        self.on_swipe_right = Some(Rc::new(f));
        self
    }

    pub fn on_animation_frame(mut self, f: impl Fn(&AnimationState) + 'static) -> Self {
        self.on_animation_frame = Some(Rc::new(f));
        self
    }

    pub fn on_animation_complete(mut self, f: impl Fn() + 'static) -> Self {
        self.on_animation_complete = Some(Rc::new(f));
        self
    }

    /// Fires once per exit when the card passes half the exit distance.
    pub fn on_swipe_committed(mut self, f: impl Fn(SwipeDirection) + 'static) -> Self {
        self.on_swipe_committed = Some(Rc::new(f));
        self
    }

    pub(crate) fn on_swipe(&self, direction: SwipeDirection) -> Option<Callback> {
        match direction {
            SwipeDirection::Left => self.on_swipe_left.clone(),
            SwipeDirection::Right => self.on_swipe_right.clone(),
        }
    }
}

impl fmt::Debug for SwipeCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeCallbacks")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("on_tap", &self.on_tap.is_some())
            .field("on_swipe_left", &self.on_swipe_left.is_some())
            .field("on_swipe_right", &self.on_swipe_right.is_some())
            .field("on_animation_frame", &self.on_animation_frame.is_some())
            .field("on_animation_complete", &self.on_animation_complete.is_some())
            .field("on_swipe_committed", &self.on_swipe_committed.is_some())
            .finish()
    }
}
