//! Prepared runs for the two ways a released card can leave the user's hand.

use crate::animator::InertialAnimator;
use crate::physics::{SpringParams, DEFAULT_DECELERATION_RATE};
use crate::state::{AnimationConfig, DEFAULT_EXIT_DISTANCE, DEFAULT_MIN_EXIT_VELOCITY};
use cardswipe_core::FrameClock;
use cardswipe_ui_graphics::{Point, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    /// `None` for zero and NaN.
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(SwipeDirection::Right)
        } else if value < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitParams {
    pub exit_distance: f32,
    pub min_exit_velocity: f32,
    pub deceleration_rate: f32,
}

impl ExitParams {
    pub fn with_exit_distance(mut self, distance: f32) -> Self {
        self.exit_distance = distance;
        self
    }

    /// Kept strictly positive so an exit always knows which way to go.
    pub fn with_min_exit_velocity(mut self, velocity: f32) -> Self {
        self.min_exit_velocity = velocity.max(1.0);
        self
    }

    pub fn with_deceleration_rate(mut self, rate: f32) -> Self {
        self.deceleration_rate = rate;
        self
    }
}

impl Default for ExitParams {
    fn default() -> Self {
        Self {
            exit_distance: DEFAULT_EXIT_DISTANCE,
            min_exit_velocity: DEFAULT_MIN_EXIT_VELOCITY,
            deceleration_rate: DEFAULT_DECELERATION_RATE,
        }
    }
}

/// A configuration together with the vector it starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationLaunch {
    pub config: AnimationConfig,
    pub from: Point,
    pub velocity: Velocity,
}

/// Inertia exit toward `direction`. The horizontal velocity is pointed at the
/// direction and raised to at least `min_exit_velocity`; vertical velocity is
/// kept and decays normally.
pub fn exit_animation(
    from: Point,
    velocity: Velocity,
    direction: SwipeDirection,
    params: &ExitParams,
) -> AnimationLaunch {
    let speed = velocity.x.abs().max(params.min_exit_velocity);
    let config = AnimationConfig::exit(params.exit_distance)
        .with_min_exit_velocity(params.min_exit_velocity)
        .with_deceleration_rate(params.deceleration_rate);
    AnimationLaunch {
        config,
        from,
        velocity: Velocity::new(direction.sign() * speed, velocity.y),
    }
}

/// Spring back to the origin.
pub fn snap_back_animation(
    from: Point,
    velocity: Velocity,
    spring: SpringParams,
) -> AnimationLaunch {
    AnimationLaunch {
        config: AnimationConfig::spring_to(Point::ZERO).with_spring(spring),
        from,
        velocity,
    }
}

pub fn create_exit_animator(
    clock: FrameClock,
    from: Point,
    velocity: Velocity,
    direction: SwipeDirection,
    params: &ExitParams,
) -> InertialAnimator {
    let launch = exit_animation(from, velocity, direction, params);
    let animator = InertialAnimator::new(clock, launch.config);
    animator.start(launch.from, launch.velocity);
    animator
}

/// Snap-back with [`SpringParams::SNAP_BACK`].
pub fn create_snap_back_animator(
    clock: FrameClock,
    from: Point,
    velocity: Velocity,
) -> InertialAnimator {
    let launch = snap_back_animation(from, velocity, SpringParams::SNAP_BACK);
    let animator = InertialAnimator::new(clock, launch.config);
    animator.start(launch.from, launch.velocity);
    animator
}
