//! Animation vector and per-run configuration.

use crate::physics::{SpringParams, DEFAULT_DECELERATION_RATE};
use crate::visuals::Visuals;
use cardswipe_ui_graphics::{DragBounds, GraphicsLayer, Point, Velocity};

/// Distance to target (px) under which snap mode hands over to the spring.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 40.0;

/// Fraction of velocity kept, reversed, when an inertial run hits a bound.
pub const BOUNCE_RESTITUTION: f32 = 0.3;

/// Horizontal offset at which a committed swipe has left the screen.
pub const DEFAULT_EXIT_DISTANCE: f32 = 500.0;

/// Slowest exit speed (px/sec). Exit runs never decay below it.
pub const DEFAULT_MIN_EXIT_VELOCITY: f32 = 1_000.0;

/// The single mutable vector of one animation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl AnimationState {
    pub const NEUTRAL: AnimationState = AnimationState {
        x: 0.0,
        y: 0.0,
        velocity_x: 0.0,
        velocity_y: 0.0,
        rotation: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Fresh vector at `position` moving with `velocity`, neutral visuals.
    pub fn at(position: Point, velocity: Velocity) -> Self {
        Self {
            x: position.x,
            y: position.y,
            velocity_x: velocity.x,
            velocity_y: velocity.y,
            ..Self::NEUTRAL
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.velocity_x, self.velocity_y)
    }

    pub fn visuals(&self) -> Visuals {
        Visuals {
            rotation: self.rotation,
            scale: self.scale,
            opacity: self.opacity,
        }
    }

    pub fn set_visuals(&mut self, visuals: Visuals) {
        self.rotation = visuals.rotation;
        self.scale = visuals.scale;
        self.opacity = visuals.opacity;
    }

    pub fn has_neutral_visuals(&self) -> bool {
        self.visuals() == Visuals::NEUTRAL
    }

    pub fn to_layer(&self) -> GraphicsLayer {
        GraphicsLayer {
            translation_x: self.x,
            translation_y: self.y,
            rotation: self.rotation,
            scale: self.scale,
            alpha: self.opacity,
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    /// Friction glide.
    Inertia,
    /// Damped spring toward the target.
    Spring,
    /// Glide until close to the target, then spring for the rest of the run.
    Snap,
}

/// Configuration for one run. `mode` decides which fields matter; the rest
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub mode: AnimationMode,
    /// Spring and snap target. `None` means the origin.
    pub target: Option<Point>,
    pub spring: SpringParams,
    pub deceleration_rate: f32,
    /// Turns an inertia run into an exit run that ends at this `|x|`.
    pub exit_distance: Option<f32>,
    pub min_exit_velocity: f32,
    pub bounds: Option<DragBounds>,
    pub snap_threshold: f32,
}

impl AnimationConfig {
    pub fn inertia() -> Self {
        Self {
            mode: AnimationMode::Inertia,
            ..Self::default()
        }
    }

    pub fn spring_to(target: Point) -> Self {
        Self {
            mode: AnimationMode::Spring,
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn snap_to(target: Point) -> Self {
        Self {
            mode: AnimationMode::Snap,
            target: Some(target),
            ..Self::default()
        }
    }

    /// Inertia run that ends once `|x|` reaches `exit_distance`.
    pub fn exit(exit_distance: f32) -> Self {
        Self {
            mode: AnimationMode::Inertia,
            exit_distance: Some(exit_distance),
            ..Self::default()
        }
    }

    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_deceleration_rate(mut self, rate: f32) -> Self {
        self.deceleration_rate = rate;
        self
    }

    pub fn with_bounds(mut self, bounds: DragBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Floored at 1 px/s so an exit from rest always reaches its distance.
    pub fn with_min_exit_velocity(mut self, velocity: f32) -> Self {
        self.min_exit_velocity = velocity.max(1.0);
        self
    }

    pub fn with_snap_threshold(mut self, threshold: f32) -> Self {
        self.snap_threshold = threshold;
        self
    }

    pub fn target_or_origin(&self) -> Point {
        self.target.unwrap_or(Point::ZERO)
    }

    pub fn is_exit(&self) -> bool {
        self.mode == AnimationMode::Inertia && self.exit_distance.is_some()
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            mode: AnimationMode::Inertia,
            target: None,
            spring: SpringParams::default(),
            deceleration_rate: DEFAULT_DECELERATION_RATE,
            exit_distance: None,
            min_exit_velocity: DEFAULT_MIN_EXIT_VELOCITY,
            bounds: None,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}
