//! Numeric integrators for released cards.
//!
//! Positions are in logical pixels, velocities in px/sec and time steps in
//! milliseconds. Every integrator reports when it has come to rest so the
//! animator always has a terminal condition.

/// Per-millisecond velocity retention used for inertial glides.
///
/// 0.998 matches the feel of native inertial scrolling.
pub const DEFAULT_DECELERATION_RATE: f32 = 0.998;

/// Slowest supported deceleration rate (strongest friction).
pub const MIN_DECELERATION_RATE: f32 = 0.9;

/// Fastest supported deceleration rate (longest glide).
pub const MAX_DECELERATION_RATE: f32 = 0.9995;

/// Below this speed (px/sec) an inertial glide is considered stopped.
pub const STOP_VELOCITY_EPSILON: f32 = 10.0;

/// Spring position error (px) treated as zero.
pub const REST_DISPLACEMENT_EPSILON: f32 = 0.5;

/// Spring speed (px/sec) treated as zero.
pub const REST_VELOCITY_EPSILON: f32 = 10.0;

/// Longest single integration step for springs, in milliseconds.
pub const SPRING_SUBSTEP_MS: f32 = 4.0;

const MIN_MASS: f32 = 1.0e-3;

/// Result of one friction step on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionStep {
    pub position: f32,
    /// Zero once `stopped` is set.
    pub velocity: f32,
    pub stopped: bool,
}

/// Advance one axis of an inertial glide by `dt_ms`.
///
/// The rate is clamped into the supported range so a bad configuration cannot
/// produce a glide that never ends.
pub fn apply_friction_decay(
    position: f32,
    velocity: f32,
    dt_ms: f32,
    deceleration_rate: f32,
) -> FrictionStep {
    let rate = deceleration_rate.clamp(MIN_DECELERATION_RATE, MAX_DECELERATION_RATE);
    let dt_ms = dt_ms.max(0.0);
    let next_velocity = velocity * rate.powf(dt_ms);
    // Trapezoid: average of entry and exit velocity over the step.
    let next_position = position + (velocity + next_velocity) * 0.5 * dt_ms / 1000.0;
    let stopped = next_velocity.abs() < STOP_VELOCITY_EPSILON;

    FrictionStep {
        position: next_position,
        velocity: if stopped { 0.0 } else { next_velocity },
        stopped,
    }
}

/// Damped harmonic oscillator constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringParams {
    /// Crisp, slightly underdamped return to the origin.
    pub const SNAP_BACK: SpringParams = SpringParams {
        stiffness: 300.0,
        damping: 25.0,
        mass: 1.0,
    };

    /// Visible overshoot before settling.
    pub const BOUNCY: SpringParams = SpringParams {
        stiffness: 200.0,
        damping: 10.0,
        mass: 1.0,
    };

    /// Fast and critically damped.
    pub const STIFF: SpringParams = SpringParams {
        stiffness: 600.0,
        damping: 49.0,
        mass: 1.0,
    };

    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = sluggish.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass.max(MIN_MASS)).sqrt())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::SNAP_BACK
    }
}

/// Spring force on one axis and whether that axis has settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringForce {
    pub force: f32,
    pub is_at_rest: bool,
}

pub fn calculate_spring_force(
    current: f32,
    target: f32,
    velocity: f32,
    params: &SpringParams,
) -> SpringForce {
    let displacement = current - target;
    let force = -params.stiffness * displacement - params.damping * velocity;
    let is_at_rest = displacement.abs() < REST_DISPLACEMENT_EPSILON
        && velocity.abs() < REST_VELOCITY_EPSILON;
    SpringForce { force, is_at_rest }
}

/// Result of integrating one spring axis over a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringStep {
    pub position: f32,
    pub velocity: f32,
    pub at_rest: bool,
}

/// Integrate one spring axis over `dt_ms` with semi-implicit Euler substeps.
pub fn integrate_spring(
    position: f32,
    velocity: f32,
    target: f32,
    params: &SpringParams,
    dt_ms: f32,
) -> SpringStep {
    let mass = params.mass.max(MIN_MASS);
    let mut position = position;
    let mut velocity = velocity;
    let mut remaining = dt_ms.max(0.0);

    while remaining > 0.0 {
        let step_ms = remaining.min(SPRING_SUBSTEP_MS);
        let step = step_ms / 1000.0;
        let SpringForce { force, is_at_rest } =
            calculate_spring_force(position, target, velocity, params);
        if is_at_rest {
            break;
        }
        velocity += force / mass * step;
        position += velocity * step;
        remaining -= step_ms;
    }

    SpringStep {
        position,
        velocity,
        at_rest: calculate_spring_force(position, target, velocity, params).is_at_rest,
    }
}

#[cfg(test)]
#[path = "tests/physics_tests.rs"]
mod tests;
