//! The animation state machine, free of timers and callbacks.
//!
//! `AnimationRun` advances an [`AnimationState`] by explicit time steps. The
//! [`InertialAnimator`](crate::InertialAnimator) drives it from a frame timer;
//! tests and benchmarks drive it directly.

use crate::physics::{apply_friction_decay, integrate_spring};
use crate::state::{AnimationConfig, AnimationMode, AnimationState, BOUNCE_RESTITUTION};
use crate::visuals::{drag_visuals, exit_visuals, Visuals};
use cardswipe_ui_graphics::{AxisBounds, Point, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    Idle,
    Running(AnimationMode),
    Stopped,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// `|x|` passed half the exit distance for the first time this run.
    pub threshold_crossed: bool,
    /// The run reached its terminal condition on this tick. Reported once.
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct AnimationRun {
    config: AnimationConfig,
    state: AnimationState,
    phase: AnimatorPhase,
    threshold_fired: bool,
    exit_sign: f32,
}

impl AnimationRun {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            state: AnimationState::NEUTRAL,
            phase: AnimatorPhase::Idle,
            threshold_fired: false,
            exit_sign: 1.0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Replace the configuration used by the next `start`. A running run is stopped.
    pub fn set_config(&mut self, config: AnimationConfig) {
        self.stop();
        self.config = config;
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, AnimatorPhase::Running(_))
    }

    /// The mode currently integrating, which may differ from the configured
    /// one after a snap handover.
    pub fn active_mode(&self) -> Option<AnimationMode> {
        match self.phase {
            AnimatorPhase::Running(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn start(&mut self, from: Point, velocity: Velocity) {
        self.state = AnimationState::at(from, velocity);
        self.state.set_visuals(self.visuals_for(from.x));
        self.threshold_fired = false;
        self.exit_sign = if velocity.x != 0.0 {
            velocity.x.signum()
        } else if from.x != 0.0 {
            from.x.signum()
        } else {
            1.0
        };
        self.phase = AnimatorPhase::Running(self.config.mode);
    }

    /// Halt without reporting completion. Returns whether a run was in flight.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        if was_running {
            self.phase = AnimatorPhase::Stopped;
        }
        was_running
    }

    pub fn tick(&mut self, dt_ms: f32) -> TickOutcome {
        let Some(mode) = self.active_mode() else {
            return TickOutcome::default();
        };

        let finished = match mode {
            AnimationMode::Inertia => self.inertia_step(dt_ms),
            AnimationMode::Spring => self.spring_step(dt_ms),
            AnimationMode::Snap => self.snap_step(dt_ms),
        };

        let threshold_crossed = self.check_threshold();
        if finished {
            self.phase = AnimatorPhase::Stopped;
        }
        TickOutcome {
            threshold_crossed,
            finished,
        }
    }

    fn check_threshold(&mut self) -> bool {
        let Some(exit_distance) = self.config.exit_distance else {
            return false;
        };
        if self.threshold_fired || self.state.x.abs() <= exit_distance * 0.5 {
            return false;
        }
        self.threshold_fired = true;
        true
    }

    fn visuals_for(&self, x: f32) -> Visuals {
        match self.config.exit_distance {
            Some(distance) if self.config.is_exit() => exit_visuals(x, distance),
            _ => drag_visuals(x),
        }
    }

    fn inertia_step(&mut self, dt_ms: f32) -> bool {
        let rate = self.config.deceleration_rate;
        let step_x = apply_friction_decay(self.state.x, self.state.velocity_x, dt_ms, rate);
        let step_y = apply_friction_decay(self.state.y, self.state.velocity_y, dt_ms, rate);
        self.state.x = step_x.position;
        self.state.velocity_x = step_x.velocity;
        self.state.y = step_y.position;
        self.state.velocity_y = step_y.velocity;

        if self.config.is_exit() {
            if self.state.velocity_x.abs() < self.config.min_exit_velocity {
                self.state.velocity_x = self.exit_sign * self.config.min_exit_velocity;
            }
            self.state.set_visuals(self.visuals_for(self.state.x));
            let exit_distance = self.config.exit_distance.unwrap_or_default();
            return self.state.x.abs() >= exit_distance;
        }

        if let Some(bounds) = self.config.bounds {
            bounce(&mut self.state.x, &mut self.state.velocity_x, bounds.x);
            bounce(&mut self.state.y, &mut self.state.velocity_y, bounds.y);
        }
        self.state.set_visuals(self.visuals_for(self.state.x));
        self.state.velocity_x == 0.0 && self.state.velocity_y == 0.0
    }

    fn spring_step(&mut self, dt_ms: f32) -> bool {
        let target = self.config.target_or_origin();
        let spring = self.config.spring;
        let step_x =
            integrate_spring(self.state.x, self.state.velocity_x, target.x, &spring, dt_ms);
        let step_y =
            integrate_spring(self.state.y, self.state.velocity_y, target.y, &spring, dt_ms);

        if step_x.at_rest && step_y.at_rest {
            self.state.x = target.x;
            self.state.y = target.y;
            self.state.velocity_x = 0.0;
            self.state.velocity_y = 0.0;
            if target == Point::ZERO {
                self.state.set_visuals(Visuals::NEUTRAL);
            } else {
                self.state.set_visuals(drag_visuals(target.x));
            }
            return true;
        }

        self.state.x = step_x.position;
        self.state.velocity_x = step_x.velocity;
        self.state.y = step_y.position;
        self.state.velocity_y = step_y.velocity;
        self.state.set_visuals(drag_visuals(self.state.x));
        false
    }

    fn snap_step(&mut self, dt_ms: f32) -> bool {
        let glided_to_rest = self.inertia_step(dt_ms);
        let target = self.config.target_or_origin();
        let close = self.state.position().distance_to(target) < self.config.snap_threshold;
        if close || glided_to_rest {
            log::trace!(
                "snap handover to spring at ({:.1}, {:.1})",
                self.state.x,
                self.state.y
            );
            // One-way for the rest of this run.
            self.phase = AnimatorPhase::Running(AnimationMode::Spring);
        }
        false
    }
}

fn bounce(position: &mut f32, velocity: &mut f32, bounds: AxisBounds) {
    let overflow = bounds.overflow(*position);
    if overflow == 0.0 {
        return;
    }
    *position = bounds.clamp(*position);
    if overflow.signum() == velocity.signum() {
        *velocity = -*velocity * BOUNCE_RESTITUTION;
    }
}

#[cfg(test)]
#[path = "tests/run_tests.rs"]
mod tests;
