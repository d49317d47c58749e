//! Animation system for swiped cards
//!
//! Physics primitives (friction decay and damped springs), a frame timer on
//! top of the runtime's frame clock, and the inertial animator that drives a
//! card after release.

pub mod animator;
pub mod factory;
pub mod frame_timer;
pub mod physics;
pub mod run;
pub mod state;
pub mod visuals;

pub use animator::InertialAnimator;
pub use factory::{
    create_exit_animator, create_snap_back_animator, exit_animation, snap_back_animation,
    AnimationLaunch, ExitParams, SwipeDirection,
};
pub use frame_timer::{clamp_frame_delta, FrameTimer, MAX_FRAME_DELTA_MS, NOMINAL_FRAME_MS};
pub use physics::{
    apply_friction_decay, calculate_spring_force, integrate_spring, FrictionStep, SpringForce,
    SpringParams, SpringStep,
};
pub use run::{AnimationRun, AnimatorPhase, TickOutcome};
pub use state::{AnimationConfig, AnimationMode, AnimationState};
pub use visuals::{drag_visuals, exit_visuals, Visuals};

pub mod prelude {
    pub use crate::animator::InertialAnimator;
    pub use crate::factory::{ExitParams, SwipeDirection};
    pub use crate::physics::SpringParams;
    pub use crate::state::{AnimationConfig, AnimationMode, AnimationState};
}
