//! Shared gesture thresholds.
//!
//! All distances are logical pixels and all velocities logical pixels per
//! second. The predictor defaults and the controller's commit rule read the
//! same values so a release cannot be classified one way and animated another.

/// Movement from the press position past which the pointer is considered
/// dragging rather than resting.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Displacement past which a release commits to a swipe.
pub const SWIPE_DISTANCE_THRESHOLD: f32 = 100.0;

/// Release speed past which a release commits to a swipe.
pub const SWIPE_VELOCITY_THRESHOLD: f32 = 500.0;

/// Farthest excursion from the press position a tap may reach.
pub const TAP_MAX_DISTANCE: f32 = 30.0;

/// Longest press that still counts as a tap.
pub const TAP_MAX_DURATION_MS: f64 = 250.0;

/// Maximum fling velocity.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Samples older than this, relative to the newest one, are dropped from the
/// velocity window.
pub const HORIZON_MS: f64 = 100.0;

/// If the pointer has not moved for this long before release, it has stopped.
pub const ASSUME_STOPPED_MS: f64 = 40.0;

/// Fraction of finger travel applied to the card while dragging.
pub const DEFAULT_DRAG_ELASTICITY: f32 = 0.9;
