//! Secondary visual properties derived from horizontal offset.

/// Rotation per pixel of horizontal offset while dragging or springing.
pub const DRAG_ROTATION_PER_PX: f32 = 0.06;
/// Rotation cap while the card is held or returning.
pub const MAX_DRAG_ROTATION: f32 = 15.0;
pub const DRAG_SHRINK_PER_PX: f32 = 0.0001;
pub const MIN_DRAG_SCALE: f32 = 0.95;
pub const DRAG_FADE_PER_PX: f32 = 0.0005;
pub const MIN_DRAG_OPACITY: f32 = 0.7;

/// Rotation reached at the exit distance.
pub const MAX_EXIT_ROTATION: f32 = 30.0;
/// Scale lost by the time the card reaches the exit distance.
pub const EXIT_SHRINK: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visuals {
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Visuals {
    pub const NEUTRAL: Visuals = Visuals {
        rotation: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };
}

impl Default for Visuals {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Gentle linear coupling used while the card is held or springing back.
pub fn drag_visuals(x: f32) -> Visuals {
    let distance = x.abs();
    Visuals {
        rotation: (x * DRAG_ROTATION_PER_PX).clamp(-MAX_DRAG_ROTATION, MAX_DRAG_ROTATION),
        scale: (1.0 - distance * DRAG_SHRINK_PER_PX).max(MIN_DRAG_SCALE),
        opacity: (1.0 - distance * DRAG_FADE_PER_PX).max(MIN_DRAG_OPACITY),
    }
}

/// Steeper curve normalized by the exit distance: the card turns, shrinks and
/// fades out as it leaves.
pub fn exit_visuals(x: f32, exit_distance: f32) -> Visuals {
    if exit_distance <= 0.0 {
        return Visuals {
            rotation: MAX_EXIT_ROTATION.copysign(x),
            scale: 1.0 - EXIT_SHRINK,
            opacity: 0.0,
        };
    }
    let progress = (x.abs() / exit_distance).clamp(0.0, 1.0);
    let eased = progress * progress;
    Visuals {
        rotation: MAX_EXIT_ROTATION * progress * x.signum(),
        scale: 1.0 - EXIT_SHRINK * eased,
        opacity: 1.0 - eased,
    }
}
