//! Impulse velocity estimate.
//!
//! Treats each pair of consecutive samples as an impulse that adds or removes
//! kinetic energy, then converts the accumulated energy back into a velocity.
//! Compared with a plain first-to-last difference this follows a late
//! change of direction while still smoothing single noisy samples.

/// Velocity in units/second of a series of `(time_ms, position)` samples
/// ordered oldest first.
///
/// Returns 0.0 with fewer than two distinct timestamps.
pub fn impulse_velocity<I>(samples: I) -> f32
where
    I: IntoIterator<Item = (f64, f32)>,
{
    let mut work = 0.0f32;
    let mut segments = 0usize;
    let mut previous: Option<(f64, f32)> = None;

    for (time_ms, position) in samples {
        if let Some((previous_time, previous_position)) = previous {
            let dt = (time_ms - previous_time) as f32;
            if dt > 0.0 {
                let v_curr = (position - previous_position) / dt;
                let v_prev = kinetic_energy_to_velocity(work);
                work += (v_curr - v_prev) * v_curr.abs();
                if segments == 0 {
                    work *= 0.5;
                }
                segments += 1;
            }
        }
        previous = Some((time_ms, position));
    }

    if segments == 0 {
        return 0.0;
    }

    let velocity = kinetic_energy_to_velocity(work) * 1000.0;
    if velocity.is_finite() {
        velocity
    } else {
        0.0
    }
}

/// Clamp to `[-max, max]`; NaN and a non-positive `max` give 0.0.
pub fn clamp_velocity(velocity: f32, max_velocity: f32) -> f32 {
    if !max_velocity.is_finite() || max_velocity <= 0.0 || velocity.is_nan() {
        return 0.0;
    }
    velocity.clamp(-max_velocity, max_velocity)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
