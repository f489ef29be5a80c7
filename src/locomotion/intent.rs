use glam::{Vec2, Vec3};

/// Planar direction from `position` towards `destination`, as a unit intent.
///
/// The blend plane's `x` axis is world `x` and its `y` axis is world `z`
/// (forward). Coincident points give [`Vec2::ZERO`].
#[must_use]
pub fn planar_intent(position: Vec3, destination: Vec3) -> Vec2 {
    let delta = destination - position;
    Vec2::new(delta.x, delta.z).normalize_or_zero()
}

/// Normalizes a planar velocity by the character's top speed.
#[must_use]
pub fn intent_from_velocity(velocity: Vec2, max_speed: f32) -> Vec2 {
    if max_speed <= 0.0 {
        return Vec2::ZERO;
    }
    clamp_intent(velocity / max_speed, 1.0)
}

/// Restricts an intent to the disk of radius `max_length`.
///
/// Non-finite input collapses to zero.
#[must_use]
pub fn clamp_intent(intent: Vec2, max_length: f32) -> Vec2 {
    if !intent.is_finite() {
        log::trace!("non-finite intent {intent}, using zero");
        return Vec2::ZERO;
    }
    intent.clamp_length_max(max_length.max(0.0))
}
