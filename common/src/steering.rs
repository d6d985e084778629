use bevy_math::Vec3;

// ============================================================================
// Steering Controller
// ============================================================================

// Tuning shared by patrol and chase locomotion; only the speed cap differs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    pub max_speed: f32,
    pub acceleration: f32,
    pub damping: f32,
}

/// Acceleration-limited, damped seek toward `target`.
///
/// The velocity is blended toward `direction * max_speed` by `acceleration * dt`
/// and then decays by `damping`. The blend factor saturates at 1 so an oversized
/// frame reaches the desired velocity but never overshoots it. A target equal to
/// the current position has no direction and only the decay applies.
#[must_use]
pub fn seek(position: Vec3, velocity: Vec3, target: Vec3, params: SteeringParams, dt: f32) -> Vec3 {
    let desired = (target - position).normalize_or_zero() * params.max_speed;
    let steering = desired - velocity;
    let blend = (params.acceleration * dt).clamp(0.0, 1.0);
    coast(steering.mul_add(Vec3::splat(blend), velocity), params.damping)
}

// Per-tick drag for ticks without steering input.
#[must_use]
pub fn coast(velocity: Vec3, damping: f32) -> Vec3 {
    velocity * damping
}

#[must_use]
pub fn integrate(position: Vec3, velocity: Vec3, dt: f32) -> Vec3 {
    velocity.mul_add(Vec3::splat(dt), position)
}
