use bevy_math::Vec3;

use crate::{
    config::SpotlightConfig,
    constants::{MAX_CONE_HALF_ANGLE, MIN_CONE_HALF_ANGLE},
    steering::{self, SteeringParams},
};

// ============================================================================
// Agent
// ============================================================================

// The pursuing light. Always mounted at `mount_height` and always looking
// straight down.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    pub cone_half_angle: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub acceleration: f32,
    pub damping: f32,
    illumination_radius: f32,
    mount_height: f32,
    // Tier-0 values that difficulty overrides scale from
    base_patrol_speed: f32,
    base_cone_half_angle: f32,
}

impl Agent {
    // Fixed downward facing
    pub const FACING: Vec3 = Vec3::NEG_Y;

    // Expects a sanitized config.
    #[must_use]
    pub fn new(config: &SpotlightConfig) -> Self {
        Self {
            position: config.start_position(),
            velocity: Vec3::ZERO,
            cone_half_angle: config.cone_half_angle,
            patrol_speed: config.patrol_speed,
            chase_speed: config.chase_speed,
            acceleration: config.acceleration,
            damping: config.damping,
            illumination_radius: config.illumination_radius,
            mount_height: config.mount_height,
            base_patrol_speed: config.patrol_speed,
            base_cone_half_angle: config.cone_half_angle,
        }
    }

    #[must_use]
    pub const fn facing(&self) -> Vec3 {
        Self::FACING
    }

    #[must_use]
    pub const fn illumination_radius(&self) -> f32 {
        self.illumination_radius
    }

    #[must_use]
    pub const fn mount_height(&self) -> f32 {
        self.mount_height
    }

    #[must_use]
    pub const fn base_patrol_speed(&self) -> f32 {
        self.base_patrol_speed
    }

    #[must_use]
    pub const fn base_cone_half_angle(&self) -> f32 {
        self.base_cone_half_angle
    }

    pub fn set_base_patrol_speed(&mut self, speed: f32) {
        self.base_patrol_speed = speed.max(0.0);
    }

    pub fn set_base_cone_half_angle(&mut self, angle: f32) {
        self.base_cone_half_angle = clamp_cone_half_angle(angle);
    }

    // Lift a point to the mounting plane.
    #[must_use]
    pub const fn mounted(&self, point: Vec3) -> Vec3 {
        Vec3::new(point.x, self.mount_height, point.z)
    }

    #[must_use]
    pub const fn patrol_params(&self) -> SteeringParams {
        SteeringParams {
            max_speed: self.patrol_speed,
            acceleration: self.acceleration,
            damping: self.damping,
        }
    }

    #[must_use]
    pub const fn chase_params(&self) -> SteeringParams {
        SteeringParams {
            max_speed: self.chase_speed,
            acceleration: self.acceleration,
            damping: self.damping,
        }
    }

    // Steer toward `target` and integrate the new velocity.
    pub fn steer_toward(&mut self, target: Vec3, params: SteeringParams, dt: f32) {
        self.velocity = steering::seek(self.position, self.velocity, target, params, dt);
        self.position = steering::integrate(self.position, self.velocity, dt);
    }

    // Decay and integrate without steering input.
    pub fn coast(&mut self, dt: f32) {
        self.velocity = steering::coast(self.velocity, self.damping);
        self.position = steering::integrate(self.position, self.velocity, dt);
    }

    // Radius of the lit disc on the ground plane.
    #[must_use]
    pub fn ground_radius(&self) -> f32 {
        self.cone_half_angle.tan() * self.mount_height
    }
}

#[must_use]
pub fn clamp_cone_half_angle(angle: f32) -> f32 {
    if angle.is_nan() {
        return MIN_CONE_HALF_ANGLE;
    }
    angle.clamp(MIN_CONE_HALF_ANGLE, MAX_CONE_HALF_ANGLE)
}
