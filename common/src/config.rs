use anyhow::{Context, Result};
use bevy_math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::{
    agent::clamp_cone_half_angle,
    constants::*,
};

// ============================================================================
// Spotlight Configuration
// ============================================================================

/// Construction-time parameters for the pursuit engine.
///
/// Positions are given in the horizontal plane as `[x, z]`; the light always
/// sits at `mount_height`. An empty `patrol_points` list selects the default
/// five-point pattern around `start`. `max_step` caps the frame delta a single
/// tick will simulate. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    pub start: [f32; 2],
    pub mount_height: f32,
    pub cone_half_angle: f32,
    pub illumination_radius: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub acceleration: f32,
    pub damping: f32,
    pub normal_color: u32,
    pub alert_color: u32,
    pub patrol_points: Vec<[f32; 2]>,
    pub arrival_threshold: f32,
    pub alert_threshold: f32,
    pub capture_threshold: f32,
    pub escape_threshold: f32,
    pub occlusion_epsilon: f32,
    pub max_step: f32,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            start: [0.0, 0.0],
            mount_height: SPOTLIGHT_MOUNT_HEIGHT,
            cone_half_angle: SPOTLIGHT_CONE_HALF_ANGLE,
            illumination_radius: SPOTLIGHT_ILLUMINATION_RADIUS,
            patrol_speed: SPOTLIGHT_PATROL_SPEED,
            chase_speed: SPOTLIGHT_CHASE_SPEED,
            acceleration: SPOTLIGHT_ACCELERATION,
            damping: SPOTLIGHT_DAMPING,
            normal_color: SPOTLIGHT_NORMAL_COLOR,
            alert_color: SPOTLIGHT_ALERT_COLOR,
            patrol_points: Vec::new(),
            arrival_threshold: PATROL_ARRIVAL_THRESHOLD,
            alert_threshold: ALERT_THRESHOLD,
            capture_threshold: CAPTURE_THRESHOLD,
            escape_threshold: ESCAPE_THRESHOLD,
            occlusion_epsilon: OCCLUSION_EPSILON,
            max_step: SPOTLIGHT_MAX_STEP,
        }
    }
}

impl SpotlightConfig {
    // Read a JSON config file. Missing fields take their defaults; the result
    // is sanitized before it is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Invalid spotlight config")?;
        Ok(config.sanitized())
    }

    // Clamp every field into its documented range. Non-finite values fall back
    // to the default for that field.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();

        let mount_height = positive_or(self.mount_height, defaults.mount_height, "mount_height");
        let illumination_radius =
            positive_or(self.illumination_radius, defaults.illumination_radius, "illumination_radius");

        let cone_half_angle = if self.cone_half_angle.is_finite() {
            clamp_cone_half_angle(self.cone_half_angle)
        } else {
            defaults.cone_half_angle
        };
        if (cone_half_angle - self.cone_half_angle).abs() > f32::EPSILON {
            warn!("cone_half_angle {} clamped to {}", self.cone_half_angle, cone_half_angle);
        }

        let damping = if self.damping.is_finite() {
            self.damping.clamp(MIN_DAMPING, MAX_DAMPING)
        } else {
            defaults.damping
        };

        let start = if self.start.iter().all(|v| v.is_finite()) {
            self.start
        } else {
            warn!("non-finite start position replaced with {:?}", defaults.start);
            defaults.start
        };

        let patrol_points = self
            .patrol_points
            .into_iter()
            .filter(|point| point.iter().all(|v| v.is_finite()))
            .collect();

        Self {
            start,
            mount_height,
            cone_half_angle,
            illumination_radius,
            patrol_speed: non_negative_or(self.patrol_speed, defaults.patrol_speed),
            chase_speed: non_negative_or(self.chase_speed, defaults.chase_speed),
            acceleration: non_negative_or(self.acceleration, defaults.acceleration),
            damping,
            normal_color: self.normal_color & 0x00FF_FFFF,
            alert_color: self.alert_color & 0x00FF_FFFF,
            patrol_points,
            arrival_threshold: non_negative_or(self.arrival_threshold, defaults.arrival_threshold),
            alert_threshold: non_negative_or(self.alert_threshold, defaults.alert_threshold),
            capture_threshold: non_negative_or(self.capture_threshold, defaults.capture_threshold),
            escape_threshold: non_negative_or(self.escape_threshold, defaults.escape_threshold),
            occlusion_epsilon: non_negative_or(self.occlusion_epsilon, defaults.occlusion_epsilon),
            max_step: positive_or(self.max_step, defaults.max_step, "max_step"),
        }
    }

    #[must_use]
    pub const fn start_position(&self) -> Vec3 {
        Vec3::new(self.start[0], self.mount_height, self.start[1])
    }

    // Patrol waypoints lifted to mount height, or the default pattern when none
    // were configured.
    #[must_use]
    pub fn patrol_waypoints(&self) -> Vec<Vec3> {
        if self.patrol_points.is_empty() {
            default_patrol_pattern(self.start_position())
        } else {
            self.patrol_points
                .iter()
                .map(|[x, z]| Vec3::new(*x, self.mount_height, *z))
                .collect()
        }
    }
}

#[must_use]
pub fn default_patrol_pattern(start: Vec3) -> Vec<Vec3> {
    DEFAULT_PATROL_OFFSETS
        .iter()
        .map(|[dx, dz]| Vec3::new(start.x + dx, start.y, start.z + dz))
        .collect()
}

fn positive_or(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("{name} must be positive, got {value}; using {fallback}");
        fallback
    }
}

fn non_negative_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { fallback }
}
