use bevy_math::Vec3;
use tracing::debug;

use crate::{
    agent::Agent,
    config::default_patrol_pattern,
    constants::DEFAULT_PATROL_OFFSETS,
    geometry::horizontal_distance,
};

const _: () = assert!(!DEFAULT_PATROL_OFFSETS.is_empty());

// ============================================================================
// Patrol Route
// ============================================================================

// Ordered, cyclic, non-empty waypoint loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolRoute {
    points: Vec<Vec3>,
    index: usize,
    arrival_threshold: f32,
}

impl PatrolRoute {
    // Returns `None` for an empty list.
    #[must_use]
    pub fn new(points: Vec<Vec3>, arrival_threshold: f32) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            index: 0,
            arrival_threshold,
        })
    }

    // The default five-point loop around `start`.
    #[must_use]
    pub fn around(start: Vec3, arrival_threshold: f32) -> Self {
        Self {
            points: default_patrol_pattern(start),
            index: 0,
            arrival_threshold,
        }
    }

    #[must_use]
    pub fn current(&self) -> Vec3 {
        self.points[self.index]
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[must_use]
    pub const fn arrival_threshold(&self) -> f32 {
        self.arrival_threshold
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.points.len();
    }

    pub const fn rewind(&mut self) {
        self.index = 0;
    }

    // Replace the loop; an empty list is refused and the old route kept.
    pub fn set_points(&mut self, points: Vec<Vec3>) -> bool {
        if points.is_empty() {
            return false;
        }
        self.points = points;
        self.index = 0;
        true
    }

    // One patrol step: advance past a reached waypoint (coasting this tick),
    // otherwise steer toward it at patrol speed.
    pub fn tick(&mut self, agent: &mut Agent, dt: f32) {
        let target = agent.mounted(self.current());
        let distance = horizontal_distance(agent.position, target);

        if distance < self.arrival_threshold {
            self.advance();
            debug!("patrol waypoint reached, next index {}", self.index);
            agent.coast(dt);
        } else {
            let params = agent.patrol_params();
            agent.steer_toward(target, params, dt);
        }
    }
}
