pub mod helpers;

use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

pub use helpers::{angle_between, horizontal_distance, ray_vs_box};

// ============================================================================
// Occlusion Query
// ============================================================================

// Line-of-sight contract against static world geometry. `direction` is unit
// length; the result is the distance to the nearest blocking surface within
// `max_distance`, or `None` when nothing is in the way.
pub trait OcclusionQuery {
    fn nearest_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;
}

impl<T: OcclusionQuery + ?Sized> OcclusionQuery for &T {
    fn nearest_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        (**self).nearest_hit(origin, direction, max_distance)
    }
}

// ============================================================================
// Box Occluders
// ============================================================================

// Axis-aligned solid, described the way the scene places boxes: a center and a
// full size along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occluder {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl Occluder {
    #[must_use]
    pub const fn new(center: [f32; 3], size: [f32; 3]) -> Self {
        Self { center, size }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::from_array(self.size).abs() / 2.0
    }

    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let local = (point - self.center()).abs();
        let half = self.half_extents();
        local.x <= half.x && local.y <= half.y && local.z <= half.z
    }
}

impl OcclusionQuery for Occluder {
    fn nearest_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        ray_vs_box(origin, direction, max_distance, self.center(), self.half_extents())
    }
}

impl OcclusionQuery for [Occluder] {
    fn nearest_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        self.iter()
            .filter_map(|occluder| occluder.nearest_hit(origin, direction, max_distance))
            .min_by(f32::total_cmp)
    }
}

// Obstacle set for a scene. Boxes may be added or taken away between ticks,
// e.g. a door closing.
#[derive(Resource, Debug, Clone, Default)]
pub struct OccluderSet {
    occluders: Vec<Occluder>,
}

impl OccluderSet {
    #[must_use]
    pub const fn new(occluders: Vec<Occluder>) -> Self {
        Self { occluders }
    }

    pub fn push(&mut self, occluder: Occluder) {
        self.occluders.push(occluder);
    }

    pub fn remove(&mut self, index: usize) -> Option<Occluder> {
        (index < self.occluders.len()).then(|| self.occluders.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occluders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occluders.is_empty()
    }

    #[must_use]
    pub fn occluders(&self) -> &[Occluder] {
        &self.occluders
    }
}

impl OcclusionQuery for OccluderSet {
    fn nearest_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        self.occluders.as_slice().nearest_hit(origin, direction, max_distance)
    }
}

impl FromIterator<Occluder> for OccluderSet {
    fn from_iter<I: IntoIterator<Item = Occluder>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
