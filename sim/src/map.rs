use bevy_math::Vec3;
use spotlight_common::{Occluder, OccluderSet};

use crate::constants::{FLOOR_SIZE, WALL_HEIGHT, WALL_THICKNESS};

// Box obstacles as (center, size)
const OBSTACLES: [([f32; 3], [f32; 3]); 5] = [
    ([5.0, 0.5, 0.0], [3.0, 1.0, 1.5]),
    ([-5.0, 0.5, 5.0], [2.0, 1.0, 2.0]),
    ([8.0, 0.5, -8.0], [2.5, 1.0, 1.0]),
    ([-8.0, 1.0, -5.0], [1.5, 2.0, 1.5]),
    ([0.0, 0.75, -10.0], [4.0, 1.5, 1.0]),
];

pub const ITEM_POSITIONS: [[f32; 3]; 3] = [[5.0, 1.0, 5.0], [-5.0, 1.0, -5.0], [8.0, 1.0, -8.0]];

// ============================================================================
// Fallback Map
// ============================================================================

// Four boundary walls around the floor plus the box obstacles.
#[must_use]
pub fn fallback_occluders() -> OccluderSet {
    let half = FLOOR_SIZE / 2.0;
    let wall_y = WALL_HEIGHT / 2.0;

    let walls = [
        // North and south
        Occluder::new([0.0, wall_y, -half], [FLOOR_SIZE, WALL_HEIGHT, WALL_THICKNESS]),
        Occluder::new([0.0, wall_y, half], [FLOOR_SIZE, WALL_HEIGHT, WALL_THICKNESS]),
        // West and east
        Occluder::new([-half, wall_y, 0.0], [WALL_THICKNESS, WALL_HEIGHT, FLOOR_SIZE]),
        Occluder::new([half, wall_y, 0.0], [WALL_THICKNESS, WALL_HEIGHT, FLOOR_SIZE]),
    ];

    let mut occluders: OccluderSet = walls.into_iter().collect();
    for (center, size) in OBSTACLES {
        occluders.push(Occluder::new(center, size));
    }
    occluders
}

#[must_use]
pub fn item_positions() -> Vec<Vec3> {
    ITEM_POSITIONS.iter().map(|p| Vec3::from_array(*p)).collect()
}

// Keep a walking position inside the boundary walls.
#[must_use]
pub fn clamp_to_floor(position: Vec3, margin: f32) -> Vec3 {
    let limit = FLOOR_SIZE / 2.0 - WALL_THICKNESS - margin;
    Vec3::new(position.x.clamp(-limit, limit), position.y, position.z.clamp(-limit, limit))
}
