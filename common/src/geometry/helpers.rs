use bevy_math::Vec3;

use crate::constants::PHYSICS_EPSILON;

// Compute the intersection interval of a ray with a slab (used in ray-AABB tests)
#[must_use]
pub fn ray_slab_interval(local_coord: f32, ray_dir: f32, half_extent: f32, t_min: f32, t_max: f32) -> Option<(f32, f32)> {
    if ray_dir.abs() > PHYSICS_EPSILON {
        let t1 = (-half_extent - local_coord) / ray_dir;
        let t2 = (half_extent - local_coord) / ray_dir;
        let new_min = t_min.max(t1.min(t2));
        let new_max = t_max.min(t1.max(t2));
        if new_min <= new_max {
            Some((new_min, new_max))
        } else {
            None
        }
    } else if local_coord.abs() > half_extent {
        None
    } else {
        Some((t_min, t_max))
    }
}

// Ray vs axis-aligned box. `direction` must be unit length so the returned entry
// parameter is a distance. Rays that start inside the box report no hit, the
// same way a front-face raycast passes out through a back face.
#[must_use]
pub fn ray_vs_box(origin: Vec3, direction: Vec3, max_distance: f32, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let local = origin - center;

    if local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y && local.z.abs() <= half_extents.z {
        return None;
    }

    let (t_min, t_max) = ray_slab_interval(local.x, direction.x, half_extents.x, 0.0, max_distance)?;
    let (t_min, t_max) = ray_slab_interval(local.y, direction.y, half_extents.y, t_min, t_max)?;
    let (t_min, _) = ray_slab_interval(local.z, direction.z, half_extents.z, t_min, t_max)?;

    Some(t_min)
}

// Angle in radians between two unit vectors. The dot product is clamped so
// floating-point overshoot never leaves the domain of acos.
#[must_use]
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

// Distance in the XZ plane, ignoring height.
#[must_use]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    dx.hypot(dz)
}
