//! Ray/box intersection used for hitscan shooting.
//!
//! The target scan returns the first hit in storage order, not the nearest
//! hit. Targets are spread far enough apart that a ray through two of them
//! is rare, and the shipped behavior keeps that tie-break.

use glam::Vec3;

use crate::enemy::Enemy;
use crate::target::Target;

/// A half-line from `origin` along `direction`.
///
/// The constructor normalizes `direction`, so hit distances are always in
/// world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parametric distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half` on each axis.
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Where a ray met a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Slab-method ray/AABB intersection.
///
/// Returns the entry point, or the exit point when the origin is already
/// inside the box. There is no range cap; any forward hit counts.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<RayHit> {
    let dir = ray.direction;
    // Near-zero components mean the ray is parallel to that slab; a huge
    // inverse keeps the min/max arithmetic honest without branching.
    let inv_dir = Vec3::new(
        if dir.x.abs() > 1e-6 { 1.0 / dir.x } else { f32::MAX },
        if dir.y.abs() > 1e-6 { 1.0 / dir.y } else { f32::MAX },
        if dir.z.abs() > 1e-6 { 1.0 / dir.z } else { f32::MAX },
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    let t = if tmin >= 0.0 { tmin } else { tmax };
    Some(RayHit {
        point: ray.at(t),
        distance: t,
    })
}

/// Scan the target field and return the first hit in storage order together
/// with its index.
pub fn first_target_hit(ray: &Ray, targets: &[Target]) -> Option<(usize, RayHit)> {
    for (index, target) in targets.iter().enumerate() {
        if let Some(hit) = ray_aabb(ray, &target.bounding_box()) {
            return Some((index, hit));
        }
    }
    None
}

/// Test the ray against the enemy's bounding box.
pub fn enemy_hit(ray: &Ray, enemy: &Enemy) -> Option<RayHit> {
    ray_aabb(ray, &enemy.bounding_box())
}
