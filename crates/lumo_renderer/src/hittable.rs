//! Hittable trait and RayHit for ray-object intersection.

use crate::Shape;
use lumo_core::Material;
use lumo_math::{Aabb, Ray, Vec3};

/// Raw result of a primitive's intersection math, before it is tied to
/// the shape and material that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the intersection (always > 0)
    pub t: f32,
    /// Geometric normal at the intersection, any orientation
    pub normal: Vec3,
}

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayHit<'a> {
    /// The ray that produced this hit
    pub ray: Ray,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// World-space distance from the ray origin
    pub distance: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// The shape that was struck
    pub shape: &'a Shape,
}

impl<'a> RayHit<'a> {
    /// Build a hit record for `shape` from its surface hit.
    ///
    /// The normal is normalized and flipped if needed so that it faces the
    /// incoming ray; shading always sees a front-facing surface.
    pub fn new(ray: &Ray, surface: SurfaceHit, shape: &'a Shape) -> Self {
        let normal = surface.normal.normalize();
        let normal = if ray.direction().dot(normal) > 0.0 {
            -normal
        } else {
            normal
        };

        Self {
            ray: *ray,
            t: surface.t,
            distance: surface.t * ray.direction().length(),
            point: ray.at(surface.t),
            normal,
            material: shape.material(),
            shape,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection at a strictly positive ray parameter, if any.
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>>;

    /// Get the axis-aligned bounding box of this object.
    ///
    /// Unbounded objects return a non-finite box.
    fn bounding_box(&self) -> Aabb;
}

/// True if a hit at `t` on primitive `index` should replace `best`.
///
/// Ties on `t` go to the lower primitive index, so every traversal order
/// picks the same winner.
#[inline]
pub(crate) fn is_closer(t: f32, index: usize, best: Option<(usize, f32)>) -> bool {
    match best {
        None => true,
        Some((best_index, best_t)) => t < best_t || (t == best_t && index < best_index),
    }
}
