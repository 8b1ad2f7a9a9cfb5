//! Infinite plane primitive.

use crate::error::{GeometryError, GeometryResult};
use crate::hittable::SurfaceHit;
use lumo_core::Material;
use lumo_math::{Aabb, Ray, Vec3};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a plane. The normal is normalized and must be non-zero.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> GeometryResult<Self> {
        if !normal.is_finite() || normal.length_squared() == 0.0 {
            return Err(GeometryError::InvalidNormal(normal));
        }

        Ok(Self {
            point,
            normal: normal.normalize(),
            material,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Planes are unbounded.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }

    /// `t = (point - origin)·n / (dir·n)`; parallel rays and non-positive `t` miss.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let dn = ray.direction().dot(self.normal);
        if dn == 0.0 {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / dn;
        if !(t > 0.0) {
            return None;
        }

        Some(SurfaceHit {
            t,
            normal: self.normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::Color;

    fn floor() -> Plane {
        Plane::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Material::matte(Color::ONE),
        )
        .unwrap()
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));
        let hit = floor().intersect(&ray).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-6);
        assert_eq!(floor().normal(), Vec3::Y);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_origin_on_plane_misses() {
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_hit_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        let hit = floor().intersect(&ray).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_normal_rejected() {
        let err = Plane::new(Vec3::ZERO, Vec3::ZERO, Material::default()).unwrap_err();
        assert_eq!(err, GeometryError::InvalidNormal(Vec3::ZERO));
    }

    #[test]
    fn test_unbounded() {
        assert!(!floor().bounding_box().is_finite());
    }
}
