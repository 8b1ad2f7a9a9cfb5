//! Closed set of renderable primitives.

use crate::hittable::{Hittable, RayHit, SurfaceHit};
use crate::{Plane, Sphere, Triangle};
use lumo_core::Material;
use lumo_math::{Aabb, Ray};

/// Any primitive a [`Scene`](crate::Scene) can hold.
///
/// Polygons are not a variant: they are flattened into their triangles when
/// added to a scene.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Shape {
    /// Intersection math for the underlying primitive.
    #[inline]
    pub fn surface_hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Plane(p) => p.intersect(ray),
            Shape::Triangle(t) => t.intersect(ray),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Shape::Sphere(s) => s.material(),
            Shape::Plane(p) => p.material(),
            Shape::Triangle(t) => t.material(),
        }
    }

    /// True for spheres that only visualize a light source.
    pub fn is_light_marker(&self) -> bool {
        matches!(self, Shape::Sphere(s) if s.is_light_marker())
    }

    /// False for shapes with infinite extent, which cannot be placed in an octree.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Shape::Plane(_))
    }
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>> {
        self.surface_hit(ray)
            .map(|surface| RayHit::new(ray, surface, self))
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Shape::Sphere(s) => s.bounding_box(),
            Shape::Plane(p) => p.bounding_box(),
            Shape::Triangle(t) => t.bounding_box(),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::{Color, PointLight};
    use lumo_math::Vec3;

    #[test]
    fn test_plane_normal_faces_ray() {
        let plane: Shape = Plane::new(Vec3::ZERO, Vec3::Y, Material::default())
            .unwrap()
            .into();

        // From above the normal is +Y
        let down = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.5));
        let hit = plane.intersect(&down).unwrap();
        assert!((hit.normal - Vec3::Y).length() < 1e-6);

        // From below it is flipped
        let up = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 1.0, 0.5));
        let hit = plane.intersect(&up).unwrap();
        assert!((hit.normal + Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_hit_record_fields() {
        let material = Material::new(Color::new(1.0, 0.0, 0.0), 0.5, 10.0).unwrap();
        let sphere: Shape = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, material)
            .unwrap()
            .into();

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let hit = sphere.intersect(&ray).unwrap();

        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
        assert_eq!(*hit.material, material);
        assert!(std::ptr::eq(hit.shape, &sphere));
    }

    #[test]
    fn test_inside_sphere_normal_faces_ray() {
        let sphere: Shape = Sphere::new(Vec3::ZERO, 1.0, Material::default())
            .unwrap()
            .into();
        let hit = sphere.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).unwrap();
        assert!((hit.normal + Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_light_marker_flag() {
        let marker: Shape = Sphere::light_marker(&PointLight::white(Vec3::ZERO, 1.0)).into();
        let plain: Shape = Sphere::new(Vec3::ZERO, 0.5, Material::default())
            .unwrap()
            .into();

        assert!(marker.is_light_marker());
        assert!(!plain.is_light_marker());
        assert!(marker.is_bounded());
    }
}
