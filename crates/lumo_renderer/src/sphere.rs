//! Sphere primitive for ray tracing.

use crate::error::{GeometryError, GeometryResult};
use crate::hittable::SurfaceHit;
use lumo_core::{Color, Material, PointLight};
use lumo_math::{Aabb, Ray, Vec3};

/// Radius of the sphere drawn at a light's position.
pub const LIGHT_MARKER_RADIUS: f32 = 0.5;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    bbox: Aabb,
    /// Marks a sphere that only visualizes a light source
    light_marker: bool,
}

impl Sphere {
    /// Create a new sphere. The center must be finite and the radius positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> GeometryResult<Self> {
        if !center.is_finite() {
            return Err(GeometryError::InvalidCenter(center));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Ok(Self {
            center,
            radius,
            material,
            bbox,
            light_marker: false,
        })
    }

    /// A white sphere drawn around a point light so the light shows up in
    /// the image. Shading draws it at full brightness and it never casts
    /// shadows.
    pub fn light_marker(light: &PointLight) -> Self {
        let rvec = Vec3::splat(LIGHT_MARKER_RADIUS);
        Self {
            center: light.location,
            radius: LIGHT_MARKER_RADIUS,
            material: light_marker_material(),
            bbox: Aabb::from_points(light.location - rvec, light.location + rvec),
            light_marker: true,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn is_light_marker(&self) -> bool {
        self.light_marker
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Solve |origin + t·dir - center|² = r² and keep the smaller positive root.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in front of the origin
        let mut root = (h - sqrtd) / a;
        if root <= 0.0 {
            root = (h + sqrtd) / a;
            if root <= 0.0 {
                return None;
            }
        }

        let p = ray.at(root);
        Some(SurfaceHit {
            t: root,
            normal: (p - self.center) / self.radius,
        })
    }
}

fn light_marker_material() -> Material {
    Material::new(Color::ONE, 1.0, 240.0).unwrap_or_else(|_| Material::matte(Color::ONE))
}
