//! Phong illumination with hard shadows.
//!
//! Color at a hit is `ambient * material`, plus a diffuse and a specular
//! term for every point light that reaches the point. Results are clamped to
//! [0, 1] per channel.

use crate::hittable::RayHit;
use crate::renderer::TraceStats;
use crate::scene::SceneIndex;
use lumo_core::{Camera, Color, PointLight, RenderConfig};
use lumo_math::{reflect, Ray, Vec3};

/// Scale applied to every diffuse contribution.
pub const DIFFUSE_COEFFICIENT: f32 = 0.5;

/// Scale applied to every specular contribution.
pub const SPECULAR_COEFFICIENT: f32 = 0.75;

/// Color of light marker spheres, drawn without any lighting.
pub const LIGHT_MARKER_COLOR: Color = Color::ONE;

/// Shades ray hits against one indexed scene, seen from one camera.
#[derive(Debug, Clone, Copy)]
pub struct PhongShader<'a> {
    index: &'a SceneIndex<'a>,
    camera: &'a Camera,
    shadows_enabled: bool,
    shadow_bias: f32,
    background: Color,
}

impl<'a> PhongShader<'a> {
    pub fn new(index: &'a SceneIndex<'a>, camera: &'a Camera, config: &RenderConfig) -> Self {
        Self {
            index,
            camera,
            shadows_enabled: config.shadows_enabled,
            shadow_bias: config.shadow_bias,
            background: config.background,
        }
    }

    /// Trace a primary ray and shade whatever it hits first.
    pub fn trace(&self, ray: &Ray, stats: &mut TraceStats) -> Color {
        stats.primary_rays += 1;
        match self.index.nearest_hit(ray) {
            Some(hit) => self.shade(&hit, stats),
            None => self.background,
        }
    }

    /// Phong color at `hit`.
    pub fn shade(&self, hit: &RayHit<'_>, stats: &mut TraceStats) -> Color {
        if hit.shape.is_light_marker() {
            return LIGHT_MARKER_COLOR;
        }

        let scene = self.index.scene();
        let material = hit.material;
        let mut color = scene.ambient() * material.color();

        for light in scene.lights() {
            if self.shadows_enabled && self.in_shadow(light, hit.point, stats) {
                continue;
            }

            let diffuse = diffuse(light.location, hit.point, hit.normal);
            let specular = specular(
                light.location,
                self.camera.eye(),
                hit.point,
                hit.normal,
                material.hardness(),
            );

            color += light.color * material.color() * diffuse * DIFFUSE_COEFFICIENT;
            color += light.color * specular * SPECULAR_COEFFICIENT * material.specular_intensity();
        }

        color.clamp(Color::ZERO, Color::ONE)
    }

    /// True if an opaque shape sits between `point` and the light.
    fn in_shadow(&self, light: &PointLight, point: Vec3, stats: &mut TraceStats) -> bool {
        let to_light = light.location - point;
        let Some(shadow_ray) = Ray::try_new(point + to_light * self.shadow_bias, to_light) else {
            // The point is at the light itself
            return false;
        };

        stats.shadow_rays += 1;
        self.index.occluded(&shadow_ray, to_light.length())
    }
}

/// Lambert factor: cosine between the surface normal and the direction to
/// the light, or 0 when the light is behind the surface.
pub fn diffuse(light_location: Vec3, point: Vec3, normal: Vec3) -> f32 {
    let to_light = (light_location - point).normalize_or_zero();
    to_light.dot(normal.normalize_or_zero()).max(0.0)
}

/// Phong highlight: `max(0, R·E)^hardness`, with `R` the light direction
/// mirrored about the normal and `E` the direction to the eye.
pub fn specular(light_location: Vec3, eye: Vec3, point: Vec3, normal: Vec3, hardness: f32) -> f32 {
    let to_light = (light_location - point).normalize_or_zero();
    let to_eye = (eye - point).normalize_or_zero();
    let normal = normal.normalize_or_zero();

    let reflected = reflect(-to_light, normal).normalize_or_zero();
    reflected.dot(to_eye).max(0.0).powf(hardness)
}
