//! The moving-lights demo scene: three spheres lit by a light that
//! circles the camera axis.

use std::f32::consts::FRAC_PI_4;

use anyhow::Result;
use lumo_core::{Camera, Color, ConfigResult, Frame, Material, PointLight};
use lumo_math::Vec3;
use lumo_renderer::{ConvexPolygon, Plane, Scene, Sphere};

const RED: Color = Color::new(1.0, 0.0, 0.0);
const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
const PINK: Color = Color::new(1.0, 175.0 / 255.0, 175.0 / 255.0);

/// Radius of the light's orbit around the z axis.
const ORBIT_RADIUS: f32 = 2.0;

/// Light for frame `n`. Frame 0 starts below and to the left of the
/// spheres; later frames step an eighth of a turn around the orbit.
pub fn light_for_frame(n: u32) -> PointLight {
    if n == 0 {
        return PointLight::white(Vec3::new(-2.0, -2.5, 1.0), 1.0);
    }
    let angle = n as f32 * FRAC_PI_4;
    PointLight::white(
        Vec3::new(ORBIT_RADIUS * angle.cos(), ORBIT_RADIUS * angle.sin(), 0.5),
        1.0,
    )
}

/// Build the demo scene lit by `light`.
pub fn build_scene(light: PointLight, show_lights: bool, extras: bool) -> Result<Scene> {
    let mut scene = Scene::new(Color::splat(0.1));
    let shiny = |color| Material::new(color, 0.5, 32.0);

    scene.add_shape(Sphere::new(Vec3::new(0.0, -0.5, -2.0), 0.5, shiny(RED)?)?);
    scene.add_shape(Sphere::new(Vec3::new(0.0, 0.5, -2.0), 0.5, shiny(YELLOW)?)?);
    scene.add_shape(Sphere::new(Vec3::new(-0.5, -1.5, -2.0), 0.5, shiny(PINK)?)?);

    if extras {
        scene.add_shape(Plane::new(
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::Y,
            Material::matte(Color::splat(0.8)),
        )?);
        let backdrop = ConvexPolygon::with_surface_normals(
            Material::matte(Color::new(0.2, 0.4, 1.0)),
            &[
                Vec3::new(-3.0, -2.0, -4.0),
                Vec3::new(3.0, -2.0, -4.0),
                Vec3::new(3.0, 3.0, -4.0),
                Vec3::new(-3.0, 3.0, -4.0),
            ],
            &[4],
            &[0, 1, 2, 3],
        )?;
        let range = scene.add_polygon(backdrop);
        log::debug!("Added backdrop at shapes {range:?}");
    }

    scene.add_light(light);
    if show_lights {
        scene.add_light_markers();
    }

    log::debug!(
        "Scene has {} shapes ({} triangles) and {} lights",
        scene.shapes().len(),
        scene.triangle_count(),
        scene.lights().len()
    );
    Ok(scene)
}

/// Camera at the origin looking down -z.
pub fn camera() -> ConfigResult<Camera> {
    Camera::new(Vec3::ZERO, Vec3::NEG_Z)
}

/// A 2x2 image plane at z = -1, centered on the z axis.
pub fn frame(width_px: u32, height_px: u32) -> ConfigResult<Frame> {
    Frame::new(Vec3::new(-1.0, -1.0, -1.0), 2.0, 2.0, width_px, height_px)
}
