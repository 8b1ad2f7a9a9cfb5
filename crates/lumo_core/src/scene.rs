//! Scene description types shared by the renderer and its callers.
//!
//! Everything here is immutable once built and cheap to share across
//! render workers by reference.

use lumo_math::Vec3;

use crate::error::{ConfigError, ConfigResult};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Surface appearance for Phong shading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base (diffuse) color, RGB 0-1
    color: Color,

    /// Scale of the specular highlight
    specular_intensity: f32,

    /// Specular exponent; larger values give tighter highlights
    hardness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::splat(0.5), // Grey default
            specular_intensity: 0.0,
            hardness: 1.0,
        }
    }
}

impl Material {
    /// Create a material, rejecting negative or non-finite specular parameters.
    pub fn new(color: Color, specular_intensity: f32, hardness: f32) -> ConfigResult<Self> {
        check_parameter("specular intensity", specular_intensity)?;
        check_parameter("hardness", hardness)?;
        Ok(Self {
            color,
            specular_intensity,
            hardness,
        })
    }

    /// A purely diffuse material with no specular highlight.
    pub fn matte(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn specular_intensity(&self) -> f32 {
        self.specular_intensity
    }

    pub fn hardness(&self) -> f32 {
        self.hardness
    }
}

fn check_parameter(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMaterialParameter { name, value })
    }
}

/// An infinitely small light with constant intensity at any range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub location: Vec3,
    pub color: Color,
}

impl PointLight {
    pub fn new(location: Vec3, color: Color) -> Self {
        Self { location, color }
    }

    /// A white light scaled by `intensity`.
    pub fn white(location: Vec3, intensity: f32) -> Self {
        Self::new(location, Color::splat(intensity))
    }
}

/// The eye primary rays start from, and the direction it looks in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    eye: Vec3,
    look: Vec3,
}

impl Camera {
    /// Create a camera at `eye` looking along `look` (need not be normalized).
    pub fn new(eye: Vec3, look: Vec3) -> ConfigResult<Self> {
        if !look.is_finite() || look.length_squared() == 0.0 {
            return Err(ConfigError::ZeroLookDirection);
        }
        Ok(Self {
            eye,
            look: look.normalize(),
        })
    }

    /// Camera location; the origin of every primary ray.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Unit look direction.
    pub fn look(&self) -> Vec3 {
        self.look
    }

    /// True if `point` lies in front of the camera.
    pub fn faces(&self, point: Vec3) -> bool {
        (point - self.eye).dot(self.look) > 0.0
    }
}
