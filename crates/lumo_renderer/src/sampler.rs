//! Anti-aliasing by per-pixel supersampling.
//!
//! Each pixel traces several primary rays through points spread over its
//! footprint on the image plane and averages the resulting colors. Where
//! inside the pixel each ray goes is decided by a [`RayJitter`].

use rand::{Rng, RngCore};

use crate::renderer::TraceStats;
use crate::shading::PhongShader;
use lumo_core::{Color, PixelFootprint};
use lumo_math::{Ray, Vec3};

/// Strategy for placing sub-pixel sample rays.
pub trait RayJitter: Send + Sync {
    /// Perturb `ray` (which passes through the footprint's center) so it
    /// passes through the point used for `sample` out of `samples`.
    ///
    /// Returns `None` if the perturbed ray would be degenerate.
    fn perturb(
        &self,
        ray: &Ray,
        footprint: &PixelFootprint,
        sample: u32,
        samples: u32,
        rng: &mut dyn RngCore,
    ) -> Option<Ray>;
}

/// Uniformly random points over the pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl RayJitter for RandomJitter {
    fn perturb(
        &self,
        ray: &Ray,
        footprint: &PixelFootprint,
        _sample: u32,
        _samples: u32,
        rng: &mut dyn RngCore,
    ) -> Option<Ray> {
        let u: f32 = rng.gen();
        let v: f32 = rng.gen();
        Ray::towards(ray.origin(), footprint.point_at(u, v))
    }
}

/// Cell centers of the smallest square grid with at least `samples` cells,
/// filled row by row. Ignores the random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridJitter;

impl GridJitter {
    /// Fractional pixel position of `sample`.
    pub fn offset(sample: u32, samples: u32) -> (f32, f32) {
        let side = grid_side(samples);
        let col = sample % side;
        let row = sample / side;
        (
            (col as f32 + 0.5) / side as f32,
            (row as f32 + 0.5) / side as f32,
        )
    }
}

fn grid_side(samples: u32) -> u32 {
    let mut side = (samples as f64).sqrt() as u32;
    while side * side < samples {
        side += 1;
    }
    side.max(1)
}

impl RayJitter for GridJitter {
    fn perturb(
        &self,
        ray: &Ray,
        footprint: &PixelFootprint,
        sample: u32,
        samples: u32,
        _rng: &mut dyn RngCore,
    ) -> Option<Ray> {
        let (u, v) = Self::offset(sample, samples);
        Ray::towards(ray.origin(), footprint.point_at(u, v))
    }
}

/// Supersampling pixel shader.
#[derive(Debug, Clone)]
pub struct AntiAliaser<J: RayJitter = RandomJitter> {
    samples: u32,
    jitter: J,
}

impl<J: RayJitter> AntiAliaser<J> {
    /// `samples` is clamped to at least 1.
    pub fn new(samples: u32, jitter: J) -> Self {
        Self {
            samples: samples.max(1),
            jitter,
        }
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Final color for one pixel, seen from `eye`.
    ///
    /// With a single sample this is one untouched ray through the pixel
    /// center. Returns `None` if no valid ray can be built through the pixel.
    pub fn sample_pixel(
        &self,
        shader: &PhongShader<'_>,
        eye: Vec3,
        footprint: &PixelFootprint,
        rng: &mut dyn RngCore,
        stats: &mut TraceStats,
    ) -> Option<Color> {
        let center_ray = Ray::towards(eye, footprint.center())?;
        if self.samples == 1 {
            return Some(shader.trace(&center_ray, stats));
        }

        let mut sum = Color::ZERO;
        for sample in 0..self.samples {
            let ray = self
                .jitter
                .perturb(&center_ray, footprint, sample, self.samples, rng)?;
            sum += shader.trace(&ray, stats);
        }
        Some(sum / self.samples as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scene, SceneIndex, Sphere};
    use lumo_core::{Camera, Material, RenderConfig};
    use lumo_math::{Vec2, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn footprint() -> PixelFootprint {
        PixelFootprint {
            corner: Vec3::new(-0.5, -0.5, -1.0),
            size: Vec2::new(1.0, 1.0),
        }
    }

    #[test]
    fn test_grid_offsets() {
        assert_eq!(GridJitter::offset(0, 1), (0.5, 0.5));
        assert_eq!(GridJitter::offset(0, 4), (0.25, 0.25));
        assert_eq!(GridJitter::offset(3, 4), (0.75, 0.75));
        // 5 samples use a 3x3 grid
        assert_eq!(grid_side(5), 3);
        assert_eq!(grid_side(16), 4);
    }

    #[test]
    fn test_random_jitter_stays_inside_pixel() {
        let fp = footprint();
        let center = Ray::towards(Vec3::ZERO, fp.center()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for sample in 0..200 {
            let ray = RandomJitter
                .perturb(&center, &fp, sample, 200, &mut rng)
                .unwrap();
            // Direction reaches z = -1 inside the footprint
            let p = ray.at(-1.0 / ray.direction().z);
            assert!((-0.5..=0.5).contains(&p.x) && (-0.5..=0.5).contains(&p.y));
            assert_eq!(ray.origin(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_grid_jitter_is_deterministic() {
        let fp = footprint();
        let center = Ray::towards(Vec3::ZERO, fp.center()).unwrap();
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);

        let ra = GridJitter.perturb(&center, &fp, 2, 4, &mut a).unwrap();
        let rb = GridJitter.perturb(&center, &fp, 2, 4, &mut b).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_uniform_region_averages_to_its_color() {
        // A sphere far larger than the pixel: every sample sees ambient * color
        let mut scene = Scene::new(Color::splat(0.5));
        scene.add_shape(
            Sphere::new(
                Vec3::new(0.0, 0.0, -10.0),
                5.0,
                Material::matte(Color::new(1.0, 0.5, 0.2)),
            )
            .unwrap(),
        );
        let config = RenderConfig::default();
        let index = SceneIndex::build(&scene, true, &config.octree);
        let camera = Camera::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let shader = PhongShader::new(&index, &camera, &config);
        let fp = PixelFootprint {
            corner: Vec3::new(-0.01, -0.01, -1.0),
            size: Vec2::new(0.02, 0.02),
        };

        let aa = AntiAliaser::new(16, RandomJitter);
        let mut stats = TraceStats::default();
        let mut rng = StdRng::seed_from_u64(3);
        let color = aa
            .sample_pixel(&shader, camera.eye(), &fp, &mut rng, &mut stats)
            .unwrap();

        assert!((color - Color::new(0.5, 0.25, 0.1)).length() < 1e-5);
        assert_eq!(stats.primary_rays, 16);
    }

    #[test]
    fn test_edge_pixel_blends_colors() {
        // A black sphere covers the left half of the pixel, a white wall the rest
        let mut scene = Scene::new(Color::ONE);
        let wall = crate::Plane::new(
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::Z,
            Material::matte(Color::ONE),
        );
        scene.add_shape(wall.unwrap());
        let sphere = Sphere::new(
            Vec3::new(-100.0, 0.0, -2.0),
            100.0,
            Material::matte(Color::ZERO),
        );
        scene.add_shape(sphere.unwrap());
        let config = RenderConfig::default();
        let index = SceneIndex::build(&scene, true, &config.octree);
        let camera = Camera::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let shader = PhongShader::new(&index, &camera, &config);

        let aa = AntiAliaser::new(4, GridJitter);
        let mut rng = StdRng::seed_from_u64(0);
        let color = aa
            .sample_pixel(&shader, camera.eye(), &footprint(), &mut rng, &mut TraceStats::default())
            .unwrap();

        // Two of four grid samples land on the black sphere
        assert!((color - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_single_sample_uses_center_ray() {
        let scene = Scene::new(Color::ZERO);
        let config = RenderConfig {
            background: Color::new(0.3, 0.3, 0.3),
            ..Default::default()
        };
        let index = SceneIndex::build(&scene, false, &config.octree);
        let camera = Camera::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let shader = PhongShader::new(&index, &camera, &config);

        let aa = AntiAliaser::new(0, RandomJitter);
        assert_eq!(aa.samples(), 1);

        let mut stats = TraceStats::default();
        let mut rng = StdRng::seed_from_u64(0);
        let color = aa
            .sample_pixel(&shader, camera.eye(), &footprint(), &mut rng, &mut stats)
            .unwrap();
        assert_eq!(color, Color::splat(0.3));
        assert_eq!(stats.primary_rays, 1);
    }

    #[test]
    fn test_eye_on_image_plane_is_degenerate() {
        let scene = Scene::new(Color::ZERO);
        let config = RenderConfig::default();
        let index = SceneIndex::build(&scene, false, &config.octree);
        let camera = Camera::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let shader = PhongShader::new(&index, &camera, &config);
        let fp = footprint();

        let aa = AntiAliaser::new(1, RandomJitter);
        let color = aa.sample_pixel(
            &shader,
            fp.center(),
            &fp,
            &mut StdRng::seed_from_u64(0),
            &mut TraceStats::default(),
        );
        assert!(color.is_none());
    }
}
