//! Parallel render coordinator.
//!
//! A [`Renderer`] owns a fixed pool of worker threads. Each render splits
//! the pixel grid with a strided [`PixelPartition`], hands every worker
//! exclusive slots for its own pixels, and joins once all of them are done.
//! Pixel colors depend only on the scene and the pixel, so the image does
//! not depend on the worker count.

use std::iter::Sum;
use std::ops::AddAssign;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::partition::PixelPartition;
use crate::raster::{PixelSlot, Raster};
use crate::sampler::{AntiAliaser, RandomJitter, RayJitter};
use crate::scene::{Scene, SceneIndex};
use crate::shading::PhongShader;
use lumo_core::{Camera, Frame, RenderConfig};

/// Rays traced during a render, summed over workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Camera rays, one per anti-aliasing sample
    pub primary_rays: u64,
    /// Rays cast towards lights to test for occlusion
    pub shadow_rays: u64,
}

impl TraceStats {
    pub fn total(&self) -> u64 {
        self.primary_rays + self.shadow_rays
    }
}

impl AddAssign for TraceStats {
    fn add_assign(&mut self, other: Self) {
        self.primary_rays += other.primary_rays;
        self.shadow_rays += other.shadow_rays;
    }
}

impl Sum for TraceStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, s| {
            acc += s;
            acc
        })
    }
}

/// A finished frame.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Every pixel is written
    pub raster: Raster,
    pub stats: TraceStats,
}

/// Renders scenes with a long-lived pool of worker threads.
pub struct Renderer<J: RayJitter = RandomJitter> {
    config: RenderConfig,
    workers: usize,
    pool: rayon::ThreadPool,
    sampler: AntiAliaser<J>,
}

impl Renderer<RandomJitter> {
    /// Create a renderer with randomly jittered anti-aliasing.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        Self::with_jitter(config, RandomJitter)
    }
}

impl<J: RayJitter> Renderer<J> {
    /// Create a renderer using `jitter` to place anti-aliasing samples.
    pub fn with_jitter(config: RenderConfig, jitter: J) -> RenderResult<Self> {
        config.validate()?;
        let workers = config.resolved_worker_count();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("lumo-worker-{i}"))
            .build()?;

        Ok(Self {
            sampler: AntiAliaser::new(config.anti_aliasing_samples, jitter),
            config,
            workers,
            pool,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Index `scene` and render it.
    ///
    /// The index is rebuilt on every call, so the scene may change between
    /// renders.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        frame: &Frame,
    ) -> RenderResult<RenderOutput> {
        let index = SceneIndex::build(
            scene,
            self.config.spatial_index_enabled,
            &self.config.octree,
        );
        self.render_indexed(&index, camera, frame)
    }

    /// Render an already indexed scene.
    pub fn render_indexed(
        &self,
        index: &SceneIndex<'_>,
        camera: &Camera,
        frame: &Frame,
    ) -> RenderResult<RenderOutput> {
        log::info!(
            "Rendering {}x{} pixels with {} workers, {} samples per pixel",
            frame.width_px(),
            frame.height_px(),
            self.workers,
            self.sampler.samples()
        );
        if !camera.faces(frame.center()) {
            log::warn!("The image plane is not in front of the camera");
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let shader = PhongShader::new(index, camera, &self.config);
        let partition = PixelPartition::strided(frame.pixel_count(), self.workers);

        let mut raster = Raster::new(frame.width_px(), frame.height_px());
        let slots = raster.partition_mut(&partition)?;

        let per_worker: Vec<TraceStats> = self.pool.install(|| {
            slots
                .into_par_iter()
                .enumerate()
                .map(|(worker, worker_slots)| {
                    self.render_slots(worker, worker_slots, &shader, camera, frame, seed)
                })
                .collect::<RenderResult<Vec<_>>>()
        })?;

        let missing = raster.missing_count();
        if missing > 0 {
            return Err(RenderError::IncompleteFrame { missing });
        }

        let stats: TraceStats = per_worker.iter().copied().sum();
        log::info!("Total number of rays traced = {}", stats.total());
        log::debug!(
            "{} primary rays, {} shadow rays",
            stats.primary_rays,
            stats.shadow_rays
        );

        Ok(RenderOutput { raster, stats })
    }

    /// One worker's share of the frame.
    fn render_slots(
        &self,
        worker: usize,
        slots: Vec<PixelSlot<'_>>,
        shader: &PhongShader<'_>,
        camera: &Camera,
        frame: &Frame,
        seed: u64,
    ) -> RenderResult<TraceStats> {
        let mut stats = TraceStats::default();
        let pixels = slots.len();

        for mut slot in slots {
            let mut rng = StdRng::seed_from_u64(pixel_seed(seed, slot.index));
            let footprint = frame.footprint(slot.x, slot.y);
            let color = self
                .sampler
                .sample_pixel(shader, camera.eye(), &footprint, &mut rng, &mut stats)
                .ok_or(RenderError::DegenerateRay {
                    x: slot.x,
                    y: slot.y,
                })?;
            slot.write(color)?;
        }

        log::debug!(
            "Worker {worker} finished {pixels} pixels, {} rays",
            stats.total()
        );
        Ok(stats)
    }
}

/// Per-pixel RNG seed, independent of which worker renders the pixel.
#[inline]
fn pixel_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
