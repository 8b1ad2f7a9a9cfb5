//! Render settings.
//!
//! Every field has a default, so a settings file only needs to name the
//! options it changes.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::scene::Color;

/// Octree build limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// A node holding more primitives than this is split into octants
    pub max_leaf_size: usize,
    /// Nodes at this depth are never split (the root is depth 0)
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_leaf_size: 8,
            max_depth: 8,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Cast shadow rays towards each light
    pub shadows_enabled: bool,
    /// Sub-rays traced and averaged per pixel
    pub anti_aliasing_samples: u32,
    /// Use the octree instead of a linear scan over all shapes
    pub spatial_index_enabled: bool,
    /// Octree build limits
    pub octree: OctreeConfig,
    /// Number of render workers; `None` uses every available core
    pub worker_count: Option<usize>,
    /// Fraction of the point-to-light vector a shadow ray starts along,
    /// so it does not immediately hit the surface it leaves
    pub shadow_bias: f32,
    /// Color of pixels whose rays hit nothing
    pub background: Color,
    /// Base seed for the anti-aliasing jitter; `None` picks one per render
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadows_enabled: true,
            anti_aliasing_samples: 16,
            spatial_index_enabled: true,
            octree: OctreeConfig::default(),
            worker_count: None,
            shadow_bias: 1e-4,
            background: Color::ZERO,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check every option against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.anti_aliasing_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.octree.max_leaf_size == 0 {
            return Err(ConfigError::ZeroLeafSize);
        }
        if self.worker_count == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        if !(self.shadow_bias.is_finite() && self.shadow_bias > 0.0) {
            return Err(ConfigError::InvalidShadowBias(self.shadow_bias));
        }
        Ok(())
    }

    /// Worker count to use: the configured one, or the available parallelism.
    pub fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or_else(|err| {
                    log::warn!("Could not query available parallelism ({err}), using 1 worker");
                    1
                })
        })
    }
}
