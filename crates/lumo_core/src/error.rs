use thiserror::Error;

/// Errors raised while validating render settings or scene description inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("anti-aliasing needs at least one sample per pixel")]
    ZeroSamples,

    #[error("octree leaves must hold at least one primitive")]
    ZeroLeafSize,

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("shadow bias must be positive and finite, got {0}")]
    InvalidShadowBias(f32),

    #[error("frame must be at least 1x1 pixels, got {width_px}x{height_px}")]
    InvalidFrameSize { width_px: u32, height_px: u32 },

    #[error("frame must have a positive finite world size, got {width}x{height}")]
    InvalidFrameExtent { width: f32, height: f32 },

    #[error("camera look direction must be non-zero")]
    ZeroLookDirection,

    #[error("material {name} must be non-negative and finite, got {value}")]
    InvalidMaterialParameter { name: &'static str, value: f32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
