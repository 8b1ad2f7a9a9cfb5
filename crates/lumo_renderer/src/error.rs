//! Error types for geometry construction and rendering.

use lumo_core::ConfigError;
use lumo_math::Vec3;
use thiserror::Error;

/// Malformed geometry, rejected when a shape is constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("sphere center must be finite, got {0:?}")]
    InvalidCenter(Vec3),

    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("normal vector must be non-zero and finite, got {0:?}")]
    InvalidNormal(Vec3),

    #[error("triangle has zero area: {0:?}")]
    DegenerateTriangle([Vec3; 3]),

    #[error("a polygon needs at least 3 vertices, found {0}")]
    TooFewVertices(usize),

    #[error("a polygon needs at least one face")]
    NoFaces,

    #[error("face {face} has {count} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, count: usize },

    #[error("faces reference {expected} vertex indexes but {found} were given")]
    IndexCountMismatch { expected: usize, found: usize },

    #[error("vertex index {index} is out of range for {vertex_count} vertices")]
    VertexIndexOutOfRange { index: usize, vertex_count: usize },

    #[error("expected one normal per vertex ({vertices} vertices), found {normals}")]
    NormalCountMismatch { vertices: usize, normals: usize },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// A render that could not complete. Nothing partial is ever returned.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("pixel ({x}, {y}) was written twice")]
    PixelWrittenTwice { x: u32, y: u32 },

    #[error("pixel ({x}, {y}) is outside the {width}x{height} raster")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("partition covers {partition} pixels but the raster has {raster}")]
    PartitionMismatch { partition: usize, raster: usize },

    #[error("{missing} pixels were never written")]
    IncompleteFrame { missing: usize },

    #[error("cannot build a ray through pixel ({x}, {y}): the eye lies on the image plane")]
    DegenerateRay { x: u32, y: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
