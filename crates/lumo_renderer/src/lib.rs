//! Lumo Renderer - CPU Phong ray tracing
//!
//! Traces one primary ray per anti-aliasing sample through an image plane,
//! shades the nearest hit with ambient, diffuse and specular terms, and
//! tests each light for hard shadows. Scenes are accelerated with an
//! octree and frames are rendered in parallel on a fixed worker pool.

mod error;
mod hittable;
mod octree;
mod partition;
mod plane;
mod polygon;
mod raster;
mod renderer;
mod sampler;
mod scene;
mod shading;
mod shape;
mod sphere;
mod triangle;

pub use error::{GeometryError, GeometryResult, RenderError, RenderResult};
pub use hittable::{Hittable, RayHit, SurfaceHit};
pub use octree::{NodeId, Octree, OctreeNode};
pub use partition::PixelPartition;
pub use plane::Plane;
pub use polygon::ConvexPolygon;
pub use raster::{color_to_rgba, PixelSlot, Raster};
pub use renderer::{RenderOutput, Renderer, TraceStats};
pub use sampler::{AntiAliaser, GridJitter, RandomJitter, RayJitter};
pub use scene::{Scene, SceneIndex};
pub use shading::{
    diffuse, specular, PhongShader, DIFFUSE_COEFFICIENT, LIGHT_MARKER_COLOR, SPECULAR_COEFFICIENT,
};
pub use shape::Shape;
pub use sphere::{Sphere, LIGHT_MARKER_RADIUS};
pub use triangle::{Triangle, TriangleNormals};

/// Re-export the scene description types from lumo_core
pub use lumo_core::{Camera, Color, Frame, Material, OctreeConfig, PointLight, RenderConfig};

/// Re-export common math types from lumo_math
pub use lumo_math::{Aabb, Ray, Vec3};
