//! Lumo Core - scene description types for the Lumo ray tracer.
//!
//! This crate provides the renderer-agnostic inputs of a render:
//!
//! - **Scene description**: `Material`, `PointLight`, `Camera`
//! - **Image plane**: `Frame`, the world-space rectangle mapped onto the pixel grid
//! - **Settings**: `RenderConfig` and `OctreeConfig`, loadable with serde
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::{Camera, Frame, RenderConfig};
//!
//! let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z)?;
//! let frame = Frame::new(Vec3::new(-1.0, -1.0, -1.0), 2.0, 2.0, 800, 800)?;
//! let config = RenderConfig { anti_aliasing_samples: 4, ..Default::default() };
//! config.validate()?;
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod scene;

// Re-export commonly used types
pub use config::{OctreeConfig, RenderConfig};
pub use error::{ConfigError, ConfigResult};
pub use frame::{Frame, PixelFootprint};
pub use scene::{Camera, Color, Material, PointLight};
