//! The image plane: a world-space rectangle parallel to the XY plane,
//! divided into a grid of pixels.
//!
//! Pixel `(x, y)` counts `x` left to right and `y` top to bottom, matching
//! the row-major layout of the output raster.

use lumo_math::{Vec2, Vec3};

use crate::error::{ConfigError, ConfigResult};

/// World-space geometry of the image plane and its pixel resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    bottom_left: Vec3,
    width: f32,
    height: f32,
    width_px: u32,
    height_px: u32,
}

impl Frame {
    /// Create a frame from its bottom-left world corner, world size and
    /// pixel resolution.
    pub fn new(
        bottom_left: Vec3,
        width: f32,
        height: f32,
        width_px: u32,
        height_px: u32,
    ) -> ConfigResult<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(ConfigError::InvalidFrameSize {
                width_px,
                height_px,
            });
        }
        let extent_ok = |v: f32| v.is_finite() && v > 0.0;
        if !extent_ok(width) || !extent_ok(height) || !bottom_left.is_finite() {
            return Err(ConfigError::InvalidFrameExtent { width, height });
        }

        Ok(Self {
            bottom_left,
            width,
            height,
            width_px,
            height_px,
        })
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width_px as usize * self.height_px as usize
    }

    /// World-space size of one pixel.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width / self.width_px as f32,
            self.height / self.height_px as f32,
        )
    }

    /// World-space center of the whole frame.
    pub fn center(&self) -> Vec3 {
        self.bottom_left + Vec3::new(self.width * 0.5, self.height * 0.5, 0.0)
    }

    /// The world-space patch of the image plane covered by pixel `(x, y)`.
    pub fn footprint(&self, x: u32, y: u32) -> PixelFootprint {
        debug_assert!(x < self.width_px && y < self.height_px);

        let size = self.pixel_size();
        let row_from_bottom = (self.height_px - 1 - y) as f32;
        let corner = self.bottom_left + Vec3::new(x as f32 * size.x, row_from_bottom * size.y, 0.0);

        PixelFootprint { corner, size }
    }
}

/// The rectangle of the image plane covered by a single pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelFootprint {
    /// Bottom-left world corner of the pixel
    pub corner: Vec3,
    /// World-space width and height of the pixel
    pub size: Vec2,
}

impl PixelFootprint {
    /// World point at fractional position `(u, v)` inside the pixel,
    /// where `(0, 0)` is the bottom-left corner and `(1, 1)` the top-right.
    #[inline]
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        self.corner + Vec3::new(u * self.size.x, v * self.size.y, 0.0)
    }

    /// World point at the center of the pixel.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.point_at(0.5, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_2x2() -> Frame {
        Frame::new(Vec3::new(-1.0, -1.0, -1.0), 2.0, 2.0, 2, 2).unwrap()
    }

    #[test]
    fn test_frame_validation() {
        assert_eq!(
            Frame::new(Vec3::ZERO, 1.0, 1.0, 0, 10),
            Err(ConfigError::InvalidFrameSize {
                width_px: 0,
                height_px: 10
            })
        );
        assert!(Frame::new(Vec3::ZERO, -1.0, 1.0, 10, 10).is_err());
        assert!(Frame::new(Vec3::ZERO, 1.0, f32::INFINITY, 10, 10).is_err());
    }

    #[test]
    fn test_top_left_pixel_maps_to_top_of_plane() {
        let frame = frame_2x2();

        let top_left = frame.footprint(0, 0);
        assert_eq!(top_left.corner, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(top_left.center(), Vec3::new(-0.5, 0.5, -1.0));

        let bottom_right = frame.footprint(1, 1);
        assert_eq!(bottom_right.corner, Vec3::new(0.0, -1.0, -1.0));
        assert_eq!(bottom_right.point_at(1.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_center() {
        assert_eq!(frame_2x2().center(), Vec3::new(0.0, 0.0, -1.0));
    }
}
