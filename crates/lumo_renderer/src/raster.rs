//! Write-once pixel storage for a render pass.

use crate::error::{RenderError, RenderResult};
use crate::partition::PixelPartition;
use lumo_core::Color;

/// A grid of pixel colors, each written at most once.
///
/// Pixels are stored row-major with `(0, 0)` at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Option<Color>>,
}

impl Raster {
    /// Create an empty raster; no pixel has been written.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// The color at `(x, y)`, or `None` if unwritten or out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[self.index_of(x, y)]
    }

    /// Write the pixel at `(x, y)`. Writing a pixel twice is an error.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> RenderResult<()> {
        if x >= self.width || y >= self.height {
            return Err(RenderError::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let index = self.index_of(x, y);
        write_once(&mut self.pixels[index], x, y, color)
    }

    /// Number of pixels not yet written.
    pub fn missing_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.pixels.iter().all(Option::is_some)
    }

    /// Split the pixel storage into one list of writable slots per worker,
    /// following `partition`.
    ///
    /// Each slot borrows a different cell, so workers can write their
    /// pixels in parallel without locking.
    pub fn partition_mut(
        &mut self,
        partition: &PixelPartition,
    ) -> RenderResult<Vec<Vec<PixelSlot<'_>>>> {
        if partition.pixel_count() != self.pixels.len() {
            return Err(RenderError::PartitionMismatch {
                partition: partition.pixel_count(),
                raster: self.pixels.len(),
            });
        }

        let width = self.width;
        let mut slots: Vec<Vec<PixelSlot<'_>>> = (0..partition.worker_count())
            .map(|w| Vec::with_capacity(partition.len_for(w)))
            .collect();

        for (index, cell) in self.pixels.iter_mut().enumerate() {
            let (x, y) = coords_of(width, index);
            slots[partition.owner_of(index)].push(PixelSlot { x, y, index, cell });
        }

        Ok(slots)
    }

    /// 8-bit RGBA bytes, row-major. Unwritten pixels are transparent black.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            let rgba = match pixel {
                Some(color) => color_to_rgba(*color),
                None => [0, 0, 0, 0],
            };
            bytes.extend_from_slice(&rgba);
        }
        bytes
    }

    /// The raster as an `image` buffer, ready to save.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let rgba = match self.pixels[self.index_of(x, y)] {
                Some(color) => color_to_rgba(color),
                None => [0, 0, 0, 0],
            };
            image::Rgba(rgba)
        })
    }

    /// Row-major index of pixel `(x, y)`.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel coordinates of a row-major index.
    #[inline]
    pub fn coords_of(&self, index: usize) -> (u32, u32) {
        coords_of(self.width, index)
    }
}

#[inline]
fn coords_of(width: u32, index: usize) -> (u32, u32) {
    let width = width as usize;
    ((index % width) as u32, (index / width) as u32)
}

/// Exclusive write access to one raster cell.
#[derive(Debug)]
pub struct PixelSlot<'r> {
    pub x: u32,
    pub y: u32,
    /// Row-major index of the pixel
    pub index: usize,
    cell: &'r mut Option<Color>,
}

impl PixelSlot<'_> {
    /// Store the pixel color. Fails if the cell already holds one.
    pub fn write(&mut self, color: Color) -> RenderResult<()> {
        write_once(self.cell, self.x, self.y, color)
    }
}

fn write_once(cell: &mut Option<Color>, x: u32, y: u32, color: Color) -> RenderResult<()> {
    if cell.is_some() {
        return Err(RenderError::PixelWrittenTwice { x, y });
    }
    *cell = Some(color);
    Ok(())
}

/// Convert a color to 8-bit RGBA. Channels are clamped to [0, 1]; no gamma
/// is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f32| (255.0 * c.clamp(0.0, 1.0)).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_raster_is_empty() {
        let raster = Raster::new(4, 3);
        assert_eq!(raster.pixel_count(), 12);
        assert_eq!(raster.missing_count(), 12);
        assert!(!raster.is_complete());
        assert_eq!(raster.get(0, 0), None);
    }

    #[test]
    fn test_write_once() {
        let mut raster = Raster::new(2, 2);
        raster.set(1, 0, Color::ONE).unwrap();
        assert_eq!(raster.get(1, 0), Some(Color::ONE));

        let err = raster.set(1, 0, Color::ZERO).unwrap_err();
        assert!(matches!(err, RenderError::PixelWrittenTwice { x: 1, y: 0 }));
        // The first value survives
        assert_eq!(raster.get(1, 0), Some(Color::ONE));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut raster = Raster::new(2, 2);
        assert!(matches!(
            raster.set(2, 0, Color::ONE),
            Err(RenderError::PixelOutOfBounds { x: 2, y: 0, width: 2, height: 2 })
        ));
        assert_eq!(raster.get(0, 5), None);
    }

    #[test]
    fn test_index_coords_agree() {
        let raster = Raster::new(3, 2);
        for index in 0..raster.pixel_count() {
            let (x, y) = raster.coords_of(index);
            assert_eq!(raster.index_of(x, y), index);
        }
        assert_eq!(raster.coords_of(4), (1, 1));
    }

    #[test]
    fn test_partition_slots_cover_every_pixel_once() {
        let mut raster = Raster::new(5, 3);
        let partition = PixelPartition::strided(15, 4);
        let slots = raster.partition_mut(&partition).unwrap();

        assert_eq!(slots.len(), 4);
        let mut seen = vec![false; 15];
        for (worker, worker_slots) in slots.iter().enumerate() {
            for slot in worker_slots {
                assert_eq!(partition.owner_of(slot.index), worker);
                assert_eq!(coords_of(5, slot.index), (slot.x, slot.y));
                assert!(!seen[slot.index]);
                seen[slot.index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_slots_write_through() {
        let mut raster = Raster::new(3, 2);
        let partition = PixelPartition::strided(6, 2);

        for worker_slots in raster.partition_mut(&partition).unwrap() {
            for mut slot in worker_slots {
                let shade = slot.index as f32 / 10.0;
                slot.write(Color::splat(shade)).unwrap();
                assert!(slot.write(Color::ZERO).is_err());
            }
        }

        assert!(raster.is_complete());
        assert_eq!(raster.get(2, 1), Some(Color::splat(0.5)));
    }

    #[test]
    fn test_partition_mismatch() {
        let mut raster = Raster::new(3, 2);
        assert!(matches!(
            raster.partition_mut(&PixelPartition::strided(5, 2)),
            Err(RenderError::PartitionMismatch { partition: 5, raster: 6 })
        ));
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(0.5, 2.0, -1.0)), [128, 255, 0, 255]);
    }

    #[test]
    fn test_export() {
        let mut raster = Raster::new(2, 1);
        raster.set(0, 0, Color::new(1.0, 0.0, 0.0)).unwrap();

        assert_eq!(raster.to_rgba(), vec![255, 0, 0, 255, 0, 0, 0, 0]);

        let image = raster.to_image();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }
}
