//! Division of the pixel grid between render workers.
//!
//! Worker `w` owns every pixel whose row-major index is congruent to `w`
//! modulo the worker count. Neighbouring pixels go to different workers, so
//! expensive regions of the image are shared out evenly.

/// A strided assignment of `pixel_count` pixels to `workers` workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPartition {
    pixel_count: usize,
    workers: usize,
}

impl PixelPartition {
    /// Split `pixel_count` pixels between `workers` workers (at least one).
    pub fn strided(pixel_count: usize, workers: usize) -> Self {
        Self {
            pixel_count,
            workers: workers.max(1),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// The worker that owns pixel `index`.
    #[inline]
    pub fn owner_of(&self, index: usize) -> usize {
        index % self.workers
    }

    /// Pixel indices owned by `worker`, in increasing order.
    pub fn pixels_for(&self, worker: usize) -> impl Iterator<Item = usize> {
        let start = if worker < self.workers {
            worker
        } else {
            self.pixel_count
        };
        (start..self.pixel_count).step_by(self.workers)
    }

    /// Number of pixels owned by `worker`.
    pub fn len_for(&self, worker: usize) -> usize {
        if worker >= self.workers || worker >= self.pixel_count {
            return 0;
        }
        (self.pixel_count - worker).div_ceil(self.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every pixel is owned by exactly one worker.
    fn assert_disjoint_cover(partition: &PixelPartition) {
        let mut owners = vec![0u32; partition.pixel_count()];
        for w in 0..partition.worker_count() {
            for index in partition.pixels_for(w) {
                owners[index] += 1;
                assert_eq!(partition.owner_of(index), w);
            }
            assert_eq!(partition.pixels_for(w).count(), partition.len_for(w));
        }
        assert!(
            owners.iter().all(|&n| n == 1),
            "pixel owned by zero or several workers"
        );
    }

    #[test]
    fn test_strided_cover() {
        let cases = [
            (100, 1),
            (100, 4),
            (101, 4),
            (7, 3),
            (3, 8),
            (0, 2),
            (640 * 480, 12),
        ];
        for (pixels, workers) in cases {
            assert_disjoint_cover(&PixelPartition::strided(pixels, workers));
        }
    }

    #[test]
    fn test_stride_assignment() {
        let partition = PixelPartition::strided(10, 3);
        assert_eq!(partition.pixels_for(0).collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert_eq!(partition.pixels_for(1).collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(partition.pixels_for(2).collect::<Vec<_>>(), vec![2, 5, 8]);
        assert_eq!(partition.pixels_for(3).count(), 0);
    }

    #[test]
    fn test_more_workers_than_pixels() {
        let partition = PixelPartition::strided(2, 5);
        assert_eq!(partition.len_for(0), 1);
        assert_eq!(partition.len_for(1), 1);
        assert_eq!(partition.len_for(4), 0);
    }

    #[test]
    fn test_zero_workers_means_one() {
        let partition = PixelPartition::strided(5, 0);
        assert_eq!(partition.worker_count(), 1);
        assert_eq!(partition.len_for(0), 5);
    }
}
