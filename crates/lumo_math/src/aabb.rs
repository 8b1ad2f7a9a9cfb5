use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box used to prune ray/primitive tests.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// It is never rendered itself; shapes report one through their bounds and the
/// octree partitions space with them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two corner points.
    ///
    /// Axes thinner than a small delta are padded so flat geometry (a triangle
    /// lying in an axis plane) still has a box a ray can enter.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// The corner with the smallest coordinates.
    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// The corner with the largest coordinates.
    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.midpoint(), self.y.midpoint(), self.z.midpoint())
    }

    /// True if the box contains nothing (e.g. [`Aabb::EMPTY`]).
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// True if every bound is a finite number.
    ///
    /// Unbounded shapes such as planes report a non-finite box and cannot be
    /// placed in a spatial partition.
    pub fn is_finite(&self) -> bool {
        self.min_corner().is_finite() && self.max_corner().is_finite()
    }

    /// True if the two boxes share any point, faces included.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y) && self.z.overlaps(&other.z)
    }

    /// Widen every axis by `delta`, split evenly between both sides.
    pub fn expand(&self, delta: f32) -> Aabb {
        Aabb {
            x: self.x.expand(delta),
            y: self.y.expand(delta),
            z: self.z.expand(delta),
        }
    }

    /// One of the eight equal octants of this box.
    ///
    /// Bit 0 of `index` selects the upper X half, bit 1 the upper Y half and
    /// bit 2 the upper Z half.
    pub fn octant(&self, index: usize) -> Aabb {
        let half = |interval: Interval, upper: bool| {
            let mid = interval.midpoint();
            if upper {
                Interval::new(mid, interval.max)
            } else {
                Interval::new(interval.min, mid)
            }
        };

        Aabb {
            x: half(self.x, index & 1 != 0),
            y: half(self.y, index & 2 != 0),
            z: half(self.z, index & 4 != 0),
        }
    }

    /// The parameter range over which `ray` is inside this box.
    ///
    /// Uses the slab method. Returns [`Interval::EMPTY`] when the ray's line
    /// misses the box, including rays that only graze an edge, corner or face.
    /// The span may start at a negative parameter when the box is (partly)
    /// behind the ray origin.
    pub fn ray_span(&self, ray: &Ray) -> Interval {
        let origin = ray.origin();
        let direction = ray.direction();
        let mut span = Interval::UNIVERSE;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let o = origin[axis];
            let d = direction[axis];

            if d == 0.0 {
                // Parallel to this slab: either always between its planes or never.
                if !slab.surrounds(o) {
                    return Interval::EMPTY;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (slab.min - o) * inv;
            let mut t1 = (slab.max - o) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            span.min = t0.max(span.min);
            span.max = t1.min(span.max);
            if span.max <= span.min {
                return Interval::EMPTY;
            }
        }

        span
    }

    /// How far (in ray parameter) the ray travels inside the box ahead of
    /// its origin.
    ///
    /// Positive means the ray enters the box. Zero or negative means it does
    /// not: the box is missed, only touched on a boundary, or lies entirely
    /// behind the origin.
    pub fn entry_progress(&self, ray: &Ray) -> f32 {
        let span = self.ray_span(ray);
        span.max - span.min.max(0.0)
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    /// Contains nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Contains everything.
    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    const RAY_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    const BOTTOM_LEFT: Vec3 = Vec3::new(-1.0, -1.0, -1.0);
    const BOTTOM_RIGHT: Vec3 = Vec3::new(1.0, -1.0, -1.0);
    const TOP_RIGHT: Vec3 = Vec3::new(1.0, 1.0, -1.0);
    const TOP_LEFT: Vec3 = Vec3::new(-1.0, 1.0, -1.0);

    /// Square centered on the z axis spanning z in [-1, 0].
    fn unit_box() -> Aabb {
        Aabb::from_points(BOTTOM_LEFT, TOP_RIGHT + Vec3::Z)
    }

    fn progress_towards(direction: Vec3) -> f32 {
        unit_box().entry_progress(&Ray::new(RAY_ORIGIN, direction))
    }

    fn nudge(v: Vec3, dx: f32, dy: f32) -> Vec3 {
        v + Vec3::new(dx, dy, 0.0)
    }

    #[test]
    fn test_middle_intersection() {
        assert!(progress_towards(Vec3::new(0.0, 0.0, -1.0)) > 0.0);
    }

    #[test]
    fn test_bottom_left_corner() {
        assert!(progress_towards(nudge(BOTTOM_LEFT, EPSILON, EPSILON)) > 0.0);
        assert!(progress_towards(nudge(BOTTOM_LEFT, -EPSILON, EPSILON)) < 0.0);
        assert!(progress_towards(nudge(BOTTOM_LEFT, EPSILON, -EPSILON)) < 0.0);
    }

    #[test]
    fn test_bottom_right_corner() {
        assert!(progress_towards(nudge(BOTTOM_RIGHT, -EPSILON, EPSILON)) > 0.0);
        assert!(progress_towards(nudge(BOTTOM_RIGHT, EPSILON, EPSILON)) < 0.0);
        assert!(progress_towards(nudge(BOTTOM_RIGHT, -EPSILON, -EPSILON)) < 0.0);
    }

    #[test]
    fn test_top_right_corner() {
        assert!(progress_towards(nudge(TOP_RIGHT, -EPSILON, -EPSILON)) > 0.0);
        assert!(progress_towards(nudge(TOP_RIGHT, EPSILON, -EPSILON)) < 0.0);
        assert!(progress_towards(nudge(TOP_RIGHT, -EPSILON, EPSILON)) < 0.0);
    }

    #[test]
    fn test_top_left_corner() {
        assert!(progress_towards(nudge(TOP_LEFT, EPSILON, -EPSILON)) > 0.0);
        assert!(progress_towards(nudge(TOP_LEFT, -1.0, -EPSILON)) < 0.0);
        assert!(progress_towards(nudge(TOP_LEFT, EPSILON, EPSILON)) < 0.0);
    }

    #[test]
    fn test_exact_edges_are_misses() {
        // Straight down the x = 1 face.
        let along_face = Ray::new(Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(unit_box().entry_progress(&along_face) <= 0.0);

        // Exactly through the far corner: enters and leaves at the same instant.
        assert!(progress_towards(BOTTOM_LEFT) <= 0.0);
    }

    #[test]
    fn test_box_behind_origin() {
        let away = Ray::new(RAY_ORIGIN, Vec3::Z);
        assert!(unit_box().entry_progress(&away) < 0.0);
    }

    #[test]
    fn test_origin_inside_box() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::X);
        let progress = unit_box().entry_progress(&ray);
        assert!((progress - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_points_pads_flat_boxes() {
        let flat = Aabb::from_points(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(flat.z.size() > 0.0);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(flat.entry_progress(&ray) > 0.0);
    }

    #[test]
    fn test_octants_cover_parent() {
        let parent = Aabb::from_points(Vec3::ZERO, Vec3::splat(2.0));

        let lower = parent.octant(0);
        assert_eq!(lower.min_corner(), Vec3::ZERO);
        assert_eq!(lower.max_corner(), Vec3::ONE);

        let upper = parent.octant(7);
        assert_eq!(upper.min_corner(), Vec3::ONE);
        assert_eq!(upper.max_corner(), Vec3::splat(2.0));

        let x_only = parent.octant(1);
        assert_eq!(x_only.min_corner(), Vec3::new(1.0, 0.0, 0.0));

        let union = (0..8)
            .map(|i| parent.octant(i))
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b));
        assert_eq!(union, parent);
    }

    #[test]
    fn test_overlaps_includes_shared_faces() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let touching = Aabb::from_points(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = Aabb::from_points(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));

        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_expand_catches_rays_in_face_plane() {
        // A ray running exactly along the x = 1 face never enters the box
        let ray = Ray::new(Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(unit_box().entry_progress(&ray) <= 0.0);
        assert!(unit_box().expand(0.0001).entry_progress(&ray) > 0.0);
    }

    #[test]
    fn test_finiteness() {
        assert!(Aabb::from_points(Vec3::ZERO, Vec3::ONE).is_finite());
        assert!(!Aabb::UNIVERSE.is_finite());
        assert!(Aabb::EMPTY.is_empty());
    }
}
