use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be normalized, but it must have
/// non-zero length. Use [`Ray::try_new`] when the direction comes from
/// arbitrary geometry (e.g. `target - origin`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    ///
    /// The direction must be finite and non-zero; this is only checked in
    /// debug builds. Prefer [`Ray::try_new`] for computed directions.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(
            is_valid_direction(direction),
            "ray direction must be finite and non-zero, got {direction:?}"
        );
        Self { origin, direction }
    }

    /// Create a ray, returning `None` if the direction is zero-length or
    /// not finite.
    #[inline]
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if is_valid_direction(direction) && origin.is_finite() {
            Some(Self { origin, direction })
        } else {
            None
        }
    }

    /// Create a ray from `origin` towards `target`.
    #[inline]
    pub fn towards(origin: Vec3, target: Vec3) -> Option<Self> {
        Self::try_new(origin, target - origin)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[inline]
fn is_valid_direction(direction: Vec3) -> bool {
    direction.is_finite() && direction.length_squared() > 0.0
}
