//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::error::{GeometryError, GeometryResult};
use crate::hittable::SurfaceHit;
use lumo_core::Material;
use lumo_math::{Aabb, Ray, Vec3};

/// Relative threshold on the Möller-Trumbore determinant below which a ray
/// counts as parallel to the face.
const PARALLEL_TOLERANCE: f32 = 1e-7;

/// Per-triangle shading normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleNormals {
    /// One face normal from the vertex winding
    Flat(Vec3),
    /// Per-vertex normals, interpolated across the face
    Smooth([Vec3; 3]),
}

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Vec3; 3],
    normals: TriangleNormals,
    /// Pre-computed face normal (unit length)
    face_normal: Vec3,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    /// Create a flat-shaded triangle. The normal follows the right-hand rule
    /// over `v0 -> v1 -> v2`.
    pub fn new(vertices: [Vec3; 3], material: Material) -> GeometryResult<Self> {
        let face_normal = face_normal(vertices)?;
        Ok(Self {
            vertices,
            normals: TriangleNormals::Flat(face_normal),
            face_normal,
            material,
            bbox: bounds(vertices),
        })
    }

    /// Create a smooth-shaded triangle with one normal per vertex.
    pub fn with_vertex_normals(
        vertices: [Vec3; 3],
        normals: [Vec3; 3],
        material: Material,
    ) -> GeometryResult<Self> {
        let face_normal = face_normal(vertices)?;
        for n in normals {
            if !n.is_finite() || n.length_squared() == 0.0 {
                return Err(GeometryError::InvalidNormal(n));
            }
        }

        Ok(Self {
            vertices,
            normals: TriangleNormals::Smooth(normals.map(Vec3::normalize)),
            face_normal,
            material,
            bbox: bounds(vertices),
        })
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    pub fn normals(&self) -> TriangleNormals {
        self.normals
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Möller-Trumbore ray-triangle intersection algorithm.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle. `a` scales with |dir| |edge1| |edge2|.
        let scale = ray.direction().length() * edge1.length() * edge2.length();
        if a.abs() <= PARALLEL_TOLERANCE * scale {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - v0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !(t > 0.0) {
            return None;
        }

        Some(SurfaceHit {
            t,
            normal: self.normal_at(u, v),
        })
    }

    /// Shading normal at barycentric coordinates (u, v).
    fn normal_at(&self, u: f32, v: f32) -> Vec3 {
        match self.normals {
            TriangleNormals::Flat(n) => n,
            TriangleNormals::Smooth([n0, n1, n2]) => {
                let interpolated = (1.0 - u - v) * n0 + u * n1 + v * n2;
                // Opposing vertex normals can cancel out
                interpolated.try_normalize().unwrap_or(self.face_normal)
            }
        }
    }
}

fn face_normal(vertices: [Vec3; 3]) -> GeometryResult<Vec3> {
    let [v0, v1, v2] = vertices;
    (v1 - v0)
        .cross(v2 - v0)
        .try_normalize()
        .ok_or(GeometryError::DegenerateTriangle(vertices))
}

fn bounds(vertices: [Vec3; 3]) -> Aabb {
    let [v0, v1, v2] = vertices;
    let min = v0.min(v1).min(v2);
    let max = v0.max(v1).max(v2);

    // Pad so hits on the boundary never fall outside the box
    let delta = 0.0001;
    Aabb::from_points(min - Vec3::splat(delta), max + Vec3::splat(delta))
}
