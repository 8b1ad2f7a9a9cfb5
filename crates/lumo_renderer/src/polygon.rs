//! Convex polygon meshes, triangulated at construction.

use std::sync::OnceLock;

use crate::error::{GeometryError, GeometryResult};
use crate::hittable::{is_closer, Hittable, RayHit};
use crate::octree::Octree;
use crate::{Shape, Triangle};
use lumo_core::{Material, OctreeConfig};
use lumo_math::{Aabb, Ray, Vec3};

/// A mesh of convex faces.
///
/// Each face with `n` vertices is fan-triangulated into `n - 2` triangles
/// sharing its first vertex. A polygon queried on its own builds an octree
/// over those triangles on first use; one added to a scene never does.
#[derive(Debug, Clone)]
pub struct ConvexPolygon {
    /// Always `Shape::Triangle`
    triangles: Vec<Shape>,
    bounds: Aabb,
    index_config: OctreeConfig,
    octree: OnceLock<Octree>,
}

impl ConvexPolygon {
    /// Build a flat-shaded polygon.
    ///
    /// `faces[i]` is the vertex count of face `i`; `vertex_indexes` lists
    /// the vertices of every face in order, so its length must be the sum of
    /// `faces`.
    pub fn with_surface_normals(
        material: Material,
        vertices: &[Vec3],
        faces: &[usize],
        vertex_indexes: &[usize],
    ) -> GeometryResult<Self> {
        Self::build(material, vertices, None, faces, vertex_indexes)
    }

    /// Build a smooth-shaded polygon with one normal per vertex.
    pub fn with_vertex_normals(
        material: Material,
        vertices: &[Vec3],
        vertex_normals: &[Vec3],
        faces: &[usize],
        vertex_indexes: &[usize],
    ) -> GeometryResult<Self> {
        if vertex_normals.len() != vertices.len() {
            return Err(GeometryError::NormalCountMismatch {
                vertices: vertices.len(),
                normals: vertex_normals.len(),
            });
        }
        Self::build(material, vertices, Some(vertex_normals), faces, vertex_indexes)
    }

    /// A box spanning x and y in [-1, 1] and z in [-1, 0], made of six quads.
    pub fn cube(material: Material) -> GeometryResult<Self> {
        let vertices = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ];
        #[rustfmt::skip]
        let vertex_indexes = [
            0, 1, 2, 3, // front
            3, 2, 6, 7, // top
            0, 4, 5, 1, // bottom
            0, 3, 7, 4, // left
            1, 5, 6, 2, // right
            4, 5, 6, 7, // back
        ];
        Self::with_surface_normals(material, &vertices, &[4; 6], &vertex_indexes)
    }

    fn build(
        material: Material,
        vertices: &[Vec3],
        vertex_normals: Option<&[Vec3]>,
        faces: &[usize],
        vertex_indexes: &[usize],
    ) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if faces.is_empty() {
            return Err(GeometryError::NoFaces);
        }
        if let Some((face, &count)) = faces.iter().enumerate().find(|&(_, &n)| n < 3) {
            return Err(GeometryError::FaceTooSmall { face, count });
        }

        let expected: usize = faces.iter().sum();
        if vertex_indexes.len() != expected {
            return Err(GeometryError::IndexCountMismatch {
                expected,
                found: vertex_indexes.len(),
            });
        }
        if let Some(&index) = vertex_indexes.iter().find(|&&i| i >= vertices.len()) {
            return Err(GeometryError::VertexIndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let triangle_count: usize = faces.iter().map(|n| n - 2).sum();
        let mut triangles = Vec::with_capacity(triangle_count);

        let mut start = 0;
        for &face_len in faces {
            let face = &vertex_indexes[start..start + face_len];
            for i in 0..face_len - 2 {
                let corners = [face[0], face[i + 1], face[i + 2]];
                let points = corners.map(|c| vertices[c]);
                let triangle = match vertex_normals {
                    None => Triangle::new(points, material)?,
                    Some(normals) => Triangle::with_vertex_normals(
                        points,
                        corners.map(|c| normals[c]),
                        material,
                    )?,
                };
                triangles.push(Shape::Triangle(triangle));
            }
            start += face_len;
        }

        let bounds = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, t| Aabb::surrounding(&acc, &t.bounding_box()));

        Ok(Self {
            triangles,
            bounds,
            index_config: OctreeConfig::default(),
            octree: OnceLock::new(),
        })
    }

    /// Use different octree limits for this polygon's own index.
    pub fn with_index_config(mut self, config: &OctreeConfig) -> Self {
        self.index_config = *config;
        self.octree = OnceLock::new();
        self
    }

    pub fn triangles(&self) -> &[Shape] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Consume the polygon, yielding its triangles.
    pub fn into_triangles(self) -> Vec<Shape> {
        self.triangles
    }

    /// Nearest hit over the triangles, through the octree or a linear scan.
    pub fn intersect_with(&self, ray: &Ray, use_index: bool) -> Option<RayHit<'_>> {
        if use_index {
            self.octree()
                .nearest_hit(&self.triangles, ray)
                .map(|(_, hit)| hit)
        } else {
            self.intersect_linear(ray)
        }
    }

    fn octree(&self) -> &Octree {
        self.octree
            .get_or_init(|| Octree::build(&self.triangles, &self.index_config))
    }

    fn intersect_linear(&self, ray: &Ray) -> Option<RayHit<'_>> {
        let mut best: Option<(usize, RayHit<'_>)> = None;
        for (index, triangle) in self.triangles.iter().enumerate() {
            if let Some(hit) = triangle.intersect(ray) {
                if is_closer(hit.t, index, best.as_ref().map(|(i, h)| (*i, h.t))) {
                    best = Some((index, hit));
                }
            }
        }
        best.map(|(_, hit)| hit)
    }
}

impl Hittable for ConvexPolygon {
    fn intersect(&self, ray: &Ray) -> Option<RayHit<'_>> {
        self.intersect_with(ray, true)
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}
