//! Scene container and its spatial index.

use std::ops::{ControlFlow, Range};

use crate::hittable::{is_closer, Hittable, RayHit};
use crate::octree::Octree;
use crate::{ConvexPolygon, Shape, Sphere};
use lumo_core::{Color, OctreeConfig, PointLight};
use lumo_math::Ray;

/// Everything a render needs to know about the world: ambient light,
/// shapes and point lights.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    ambient: Color,
    shapes: Vec<Shape>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new(ambient: Color) -> Self {
        Self {
            ambient,
            ..Default::default()
        }
    }

    /// Add a shape and return its index.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> usize {
        self.shapes.push(shape.into());
        self.shapes.len() - 1
    }

    /// Add every triangle of `polygon`, returning their index range.
    pub fn add_polygon(&mut self, polygon: ConvexPolygon) -> Range<usize> {
        let start = self.shapes.len();
        self.shapes.extend(polygon.into_triangles());
        start..self.shapes.len()
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Add a white marker sphere at every light so lights show up in the
    /// image.
    pub fn add_light_markers(&mut self) {
        let markers: Vec<Shape> = self
            .lights
            .iter()
            .map(|light| Sphere::light_marker(light).into())
            .collect();
        self.shapes.extend(markers);
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Number of triangles among the scene's shapes.
    pub fn triangle_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Triangle(_)))
            .count()
    }
}

/// A scene paired with the acceleration structure used to query it.
///
/// The index borrows the scene, so the scene cannot change while an index
/// built from it is alive.
#[derive(Debug)]
pub struct SceneIndex<'s> {
    scene: &'s Scene,
    /// Octree over bounded shapes, when enabled
    octree: Option<Octree>,
    /// Shapes tested linearly next to the octree (planes)
    unbounded: Vec<usize>,
}

impl<'s> SceneIndex<'s> {
    /// Index `scene`. With `spatial_index_enabled` off, every query is a
    /// linear scan over all shapes.
    pub fn build(scene: &'s Scene, spatial_index_enabled: bool, config: &OctreeConfig) -> Self {
        if !spatial_index_enabled {
            return Self {
                scene,
                octree: None,
                unbounded: Vec::new(),
            };
        }

        let (bounded, unbounded): (Vec<usize>, Vec<usize>) =
            (0..scene.shapes.len()).partition(|&i| scene.shapes[i].is_bounded());
        let octree = Octree::from_bounds(
            bounded
                .into_iter()
                .map(|i| (i, scene.shapes[i].bounding_box())),
            config,
        );

        Self {
            scene,
            octree: Some(octree),
            unbounded,
        }
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    pub fn octree(&self) -> Option<&Octree> {
        self.octree.as_ref()
    }

    /// Nearest hit along `ray`. Identical to a linear scan whether or not
    /// the octree is used.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<RayHit<'s>> {
        let shapes = self.scene.shapes();

        let Some(octree) = &self.octree else {
            return linear_nearest(shapes, 0..shapes.len(), ray);
        };

        let mut best = octree.nearest_hit(shapes, ray);
        for &index in &self.unbounded {
            if let Some(hit) = shapes[index].intersect(ray) {
                if is_closer(hit.t, index, best.as_ref().map(|(i, h)| (*i, h.t))) {
                    best = Some((index, hit));
                }
            }
        }
        best.map(|(_, hit)| hit)
    }

    /// True if any shape other than a light marker is hit closer than
    /// `max_distance` (world units) along `ray`.
    pub fn occluded(&self, ray: &Ray, max_distance: f32) -> bool {
        let shapes = self.scene.shapes();
        let blocks = |index: usize| {
            let shape = &shapes[index];
            if shape.is_light_marker() {
                return ControlFlow::Continue(());
            }
            match shape.intersect(ray) {
                Some(hit) if hit.distance < max_distance => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        };

        match &self.octree {
            None => (0..shapes.len()).try_for_each(blocks).is_break(),
            Some(octree) => {
                let mut unbounded = self.unbounded.iter().copied();
                octree.visit_candidates(ray, blocks).is_break()
                    || unbounded.try_for_each(blocks).is_break()
            }
        }
    }
}

fn linear_nearest<'s>(
    shapes: &'s [Shape],
    indices: Range<usize>,
    ray: &Ray,
) -> Option<RayHit<'s>> {
    let mut best: Option<(usize, RayHit<'s>)> = None;
    for index in indices {
        if let Some(hit) = shapes[index].intersect(ray) {
            if is_closer(hit.t, index, best.as_ref().map(|(i, h)| (*i, h.t))) {
                best = Some((index, hit));
            }
        }
    }
    best.map(|(_, hit)| hit)
}
