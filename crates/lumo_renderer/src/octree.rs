//! Octree acceleration structure.
//!
//! Space is split recursively into eight equal octants. Nodes live in a flat
//! arena and refer to their children by index; leaves hold indices into the
//! primitive slice the tree was built from, never the primitives themselves.
//!
//! A primitive whose box straddles an octant boundary is listed in every
//! octant it touches, so nothing is lost at the seams.

use std::ops::ControlFlow;

use crate::hittable::{is_closer, Hittable, RayHit};
use lumo_core::OctreeConfig;
use lumo_math::{Aabb, Ray};

/// Slack added to node boxes during traversal so rays running exactly along
/// an octant face still enter the nodes on both sides of it.
const TRAVERSAL_PADDING: f32 = 0.0001;

/// Index of a node in the octree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// A single octree node.
///
/// Internal nodes have at least one child and no items. Leaves have no
/// children.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    bounds: Aabb,
    depth: u32,
    children: [Option<NodeId>; 8],
    items: Vec<usize>,
}

impl OctreeNode {
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Primitive indices held by this node (empty for internal nodes).
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }
}

/// Octree over a primitive collection.
#[derive(Debug, Clone, Default)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    root: Option<NodeId>,
}

impl Octree {
    /// Build an octree over `primitives`. Indices in the tree are positions
    /// in that slice.
    ///
    /// Every primitive must have a finite bounding box.
    pub fn build<T: Hittable>(primitives: &[T], config: &OctreeConfig) -> Self {
        Self::from_bounds(
            primitives
                .iter()
                .enumerate()
                .map(|(i, p)| (i, p.bounding_box())),
            config,
        )
    }

    /// Build an octree from `(index, bounding box)` pairs.
    ///
    /// Entries with a non-finite or empty box are skipped.
    pub fn from_bounds(
        entries: impl IntoIterator<Item = (usize, Aabb)>,
        config: &OctreeConfig,
    ) -> Self {
        let members: Vec<(usize, Aabb)> = entries
            .into_iter()
            .filter(|(_, bbox)| bbox.is_finite() && !bbox.is_empty())
            .collect();

        let mut tree = Octree::default();
        if members.is_empty() {
            return tree;
        }

        let region = members
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b)| Aabb::surrounding(&acc, b));

        let root = tree.build_node(region, 0, members, config);
        tree.root = Some(root);

        log::debug!(
            "Octree built: {} nodes, {} leaves, depth {}, {} leaf entries",
            tree.node_count(),
            tree.leaf_count(),
            tree.max_depth(),
            tree.nodes.iter().map(|n| n.items.len()).sum::<usize>()
        );

        tree
    }

    fn build_node(
        &mut self,
        region: Aabb,
        depth: u32,
        members: Vec<(usize, Aabb)>,
        config: &OctreeConfig,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(OctreeNode {
            bounds: region,
            depth,
            children: [None; 8],
            items: Vec::new(),
        });

        if members.len() > config.max_leaf_size && depth < config.max_depth {
            let split: Vec<(usize, Aabb, Vec<(usize, Aabb)>)> = (0..8)
                .map(|octant| {
                    let child_region = region.octant(octant);
                    let child_members: Vec<_> = members
                        .iter()
                        .filter(|(_, bbox)| bbox.overlaps(&child_region))
                        .copied()
                        .collect();
                    (octant, child_region, child_members)
                })
                .filter(|(_, _, m)| !m.is_empty())
                .collect();

            // Splitting only helps if some child ends up with fewer members
            // than this node.
            if split.iter().any(|(_, _, m)| m.len() < members.len()) {
                for (octant, child_region, child_members) in split {
                    let child = self.build_node(child_region, depth + 1, child_members, config);
                    self.nodes[id.0].children[octant] = Some(child);
                }
                return id;
            }
        }

        self.nodes[id.0].items = members.into_iter().map(|(i, _)| i).collect();
        id
    }

    /// True if the tree holds no primitives; every query misses.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Deepest node depth (root is 0).
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.map(|id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.nodes[id.0]
    }

    /// Children of `node` in octant order, skipping empty octants.
    pub fn children<'t>(&'t self, node: &'t OctreeNode) -> impl Iterator<Item = &'t OctreeNode> {
        node.child_ids().map(move |id| self.node(id))
    }

    /// Nearest hit among `primitives`, which must be the slice the tree was
    /// built from.
    ///
    /// Children are visited front to back and traversal stops once the best
    /// hit lies before the next child's entry point. Equal-`t` hits resolve
    /// to the lowest primitive index, matching a linear scan.
    pub fn nearest_hit<'a, T: Hittable>(
        &self,
        primitives: &'a [T],
        ray: &Ray,
    ) -> Option<(usize, RayHit<'a>)> {
        let root = self.root?;
        let mut best: Option<(usize, RayHit<'a>)> = None;
        if padded(&self.node(root).bounds).entry_progress(ray) > 0.0 {
            self.nearest_in(root, primitives, ray, &mut best);
        }
        best
    }

    fn nearest_in<'a, T: Hittable>(
        &self,
        id: NodeId,
        primitives: &'a [T],
        ray: &Ray,
        best: &mut Option<(usize, RayHit<'a>)>,
    ) {
        let node = self.node(id);

        if node.is_leaf() {
            for &index in &node.items {
                if let Some(hit) = primitives[index].intersect(ray) {
                    if is_closer(hit.t, index, best.as_ref().map(|(i, h)| (*i, h.t))) {
                        *best = Some((index, hit));
                    }
                }
            }
            return;
        }

        // (entry parameter, child) for every child the ray enters
        let mut entered: Vec<(f32, NodeId)> = node
            .child_ids()
            .filter_map(|child| {
                let span = padded(&self.node(child).bounds).ray_span(ray);
                let entry = span.min.max(0.0);
                (span.max - entry > 0.0).then_some((entry, child))
            })
            .collect();
        entered.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (entry, child) in entered {
            if matches!(best, Some((_, hit)) if hit.t < entry) {
                break;
            }
            self.nearest_in(child, primitives, ray, best);
        }
    }

    /// Call `visit` with every primitive index held by a leaf the ray
    /// enters, in no particular order, until it returns `Break`.
    ///
    /// An index can be reported more than once when its primitive spans
    /// several leaves.
    pub fn visit_candidates<F>(&self, ray: &Ray, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        let Some(root) = self.root else {
            return ControlFlow::Continue(());
        };

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if padded(&node.bounds).entry_progress(ray) <= 0.0 {
                continue;
            }
            for &index in &node.items {
                visit(index)?;
            }
            stack.extend(node.child_ids());
        }

        ControlFlow::Continue(())
    }
}

#[inline]
fn padded(bounds: &Aabb) -> Aabb {
    bounds.expand(TRAVERSAL_PADDING)
}
