extern crate glam;

use log::{debug, log_enabled, trace, Level};
use smallvec::{smallvec, SmallVec};

use crate::{
    Axis, BuildError, BvhConfig, BvhNode, Grow, NodeKind, NodePool, SahStrategy,
    SplitPlaneStrategy, Triangle, AABB,
};

/// Max stack size kept inline for build and traverse operations; deeper trees spill to the heap
pub(crate) const INLINE_STACK_SIZE: usize = 64;

/// Partition `item_refs` in place so items with `centroid[axis] < split_pos` come first.
/// Returns the number of items on the left. Order within each side is not preserved.
pub fn partition(triangles: &[Triangle], item_refs: &mut [u32], axis: Axis, split_pos: f32) -> usize {
    // i: first unclassified item, j: one past the last unclassified item
    let mut i = 0;
    let mut j = item_refs.len();
    while i < j {
        if triangles[item_refs[i] as usize].centroid[axis] < split_pos {
            i += 1;
        } else {
            j -= 1;
            item_refs.swap(i, j);
        }
    }
    i
}

/// Bounding volume hierarchy over a borrowed triangle slice.
///
/// The triangles are referenced by index and never moved; the BVH owns a permutation
/// of those indices (`item_refs`) and a flat pool of nodes rooted at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh<'a> {
    triangles: &'a [Triangle],
    item_refs: Vec<u32>,
    nodes: NodePool,
    config: BvhConfig,
}

impl<'a> Bvh<'a> {
    pub const ROOT: u32 = 0;

    /// Largest triangle count whose worst case node count (2N - 1) fits in a `u32` index
    pub const MAX_TRIANGLES: usize = 1 << 31;

    /// Build with the exhaustive SAH strategy and the default configuration
    pub fn new(triangles: &'a [Triangle]) -> Result<Self, BuildError> {
        Self::build::<SahStrategy>(triangles, BvhConfig::default())
    }

    pub fn build<Strat>(triangles: &'a [Triangle], config: BvhConfig) -> Result<Self, BuildError>
    where
        Strat: SplitPlaneStrategy,
    {
        let tri_count = triangles.len();
        if tri_count == 0 {
            return Err(BuildError::EmptyScene);
        }
        if tri_count > Self::MAX_TRIANGLES {
            return Err(BuildError::TooManyTriangles {
                count: tri_count,
                max: Self::MAX_TRIANGLES,
            });
        }

        let mut bvh = Self {
            triangles,
            item_refs: (0..tri_count as u32).collect(),
            nodes: NodePool::with_item_count(tri_count),
            config,
        };

        let root = bvh.nodes.allocate(BvhNode::leaf(0, tri_count as u32));
        debug_assert_eq!(root, Self::ROOT);
        bvh.update_bounds(root);
        bvh.subdivide::<Strat>(root);

        if log_enabled!(Level::Debug) {
            debug!(
                "Built BVH over {} triangles: {} nodes, {} leaves, depth {}",
                tri_count,
                bvh.nodes.len(),
                bvh.leaf_count(),
                bvh.depth()
            );
        }

        Ok(bvh)
    }

    /// Recompute the box of a leaf from its items
    ///
    /// # Panic
    /// Panics on internal nodes.
    fn update_bounds(&mut self, node_id: u32) {
        let node = &mut self.nodes[node_id];
        let Some(items) = node.items() else {
            panic!("Not valid for internal nodes");
        };

        node.aabb = Default::default();
        for &item in &self.item_refs[items] {
            node.aabb.grow(&self.triangles[item as usize]);
        }
    }

    /// Split nodes until no split pays off. Depth first, left child before right child.
    fn subdivide<Strat>(&mut self, node_id: u32)
    where
        Strat: SplitPlaneStrategy,
    {
        let mut stack: SmallVec<[u32; INLINE_STACK_SIZE]> = smallvec![node_id];
        while let Some(node_id) = stack.pop() {
            if let Some([left_child, right_child]) = self.split_node::<Strat>(node_id) {
                stack.push(right_child);
                stack.push(left_child);
            }
        }
    }

    /// Try to turn a leaf into an internal node with two leaf children.
    /// Returns the children, or `None` if the node stays a leaf.
    fn split_node<Strat>(&mut self, node_id: u32) -> Option<[u32; 2]>
    where
        Strat: SplitPlaneStrategy,
    {
        let node = self.nodes[node_id];
        let NodeKind::Leaf {
            first_item,
            item_count,
        } = node.kind
        else {
            panic!("Not valid for internal nodes");
        };

        if item_count <= self.config.max_leaf_items {
            return None;
        }

        let triangles = self.triangles;
        let first = first_item as usize;
        let items = &mut self.item_refs[first..first + item_count as usize];

        let split = Strat::choose_split(triangles, items, &node.aabb)?;

        // if splitting doesn't improve, no need to subdivide
        let leaf_cost = node.leaf_cost();
        if split.cost >= leaf_cost {
            trace!(
                "Node {node_id}: keeping {item_count} items, split cost {} >= leaf cost {leaf_cost}",
                split.cost
            );
            return None;
        }

        let left_count = partition(triangles, items, split.axis, split.position) as u32;

        // One side is empty
        if left_count == 0 || left_count == item_count {
            return None;
        }

        let left_child = self.nodes.allocate_pair(
            BvhNode::leaf(first_item, left_count),
            BvhNode::leaf(first_item + left_count, item_count - left_count),
        );
        let right_child = left_child + 1;
        self.update_bounds(left_child);
        self.update_bounds(right_child);

        self.nodes[node_id].kind = NodeKind::Internal {
            first_child: left_child,
        };

        trace!(
            "Node {node_id}: split {item_count} items on {:?} at {} into {left_count} + {}",
            split.axis,
            split.position,
            item_count - left_count
        );

        Some([left_child, right_child])
    }

    #[inline]
    pub fn triangles(&self) -> &'a [Triangle] {
        self.triangles
    }

    /// Permutation of triangle indices; every leaf owns a contiguous range of it
    #[inline]
    pub fn item_refs(&self) -> &[u32] {
        &self.item_refs
    }

    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        self.nodes.as_slice()
    }

    #[inline]
    pub fn node(&self, node_id: u32) -> Option<&BvhNode> {
        self.nodes.get(node_id)
    }

    #[inline]
    pub fn root(&self) -> &BvhNode {
        &self.nodes[Self::ROOT]
    }

    #[inline]
    pub fn bounds(&self) -> AABB {
        self.root().aabb
    }

    #[inline]
    pub fn centroid(&self) -> glam::Vec3A {
        self.bounds().center()
    }

    #[inline]
    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// Triangle indices of a leaf, `None` for internal or unknown nodes
    pub fn leaf_items(&self, node_id: u32) -> Option<&[u32]> {
        let items = self.nodes.get(node_id)?.items()?;
        Some(&self.item_refs[items])
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of nodes on the longest root to leaf path
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: SmallVec<[(u32, usize); INLINE_STACK_SIZE]> =
            smallvec![(Self::ROOT, 1)];
        while let Some((node_id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(children) = self.nodes[node_id].children() {
                stack.extend(children.map(|child| (child, depth + 1)));
            }
        }
        max_depth
    }
}
