use std::ops::Range;

use crate::AABB;

/// What a node holds. Exactly one interpretation is valid per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Items `first_item..first_item + item_count` of the item reference array
    Leaf { first_item: u32, item_count: u32 },
    /// Children live at `first_child` and `first_child + 1`
    Internal { first_child: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    pub aabb: AABB,
    pub kind: NodeKind,
}

impl BvhNode {
    /// A leaf with an empty box; call `update_bounds` on the owning BVH to fill it.
    ///
    /// # Panic
    /// Panics if `item_count` is zero.
    #[inline]
    pub fn leaf(first_item: u32, item_count: u32) -> Self {
        assert!(item_count > 0, "Leaves must hold at least one item");
        Self {
            aabb: AABB::EMPTY,
            kind: NodeKind::Leaf {
                first_item,
                item_count,
            },
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Range into the item reference array, `None` for internal nodes
    #[inline]
    pub fn items(&self) -> Option<Range<usize>> {
        match self.kind {
            NodeKind::Leaf {
                first_item,
                item_count,
            } => Some(first_item as usize..(first_item + item_count) as usize),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Both child indices, `None` for leaves
    #[inline]
    pub fn children(&self) -> Option<[u32; 2]> {
        match self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { first_child } => Some([first_child, first_child + 1]),
        }
    }

    /// Number of items below a leaf; zero for internal nodes
    #[inline]
    pub fn item_count(&self) -> u32 {
        match self.kind {
            NodeKind::Leaf { item_count, .. } => item_count,
            NodeKind::Internal { .. } => 0,
        }
    }

    /// SAH cost of keeping this node as a leaf
    #[inline]
    pub fn leaf_cost(&self) -> f32 {
        self.item_count() as f32 * self.aabb.area()
    }
}

/// Append-only node storage. Indices handed out stay valid for the pool's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePool {
    nodes: Vec<BvhNode>,
    max_nodes: usize,
}

impl NodePool {
    /// Worst case node count of a binary tree over `item_count` leaves: 2N - 1
    #[inline]
    pub fn max_node_count(item_count: usize) -> usize {
        (2 * item_count).saturating_sub(1)
    }

    /// Pool with room for the worst case tree over `item_count` items
    pub fn with_item_count(item_count: usize) -> Self {
        let max_nodes = Self::max_node_count(item_count);
        Self {
            nodes: Vec::with_capacity(max_nodes),
            max_nodes,
        }
    }

    /// Append a node and return its index
    ///
    /// # Panic
    /// Panics if the pool already holds its worst case node count.
    #[inline]
    pub fn allocate(&mut self, node: BvhNode) -> u32 {
        assert!(
            self.nodes.len() < self.max_nodes,
            "Node pool exhausted ({} nodes)",
            self.max_nodes
        );
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        index
    }

    /// Append two sibling nodes. Returns the index of the first; the second is at index + 1.
    #[inline]
    pub fn allocate_pair(&mut self, first: BvhNode, second: BvhNode) -> u32 {
        let first_index = self.allocate(first);
        let second_index = self.allocate(second);
        debug_assert_eq!(second_index, first_index + 1);
        first_index
    }

    #[inline]
    pub fn get(&self, index: u32) -> Option<&BvhNode> {
        self.nodes.get(index as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    #[inline]
    pub fn as_slice(&self) -> &[BvhNode] {
        &self.nodes
    }
}

impl std::ops::Index<u32> for NodePool {
    type Output = BvhNode;

    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.nodes[index as usize]
    }
}

impl std::ops::IndexMut<u32> for NodePool {
    #[inline]
    fn index_mut(&mut self, index: u32) -> &mut Self::Output {
        &mut self.nodes[index as usize]
    }
}
