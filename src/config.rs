/// Order in which the two children of an internal node are visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    /// First child, then second child. Each child does its own box test.
    #[default]
    IndexOrder,
    /// Child whose box the ray enters first goes first; the other is skipped
    /// once the current hit is closer than its entry point.
    FrontToBack,
}

/// Build and query settings of a [`crate::Bvh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvhConfig {
    /// Nodes holding this many items or fewer are never split
    pub max_leaf_items: u32,
    pub traversal: TraversalOrder,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            max_leaf_items: 1,
            traversal: TraversalOrder::IndexOrder,
        }
    }
}

impl BvhConfig {
    #[inline]
    pub fn with_max_leaf_items(mut self, max_leaf_items: u32) -> Self {
        self.max_leaf_items = max_leaf_items.max(1);
        self
    }

    #[inline]
    pub fn with_traversal(mut self, traversal: TraversalOrder) -> Self {
        self.traversal = traversal;
        self
    }
}
