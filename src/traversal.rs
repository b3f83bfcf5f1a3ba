use smallvec::{smallvec, SmallVec};

use crate::{
    bvh::INLINE_STACK_SIZE, inplace_ray_triangle_intersect, Bvh, BvhNode, FastRayIntersect,
    InPlaceRayIntersect, NodeKind, Ray, RayIntersect, TraversalOrder,
};

/// Hook into a BVH query. Every method defaults to doing nothing.
pub trait TraversalObserver {
    /// A node's box was tested against the ray
    #[inline]
    fn aabb_tested(&mut self, _node_id: u32, _hit: bool) {}

    /// The ray entered a node and its contents are being processed
    #[inline]
    fn node_visited(&mut self, _node_id: u32, _node: &BvhNode) {}

    /// A triangle of a leaf was tested against the ray
    #[inline]
    fn triangle_tested(&mut self, _triangle_id: u32) {}
}

impl TraversalObserver for () {}

/// Counts the work done by queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub aabb_tests: u32,
    pub aabb_hits: u32,
    pub nodes_visited: u32,
    pub leaves_visited: u32,
    pub triangle_tests: u32,
}

impl TraversalObserver for TraversalStats {
    #[inline]
    fn aabb_tested(&mut self, _node_id: u32, hit: bool) {
        self.aabb_tests += 1;
        self.aabb_hits += hit as u32;
    }

    #[inline]
    fn node_visited(&mut self, _node_id: u32, node: &BvhNode) {
        self.nodes_visited += 1;
        self.leaves_visited += node.is_leaf() as u32;
    }

    #[inline]
    fn triangle_tested(&mut self, _triangle_id: u32) {
        self.triangle_tests += 1;
    }
}

impl<'a> Bvh<'a> {
    /// Shrink `ray.distance` to the nearest triangle hit. Left unchanged on a miss.
    #[inline]
    pub fn intersect(&self, ray: &mut Ray) {
        self.intersect_observed(ray, &mut ());
    }

    /// Same as [`Bvh::intersect`], reporting every box and triangle test to `observer`
    pub fn intersect_observed<O>(&self, ray: &mut Ray, observer: &mut O)
    where
        O: TraversalObserver,
    {
        match self.config().traversal {
            TraversalOrder::IndexOrder => self.intersect_index_order(ray, observer),
            TraversalOrder::FrontToBack => self.intersect_front_to_back(ray, observer),
        }
    }

    fn intersect_index_order<O>(&self, ray: &mut Ray, observer: &mut O)
    where
        O: TraversalObserver,
    {
        let mut stack: SmallVec<[u32; INLINE_STACK_SIZE]> = smallvec![Self::ROOT];

        while let Some(node_id) = stack.pop() {
            let node = &self.nodes()[node_id as usize];

            let hit = node.aabb.fast_ray_intersect(ray);
            observer.aabb_tested(node_id, hit);
            if !hit {
                continue;
            }

            observer.node_visited(node_id, node);
            match node.kind {
                NodeKind::Leaf { .. } => self.intersect_leaf(node, ray, observer),
                NodeKind::Internal { first_child } => {
                    // pushed second child first so the first child pops first
                    stack.push(first_child + 1);
                    stack.push(first_child);
                }
            }
        }
    }

    fn intersect_front_to_back<O>(&self, ray: &mut Ray, observer: &mut O)
    where
        O: TraversalObserver,
    {
        let root_entry = self.entry_distance(Self::ROOT, ray, observer);
        if root_entry == f32::INFINITY {
            return;
        }

        let mut stack: SmallVec<[(u32, f32); INLINE_STACK_SIZE]> =
            smallvec![(Self::ROOT, root_entry)];

        while let Some((node_id, entry)) = stack.pop() {
            // a closer hit was found after this node was pushed
            if entry >= ray.distance {
                continue;
            }

            let node = &self.nodes()[node_id as usize];
            observer.node_visited(node_id, node);
            match node.kind {
                NodeKind::Leaf { .. } => self.intersect_leaf(node, ray, observer),
                NodeKind::Internal { first_child } => {
                    let mut near = (first_child, self.entry_distance(first_child, ray, observer));
                    let mut far = (
                        first_child + 1,
                        self.entry_distance(first_child + 1, ray, observer),
                    );
                    if near.1 > far.1 {
                        std::mem::swap(&mut near, &mut far);
                    }

                    if far.1 != f32::INFINITY {
                        stack.push(far);
                    }
                    if near.1 != f32::INFINITY {
                        stack.push(near);
                    }
                }
            }
        }
    }

    #[inline]
    fn entry_distance<O>(&self, node_id: u32, ray: &Ray, observer: &mut O) -> f32
    where
        O: TraversalObserver,
    {
        let entry = self.nodes()[node_id as usize].aabb.ray_intersect(ray);
        observer.aabb_tested(node_id, entry != f32::INFINITY);
        entry
    }

    #[inline]
    fn intersect_leaf<O>(&self, node: &BvhNode, ray: &mut Ray, observer: &mut O)
    where
        O: TraversalObserver,
    {
        let Some(items) = node.items() else {
            return;
        };

        for &item in &self.item_refs()[items] {
            observer.triangle_tested(item);
            inplace_ray_triangle_intersect(&self.triangles()[item as usize], ray);
        }
    }
}

impl InPlaceRayIntersect for Bvh<'_> {
    #[inline]
    fn inplace_ray_intersect(&self, ray: &mut Ray) {
        self.intersect(ray);
    }
}
