use strum::IntoEnumIterator;

use crate::{Axis, Grow, Triangle, AABB, RAY_INTERSECT_EPSILON};

/// Candidate plane `axis = position` and its SAH cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub position: f32,
    pub cost: f32,
}

/// Evaluate the SAH cost of splitting `item_refs` at `axis = pos`.
///
/// Items whose centroid lies strictly below `pos` go left. Nothing is reordered.
/// The traversal cost term is left out, so the cost is `count * area` summed over both sides.
/// Empty sides cost nothing; a cost that is not strictly positive comes back as `f32::INFINITY`
/// so it can never be chosen.
pub fn evaluate_split(triangles: &[Triangle], item_refs: &[u32], axis: Axis, pos: f32) -> f32 {
    // determine triangle counts and bounds for this split candidate
    let mut left_box: AABB = Default::default();
    let mut right_box: AABB = Default::default();
    let mut left_count = 0_u32;
    let mut right_count = 0_u32;

    for &item in item_refs {
        let triangle = &triangles[item as usize];
        if triangle.centroid[axis] < pos {
            left_count += 1;
            left_box.grow(triangle);
        } else {
            right_count += 1;
            right_box.grow(triangle);
        }
    }

    let side_cost = |count: u32, aabb: &AABB| {
        if count > 0 {
            count as f32 * aabb.area()
        } else {
            0.0
        }
    };

    let cost = side_cost(left_count, &left_box) + side_cost(right_count, &right_box);

    if cost > 0.0 {
        cost
    } else {
        f32::INFINITY
    }
}

pub trait SplitPlaneStrategy {
    /// Pick a split plane for the items of a node whose box is `bounds`.
    /// `None` when no candidate has a finite cost.
    fn choose_split(triangles: &[Triangle], item_refs: &[u32], bounds: &AABB) -> Option<SplitPlane>;
}

/// Exhaustive SAH: every item centroid on every axis is a candidate. O(n^2) per node.
/// Ties keep the first candidate found, scanning X, Y, Z and items in order.
pub struct SahStrategy {}

impl SplitPlaneStrategy for SahStrategy {
    fn choose_split(triangles: &[Triangle], item_refs: &[u32], _bounds: &AABB) -> Option<SplitPlane> {
        let mut best: Option<SplitPlane> = None;

        for axis in Axis::iter() {
            for &item in item_refs {
                let candidate_pos = triangles[item as usize].centroid[axis];
                let cost = evaluate_split(triangles, item_refs, axis, candidate_pos);
                if cost < best.map_or(f32::INFINITY, |b| b.cost) {
                    best = Some(SplitPlane {
                        axis,
                        position: candidate_pos,
                        cost,
                    });
                }
            }
        }

        best
    }
}

/// Midpoint of the longest box axis
pub struct LongestExtentStrategy {}

impl SplitPlaneStrategy for LongestExtentStrategy {
    fn choose_split(triangles: &[Triangle], item_refs: &[u32], bounds: &AABB) -> Option<SplitPlane> {
        let extent = bounds.extent();
        let axis = Axis::largest(extent);
        let position = bounds.min[axis] + extent[axis] * 0.5;
        let cost = evaluate_split(triangles, item_refs, axis, position);

        cost.is_finite().then_some(SplitPlane {
            axis,
            position,
            cost,
        })
    }
}

/// Binned SAH over `BINS` equal intervals of the centroid bounds. O(n) per axis.
pub struct BinnedSahStrategy<const BINS: usize = 8> {}

impl<const BINS: usize> SplitPlaneStrategy for BinnedSahStrategy<BINS> {
    fn choose_split(triangles: &[Triangle], item_refs: &[u32], _bounds: &AABB) -> Option<SplitPlane> {
        assert!(BINS >= 2, "At least two intervals are needed");

        #[derive(Debug, Clone, Copy, Default)]
        struct Bin {
            bounds: AABB,
            tri_count: u32,
        }

        let mut centroid_bounds = AABB::default();
        for &item in item_refs {
            centroid_bounds.grow_point(triangles[item as usize].centroid);
        }

        let mut best_axis = Axis::X;
        let mut best_pos = 0.0_f32;
        let mut best_cost = f32::INFINITY;

        for axis in Axis::iter() {
            let bounds_min = centroid_bounds.min[axis];
            let bounds_max = centroid_bounds.max[axis];

            if approx::abs_diff_eq!(bounds_min, bounds_max, epsilon = RAY_INTERSECT_EPSILON) {
                continue;
            }

            let mut bins = [Bin::default(); BINS];
            let scale = BINS as f32 / (bounds_max - bounds_min);

            for &item in item_refs {
                let triangle = &triangles[item as usize];
                let bin_id = (BINS - 1).min(((triangle.centroid[axis] - bounds_min) * scale) as usize);
                let bin = &mut bins[bin_id];
                bin.tri_count += 1;
                bin.bounds.grow(triangle);
            }

            // plane i separates bins 0..=i from bins i + 1..BINS; only BINS - 1 planes are used
            let mut left_area = [0.0_f32; BINS];
            let mut right_area = [0.0_f32; BINS];
            let mut left_count = [0_u32; BINS];
            let mut right_count = [0_u32; BINS];

            let mut left_box = AABB::default();
            let mut right_box = AABB::default();
            let mut left_sum = 0_u32;
            let mut right_sum = 0_u32;

            for i in 0..(BINS - 1) {
                left_sum += bins[i].tri_count;
                left_count[i] = left_sum;
                left_box.grow(&bins[i].bounds);
                left_area[i] = left_box.area();

                right_sum += bins[BINS - 1 - i].tri_count;
                right_count[BINS - 2 - i] = right_sum;
                right_box.grow(&bins[BINS - 1 - i].bounds);
                right_area[BINS - 2 - i] = right_box.area();
            }

            let bin_width = (bounds_max - bounds_min) / BINS as f32;
            for i in 0..(BINS - 1) {
                if left_count[i] == 0 || right_count[i] == 0 {
                    continue;
                }
                let plane_cost =
                    left_count[i] as f32 * left_area[i] + right_count[i] as f32 * right_area[i];
                if plane_cost < best_cost {
                    best_pos = bounds_min + bin_width * (i + 1) as f32;
                    best_axis = axis;
                    best_cost = plane_cost;
                }
            }
        }

        if !best_cost.is_finite() {
            return None;
        }

        // Bin assignment and the `<` test of the partition can disagree right at the plane
        let cost = evaluate_split(triangles, item_refs, best_axis, best_pos);
        cost.is_finite().then_some(SplitPlane {
            axis: best_axis,
            position: best_pos,
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use approx::*;

    use crate::*;

    fn unit_triangle_at(offset: Vec3A) -> Triangle {
        Triangle::new(offset, offset + Vec3A::X, offset + Vec3A::Y)
    }

    fn two_clusters() -> Vec<Triangle> {
        (0..4)
            .map(|i| unit_triangle_at(Vec3A::new(0.0, 0.0, i as f32 * 0.1)))
            .chain((0..4).map(|i| unit_triangle_at(Vec3A::new(10.0, 0.0, i as f32 * 0.1))))
            .collect()
    }

    fn bounds_of(triangles: &[Triangle]) -> AABB {
        let mut aabb = AABB::default();
        triangles.iter().for_each(|tri| aabb.grow(tri));
        aabb
    }

    #[test]
    fn evaluate_counts_both_sides() {
        let triangles = two_clusters();
        let refs: Vec<u32> = (0..triangles.len() as u32).collect();

        // each cluster spans 1 x 1 x 0.3
        let cluster_area = 2.0 * (1.0 + 0.3 + 0.3);
        let cost = evaluate_split(&triangles, &refs, Axis::X, 5.0);
        assert_relative_eq!(cost, 8.0 * cluster_area, epsilon = 1e-4);
    }

    #[test]
    fn evaluate_one_sided_costs_like_leaf() {
        let triangles = two_clusters();
        let refs: Vec<u32> = (0..triangles.len() as u32).collect();

        let cost = evaluate_split(&triangles, &refs, Axis::X, -100.0);
        assert_relative_eq!(cost, 8.0 * bounds_of(&triangles).area());
    }

    #[test]
    fn evaluate_degenerate_is_infinite() {
        // Collinear triangles along x: every box has zero area
        let triangles = vec![
            Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::X * 2.0),
            Triangle::new(Vec3A::X * 3.0, Vec3A::X * 4.0, Vec3A::X * 5.0),
        ];
        let cost = evaluate_split(&triangles, &[0, 1], Axis::X, 2.5);
        assert!(cost.is_infinite());
    }

    #[test]
    fn evaluate_does_not_reorder() {
        let triangles = two_clusters();
        let refs: Vec<u32> = (0..triangles.len() as u32).rev().collect();
        let before = refs.clone();
        evaluate_split(&triangles, &refs, Axis::X, 5.0);
        assert_eq!(refs, before);
    }

    #[test]
    fn sah_separates_clusters() {
        let triangles = two_clusters();
        let refs: Vec<u32> = (0..triangles.len() as u32).collect();
        let bounds = bounds_of(&triangles);

        let split = SahStrategy::choose_split(&triangles, &refs, &bounds).unwrap();
        assert_eq!(split.axis, Axis::X);
        assert_relative_eq!(split.position, 10.0 + 1.0 / 3.0);
        assert!(split.cost < 8.0 * bounds.area());
    }

    #[test]
    fn sah_ties_keep_first_found() {
        // Symmetric in x and y: both axes give the same best cost, X comes first
        let triangles = vec![
            Triangle::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0), Vec3A::new(0.0, 1.0, 0.0)),
            Triangle::new(
                Vec3A::new(5.0, 5.0, 0.0),
                Vec3A::new(6.0, 5.0, 0.0),
                Vec3A::new(5.0, 6.0, 0.0),
            ),
        ];
        let split = SahStrategy::choose_split(&triangles, &[0, 1], &bounds_of(&triangles)).unwrap();
        assert_eq!(split.axis, Axis::X);
        assert_relative_eq!(split.position, triangles[1].centroid.x);
    }

    #[test]
    fn binned_separates_clusters() {
        let triangles = two_clusters();
        let refs: Vec<u32> = (0..triangles.len() as u32).collect();
        let bounds = bounds_of(&triangles);

        let split = BinnedSahStrategy::<8>::choose_split(&triangles, &refs, &bounds).unwrap();
        assert_eq!(split.axis, Axis::X);
        assert!(split.position > 1.0 && split.position <= 10.0 + 1.0 / 3.0);
        assert_relative_eq!(
            split.cost,
            evaluate_split(&triangles, &refs, Axis::X, split.position)
        );
    }

    #[test]
    fn binned_skips_coincident_centroids() {
        let tri = unit_triangle_at(Vec3A::ZERO);
        let triangles = vec![tri, tri, tri];
        let split = BinnedSahStrategy::<4>::choose_split(&triangles, &[0, 1, 2], &tri.bounds());
        assert!(split.is_none());
    }

    #[test]
    fn longest_extent_midpoint() {
        let triangles = two_clusters();
        let refs: Vec<u32> = (0..triangles.len() as u32).collect();
        let bounds = bounds_of(&triangles);

        let split = LongestExtentStrategy::choose_split(&triangles, &refs, &bounds).unwrap();
        assert_eq!(split.axis, Axis::X);
        assert_relative_eq!(split.position, 5.5);
    }
}
