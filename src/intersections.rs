use crate::{Ray, Triangle, AABB};

/// Objects capable of being intersected by a ray in place
pub trait InPlaceRayIntersect {
    fn inplace_ray_intersect(&self, ray: &mut Ray);
}

/// Epsilon used for ray intersections
pub const RAY_INTERSECT_EPSILON: f32 = 0.0001;

/// Intersect a triangle with a ray, then store the intersection result in the ray.
/// Möller–Trumbore: <https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm>
pub fn inplace_ray_triangle_intersect(tri: &Triangle, ray: &mut Ray) {
    let edge1 = tri.vertex1 - tri.vertex0;
    let edge2 = tri.vertex2 - tri.vertex0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a > -RAY_INTERSECT_EPSILON && a < RAY_INTERSECT_EPSILON {
        // ray parallel to triangle
        return;
    }
    let f = 1.0 / a;
    let s = ray.origin - tri.vertex0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return;
    }
    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return;
    }
    let t = f * edge2.dot(q);
    if t > RAY_INTERSECT_EPSILON {
        ray.distance = ray.distance.min(t);
    }
}

/// Slab test. Returns the entry distance, or `f32::INFINITY` on a miss.
///
/// A box whose entry lies at or beyond the current `ray.distance` is a miss as well.
/// Zero direction components divide to infinities. An origin lying exactly on a slab
/// plane of such an axis gives `0 * inf = NaN`; that axis is then left unconstrained.
#[inline]
pub fn ray_aabb_intersect(aabb: &AABB, ray: &Ray) -> f32 {
    let inv_direction = ray.direction.recip();
    let t1 = (aabb.min - ray.origin) * inv_direction;
    let t2 = (aabb.max - ray.origin) * inv_direction;

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    for axis in 0..3 {
        let (near, far) = (t1[axis], t2[axis]);
        if near.is_nan() || far.is_nan() {
            continue;
        }
        tmin = tmin.max(near.min(far));
        tmax = tmax.min(near.max(far));
    }

    if tmax >= tmin && tmin < ray.distance && tmax > 0.0 {
        tmin
    } else {
        f32::INFINITY
    }
}

/// Objects that report the entry distance of a ray (`f32::INFINITY` on a miss)
pub trait RayIntersect {
    fn ray_intersect(&self, ray: &Ray) -> f32;
}

/// Objects that only report whether a ray enters them
pub trait FastRayIntersect {
    fn fast_ray_intersect(&self, ray: &Ray) -> bool;
}

impl RayIntersect for AABB {
    #[inline]
    fn ray_intersect(&self, ray: &Ray) -> f32 {
        ray_aabb_intersect(self, ray)
    }
}

impl FastRayIntersect for AABB {
    #[inline]
    fn fast_ray_intersect(&self, ray: &Ray) -> bool {
        ray_aabb_intersect(self, ray) != f32::INFINITY
    }
}

impl InPlaceRayIntersect for Triangle {
    #[inline]
    fn inplace_ray_intersect(&self, ray: &mut Ray) {
        inplace_ray_triangle_intersect(self, ray);
    }
}

impl InPlaceRayIntersect for [Triangle] {
    #[inline]
    fn inplace_ray_intersect(&self, ray: &mut Ray) {
        brute_force_intersect(self, ray);
    }
}

/// Test every triangle. Reference answer for the BVH.
pub fn brute_force_intersect(triangles: &[Triangle], ray: &mut Ray) {
    triangles
        .iter()
        .for_each(|tri| inplace_ray_triangle_intersect(tri, ray));
}

#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use glam::Vec3A;

    use approx::*;

    use crate::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::Y)
    }

    /// Random triangle whose plane is perpendicular to the line from the origin to its centroid
    fn facing_triangle<R: Rng>(rng: &mut R) -> Triangle {
        let centroid = loop {
            let candidate = rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0);
            if candidate.length() > 0.5 {
                break candidate;
            }
        };
        let (u, w) = centroid.normalize().any_orthonormal_pair();
        let (u, w) = (u * rng.gen_range(0.1..2.0), w * rng.gen_range(0.1..2.0));
        Triangle::new(centroid + u, centroid + w, centroid - u - w)
    }

    #[test]
    fn ray_triangle_intersect() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..64 {
            let tri = facing_triangle(&mut rng);
            let mut ray = Ray::infinite_ray(Vec3A::ZERO, tri.centroid.normalize_or_zero());

            tri.inplace_ray_intersect(&mut ray);

            assert_abs_diff_eq!(
                ray.distance,
                tri.centroid.distance(Vec3A::ZERO),
                epsilon = RAY_INTERSECT_EPSILON
            );
        }
    }

    #[test]
    fn ray_triangle_no_intersect() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..64 {
            let tri = facing_triangle(&mut rng);
            let mut ray = Ray::infinite_ray(Vec3A::ZERO, -tri.centroid.normalize_or_zero());

            tri.inplace_ray_intersect(&mut ray);

            assert!(ray.distance.is_infinite());
        }
    }

    #[test]
    fn keeps_closer_hit() {
        let tri = unit_triangle();
        let mut ray = Ray::new(Vec3A::new(0.2, 0.2, -1.0), Vec3A::Z, 0.5);
        tri.inplace_ray_intersect(&mut ray);
        assert_eq!(ray.distance, 0.5);
    }

    #[test]
    fn parallel_ray_misses() {
        let tri = unit_triangle();
        let mut ray = Ray::infinite_ray(Vec3A::new(-1.0, 0.2, 0.0), Vec3A::X);
        tri.inplace_ray_intersect(&mut ray);
        assert_eq!(ray.hit(), None);
    }

    #[test]
    fn degenerate_triangle_misses() {
        let tri = Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::X * 2.0);
        let mut ray = Ray::infinite_ray(Vec3A::new(0.5, 0.0, -1.0), Vec3A::Z);
        tri.inplace_ray_intersect(&mut ray);
        assert_eq!(ray.hit(), None);
    }

    #[test]
    fn hit_behind_origin_misses() {
        let tri = unit_triangle();
        let mut ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, 1.0), Vec3A::Z);
        tri.inplace_ray_intersect(&mut ray);
        assert_eq!(ray.hit(), None);
    }

    #[test]
    fn aabb_entry_distance() {
        let aabb = AABB::new(Vec3A::ZERO, Vec3A::ONE);
        let ray = Ray::infinite_ray(Vec3A::new(0.5, 0.5, -2.0), Vec3A::Z);
        assert_relative_eq!(aabb.ray_intersect(&ray), 2.0);
        assert!(aabb.fast_ray_intersect(&ray));
    }

    #[test]
    fn aabb_origin_inside() {
        let aabb = AABB::new(Vec3A::ZERO, Vec3A::ONE);
        let ray = Ray::infinite_ray(Vec3A::splat(0.5), Vec3A::ONE.normalize());
        assert!(aabb.ray_intersect(&ray) < 0.0);
        assert!(aabb.fast_ray_intersect(&ray));
    }

    #[test]
    fn aabb_misses() {
        let aabb = AABB::new(Vec3A::ZERO, Vec3A::ONE);

        let beside = Ray::infinite_ray(Vec3A::new(5.0, 5.0, -1.0), Vec3A::Z);
        assert!(!aabb.fast_ray_intersect(&beside));

        let behind = Ray::infinite_ray(Vec3A::new(0.5, 0.5, 2.0), Vec3A::Z);
        assert!(!aabb.fast_ray_intersect(&behind));

        // Box lies beyond the hit we already have
        let occluded = Ray::new(Vec3A::new(0.5, 0.5, -3.0), Vec3A::Z, 1.0);
        assert!(!aabb.fast_ray_intersect(&occluded));
    }

    #[test]
    fn aabb_flat_box_with_axis_ray() {
        // Zero thickness on z and a ray with zero x/y direction components
        let aabb = AABB::new(Vec3A::ZERO, Vec3A::new(1.0, 1.0, 0.0));
        let ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, -1.0), Vec3A::Z);
        assert_relative_eq!(aabb.ray_intersect(&ray), 1.0);

        // Origin exactly on a slab boundary
        let edge = Ray::infinite_ray(Vec3A::new(0.0, 0.5, -1.0), Vec3A::Z);
        assert!(aabb.fast_ray_intersect(&edge));
    }

    #[test]
    fn brute_force_keeps_minimum() {
        let at_depth = |z: f32| {
            Triangle::new(
                Vec3A::new(0.0, 0.0, z),
                Vec3A::new(1.0, 0.0, z),
                Vec3A::new(0.0, 1.0, z),
            )
        };
        let near = at_depth(1.0);
        let far = at_depth(3.0);

        for triangles in [[near, far], [far, near]] {
            let mut ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, 0.0), Vec3A::Z);
            triangles[..].inplace_ray_intersect(&mut ray);
            assert_relative_eq!(ray.distance, 1.0);
        }
    }
}
