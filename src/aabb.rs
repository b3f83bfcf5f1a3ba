use crate::Triangle;

/// Axis-aligned bounding box. The default box is empty (min = +inf, max = -inf).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: glam::Vec3A,
    pub max: glam::Vec3A,
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Things an AABB can be grown to contain
pub trait Grow<T: ?Sized> {
    fn grow(&mut self, value: &T);
}

impl AABB {
    pub const EMPTY: Self = Self {
        min: glam::Vec3A::INFINITY,
        max: glam::Vec3A::NEG_INFINITY,
    };

    #[inline]
    pub fn new(min: glam::Vec3A, max: glam::Vec3A) -> Self {
        Self { min, max }
    }

    /// Grow the box to contain a new point
    #[inline]
    pub fn grow_point(&mut self, point: glam::Vec3A) {
        self.max = self.max.max(point);
        self.min = self.min.min(point);
    }

    /// If the AABB is valid (min <= max)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// If `other` lies completely inside this box (boundaries included)
    #[inline]
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    #[inline]
    pub fn extent(&self) -> glam::Vec3A {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> glam::Vec3A {
        (self.min + self.max) * 0.5
    }

    /// Surface area of the box, the SAH weight.
    /// Only meaningful for valid boxes; the empty box yields a non-finite value.
    #[inline]
    pub fn area(&self) -> f32 {
        let e = self.extent();
        (e.x * e.y + e.x * e.z + e.y * e.z) * 2.0
    }
}

impl Grow<glam::Vec3A> for AABB {
    #[inline]
    fn grow(&mut self, point: &glam::Vec3A) {
        self.grow_point(*point);
    }
}

impl Grow<AABB> for AABB {
    #[inline]
    fn grow(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl Grow<Triangle> for AABB {
    #[inline]
    fn grow(&mut self, tri: &Triangle) {
        self.min = self.min.min(tri.min());
        self.max = self.max.max(tri.max());
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use approx::*;

    use crate::{Grow, AABB};

    #[test]
    fn empty_is_invalid() {
        assert!(!AABB::default().is_valid());
    }

    #[test]
    fn grow_points() {
        let mut aabb = AABB::default();
        aabb.grow(&Vec3A::new(1.0, -2.0, 3.0));
        assert!(aabb.is_valid());
        assert_eq!(aabb.min, aabb.max);

        aabb.grow(&Vec3A::new(-1.0, 4.0, 3.0));
        assert_eq!(aabb.min, Vec3A::new(-1.0, -2.0, 3.0));
        assert_eq!(aabb.max, Vec3A::new(1.0, 4.0, 3.0));
        assert_relative_eq!(aabb.center(), Vec3A::new(0.0, 1.0, 3.0));
    }

    #[test]
    fn surface_area() {
        let aabb = AABB::new(Vec3A::ZERO, Vec3A::new(1.0, 2.0, 3.0));
        assert_relative_eq!(aabb.area(), 2.0 * (2.0 + 3.0 + 6.0));

        // A flat box still has area, a segment does not
        let flat = AABB::new(Vec3A::ZERO, Vec3A::new(1.0, 1.0, 0.0));
        assert_relative_eq!(flat.area(), 2.0);
        let segment = AABB::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        assert_eq!(segment.area(), 0.0);
    }

    #[test]
    fn containment() {
        let outer = AABB::new(Vec3A::ZERO, Vec3A::ONE);
        let inner = AABB::new(Vec3A::splat(0.25), Vec3A::ONE);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));

        let mut merged = inner;
        merged.grow(&AABB::new(Vec3A::splat(-1.0), Vec3A::ZERO));
        assert!(merged.contains(&outer));
    }
}
