extern crate glam;

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{Grow, AABB};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertex0: glam::Vec3A,
    pub vertex1: glam::Vec3A,
    pub vertex2: glam::Vec3A,
    pub centroid: glam::Vec3A,
}

impl Triangle {
    /// Zeroed Triangle
    pub const ZERO: Self = Triangle {
        vertex0: glam::Vec3A::ZERO,
        vertex1: glam::Vec3A::ZERO,
        vertex2: glam::Vec3A::ZERO,
        centroid: glam::Vec3A::ZERO,
    };

    #[inline]
    pub fn new(vertex0: glam::Vec3A, vertex1: glam::Vec3A, vertex2: glam::Vec3A) -> Triangle {
        Triangle {
            vertex0,
            vertex1,
            vertex2,
            centroid: (vertex0 + vertex1 + vertex2) / 3.0,
        }
    }

    #[inline]
    pub fn vertices(&self) -> [glam::Vec3A; 3] {
        [self.vertex0, self.vertex1, self.vertex2]
    }

    /// Per-component minimum of the vertices
    #[inline]
    pub fn min(&self) -> glam::Vec3A {
        self.vertex0.min(self.vertex1).min(self.vertex2)
    }

    /// Per-component maximum of the vertices
    #[inline]
    pub fn max(&self) -> glam::Vec3A {
        self.vertex0.max(self.vertex1).max(self.vertex2)
    }

    #[inline]
    pub fn bounds(&self) -> AABB {
        let mut aabb = AABB::default();
        aabb.grow(self);
        aabb
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Distribution<Triangle> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Triangle {
        Triangle::new(rng.gen(), rng.gen(), rng.gen())
    }
}
