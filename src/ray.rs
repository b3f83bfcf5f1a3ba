/// Ray object. `distance` is the closest hit found so far; queries only ever shrink it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
    pub distance: f32,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Default::default(),
            direction: glam::Vec3A::X,
            distance: Self::NO_HIT,
        }
    }
}

impl Ray {
    /// Distance of a ray that has not hit anything yet
    pub const NO_HIT: f32 = f32::INFINITY;

    #[inline]
    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A, distance: f32) -> Self {
        Self {
            origin,
            direction,
            distance,
        }
    }

    /// Create a ray with infinite length (a proper ray)
    #[inline]
    pub fn infinite_ray(origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self::new(origin, direction, Self::NO_HIT)
    }

    /// Distance to the nearest hit, if any
    #[inline]
    pub fn hit(&self) -> Option<f32> {
        (self.distance < Self::NO_HIT).then_some(self.distance)
    }

    #[inline]
    pub fn at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }
}
