//! Surface area heuristic BVH over a static triangle set, answering nearest-hit ray queries.
//!
//! ```
//! use glam::Vec3A;
//! use tri_bvh::{Bvh, Ray, Triangle};
//!
//! let triangles = vec![Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::Y)];
//! let bvh = Bvh::new(&triangles).unwrap();
//!
//! let mut ray = Ray::infinite_ray(Vec3A::new(0.2, 0.2, -1.0), Vec3A::Z);
//! bvh.intersect(&mut ray);
//! assert!((ray.distance - 1.0).abs() < 1e-4);
//! ```

pub mod axis;
pub use axis::*;

pub mod triangle;
pub use triangle::*;

pub mod ray;
pub use ray::*;

pub mod aabb;
pub use aabb::*;

pub mod intersections;
pub use intersections::*;

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod node;
pub use node::*;

pub mod split;
pub use split::*;

pub mod bvh;
pub use bvh::*;

pub mod traversal;
pub use traversal::*;

pub mod scene;
