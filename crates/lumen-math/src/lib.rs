#![warn(missing_docs)]

//! Math types for the lumen ray tracing core.
//!
//! Thin aliases around nalgebra plus the axis-aligned bounding box used by
//! the hierarchy builder and the traversal slab test.

mod aabb;

pub use aabb::{Aabb3, Axis};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A vector in 2D space.
pub type Vec2 = nalgebra::Vector2<f64>;

/// Distance threshold used by the intersection routines.
///
/// Hits closer than this to the ray origin are rejected to avoid
/// self-intersection, and triangle determinants below it count as parallel.
pub const EPSILON: f64 = 1e-7;
