#![warn(missing_docs)]

//! Closest-hit ray queries for triangle scenes.
//!
//! This crate builds a bounding volume hierarchy over every triangle of a
//! [`lumen_scene::Scene`] and answers "what is the nearest surface along
//! this ray" queries, falling back to testing every primitive when the
//! hierarchy is disabled.
//!
//! # Architecture
//!
//! - [`Ray`] - Origin, direction and the current closest distance
//! - [`intersect`] - Ray-triangle and ray-sphere tests
//! - [`bvh`] - Hierarchy construction (surface area or fixed-axis splits) and traversal
//! - [`brute`] - Exhaustive fallback
//! - [`Features`] - Flags and build parameters, loadable from TOML
//! - [`AccelerationStructure`] - Renderer-facing facade filling a [`HitInfo`]
//!
//! # Example
//!
//! ```
//! use lumen_accel::{AccelerationStructure, Features, HitInfo, Ray};
//! use lumen_math::{Point3, Vec3};
//! use lumen_scene::{shapes, Material, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_mesh(shapes::make_quad(1.0, 1.0, Material::default()));
//!
//! let accel = AccelerationStructure::new(&scene, Features::default());
//! let mut ray = Ray::new(Point3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0));
//! let mut hit = HitInfo::default();
//!
//! assert!(accel.intersect(&mut ray, &mut hit));
//! assert!((ray.t - 1.0).abs() < 1e-12);
//! ```

mod accel;
mod hit;
mod ray;
pub mod brute;
pub mod bvh;
pub mod error;
pub mod features;
pub mod intersect;

pub use accel::AccelerationStructure;
pub use bvh::{Bvh, BvhHit, Node, NodeId, NodeKind, TraversalStats, TriangleRef};
pub use error::{ConfigError, Result};
pub use features::{BuildConfig, Features, SplitPolicy, MAX_SUPPORTED_DEPTH};
pub use hit::HitInfo;
pub use ray::Ray;
