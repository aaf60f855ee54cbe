//! Ray-primitive intersection routines.
//!
//! Each routine takes the best distance found so far and only reports hits
//! strictly closer than it, leaving all bookkeeping to the caller.

mod sphere;
mod triangle;

pub use sphere::{intersect_sphere, SphereHit};
pub use triangle::{intersect_triangle, TriangleHit};
