//! Ray-triangle intersection (Möller–Trumbore).

use lumen_math::{Point3, Vec3, EPSILON};

use crate::Ray;

/// A ray-triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Unit geometric normal `normalize(e1 × e2)`, never flipped toward the ray.
    pub normal: Vec3,
    /// Barycentric weights of `(v0, v1, v2)`: `(1 - u - v, u, v)`.
    pub barycentric: Vec3,
}

/// Intersect a ray with the triangle `(v0, v1, v2)`.
///
/// Rejects rays parallel to the triangle's plane (`|det| < EPSILON`), hits
/// at `t <= EPSILON` and hits not strictly closer than `t_max`. Points on an
/// edge count as inside.
pub fn intersect_triangle(
    ray: &Ray,
    v0: &Point3,
    v1: &Point3,
    v2: &Point3,
    t_max: f64,
) -> Option<TriangleHit> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let h = ray.direction.cross(&e2);
    let a = e1.dot(&h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&e1);
    let v = f * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(&q);
    if t <= EPSILON || t >= t_max {
        return None;
    }

    let normal = e1.cross(&e2).try_normalize(0.0)?;
    Some(TriangleHit {
        t,
        normal,
        barycentric: Vec3::new(1.0 - u - v, u, v),
    })
}
