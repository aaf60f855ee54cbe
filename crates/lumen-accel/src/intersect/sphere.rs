//! Ray-sphere intersection (quadratic equation).

use lumen_math::{Vec3, EPSILON};
use lumen_scene::Sphere;

use crate::Ray;

/// A ray-sphere hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Outward unit normal at the hit point.
    pub normal: Vec3,
}

/// Intersect a ray with a sphere.
///
/// Reports the nearest root greater than `EPSILON` and strictly less than
/// `t_max`. A ray starting inside the sphere hits the far wall.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere, t_max: f64) -> Option<SphereHit> {
    let oc = ray.origin - sphere.center;
    let d = &ray.direction;

    // |oc + t*d|^2 = r^2
    let a = d.dot(d);
    let b = 2.0 * oc.dot(d);
    let c = oc.dot(&oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = (-b - sqrt_disc) / (2.0 * a);
    let far = (-b + sqrt_disc) / (2.0 * a);

    let t = [near, far].into_iter().find(|&t| t > EPSILON)?;
    if t >= t_max {
        return None;
    }

    let normal = (ray.at(t) - sphere.center).try_normalize(0.0)?;
    Some(SphereHit { t, normal })
}
