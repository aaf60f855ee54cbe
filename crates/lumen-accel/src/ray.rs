//! Ray representation and the ray/box slab test.

use lumen_math::{Aabb3, Point3, Vec3};

/// A ray in 3D space with a mutable closest-hit distance.
///
/// `t` bounds the search: queries only report hits strictly closer than
/// the current `t`, and shrink it when they find one. The direction is not
/// normalized, so `t` is measured in multiples of `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
    /// Current best (or maximum) hit distance.
    pub t: f64,
}

impl Ray {
    /// Create an unbounded ray (`t = +∞`).
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t: f64::INFINITY,
        }
    }

    /// Create a ray that only accepts hits closer than `t`.
    pub fn with_max_t(origin: Point3, direction: Vec3, t: f64) -> Self {
        Self {
            origin,
            direction,
            t,
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Test ray-AABB intersection using the slab method.
    ///
    /// Returns `Some((t_entry, t_exit))` if the ray intersects the box, where
    /// `t_entry` is clamped to 0 for rays starting inside it. Returns `None`
    /// if no intersection.
    ///
    /// A zero direction component yields infinite slab bounds, which is the
    /// correct result for rays parallel to a slab. A ray lying exactly in one
    /// of a slab's planes gives `0 / 0`; that slab does not constrain it.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for i in 0..3 {
            let t1 = (aabb.min[i] - self.origin[i]) / self.direction[i];
            let t2 = (aabb.max[i] - self.origin[i]) / self.direction[i];
            // `f64::min`/`max` would drop the NaN and keep the other bound.
            if t1.is_nan() || t2.is_nan() {
                continue;
            }
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }

        if t_min <= t_max && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let p = ray.at(2.5);
        assert_relative_eq!(p.x, 5.0);
        assert_eq!(ray.t, f64::INFINITY);
    }

    #[test]
    fn test_ray_aabb_hit() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let (t_min, t_max) = ray.intersect_aabb(&unit_box()).unwrap();
        assert_relative_eq!(t_min, 5.0);
        assert_relative_eq!(t_max, 6.0);
    }

    #[test]
    fn test_ray_aabb_miss() {
        let ray = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray.intersect_aabb(&unit_box()).is_none());
    }

    #[test]
    fn test_ray_inside_aabb() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let (t_min, t_max) = ray.intersect_aabb(&unit_box()).unwrap();
        assert_eq!(t_min, 0.0);
        assert_relative_eq!(t_max, 0.5);
    }

    #[test]
    fn test_ray_aabb_behind() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(ray.intersect_aabb(&unit_box()).is_none());
    }

    #[test]
    fn test_ray_aabb_diagonal() {
        let ray = Ray::new(Point3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let (t_min, t_max) = ray.intersect_aabb(&unit_box()).unwrap();
        assert_relative_eq!(t_min, 1.0);
        assert_relative_eq!(t_max, 2.0);
    }

    #[test]
    fn test_ray_parallel_to_slab() {
        // Zero y/z direction: infinite slab bounds decide the outcome.
        let inside = Ray::new(Point3::new(-1.0, 0.25, 0.75), Vec3::new(1.0, 0.0, 0.0));
        assert!(inside.intersect_aabb(&unit_box()).is_some());

        let outside = Ray::new(Point3::new(-1.0, 1.25, 0.75), Vec3::new(1.0, 0.0, 0.0));
        assert!(outside.intersect_aabb(&unit_box()).is_none());
    }

    #[test]
    fn test_ray_flat_box() {
        // Zero-thickness box, as produced by a single planar triangle.
        let flat = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let ray = Ray::new(Point3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let (t_min, t_max) = ray.intersect_aabb(&flat).unwrap();
        assert_relative_eq!(t_min, 1.0);
        assert_relative_eq!(t_max, 1.0);
    }

    #[test]
    fn test_ray_along_box_face() {
        // Origin on the x = 0 and x = 1 face planes with zero x direction.
        for x in [0.0, 1.0] {
            let ray = Ray::new(Point3::new(x, 0.5, 2.0), Vec3::new(0.0, 0.0, -1.0));
            let (t_min, t_max) = ray.intersect_aabb(&unit_box()).unwrap();
            assert_relative_eq!(t_min, 1.0);
            assert_relative_eq!(t_max, 2.0);
        }

        // Along an edge: two slabs degenerate at once.
        let edge = Ray::new(Point3::new(1.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(edge.intersect_aabb(&unit_box()).is_some());

        // In the face plane of a flat box.
        let flat = Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let in_plane = Ray::new(Point3::new(-1.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let (t_min, t_max) = in_plane.intersect_aabb(&flat).unwrap();
        assert_relative_eq!(t_min, 1.0);
        assert_relative_eq!(t_max, 2.0);

        // On the face plane but outside the other slabs still misses.
        let beside = Ray::new(Point3::new(0.0, 1.5, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(beside.intersect_aabb(&unit_box()).is_none());
    }
}
