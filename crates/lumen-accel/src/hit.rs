//! Closest-hit record.

use lumen_math::{Vec2, Vec3};
use lumen_scene::Material;

/// Surface information at the closest intersection found so far.
///
/// Only written when a query finds a hit closer than the ray's `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct HitInfo {
    /// Unit surface normal. For triangles this follows the winding order
    /// (`e1 × e2`) unless normal interpolation is enabled.
    pub normal: Vec3,
    /// Material of the mesh or sphere that was hit.
    pub material: Material,
    /// Barycentric coordinates `(1 - u - v, u, v)`; zero for sphere hits.
    pub barycentric: Vec3,
    /// Interpolated texture coordinate, when texture mapping is enabled.
    pub tex_coord: Vec2,
}

impl Default for HitInfo {
    fn default() -> Self {
        Self {
            normal: Vec3::zeros(),
            material: Material::default(),
            barycentric: Vec3::zeros(),
            tex_coord: Vec2::zeros(),
        }
    }
}
