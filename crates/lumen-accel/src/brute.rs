//! Exhaustive intersection without an acceleration structure.
//!
//! Used when the hierarchy is disabled, for implicit spheres (which the
//! hierarchy does not store), and as the reference the hierarchy is tested
//! against.

use lumen_scene::Scene;

use crate::bvh::{BvhHit, TriangleRef};
use crate::intersect::{intersect_sphere, intersect_triangle, SphereHit};
use crate::Ray;

/// Closest triangle hit strictly nearer than `t_max`, testing every
/// triangle of every mesh.
pub fn closest_triangle(scene: &Scene, ray: &Ray, t_max: f64) -> Option<BvhHit> {
    let mut best_t = t_max;
    let mut best = None;
    for (mesh_idx, mesh) in scene.meshes.iter().enumerate() {
        for &indices in &mesh.triangles {
            let [a, b, c] = mesh.positions(indices);
            if let Some(hit) = intersect_triangle(ray, &a, &b, &c, best_t) {
                best_t = hit.t;
                best = Some(BvhHit {
                    triangle: TriangleRef::new(mesh_idx as u32, indices),
                    hit,
                });
            }
        }
    }
    best
}

/// Closest sphere hit strictly nearer than `t_max`, with the sphere's index.
pub fn closest_sphere(scene: &Scene, ray: &Ray, t_max: f64) -> Option<(usize, SphereHit)> {
    let mut best_t = t_max;
    let mut best = None;
    for (i, sphere) in scene.spheres.iter().enumerate() {
        if let Some(hit) = intersect_sphere(ray, sphere, best_t) {
            best_t = hit.t;
            best = Some((i, hit));
        }
    }
    best
}
