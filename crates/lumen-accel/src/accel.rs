//! The renderer-facing acceleration structure.

use std::time::Instant;

use lumen_scene::Scene;
use rayon::prelude::*;

use crate::brute;
use crate::bvh::{Bvh, BvhHit};
use crate::{Features, HitInfo, Ray};

/// Closest-hit queries over a borrowed scene.
///
/// Owns the hierarchy built from the scene; read-only after construction,
/// so one instance can serve many threads at once.
#[derive(Debug, Clone)]
pub struct AccelerationStructure<'s> {
    scene: &'s Scene,
    bvh: Bvh,
    features: Features,
}

impl<'s> AccelerationStructure<'s> {
    /// Build the structure for `scene`.
    ///
    /// The hierarchy is only built when `features.accel_structure` is set;
    /// otherwise every query falls back to testing every primitive.
    pub fn new(scene: &'s Scene, features: Features) -> Self {
        let start = Instant::now();
        let bvh = if features.accel_structure {
            Bvh::build(scene, &features.build_config())
        } else {
            log::debug!("acceleration disabled, queries test every primitive");
            Bvh::default()
        };
        log::info!(
            "acceleration structure ready: {} triangles, {} spheres, {} nodes in {:.3} ms",
            scene.num_triangles(),
            scene.spheres.len(),
            bvh.nodes().len(),
            start.elapsed().as_secs_f64() * 1e3,
        );
        Self {
            scene,
            bvh,
            features,
        }
    }

    /// The scene the structure was built from.
    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    /// The hierarchy (empty when acceleration is disabled).
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// Active feature flags.
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Number of tree levels, for diagnostics.
    pub fn num_levels(&self) -> usize {
        self.bvh.num_levels()
    }

    /// Number of leaves, for diagnostics.
    pub fn num_leaves(&self) -> usize {
        self.bvh.num_leaves()
    }

    /// Find the closest hit strictly nearer than `ray.t`.
    ///
    /// On a hit, sets `ray.t` to its distance, fills `hit_info` and returns
    /// true. On a miss both are left untouched and false is returned.
    pub fn intersect(&self, ray: &mut Ray, hit_info: &mut HitInfo) -> bool {
        let triangle = if self.features.accel_structure {
            self.bvh.closest_hit(self.scene, ray, ray.t)
        } else {
            brute::closest_triangle(self.scene, ray, ray.t)
        };

        // Spheres are not in the hierarchy; test them against the best
        // triangle distance on both paths.
        let t_triangle = triangle.as_ref().map_or(ray.t, |h| h.hit.t);
        if let Some((index, hit)) = brute::closest_sphere(self.scene, ray, t_triangle) {
            let sphere = &self.scene.spheres[index];
            ray.t = hit.t;
            hit_info.normal = hit.normal;
            hit_info.material = sphere.material.clone();
            hit_info.barycentric = lumen_math::Vec3::zeros();
            return true;
        }

        match triangle {
            Some(hit) => {
                ray.t = hit.hit.t;
                self.fill_triangle_hit(&hit, hit_info);
                true
            }
            None => false,
        }
    }

    /// Closest hit for each ray, evaluated in parallel.
    ///
    /// Each ray's `t` is updated as by [`intersect`](Self::intersect).
    pub fn intersect_batch(&self, rays: &mut [Ray]) -> Vec<Option<HitInfo>> {
        rays.par_iter_mut()
            .map(|ray| {
                let mut hit_info = HitInfo::default();
                self.intersect(ray, &mut hit_info).then_some(hit_info)
            })
            .collect()
    }

    fn fill_triangle_hit(&self, hit: &BvhHit, hit_info: &mut HitInfo) {
        let mesh = &self.scene.meshes[hit.triangle.mesh as usize];
        let [v0, v1, v2] = mesh.corners(hit.triangle.vertices);
        let w = hit.hit.barycentric;

        hit_info.material = mesh.material.clone();
        hit_info.barycentric = w;
        hit_info.normal = hit.hit.normal;

        if self.features.normal_interp {
            let blended = w.x * v0.normal + w.y * v1.normal + w.z * v2.normal;
            if let Some(n) = blended.try_normalize(1e-12) {
                hit_info.normal = n;
            }
        }
        if self.features.texture_mapping {
            hit_info.tex_coord = w.x * v0.tex_coord + w.y * v1.tex_coord + w.z * v2.tex_coord;
        }
    }
}
