//! Closest-hit traversal with a work queue.

use std::collections::VecDeque;

use lumen_scene::Scene;

use super::{Bvh, NodeId, NodeKind, TriangleRef};
use crate::intersect::{intersect_triangle, TriangleHit};
use crate::Ray;

/// The closest triangle hit found by [`Bvh::closest_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhHit {
    /// Triangle that was hit.
    pub triangle: TriangleRef,
    /// Distance, geometric normal and barycentric coordinates.
    pub hit: TriangleHit,
}

/// Work counters for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes popped and processed.
    pub nodes_visited: usize,
    /// Ray-triangle tests performed.
    pub triangles_tested: usize,
}

impl Bvh {
    /// Find the closest triangle hit strictly nearer than `t_max`.
    ///
    /// `scene` must be the scene the tree was built from. The ray is not
    /// modified.
    pub fn closest_hit(&self, scene: &Scene, ray: &Ray, t_max: f64) -> Option<BvhHit> {
        self.closest_hit_with_stats(scene, ray, t_max, &mut TraversalStats::default())
    }

    /// [`closest_hit`](Self::closest_hit), also counting the work done.
    pub fn closest_hit_with_stats(
        &self,
        scene: &Scene,
        ray: &Ray,
        t_max: f64,
        stats: &mut TraversalStats,
    ) -> Option<BvhHit> {
        let root = self.root()?;
        let (root_entry, _) = ray.intersect_aabb(&root.bounds)?;

        let mut best_t = t_max;
        let mut best: Option<BvhHit> = None;
        let mut queue: VecDeque<(NodeId, f64)> = VecDeque::new();
        queue.push_back((Self::ROOT, root_entry));

        while let Some((id, entry)) = queue.pop_front() {
            // The box was entered no earlier than `entry`; nothing inside can
            // beat a hit at or before that distance.
            if entry >= best_t {
                continue;
            }
            stats.nodes_visited += 1;

            match &self.nodes[id].kind {
                NodeKind::Leaf { triangles } => {
                    for &triangle in triangles {
                        let mesh = &scene.meshes[triangle.mesh as usize];
                        let [a, b, c] = mesh.positions(triangle.vertices);
                        stats.triangles_tested += 1;
                        if let Some(hit) = intersect_triangle(ray, &a, &b, &c, best_t) {
                            best_t = hit.t;
                            best = Some(BvhHit { triangle, hit });
                        }
                    }
                }
                &NodeKind::Internal { left, right } => {
                    let l = ray.intersect_aabb(&self.nodes[left].bounds).map(|(t, _)| (left, t));
                    let r = ray.intersect_aabb(&self.nodes[right].bounds).map(|(t, _)| (right, t));

                    // Nearer child first.
                    match (l, r) {
                        (Some(l), Some(r)) => {
                            let (near, far) = if l.1 <= r.1 { (l, r) } else { (r, l) };
                            queue.push_back(near);
                            queue.push_back(far);
                        }
                        (Some(child), None) | (None, Some(child)) => queue.push_back(child),
                        (None, None) => {}
                    }
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{BuildConfig, SplitPolicy};
    use approx::assert_relative_eq;
    use lumen_math::{Point3, Vec3};
    use lumen_scene::{shapes, Material};

    fn wall_of_quads(count: usize) -> Scene {
        // Parallel unit quads at z = 0, -1, -2, ... all facing +Z.
        let mut scene = Scene::new();
        for i in 0..count {
            let mut quad = shapes::make_quad(1.0, 1.0, Material::default());
            for v in &mut quad.vertices {
                v.position.z = -(i as f64);
            }
            scene.add_mesh(quad);
        }
        scene
    }

    #[test]
    fn test_empty_tree_misses() {
        let scene = Scene::new();
        let bvh = Bvh::build(&scene, &BuildConfig::default());
        let ray = Ray::new(Point3::origin(), Vec3::z());
        assert!(bvh.closest_hit(&scene, &ray, ray.t).is_none());
    }

    #[test]
    fn test_unit_quad_hit() {
        let mut scene = Scene::new();
        scene.add_mesh(shapes::make_quad(1.0, 1.0, Material::default()));
        let bvh = Bvh::build(&scene, &BuildConfig::default());

        let ray = Ray::new(Point3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.closest_hit(&scene, &ray, ray.t).unwrap();
        assert_relative_eq!(hit.hit.t, 1.0);
        assert_relative_eq!(hit.hit.normal.z.abs(), 1.0);
        assert_relative_eq!(hit.hit.barycentric.sum(), 1.0);
        assert_eq!(hit.triangle.mesh, 0);
    }

    #[test]
    fn test_closest_of_stacked_quads() {
        let scene = wall_of_quads(16);
        for split_policy in [SplitPolicy::FixedAxis, SplitPolicy::SurfaceArea] {
            let bvh = Bvh::build(&scene, &BuildConfig { split_policy, max_depth: 10 });

            let down = Ray::new(Point3::new(0.3, 0.6, 5.0), Vec3::new(0.0, 0.0, -1.0));
            let hit = bvh.closest_hit(&scene, &down, down.t).unwrap();
            assert_relative_eq!(hit.hit.t, 5.0);
            assert_eq!(hit.triangle.mesh, 0);

            let up = Ray::new(Point3::new(0.3, 0.6, -20.0), Vec3::new(0.0, 0.0, 1.0));
            let hit = bvh.closest_hit(&scene, &up, up.t).unwrap();
            assert_relative_eq!(hit.hit.t, 5.0);
            assert_eq!(hit.triangle.mesh, 15);
        }
    }

    #[test]
    fn test_t_max_bounds_search() {
        let scene = wall_of_quads(4);
        let bvh = Bvh::build(&scene, &BuildConfig::default());
        let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(bvh.closest_hit(&scene, &ray, 4.0).is_none());
        assert!(bvh.closest_hit(&scene, &ray, 5.5).is_some());
    }

    #[test]
    fn test_miss_outside_root_bounds() {
        let scene = wall_of_quads(4);
        let bvh = Bvh::build(&scene, &BuildConfig::default());
        let ray = Ray::new(Point3::new(5.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut stats = TraversalStats::default();
        assert!(bvh.closest_hit_with_stats(&scene, &ray, ray.t, &mut stats).is_none());
        assert_eq!(stats.nodes_visited, 0);
    }

    #[test]
    fn test_pruning_skips_far_subtrees() {
        let scene = wall_of_quads(64);
        let bvh = Bvh::build(
            &scene,
            &BuildConfig {
                split_policy: SplitPolicy::SurfaceArea,
                max_depth: 20,
            },
        );
        let ray = Ray::new(Point3::new(0.5, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let mut stats = TraversalStats::default();
        let hit = bvh.closest_hit_with_stats(&scene, &ray, ray.t, &mut stats).unwrap();
        assert_relative_eq!(hit.hit.t, 1.0);
        assert!(stats.triangles_tested < scene.num_triangles());
    }
}
