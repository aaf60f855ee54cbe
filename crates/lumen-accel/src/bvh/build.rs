//! Recursive top-down construction.
//!
//! Each call bounds its primitive set, stops at one primitive or the depth
//! limit, and otherwise splits the set in two by centroid order along an
//! axis chosen by the [`SplitPolicy`].

use std::time::Instant;

use lumen_math::{Aabb3, Axis, Point3};
use lumen_scene::Scene;

use super::{Bvh, Node, NodeId, NodeKind, TriangleRef};
use crate::features::{BuildConfig, SplitPolicy, MAX_SUPPORTED_DEPTH};

/// A triangle with its bounds and centroid cached for the duration of a build.
#[derive(Debug, Clone, Copy)]
struct BuildPrimitive {
    tri: TriangleRef,
    bounds: Aabb3,
    centroid: Point3,
}

impl Bvh {
    /// Build a BVH over every triangle of every mesh in `scene`.
    ///
    /// A scene without triangles yields an empty tree. `max_depth` is
    /// capped at [`MAX_SUPPORTED_DEPTH`].
    pub fn build(scene: &Scene, config: &BuildConfig) -> Self {
        let start = Instant::now();

        let mut prims = collect_primitives(scene);
        let mut builder = Builder {
            nodes: Vec::with_capacity(prims.len().saturating_mul(2)),
            config: BuildConfig {
                max_depth: config.max_depth.min(MAX_SUPPORTED_DEPTH),
                ..*config
            },
        };
        if !prims.is_empty() {
            builder.build_node(&mut prims, 0);
        }

        let bvh = Bvh {
            nodes: builder.nodes,
        };
        log::debug!(
            "built BVH over {} triangles: {} nodes, {} leaves, {} levels ({:?}, {:.3} ms)",
            prims.len(),
            bvh.nodes.len(),
            bvh.num_leaves(),
            bvh.num_levels(),
            config.split_policy,
            start.elapsed().as_secs_f64() * 1e3,
        );
        bvh
    }
}

/// Flatten all meshes into one primitive list, in mesh then triangle order.
fn collect_primitives(scene: &Scene) -> Vec<BuildPrimitive> {
    let mut prims = Vec::with_capacity(scene.num_triangles());
    for (mesh_idx, mesh) in scene.meshes.iter().enumerate() {
        for &indices in &mesh.triangles {
            let [a, b, c] = mesh.positions(indices);
            prims.push(BuildPrimitive {
                tri: TriangleRef::new(mesh_idx as u32, indices),
                bounds: Aabb3::from_points(&[a, b, c]),
                centroid: Point3::from((a.coords + b.coords + c.coords) / 3.0),
            });
        }
    }
    prims
}

struct Builder {
    nodes: Vec<Node>,
    config: BuildConfig,
}

impl Builder {
    /// Build the subtree for a non-empty primitive set and return its index.
    ///
    /// Both halves of every split are non-empty, so internal nodes always
    /// have two children.
    fn build_node(&mut self, prims: &mut [BuildPrimitive], depth: u32) -> NodeId {
        debug_assert!(!prims.is_empty());

        let mut bounds = Aabb3::empty();
        for p in prims.iter() {
            bounds.include_aabb(&p.bounds);
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            depth,
            bounds,
            kind: NodeKind::Leaf {
                triangles: Vec::new(),
            },
        });

        if prims.len() == 1 || depth >= self.config.max_depth {
            self.nodes[id].kind = NodeKind::Leaf {
                triangles: prims.iter().map(|p| p.tri).collect(),
            };
            return id;
        }

        let median = (Axis::from_depth(depth), prims.len() / 2);
        let (axis, split) = match self.config.split_policy {
            SplitPolicy::FixedAxis => median,
            SplitPolicy::SurfaceArea => surface_area_split(prims).unwrap_or(median),
        };

        sort_by_centroid(prims, axis);
        let (left_prims, right_prims) = prims.split_at_mut(split);
        let left = self.build_node(left_prims, depth + 1);
        let right = self.build_node(right_prims, depth + 1);

        self.nodes[id].kind = NodeKind::Internal { left, right };
        id
    }
}

/// Order primitives by centroid along `axis`, ties broken by triangle
/// reference so the result does not depend on the incoming order.
fn sort_by_centroid(prims: &mut [BuildPrimitive], axis: Axis) {
    let i = axis.index();
    prims.sort_by(|a, b| {
        a.centroid[i]
            .total_cmp(&b.centroid[i])
            .then_with(|| a.tri.cmp(&b.tri))
    });
}

/// Find the best split using the surface area heuristic.
///
/// For every axis and every split point `1 <= k < n` the cost is
/// `area(first k) * k + area(last n - k) * (n - k)`. Returns the first
/// strict minimum, or `None` if no split has a finite cost.
fn surface_area_split(prims: &mut [BuildPrimitive]) -> Option<(Axis, usize)> {
    let n = prims.len();
    let mut best: Option<(f64, Axis, usize)> = None;
    // suffix_area[k] = area of prims[k..]
    let mut suffix_area = vec![0.0; n];

    for axis in Axis::ALL {
        sort_by_centroid(prims, axis);

        let mut right = Aabb3::empty();
        for k in (1..n).rev() {
            right.include_aabb(&prims[k].bounds);
            suffix_area[k] = right.surface_area();
        }

        let mut left = Aabb3::empty();
        for k in 1..n {
            left.include_aabb(&prims[k - 1].bounds);
            let cost = left.surface_area() * k as f64 + suffix_area[k] * (n - k) as f64;
            if !cost.is_finite() {
                continue;
            }
            if best.map_or(true, |(best_cost, _, _)| cost < best_cost) {
                best = Some((cost, axis, k));
            }
        }
    }

    best.map(|(_, axis, k)| (axis, k))
}
