#![warn(missing_docs)]

//! Scene data consumed by the lumen ray tracing core.
//!
//! A [`Scene`] is a list of indexed triangle [`Mesh`]es plus a list of
//! implicit [`Sphere`]s. The acceleration structure only ever reads it:
//! triangles are referenced by `(mesh, vertex, vertex, vertex)` indices and
//! never copied.
//!
//! # Example
//!
//! ```
//! use lumen_scene::{shapes, Material, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_mesh(shapes::make_quad(1.0, 1.0, Material::default()));
//! assert_eq!(scene.num_triangles(), 2);
//! assert!(scene.validate().is_ok());
//! ```

pub mod error;
pub mod shapes;

pub use error::{Result, SceneError};

use lumen_math::{Point3, Vec2, Vec3};

/// A mesh vertex: position, shading normal and texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in world space.
    pub position: Point3,
    /// Shading normal, used when normal interpolation is enabled.
    pub normal: Vec3,
    /// Texture coordinate, used when texture mapping is enabled.
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Vertex with an explicit normal and a zero texture coordinate.
    pub fn new(position: Point3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            tex_coord: Vec2::zeros(),
        }
    }

    /// Builder-style texture coordinate.
    pub fn with_tex_coord(mut self, tex_coord: Vec2) -> Self {
        self.tex_coord = tex_coord;
        self
    }
}

/// Surface appearance attached to a mesh or sphere.
///
/// Shading is outside the core; the material is only carried through to
/// the hit record.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diffuse colour.
    pub kd: Vec3,
    /// Specular colour.
    pub ks: Vec3,
    /// Phong exponent.
    pub shininess: f64,
    /// Opacity in `[0, 1]`, 1 meaning fully opaque.
    pub transparency: f64,
}

impl Material {
    /// Opaque diffuse material.
    pub fn diffuse(kd: Vec3) -> Self {
        Self {
            kd,
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Vec3::new(0.5, 0.5, 0.5),
            ks: Vec3::zeros(),
            shininess: 1.0,
            transparency: 1.0,
        }
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex array.
    pub vertices: Vec<Vertex>,
    /// Three indices into `vertices` per triangle.
    pub triangles: Vec<[u32; 3]>,
    /// Material shared by every triangle of the mesh.
    pub material: Material,
}

impl Mesh {
    /// Create a mesh from vertices and triangles.
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<[u32; 3]>, material: Material) -> Self {
        Self {
            vertices,
            triangles,
            material,
        }
    }

    /// Import from flat GPU-style buffers.
    ///
    /// `positions` and `normals` hold `[x0, y0, z0, x1, ...]`; `indices` holds
    /// `[i0, i1, i2, ...]`. An empty `normals` buffer gives zero normals.
    pub fn from_flat_buffers(
        positions: &[f32],
        indices: &[u32],
        normals: &[f32],
        material: Material,
    ) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(SceneError::BufferLength {
                what: "position",
                len: positions.len(),
                stride: 3,
            });
        }
        if indices.len() % 3 != 0 {
            return Err(SceneError::BufferLength {
                what: "index",
                len: indices.len(),
                stride: 3,
            });
        }
        if !normals.is_empty() && normals.len() != positions.len() {
            return Err(SceneError::BufferLength {
                what: "normal",
                len: normals.len(),
                stride: 3,
            });
        }

        let vertices = positions
            .chunks_exact(3)
            .enumerate()
            .map(|(i, p)| {
                let normal = if normals.is_empty() {
                    Vec3::zeros()
                } else {
                    Vec3::new(
                        normals[i * 3] as f64,
                        normals[i * 3 + 1] as f64,
                        normals[i * 3 + 2] as f64,
                    )
                };
                Vertex::new(Point3::new(p[0] as f64, p[1] as f64, p[2] as f64), normal)
            })
            .collect();
        let triangles = indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect();

        Ok(Self::new(vertices, triangles, material))
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Look up the three vertices of a triangle given its vertex indices.
    #[inline]
    pub fn corners(&self, indices: [u32; 3]) -> [&Vertex; 3] {
        [
            &self.vertices[indices[0] as usize],
            &self.vertices[indices[1] as usize],
            &self.vertices[indices[2] as usize],
        ]
    }

    /// Positions of the three vertices of a triangle.
    #[inline]
    pub fn positions(&self, indices: [u32; 3]) -> [Point3; 3] {
        let [a, b, c] = self.corners(indices);
        [a.position, b.position, c.position]
    }
}

/// Implicit sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Centre.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
    /// Material.
    pub material: Material,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Read-only scene description.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Triangle meshes.
    pub meshes: Vec<Mesh>,
    /// Implicit spheres.
    pub spheres: Vec<Sphere>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mesh, returning its index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Append a sphere, returning its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// Total triangle count across all meshes.
    pub fn num_triangles(&self) -> usize {
        self.meshes.iter().map(Mesh::num_triangles).sum()
    }

    /// True if the scene has no triangles and no spheres.
    pub fn is_empty(&self) -> bool {
        self.num_triangles() == 0 && self.spheres.is_empty()
    }

    /// Check that every index is in range and every coordinate is finite.
    ///
    /// The acceleration structure assumes a validated scene.
    pub fn validate(&self) -> Result<()> {
        for (mesh_idx, mesh) in self.meshes.iter().enumerate() {
            for (vertex_idx, v) in mesh.vertices.iter().enumerate() {
                if !(v.position.x.is_finite() && v.position.y.is_finite() && v.position.z.is_finite()) {
                    return Err(SceneError::NonFiniteVertex {
                        mesh: mesh_idx,
                        vertex: vertex_idx,
                    });
                }
            }
            for (tri_idx, tri) in mesh.triangles.iter().enumerate() {
                if let Some(&index) = tri.iter().find(|&&i| i as usize >= mesh.vertices.len()) {
                    return Err(SceneError::IndexOutOfRange {
                        mesh: mesh_idx,
                        triangle: tri_idx,
                        index,
                        vertex_count: mesh.vertices.len(),
                    });
                }
            }
        }
        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius(i, sphere.radius));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.num_triangles(), 0);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_validate_index_out_of_range() {
        let mut scene = Scene::new();
        let vertices = vec![
            Vertex::new(Point3::origin(), Vec3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vec3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vec3::z()),
        ];
        scene.add_mesh(Mesh::new(vertices, vec![[0, 1, 3]], Material::default()));

        let err = scene.validate().unwrap_err();
        assert_eq!(
            err,
            SceneError::IndexOutOfRange {
                mesh: 0,
                triangle: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_validate_non_finite_vertex() {
        let mut scene = Scene::new();
        let vertices = vec![Vertex::new(Point3::new(f64::NAN, 0.0, 0.0), Vec3::z())];
        scene.add_mesh(Mesh::new(vertices, Vec::new(), Material::default()));
        assert!(matches!(
            scene.validate(),
            Err(SceneError::NonFiniteVertex { mesh: 0, vertex: 0 })
        ));
    }

    #[test]
    fn test_validate_sphere_radius() {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Point3::origin(), 0.0, Material::default()));
        assert!(matches!(scene.validate(), Err(SceneError::InvalidRadius(0, _))));
    }

    #[test]
    fn test_from_flat_buffers() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let mesh =
            Mesh::from_flat_buffers(&positions, &[0, 1, 2], &normals, Material::default()).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.vertices[1].position, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[2].normal, Vec3::z());
    }

    #[test]
    fn test_from_flat_buffers_bad_length() {
        let err = Mesh::from_flat_buffers(&[0.0, 1.0], &[], &[], Material::default()).unwrap_err();
        assert!(matches!(err, SceneError::BufferLength { what: "position", .. }));

        let err = Mesh::from_flat_buffers(&[0.0; 9], &[0, 1], &[], Material::default()).unwrap_err();
        assert!(matches!(err, SceneError::BufferLength { what: "index", .. }));
    }
}
