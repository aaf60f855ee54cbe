//! Triangle mesh builders for simple shapes.
//!
//! All builders wind triangles counter-clockwise when viewed from the side
//! the normal points to, so `(v1 - v0) × (v2 - v0)` is the outward normal.

use lumen_math::{Point3, Vec2, Vec3};

use crate::{Material, Mesh, Vertex};

/// Build a single triangle with a flat normal.
pub fn make_triangle(a: Point3, b: Point3, c: Point3, material: Material) -> Mesh {
    let normal = (b - a).cross(&(c - a)).try_normalize(0.0).unwrap_or_else(Vec3::zeros);
    let vertices = vec![
        Vertex::new(a, normal).with_tex_coord(Vec2::new(0.0, 0.0)),
        Vertex::new(b, normal).with_tex_coord(Vec2::new(1.0, 0.0)),
        Vertex::new(c, normal).with_tex_coord(Vec2::new(0.0, 1.0)),
    ];
    Mesh::new(vertices, vec![[0, 1, 2]], material)
}

/// Build a rectangle in the z=0 plane spanning `(0, 0)` to `(sx, sy)`.
///
/// Two triangles, normal +Z, texture coordinates covering `[0, 1]²`.
/// ```text
///   v3----v2
///   |   / |     y
///   | /   |     |
///   v0----v1    +---x
/// ```
pub fn make_quad(sx: f64, sy: f64, material: Material) -> Mesh {
    let n = Vec3::z();
    let vertices = vec![
        Vertex::new(Point3::new(0.0, 0.0, 0.0), n).with_tex_coord(Vec2::new(0.0, 0.0)),
        Vertex::new(Point3::new(sx, 0.0, 0.0), n).with_tex_coord(Vec2::new(1.0, 0.0)),
        Vertex::new(Point3::new(sx, sy, 0.0), n).with_tex_coord(Vec2::new(1.0, 1.0)),
        Vertex::new(Point3::new(0.0, sy, 0.0), n).with_tex_coord(Vec2::new(0.0, 1.0)),
    ];
    Mesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]], material)
}

/// Build an axis-aligned box between two corners.
///
/// 12 triangles, 24 vertices (four per face so each face keeps a flat normal).
/// Corner `i` has `x = i & 1`, `y = (i >> 1) & 1`, `z = (i >> 2) & 1`.
pub fn make_box(min: Point3, max: Point3, material: Material) -> Mesh {
    let corner = |i: usize| {
        Point3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if (i >> 1) & 1 == 0 { min.y } else { max.y },
            if (i >> 2) & 1 == 0 { min.z } else { max.z },
        )
    };

    // Outward CCW loops.
    const FACES: [[usize; 4]; 6] = [
        [0, 2, 3, 1], // -Z
        [4, 5, 7, 6], // +Z
        [0, 1, 5, 4], // -Y
        [2, 6, 7, 3], // +Y
        [0, 4, 6, 2], // -X
        [1, 3, 7, 5], // +X
    ];
    const UVS: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut triangles = Vec::with_capacity(12);
    for face in FACES {
        let p = face.map(corner);
        let normal = (p[1] - p[0])
            .cross(&(p[2] - p[0]))
            .try_normalize(0.0)
            .unwrap_or_else(Vec3::zeros);
        let base = vertices.len() as u32;
        for (pos, uv) in p.iter().zip(UVS) {
            vertices.push(Vertex::new(*pos, normal).with_tex_coord(Vec2::new(uv[0], uv[1])));
        }
        triangles.push([base, base + 1, base + 2]);
        triangles.push([base, base + 2, base + 3]);
    }

    Mesh::new(vertices, triangles, material)
}
