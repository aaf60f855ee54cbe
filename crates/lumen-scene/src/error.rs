//! Error types for scene validation.

use thiserror::Error;

/// Errors reported when a scene or mesh is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A triangle references a vertex past the end of its mesh.
    #[error("mesh {mesh}: triangle {triangle} references vertex {index} but mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Mesh position in the scene.
        mesh: usize,
        /// Triangle position in the mesh.
        triangle: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A vertex position has a NaN or infinite component.
    #[error("mesh {mesh}: vertex {vertex} has a non-finite position")]
    NonFiniteVertex {
        /// Mesh position in the scene.
        mesh: usize,
        /// Vertex position in the mesh.
        vertex: usize,
    },

    /// Sphere radius is zero, negative or not finite.
    #[error("sphere {0} has an invalid radius: {1}")]
    InvalidRadius(usize, f64),

    /// Flat buffer length does not divide into whole elements.
    #[error("{what} buffer has length {len}, expected a multiple of {stride}")]
    BufferLength {
        /// Which buffer was malformed.
        what: &'static str,
        /// Actual length.
        len: usize,
        /// Required stride.
        stride: usize,
    },
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
