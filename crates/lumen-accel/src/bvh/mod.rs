//! Bounding Volume Hierarchy over scene triangles.
//!
//! The tree is stored as a flat node array with the root at index 0.
//! Leaves hold [`TriangleRef`]s that index into the scene's meshes; no
//! geometry is copied. Construction lives in [`build`](self::build) and the
//! closest-hit query in [`traverse`](self::traverse).

mod build;
mod traverse;

pub use traverse::{BvhHit, TraversalStats};

use lumen_math::Aabb3;

/// Index of a node in [`Bvh::nodes`].
pub type NodeId = usize;

/// One triangle, identified by its mesh and its three vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleRef {
    /// Mesh position in the scene.
    pub mesh: u32,
    /// Vertex indices into that mesh's vertex array.
    pub vertices: [u32; 3],
}

impl TriangleRef {
    /// Create a triangle reference.
    pub fn new(mesh: u32, vertices: [u32; 3]) -> Self {
        Self { mesh, vertices }
    }

    /// The four-integer encoding `(mesh, a, b, c)`.
    pub fn to_array(self) -> [u32; 4] {
        [self.mesh, self.vertices[0], self.vertices[1], self.vertices[2]]
    }
}

/// Payload of a node: either primitives or two children.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Leaf holding triangles directly.
    Leaf {
        /// Triangles inside this leaf.
        triangles: Vec<TriangleRef>,
    },
    /// Internal node with two children.
    Internal {
        /// Left child.
        left: NodeId,
        /// Right child.
        right: NodeId,
    },
}

/// A BVH node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Level in the tree, 0 at the root.
    pub depth: u32,
    /// Box enclosing every triangle below this node.
    pub bounds: Aabb3,
    /// Leaf or internal payload.
    pub kind: NodeKind,
}

impl Node {
    /// True if the node stores triangles rather than children.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Triangles stored in a leaf; empty for internal nodes.
    pub fn triangles(&self) -> &[TriangleRef] {
        match &self.kind {
            NodeKind::Leaf { triangles } => triangles.as_slice(),
            NodeKind::Internal { .. } => &[],
        }
    }

    /// `[left, right]` for internal nodes.
    pub fn children(&self) -> Option<[NodeId; 2]> {
        match self.kind {
            NodeKind::Internal { left, right } => Some([left, right]),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Integer payload: four values per triangle for leaves, the two child
    /// indices for internal nodes.
    pub fn flattened_payload(&self) -> Vec<u32> {
        match &self.kind {
            NodeKind::Leaf { triangles } => triangles.iter().flat_map(|t| t.to_array()).collect(),
            NodeKind::Internal { left, right } => vec![*left as u32, *right as u32],
        }
    }
}

/// Immutable bounding volume hierarchy.
///
/// Built once per scene by [`Bvh::build`]; queries borrow the same scene
/// the tree was built from.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<Node>,
}

impl Bvh {
    /// Root index. Only meaningful for a non-empty tree.
    pub const ROOT: NodeId = 0;

    /// All nodes, root first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node by index.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The root node, or `None` for a scene without triangles.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(Self::ROOT)
    }

    /// True if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels (deepest node depth + 1); 0 for an empty tree.
    pub fn num_levels(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.depth as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of leaf nodes.
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Leaves in array order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// The `index`-th leaf in array order (not a node index).
    pub fn leaf(&self, index: usize) -> Option<&Node> {
        self.leaves().nth(index)
    }

    /// Nodes at a given depth, e.g. the boxes a viewer draws for one level.
    pub fn nodes_at_level(&self, level: u32) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.depth == level)
    }
}
