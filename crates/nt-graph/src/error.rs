//! Graph-specific error types.

use nt_core::NodeId;

pub type GraphResult<T> = Result<T, GraphError>;

/// Structural errors in a flow graph assembled from external parts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A node's id doesn't match its position in the node list.
    #[error("Node at position {position} carries id {id}")]
    MisplacedNode { position: usize, id: NodeId },

    /// Two nodes share the same label.
    #[error("Label {label} appears on nodes {first} and {second}")]
    DuplicateLabel {
        label: String,
        first: NodeId,
        second: NodeId,
    },

    /// An edge endpoint refers to a node that doesn't exist.
    #[error("Edge {edge} refers to non-existent node {node}")]
    DanglingEdge { edge: usize, node: NodeId },

    /// Two edges share the same ordered (source, target) pair.
    #[error("Edges {first} and {second} both connect {source_id} -> {target_id}")]
    DuplicateEdge {
        first: usize,
        second: usize,
        source_id: NodeId,
        target_id: NodeId,
    },

    /// A node or edge carries a non-finite value.
    #[error("Non-finite value on {what} {index}")]
    NonFiniteValue { what: &'static str, index: usize },

    /// The lookup index disagrees with the node or edge lists.
    #[error("Lookup index out of sync with node/edge lists")]
    IndexOutOfSync,

    /// Node id not present in the graph.
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
}
