//! Structural validation for flow graphs.

use nt_core::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node};
use crate::indexing::GraphIndex;

/// Check positional ids, finite values and edge endpoints.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    for (position, node) in nodes.iter().enumerate() {
        if node.id.position() != position {
            return Err(GraphError::MisplacedNode {
                position,
                id: node.id,
            });
        }
        if !node.value.is_finite() {
            return Err(GraphError::NonFiniteValue {
                what: "node",
                index: position,
            });
        }
    }

    let in_range = |id: NodeId| id.position() < nodes.len();
    for (slot, edge) in edges.iter().enumerate() {
        for endpoint in [edge.source, edge.target, edge.origin] {
            if !in_range(endpoint) {
                return Err(GraphError::DanglingEdge {
                    edge: slot,
                    node: endpoint,
                });
            }
        }
        if !edge.value.is_finite() {
            return Err(GraphError::NonFiniteValue {
                what: "edge",
                index: slot,
            });
        }
    }

    Ok(())
}

/// Check that the hash index agrees with the node and edge lists.
pub(crate) fn validate_index(nodes: &[Node], edges: &[Edge], index: &GraphIndex) -> GraphResult<()> {
    if index.node_count() != nodes.len() || index.edge_count() != edges.len() {
        return Err(GraphError::IndexOutOfSync);
    }
    let nodes_match = nodes.iter().all(|n| index.node_id(&n.name) == Some(n.id));
    let edges_match = edges
        .iter()
        .enumerate()
        .all(|(slot, e)| index.edge_slot(e.source, e.target) == Some(slot));
    if !nodes_match || !edges_match {
        return Err(GraphError::IndexOutOfSync);
    }
    Ok(())
}
