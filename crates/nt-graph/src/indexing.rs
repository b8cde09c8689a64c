//! Hash indices over a flow graph.
//!
//! Maps labels to node ids and ordered node pairs to edge slots so that
//! row folding stays O(1) per facet, while the node and edge vectors keep
//! their first-seen order.

use std::collections::HashMap;

use nt_core::{FacetLabel, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node};

#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    /// Label -> node id.
    labels: HashMap<FacetLabel, NodeId>,

    /// (source, target) -> position in the edge list.
    pairs: HashMap<(NodeId, NodeId), usize>,
}

impl GraphIndex {
    /// Rebuild the index for existing node and edge lists.
    ///
    /// Fails if two nodes share a label or two edges share an ordered pair.
    pub fn from_parts(nodes: &[Node], edges: &[Edge]) -> GraphResult<Self> {
        let mut index = Self::default();

        for node in nodes {
            if let Some(&first) = index.labels.get(&node.name) {
                return Err(GraphError::DuplicateLabel {
                    label: node.name.to_string(),
                    first,
                    second: node.id,
                });
            }
            index.labels.insert(node.name.clone(), node.id);
        }

        for (slot, edge) in edges.iter().enumerate() {
            let key = (edge.source, edge.target);
            if let Some(&first) = index.pairs.get(&key) {
                return Err(GraphError::DuplicateEdge {
                    first,
                    second: slot,
                    source_id: edge.source,
                    target_id: edge.target,
                });
            }
            index.pairs.insert(key, slot);
        }

        Ok(index)
    }

    pub fn node_id(&self, label: &FacetLabel) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    pub fn edge_slot(&self, source: NodeId, target: NodeId) -> Option<usize> {
        self.pairs.get(&(source, target)).copied()
    }

    pub(crate) fn insert_node(&mut self, label: FacetLabel, id: NodeId) {
        self.labels.insert(label, id);
    }

    pub(crate) fn insert_edge(&mut self, source: NodeId, target: NodeId, slot: usize) {
        self.pairs.insert((source, target), slot);
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn clear(&mut self) {
        self.labels.clear();
        self.pairs.clear();
    }
}
