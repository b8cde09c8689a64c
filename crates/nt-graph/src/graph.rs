//! Core flow graph data structures.

use nt_core::{FacetLabel, NodeId, Real};
use serde::Serialize;

use crate::error::GraphResult;
use crate::indexing::GraphIndex;
use crate::palette::color_for;
use crate::validate;

/// A unique entity (by label) in the flow graph.
///
/// `value` accumulates the measures of rows where this node sat at the
/// first facet position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: FacetLabel,
    pub value: Real,
    pub color: &'static str,
}

/// A directed, value-weighted transition between consecutive facet positions.
///
/// Identity is the ordered `(source, target)` pair. `origin` is the
/// first-facet node of the row that created the edge; `color` follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub value: Real,
    pub color: &'static str,
    pub origin: NodeId,
}

/// Deduplicated node/edge graph.
///
/// Node ids are positions in `nodes`; edges refer to nodes by those
/// positions, so nodes are never reordered or removed individually.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    #[serde(skip)]
    pub(crate) index: GraphIndex,
}

impl FlowGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from previously produced node and edge lists.
    ///
    /// Validates positional ids, label uniqueness and edge endpoints, then
    /// rebuilds the lookup indices.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> GraphResult<Self> {
        validate::validate_structure(&nodes, &edges)?;
        let index = GraphIndex::from_parts(&nodes, &edges)?;
        Ok(Self {
            nodes,
            edges,
            index,
        })
    }

    /// Split into node and edge lists (the renderer's view).
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// Return all nodes in first-seen order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges in first-seen order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.position())
    }

    /// Find a node by its label.
    pub fn node_by_label(&self, label: &FacetLabel) -> Option<&Node> {
        self.index.node_id(label).and_then(|id| self.node(id))
    }

    /// Find the edge for an ordered pair.
    pub fn edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.index
            .edge_slot(source, target)
            .and_then(|slot| self.edges.get(slot))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Check the structural invariants (positional ids, unique labels and
    /// pairs, edge endpoints in range, finite values).
    pub fn validate(&self) -> GraphResult<()> {
        validate::validate_structure(&self.nodes, &self.edges)?;
        validate::validate_index(&self.nodes, &self.edges, &self.index)
    }

    /// Drop every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.index.clear();
    }

    /// Resolve a label to its node, appending a new zero-valued node if unseen.
    pub(crate) fn resolve(&mut self, label: &FacetLabel) -> NodeId {
        if let Some(id) = self.index.node_id(label) {
            return id;
        }
        let id = NodeId::from_position(self.nodes.len());
        self.nodes.push(Node {
            id,
            name: label.clone(),
            value: 0.0,
            color: color_for(id),
        });
        self.index.insert_node(label.clone(), id);
        id
    }

    /// Credit a measure to a node's running total.
    pub(crate) fn credit(&mut self, id: NodeId, value: Real) {
        if let Some(node) = self.nodes.get_mut(id.position()) {
            node.value += value;
        }
    }

    /// Add a measure to the `(source, target)` edge, creating it if absent.
    pub(crate) fn add_flow(&mut self, source: NodeId, target: NodeId, origin: NodeId, value: Real) {
        if let Some(slot) = self.index.edge_slot(source, target) {
            self.edges[slot].value += value;
            return;
        }
        let slot = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            value,
            color: color_for(origin),
            origin,
        });
        self.index.insert_edge(source, target, slot);
    }
}
