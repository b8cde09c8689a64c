//! Per-flow detail views for tables and chord diagrams.

use nt_core::{FacetLabel, NodeId, Real};
use serde::Serialize;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, FlowGraph};

/// A flow between two labelled entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRow {
    pub source: FacetLabel,
    pub target: FacetLabel,
    pub value: Real,
}

fn flow_row(graph: &FlowGraph, edge: &Edge) -> Option<FlowRow> {
    Some(FlowRow {
        source: graph.node(edge.source)?.name.clone(),
        target: graph.node(edge.target)?.name.clone(),
        value: edge.value,
    })
}

/// Every edge as a labelled flow, in edge order.
pub fn flows(graph: &FlowGraph) -> Vec<FlowRow> {
    graph
        .edges()
        .iter()
        .filter_map(|e| flow_row(graph, e))
        .collect()
}

/// Flows touching one node: outgoing edges first, then incoming ones.
///
/// A self-loop is listed once, with the outgoing group.
pub fn neighbors(graph: &FlowGraph, id: NodeId) -> GraphResult<Vec<FlowRow>> {
    if graph.node(id).is_none() {
        return Err(GraphError::NodeNotFound(id));
    }
    let outgoing = graph.edges().iter().filter(|e| e.source == id);
    let incoming = graph
        .edges()
        .iter()
        .filter(|e| e.target == id && e.source != id);
    Ok(outgoing
        .chain(incoming)
        .filter_map(|e| flow_row(graph, e))
        .collect())
}

/// Square matrix `m[source][target] = edge value`, zero where no edge exists.
pub fn relationship_matrix(graph: &FlowGraph) -> Vec<Vec<Real>> {
    let n = graph.nodes().len();
    let mut matrix = vec![vec![0.0; n]; n];
    for edge in graph.edges() {
        matrix[edge.source.position()][edge.target.position()] = edge.value;
    }
    matrix
}
