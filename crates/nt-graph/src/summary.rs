//! Source summary derived from accumulated node values.

use nt_core::{FacetLabel, NodeId, Real};
use serde::Serialize;

use crate::graph::FlowGraph;

/// One line of the ranked source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub id: NodeId,
    pub name: FacetLabel,
    pub value: Real,
    pub color: &'static str,
}

/// Nodes that sourced traffic, largest first.
///
/// Zero-valued nodes (pure targets) are left out; ties keep first-seen order.
pub fn rank_sources(graph: &FlowGraph) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = graph
        .nodes()
        .iter()
        .filter(|n| n.value > 0.0)
        .map(|n| SummaryRow {
            id: n.id,
            name: n.name.clone(),
            value: n.value,
            color: n.color,
        })
        .collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows
}

/// Headline counts for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GraphTotals {
    pub node_count: usize,
    pub edge_count: usize,
    pub source_total: Real,
}

impl GraphTotals {
    pub fn of(graph: &FlowGraph) -> Self {
        Self {
            node_count: graph.nodes().len(),
            edge_count: graph.edges().len(),
            source_total: graph.nodes().iter().map(|n| n.value).sum(),
        }
    }
}
