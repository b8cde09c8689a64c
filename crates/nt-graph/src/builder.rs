//! Incremental facet graph builder.

use nt_core::{FacetLabel, NodeId};

use crate::graph::FlowGraph;
use crate::row::Row;

/// Builder folding grouped query rows into a flow graph.
///
/// Start from an empty graph or from the previous cycle's output, feed rows
/// with `add_row`, then call `build()` to take the graph back.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: FlowGraph,
    rows_added: usize,
    rows_skipped: usize,
}

impl GraphBuilder {
    /// Create a builder over an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a prior graph, or discard it when `reset` is set.
    pub fn from_prior(prior: FlowGraph, reset: bool) -> Self {
        let mut graph = prior;
        if reset {
            graph.clear();
        }
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Resolve a label to its node id, creating the node if unseen.
    pub fn resolve_node(&mut self, label: &FacetLabel) -> NodeId {
        self.graph.resolve(label)
    }

    /// Fold one row into the graph.
    ///
    /// The row's value is credited to the node at the first facet position
    /// and added, undivided, to every consecutive-position edge.
    pub fn add_row(&mut self, row: &Row) {
        if row.arity() == 0 {
            self.rows_skipped += 1;
            return;
        }
        if !row.value.is_finite() {
            tracing::warn!(value = row.value, "skipping row with non-finite value");
            self.rows_skipped += 1;
            return;
        }

        let ids: Vec<NodeId> = row
            .labels
            .iter()
            .map(|label| self.graph.resolve(label))
            .collect();

        let origin = ids[0];
        self.graph.credit(origin, row.value);

        for pair in ids.windows(2) {
            self.graph.add_flow(pair[0], pair[1], origin, row.value);
        }
        self.rows_added += 1;
    }

    /// Fold a sequence of rows in order.
    pub fn add_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) {
        for row in rows {
            self.add_row(row);
        }
    }

    /// Number of rows folded so far.
    pub fn rows_added(&self) -> usize {
        self.rows_added
    }

    /// Number of rows ignored (no facets or non-finite value).
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    /// Finish and return the graph.
    pub fn build(self) -> FlowGraph {
        tracing::debug!(
            rows = self.rows_added,
            skipped = self.rows_skipped,
            nodes = self.graph.nodes().len(),
            edges = self.graph.edges().len(),
            "facet graph built"
        );
        self.graph
    }
}

/// Fold `rows` into `prior` (or into an empty graph when `reset` is set).
pub fn build_graph(rows: &[Row], prior: FlowGraph, reset: bool) -> FlowGraph {
    let mut builder = GraphBuilder::from_prior(prior, reset);
    builder.add_rows(rows);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> FacetLabel {
        FacetLabel::text(s)
    }

    #[test]
    fn builder_basic() {
        let mut builder = GraphBuilder::new();
        builder.add_row(&Row::new(["A", "B"], 4.0));
        let graph = builder.build();

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.nodes()[0].value, 4.0);
        assert_eq!(graph.nodes()[1].value, 0.0);
    }

    #[test]
    fn single_facet_row_credits_without_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_row(&Row::new(["A"], 2.5));
        assert_eq!(builder.rows_added(), 1);
        let graph = builder.build();

        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.nodes()[0].value, 2.5);
    }

    #[test]
    fn empty_and_non_finite_rows_skipped() {
        let mut builder = GraphBuilder::new();
        builder.add_row(&Row::new(Vec::<FacetLabel>::new(), 1.0));
        builder.add_row(&Row::new(["A", "B"], f64::NAN));
        assert_eq!(builder.rows_skipped(), 2);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn missing_labels_share_one_node() {
        let rows = vec![
            Row::new([label("A"), FacetLabel::Missing], 1.0),
            Row::new([label("B"), FacetLabel::Missing], 2.0),
        ];
        let graph = build_graph(&rows, FlowGraph::new(), true);

        assert_eq!(graph.nodes().len(), 3);
        assert_eq!(graph.nodes()[1].name, FacetLabel::Missing);
        assert_eq!(graph.edges()[1].target, graph.nodes()[1].id);
    }

    #[test]
    fn zero_values_are_retained() {
        let graph = build_graph(&[Row::new(["A", "B"], 0.0)], FlowGraph::new(), true);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].value, 0.0);
    }

    #[test]
    fn reset_discards_prior() {
        let first = build_graph(&[Row::new(["A", "B"], 1.0)], FlowGraph::new(), true);
        let second = build_graph(&[Row::new(["C", "D"], 1.0)], first, true);

        assert_eq!(second.nodes()[0].name, label("C"));
        assert_eq!(second.nodes().len(), 2);
    }

    #[test]
    fn self_loop_is_an_edge() {
        let graph = build_graph(&[Row::new(["A", "A"], 3.0)], FlowGraph::new(), true);
        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.edges()[0].source, graph.edges()[0].target);
        assert!(graph.validate().is_ok());
    }
}
