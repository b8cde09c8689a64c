//! nt-graph: facet graph layer for flow diagrams.
//!
//! Provides:
//! - Flow graph data structures (Node, Edge, FlowGraph)
//! - Incremental builder folding grouped query rows into a deduplicated graph
//! - Hash indices for label and edge-pair lookups
//! - Derived views: ranked source summary, per-node detail, chord matrix
//!
//! # Example
//!
//! ```
//! use nt_graph::{build_graph, FlowGraph, Row};
//!
//! let rows = vec![
//!     Row::new(["A", "B", "C"], 10.0),
//!     Row::new(["A", "B", "D"], 5.0),
//! ];
//! let graph = build_graph(&rows, FlowGraph::new(), true);
//!
//! assert_eq!(graph.nodes().len(), 4);
//! assert_eq!(graph.edges().len(), 3);
//! assert_eq!(graph.edges()[0].value, 15.0);
//! ```

pub mod builder;
pub mod detail;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod palette;
pub mod row;
pub mod summary;
pub(crate) mod validate;

pub use builder::{build_graph, GraphBuilder};
pub use detail::FlowRow;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, FlowGraph, Node};
pub use indexing::GraphIndex;
pub use palette::{color_for, PALETTE};
pub use row::Row;
pub use summary::{GraphTotals, SummaryRow};
