use chrono::{DateTime, Utc};
use nt_graph::{Edge, Node};
use nt_query::Attribute;
use serde::Serialize;

use crate::session::PollPhase;

/// What a renderer needs after each update: index-based edges into `nodes`,
/// plus the loading gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub is_loading: bool,
    pub phase: PollPhase,
    pub generation: u64,
    pub polls_completed: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub attribute: Attribute,
    pub hide_labels: bool,
}

impl Default for GraphSnapshot {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            is_loading: false,
            phase: PollPhase::Idle,
            generation: 0,
            polls_completed: 0,
            last_updated: None,
            attribute: Attribute::default(),
            hide_labels: false,
        }
    }
}

impl GraphSnapshot {
    /// Nothing to draw yet (or the last good poll had no rows).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
