use nt_core::{FacetLabel, Real};
use serde::{Deserialize, Serialize};

/// One grouped result record: a tuple of facet labels plus one measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub labels: Vec<FacetLabel>,
    pub value: Real,
}

impl Row {
    pub fn new<L, I>(labels: I, value: Real) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<FacetLabel>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            value,
        }
    }

    /// Number of facet positions.
    pub fn arity(&self) -> usize {
        self.labels.len()
    }
}
