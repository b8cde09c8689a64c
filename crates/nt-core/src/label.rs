//! Facet labels: the group values a query row carries per facet position.

use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One facet value from a grouped result row.
///
/// Identity is exact: `Text("10")` and `Number(10.0)` are different labels,
/// and every `Missing` label equals every other `Missing` label.
#[derive(Clone)]
pub enum FacetLabel {
    Text(String),
    Number(f64),
    Missing,
}

impl FacetLabel {
    pub fn text(s: impl Into<String>) -> Self {
        FacetLabel::Text(s.into())
    }

    /// Bit pattern used for numeric identity; `-0.0` folds into `0.0`.
    fn number_bits(n: f64) -> u64 {
        if n == 0.0 { 0.0_f64.to_bits() } else { n.to_bits() }
    }
}

impl PartialEq for FacetLabel {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FacetLabel::Text(a), FacetLabel::Text(b)) => a == b,
            (FacetLabel::Number(a), FacetLabel::Number(b)) => {
                Self::number_bits(*a) == Self::number_bits(*b)
            }
            (FacetLabel::Missing, FacetLabel::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for FacetLabel {}

impl Hash for FacetLabel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            FacetLabel::Text(s) => s.hash(state),
            FacetLabel::Number(n) => Self::number_bits(*n).hash(state),
            FacetLabel::Missing => {}
        }
    }
}

impl fmt::Debug for FacetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetLabel::Text(s) => write!(f, "{s:?}"),
            FacetLabel::Number(n) => write!(f, "{n}"),
            FacetLabel::Missing => f.write_str("Missing"),
        }
    }
}

impl fmt::Display for FacetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetLabel::Text(s) => f.write_str(s),
            // Display drops the fractional part of integral numbers (AS numbers, ports)
            FacetLabel::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FacetLabel::Number(n) => write!(f, "{n}"),
            FacetLabel::Missing => f.write_str("(unknown)"),
        }
    }
}

impl From<&str> for FacetLabel {
    fn from(s: &str) -> Self {
        FacetLabel::Text(s.to_string())
    }
}

impl From<String> for FacetLabel {
    fn from(s: String) -> Self {
        FacetLabel::Text(s)
    }
}

impl From<f64> for FacetLabel {
    fn from(n: f64) -> Self {
        FacetLabel::Number(n)
    }
}

impl From<i64> for FacetLabel {
    fn from(n: i64) -> Self {
        FacetLabel::Number(n as f64)
    }
}

impl<T: Into<FacetLabel>> From<Option<T>> for FacetLabel {
    fn from(value: Option<T>) -> Self {
        value.map_or(FacetLabel::Missing, Into::into)
    }
}

impl Serialize for FacetLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FacetLabel::Text(s) => serializer.serialize_str(s),
            FacetLabel::Number(n) => serializer.serialize_f64(*n),
            FacetLabel::Missing => serializer.serialize_none(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl<'de> Deserialize<'de> for FacetLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawLabel>::deserialize(deserializer)? {
            Some(RawLabel::Text(s)) => FacetLabel::Text(s),
            Some(RawLabel::Number(n)) => FacetLabel::Number(n),
            Some(RawLabel::Bool(b)) => FacetLabel::Text(b.to_string()),
            None => FacetLabel::Missing,
        })
    }
}
