//! User-facing query parameters.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::time_range::TimeRange;

pub const QUERY_LIMIT_MIN: u32 = 1;
pub const QUERY_LIMIT_MAX: u32 = 100;
pub const QUERY_LIMIT_DEFAULT: u32 = 50;

pub const INTERVAL_SECONDS_MIN: u32 = 3;
pub const INTERVAL_SECONDS_MAX: u32 = 60;
pub const INTERVAL_SECONDS_DEFAULT: u32 = 30;

/// Opaque account identifier handed to the query executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flow-record event type queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Sampled flows, source address -> destination address.
    #[default]
    Sflow,
    /// Exported flows, peer -> router agent -> destination address.
    Ipfix,
}

impl DataSource {
    pub fn event_type(self) -> &'static str {
        match self {
            DataSource::Sflow => "sflow",
            DataSource::Ipfix => "ipfix",
        }
    }

    /// Grouping used when the parameters name none.
    pub fn default_grouping(self) -> &'static [&'static str] {
        match self {
            DataSource::Sflow => &["networkSourceAddress", "networkDestinationAddress"],
            DataSource::Ipfix => &["peerName"],
        }
    }

    /// Facets the source always appends after the grouping fields.
    pub fn trailing_facets(self) -> &'static [&'static str] {
        match self {
            DataSource::Sflow => &[],
            DataSource::Ipfix => &["agent", "destinationIPv4Address"],
        }
    }
}

/// Numeric measure aggregated per facet group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    #[default]
    Throughput,
    Count,
}

impl Attribute {
    /// Format a measure of this kind for display.
    pub fn format(self, value: f64) -> String {
        match self {
            Attribute::Throughput => nt_core::bits_to_size(value, false),
            Attribute::Count => nt_core::int_to_size(value, false),
        }
    }
}

fn default_limit() -> u32 {
    QUERY_LIMIT_DEFAULT
}

fn default_interval() -> u32 {
    INTERVAL_SECONDS_DEFAULT
}

/// Everything that shapes one polling session's query.
///
/// `hide_labels` is display-only and never affects the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub source: DataSource,
    #[serde(default)]
    pub grouping: Vec<String>,
    #[serde(default)]
    pub attribute: Attribute,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_interval")]
    pub interval_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default)]
    pub hide_labels: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            account_id: None,
            source: DataSource::default(),
            grouping: Vec::new(),
            attribute: Attribute::default(),
            limit: QUERY_LIMIT_DEFAULT,
            interval_seconds: INTERVAL_SECONDS_DEFAULT,
            time_range: None,
            hide_labels: false,
        }
    }
}

impl QueryParams {
    pub fn for_account(account_id: AccountId, source: DataSource) -> Self {
        Self {
            account_id: Some(account_id),
            source,
            ..Self::default()
        }
    }

    /// Grouping fields in effect (the source default when none are named).
    pub fn effective_grouping(&self) -> Vec<&str> {
        if self.grouping.is_empty() {
            self.source.default_grouping().to_vec()
        } else {
            self.grouping.iter().map(String::as_str).collect()
        }
    }

    /// All facet fields in query order.
    pub fn facets(&self) -> Vec<&str> {
        let mut facets = self.effective_grouping();
        facets.extend_from_slice(self.source.trailing_facets());
        facets
    }

    /// Whether polling repeats on a timer (interval 0 means a single poll).
    pub fn is_repeating(&self) -> bool {
        self.interval_seconds > 0
    }

    /// Check account presence and parameter bounds.
    pub fn validate(&self) -> QueryResult<AccountId> {
        let account_id = self.account_id.ok_or(QueryError::MissingAccount)?;

        if !(QUERY_LIMIT_MIN..=QUERY_LIMIT_MAX).contains(&self.limit) {
            return Err(QueryError::InvalidParams(format!(
                "limit {} outside {QUERY_LIMIT_MIN}..={QUERY_LIMIT_MAX}",
                self.limit
            )));
        }

        if self.is_repeating()
            && !(INTERVAL_SECONDS_MIN..=INTERVAL_SECONDS_MAX).contains(&self.interval_seconds)
        {
            return Err(QueryError::InvalidParams(format!(
                "interval {}s outside {INTERVAL_SECONDS_MIN}..={INTERVAL_SECONDS_MAX} (or 0)",
                self.interval_seconds
            )));
        }

        let grouping = self.effective_grouping();
        if grouping.len() > 2 {
            return Err(QueryError::InvalidParams(format!(
                "expected 1 or 2 grouping fields, got {}",
                grouping.len()
            )));
        }
        if let Some(bad) = grouping.iter().find(|g| !is_field_name(g)) {
            return Err(QueryError::InvalidParams(format!(
                "grouping field {bad:?} is not a plain attribute name"
            )));
        }

        Ok(account_id)
    }
}

/// Only plain identifiers may be spliced into the query text.
fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
