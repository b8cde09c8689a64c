//! Deterministic query-string construction.

use crate::params::{Attribute, DataSource, QueryParams};

/// Public AS numbers only: excludes private (64495..=65534) and reserved ranges.
pub const IPFIX_PUBLIC_AS_WHERE: &str = concat!(
    " WHERE (bgpSourceAsNumber > 1 AND bgpSourceAsNumber < 64495)",
    " OR (bgpSourceAsNumber > 65534 AND bgpSourceAsNumber < 4200000000)",
    " OR (bgpSourceAsNumber > 4294967294)",
);

/// Aggregate expression for a measure on a data source.
pub fn measure_expr(source: DataSource, attribute: Attribute) -> &'static str {
    match (source, attribute) {
        (_, Attribute::Count) => "count(*)",
        (DataSource::Sflow, Attribute::Throughput) => "sum(scaledByteCount * 8)",
        (DataSource::Ipfix, Attribute::Throughput) => "sum(octetDeltaCount * 64000)",
    }
}

/// Build the grouped query for a set of parameters.
///
/// The same parameters always yield the same string.
pub fn build_query(params: &QueryParams) -> String {
    let source = params.source;
    let mut query = format!(
        "FROM {} SELECT {} as 'value'",
        source.event_type(),
        measure_expr(source, params.attribute)
    );

    if source == DataSource::Ipfix {
        query.push_str(IPFIX_PUBLIC_AS_WHERE);
    }

    query.push_str(" FACET ");
    query.push_str(&params.facets().join(", "));

    match source {
        DataSource::Sflow => {
            query.push_str(&format!(" LIMIT {}", params.limit));
            if let Some(range) = &params.time_range {
                query.push_str(&range.to_nrql());
            }
        }
        DataSource::Ipfix => {
            // Without an explicit window, each poll covers one interval
            match &params.time_range {
                Some(range) => query.push_str(&range.to_nrql()),
                None => {
                    let window = if params.is_repeating() {
                        params.interval_seconds
                    } else {
                        crate::params::INTERVAL_SECONDS_DEFAULT
                    };
                    query.push_str(&format!(" SINCE {window} seconds ago"));
                }
            }
            query.push_str(&format!(" LIMIT {}", params.limit));
        }
    }

    query
}
