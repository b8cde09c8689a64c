//! nt-query: parameter surface and query construction for flow polling.
//!
//! Turns the user-facing parameters (account, data source, grouping,
//! measure, limit, window) into a deterministic query string, decodes the
//! executor's JSON result rows, and fingerprints parameters so callers can
//! tell a query-affecting change from a cosmetic one.

pub mod error;
pub mod hash;
pub mod nrql;
pub mod params;
pub mod row;
pub mod time_range;

pub use error::{QueryError, QueryResult};
pub use hash::params_fingerprint;
pub use nrql::build_query;
pub use params::{AccountId, Attribute, DataSource, QueryParams};
pub use row::{decode_rows, decode_rows_str};
pub use time_range::TimeRange;
