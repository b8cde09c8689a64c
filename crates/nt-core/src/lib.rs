//! nt-core: shared foundation for the flow-graph crates.
//!
//! Contains:
//! - ids (compact node ids, serialized as positional indices)
//! - label (facet labels with exact equality)
//! - numeric (Real + tolerances + float guards)
//! - format (human readable byte/bit/count sizes)
//! - error (shared error types)

pub mod error;
pub mod format;
pub mod ids;
pub mod label;
pub mod numeric;

pub use error::{NtError, NtResult};
pub use format::{bits_to_size, bytes_to_size, int_to_size};
pub use ids::*;
pub use label::FacetLabel;
pub use numeric::*;
