//! Content-based fingerprints for query parameters.

use sha2::{Digest, Sha256};

use crate::nrql::build_query;
use crate::params::QueryParams;

/// Fingerprint of everything that shapes the executed query.
///
/// Two parameter sets share a fingerprint exactly when they send the same
/// query to the same account; cosmetic fields and (for fixed windows) the
/// poll interval do not contribute.
pub fn params_fingerprint(params: &QueryParams) -> String {
    let mut hasher = Sha256::new();

    match params.account_id {
        Some(account) => hasher.update(account.0.to_le_bytes()),
        None => hasher.update(b"no-account"),
    }
    hasher.update(build_query(params).as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
