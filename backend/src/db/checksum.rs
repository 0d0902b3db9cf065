//! Checksums for call batch deduplication.

use sha2::{Digest, Sha256};

use crate::models::CallRecord;

/// Checksum of a batch of call rows.
///
/// Rows are hashed in the order given, independent of how their JSON was
/// formatted. Text fields are length-prefixed so a separator inside a name
/// cannot shift a field boundary.
pub fn checksum_records(records: &[CallRecord]) -> String {
    let mut hasher = Sha256::new();
    for r in records {
        hasher.update(r.company_id.value().to_le_bytes());
        for text in [&r.company_name, &r.state] {
            hasher.update((text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        hasher.update(r.year.to_le_bytes());
        hasher.update(r.month.to_le_bytes());
        for count in [r.calls, r.campaigns, r.customers] {
            hasher.update(count.to_le_bytes());
        }
    }
    hex::encode(hasher.finalize())
}
