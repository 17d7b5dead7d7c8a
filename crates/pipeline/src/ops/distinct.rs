//! Distinct operator.

use alloc::vec::Vec;
use hashbrown::HashSet;
use quarry_core::{Record, Value};

/// Collects the distinct values of `field` across the records, each wrapped
/// as the one-field record `{field: value}`, in first-occurrence order.
/// Absent fields read as zero; distinctness is structural `Value` equality.
pub fn distinct_field(records: &[Record], field: &str) -> Vec<Record> {
    let mut seen: HashSet<Value> = HashSet::new();
    let mut out = Vec::new();

    for record in records {
        let value = record.get_or_zero(field);
        if seen.insert(value.clone()) {
            out.push(Record::new().with(field, value));
        }
    }

    out
}
