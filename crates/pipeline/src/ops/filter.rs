//! Filter operator.

use alloc::vec::Vec;
use quarry_core::Record;

/// Keeps the order-preserving subsequence of records satisfying the
/// predicate.
pub fn filter_records<P>(records: Vec<Record>, predicate: P) -> Vec<Record>
where
    P: Fn(&Record) -> bool,
{
    records.into_iter().filter(|r| predicate(r)).collect()
}
