//! Truncation operator.

use alloc::vec::Vec;
use quarry_core::Record;

/// Keeps the first `amount` records when `amount` is positive, the last
/// `|amount|` when negative, and none when zero. Counts beyond the
/// available length clamp; never an error.
pub fn take_top(mut records: Vec<Record>, amount: i64) -> Vec<Record> {
    let keep = amount.unsigned_abs() as usize;
    if amount < 0 {
        let start = records.len().saturating_sub(keep);
        records.drain(..start);
    } else {
        records.truncate(keep);
    }
    records
}
