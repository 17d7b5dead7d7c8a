//! Sort operator.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use quarry_core::{Record, Value};

static ZERO: Value = Value::Int64(0);

/// Compares two records field by field under `Value` ordering, reading
/// absent fields as zero. Later fields break ties on earlier ones.
pub fn compare_by_fields(a: &Record, b: &Record, fields: &[String]) -> Ordering {
    for field in fields {
        let a_val = a.get(field).unwrap_or(&ZERO);
        let b_val = b.get(field).unwrap_or(&ZERO);

        let cmp = a_val.cmp(b_val);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    Ordering::Equal
}

/// Stable sort by the named fields, ascending.
pub fn sort_by_fields(mut records: Vec<Record>, fields: &[String]) -> Vec<Record> {
    records.sort_by(|a, b| compare_by_fields(a, b, fields));
    records
}

/// Stable sort with a caller-supplied three-way comparator.
pub fn sort_with<F>(mut records: Vec<Record>, compare: F) -> Vec<Record>
where
    F: Fn(&Record, &Record) -> Ordering,
{
    records.sort_by(|a, b| compare(a, b));
    records
}
