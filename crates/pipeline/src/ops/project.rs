//! Projection operator.

use alloc::string::String;
use alloc::vec::Vec;
use quarry_core::{Record, Value};

/// Builds one new record per input record containing exactly the requested
/// fields, in request order. A present field keeps its value (a present `0`
/// stays `0`); an absent field yields `Null`.
pub fn project_fields(records: &[Record], fields: &[String]) -> Vec<Record> {
    records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|name| {
                    (
                        name.clone(),
                        record.get(name).cloned().unwrap_or(Value::Null),
                    )
                })
                .collect()
        })
        .collect()
}
