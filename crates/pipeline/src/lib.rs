//! Quarry Pipeline - Fluent query pipeline over in-memory record collections.
//!
//! This crate provides the chainable query engine:
//!
//! - `Pipeline`: the fluent builder holding the working record sequence
//! - `IntoFields`: call-site argument type admitting a field name or a list
//! - `ops`: the leaf operator implementations (filter, aggregate, sort,
//!   distinct, limit, project)
//!
//! # Example
//!
//! ```rust
//! use quarry_core::Record;
//! use quarry_pipeline::Pipeline;
//!
//! let sales = vec![
//!     Record::new().with("region", "emea").with("units", 3),
//!     Record::new().with("region", "apac").with("units", 5),
//!     Record::new().with("region", "emea").with("units", 4),
//! ];
//!
//! let totals = Pipeline::new()
//!     .from(sales)
//!     .filter(|row| row.get_or_zero("units").as_number().unwrap_or(0.0) > 0.0)
//!     .group_by("region")
//!     .sum("units")
//!     .order_by("units")
//!     .desc()
//!     .select(["region", "units"]);
//!
//! assert_eq!(totals[0].get("region").and_then(|v| v.as_str()), Some("emea"));
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "debug-log")]
macro_rules! debug_op {
    ($($arg:tt)*) => { log::debug!(target: "quarry", $($arg)*) };
}

#[cfg(not(feature = "debug-log"))]
macro_rules! debug_op {
    ($($arg:tt)*) => {{}};
}

mod fields;
pub mod ops;
mod pipeline;

pub use fields::IntoFields;
pub use pipeline::Pipeline;
