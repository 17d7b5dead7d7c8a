//! Quarry Core - Record and value types for the Quarry query pipeline.
//!
//! This crate provides the foundational types for Quarry, an in-memory
//! chainable query engine over collections of plain records:
//!
//! - `DataType`: Supported field types (Boolean, Int64, Float64, String)
//! - `Value`: Runtime values a record field can hold
//! - `Record`: A free-form, insertion-ordered mapping of field name to value
//! - `Error`: Error types for the strict access and conversion boundary
//!
//! # Example
//!
//! ```rust
//! use quarry_core::{Record, Value};
//!
//! let row = Record::new()
//!     .with("region", "emea")
//!     .with("units", 12)
//!     .with("active", true);
//!
//! assert_eq!(row.get("units"), Some(&Value::Int64(12)));
//! // Absent fields read as zero through the pipeline's accessor.
//! assert_eq!(row.get_or_zero("discount"), Value::Int64(0));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;
mod types;
mod value;

pub use error::{Error, Result};
pub use record::Record;
pub use types::DataType;
pub use value::Value;
