//! Error types for Quarry.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for Quarry operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for strict record access and value conversion.
///
/// The fluent pipeline itself degrades silently (empty inputs and unknown
/// fields no-op or apply the zero convention); these errors only surface at
/// the strict read-out boundary: [`Record::require`](crate::Record::require)
/// and the `TryFrom<Value>` conversions.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Field not present in a record.
    FieldNotFound {
        field: String,
    },
    /// Value conversion to an incompatible type.
    TypeMismatch {
        expected: DataType,
        got: Option<DataType>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FieldNotFound { field } => {
                write!(f, "Field not found: {}", field)
            }
            Error::TypeMismatch { expected, got } => match got {
                Some(got) => write!(f, "Type mismatch: expected {:?}, got {:?}", expected, got),
                None => write!(f, "Type mismatch: expected {:?}, got null", expected),
            },
        }
    }
}

impl Error {
    /// Creates a field not found error.
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Error::FieldNotFound {
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: DataType, got: Option<DataType>) -> Self {
        Error::TypeMismatch { expected, got }
    }
}
