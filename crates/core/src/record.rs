//! Record structure for Quarry.
//!
//! This module defines the `Record` struct, a free-form, insertion-ordered
//! mapping from field name to [`Value`]. Records are the items query
//! pipelines read; operators never mutate an input record, they only read
//! fields and construct new output records.

use crate::error::{Error, Result};
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;

/// A single data item: an ordered set of named field values.
///
/// Field lookup is linear; records are expected to carry a handful of
/// fields, not hundreds of columns.
#[derive(Clone, Debug, Default)]
pub struct Record {
    /// Field name/value pairs in first-insertion order.
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds or replaces a field, returning the record for chaining.
    ///
    /// ```rust
    /// use quarry_core::Record;
    ///
    /// let rec = Record::new().with("region", "emea").with("units", 3);
    /// assert_eq!(rec.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a field, replacing the value in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Gets a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Gets a field value by name, reading an absent field as `Int64(0)`.
    ///
    /// This is the zero convention used uniformly by grouping, aggregation
    /// and deduplication so that keys built from partial records stay
    /// comparable.
    pub fn get_or_zero(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Int64(0))
    }

    /// Gets a field value by name, or fails with `FieldNotFound`.
    pub fn require(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| Error::field_not_found(name))
    }

    /// Returns true if the record has a field with the given name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Extracts the named fields into a new record, in the order given,
    /// applying the zero convention to absent fields.
    pub fn subset(&self, names: &[String]) -> Record {
        names
            .iter()
            .map(|name| (name.clone(), self.get_or_zero(name)))
            .collect()
    }

    /// Iterates over field name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the number of fields in this record.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Field-by-field equality, insensitive to insertion order.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Record {}
