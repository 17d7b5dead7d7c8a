//! Pipeline operator implementations.

mod aggregate;
mod distinct;
mod filter;
mod limit;
mod project;
mod sort;

pub use aggregate::{aggregate_grouped, aggregate_ungrouped, AggregateFunc};
pub use distinct::distinct_field;
pub use filter::filter_records;
pub use limit::take_top;
pub use project::project_fields;
pub use sort::{compare_by_fields, sort_by_fields, sort_with};
