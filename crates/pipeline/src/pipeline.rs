//! The fluent query pipeline builder.
//!
//! A [`Pipeline`] owns its working state outright and every non-terminal
//! operator consumes and returns it by value, so exclusive ownership of the
//! chain is a compile-time fact. Operators replace the working sequence
//! wholesale; input records are never mutated.
//!
//! The chain degrades rather than fails: empty field lists, empty inputs,
//! unknown fields and out-of-range truncation all no-op or apply the zero
//! convention. No operator panics or returns `Result`.

use crate::fields::IntoFields;
use crate::ops::{self, AggregateFunc};
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;
use quarry_core::Record;

/// Grouping state of a pipeline.
///
/// `Pending` is entered by [`Pipeline::group_by`] and left again by the
/// next aggregation call, which consumes the fields regardless of the
/// aggregation's outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
enum GroupState {
    /// No grouping request in flight.
    Idle,
    /// Grouping declared, waiting for an aggregation to run it.
    Pending(Vec<String>),
}

/// A chainable query over in-memory record collections.
///
/// See the crate-level example. A builder instance is single-owner and not
/// meant to be shared between logical query chains; start one `Pipeline`
/// per query.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    /// Concatenation of the input collections. Never mutated after `from`
    /// or `concat`; reads only.
    source: Vec<Record>,
    /// Working sequence, replaced wholesale by each operator.
    result: Vec<Record>,
    /// Grouping state machine.
    group: GroupState,
}

impl Default for GroupState {
    fn default() -> Self {
        GroupState::Idle
    }
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            source: Vec::new(),
            result: Vec::new(),
            group: GroupState::Idle,
        }
    }

    /// Loads a collection, replacing `source` and the working sequence.
    ///
    /// Calling `from` again on the same builder discards the previous
    /// pipeline state (overwrite semantics, not a reset API). Use
    /// [`concat`](Self::concat) to feed several collections into one
    /// pipeline.
    pub fn from<I>(mut self, collection: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        self.source = collection.into_iter().collect();
        self.result = self.source.clone();
        debug_op!("from: {} records", self.result.len());
        self
    }

    /// Appends a further collection to `source`, order-preserving, and
    /// refreshes the working sequence to the full concatenation.
    pub fn concat<I>(mut self, collection: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        self.source.extend(collection);
        self.result = self.source.clone();
        debug_op!("concat: {} records", self.result.len());
        self
    }

    /// Keeps the records satisfying `predicate`, order preserved.
    ///
    /// A pure filter; the grouping state is untouched.
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Record) -> bool,
    {
        self.result = ops::filter_records(mem::take(&mut self.result), predicate);
        debug_op!("filter: {} records kept", self.result.len());
        self
    }

    /// Declares grouping fields for the next aggregation call.
    ///
    /// This only records intent; the working sequence is untouched until
    /// an aggregation runs the grouping. A second `group_by` before an
    /// aggregation overwrites the pending fields; an empty list clears
    /// them.
    pub fn group_by<F>(mut self, group_fields: F) -> Self
    where
        F: IntoFields,
    {
        let group_fields = group_fields.into_fields();
        self.group = if group_fields.is_empty() {
            GroupState::Idle
        } else {
            GroupState::Pending(group_fields)
        };
        self
    }

    /// Sums the named fields, per group if a grouping is pending.
    ///
    /// Ungrouped, the first field is folded into a single
    /// `{field: total}` record; extra field names are ignored and an
    /// empty list is a no-op. Non-numeric values contribute nothing.
    pub fn sum<F>(self, agg_fields: F) -> Self
    where
        F: IntoFields,
    {
        self.apply_aggregate(agg_fields.into_fields(), AggregateFunc::Sum)
    }

    /// Averages the named fields, per group if a grouping is pending.
    ///
    /// Same calling contract as [`sum`](Self::sum); a field with no
    /// numeric contributions averages to `Null`.
    pub fn avg<F>(self, agg_fields: F) -> Self
    where
        F: IntoFields,
    {
        self.apply_aggregate(agg_fields.into_fields(), AggregateFunc::Avg)
    }

    /// Takes the minimum of the named fields under `Value` ordering.
    pub fn min<F>(self, agg_fields: F) -> Self
    where
        F: IntoFields,
    {
        self.apply_aggregate(agg_fields.into_fields(), AggregateFunc::Min)
    }

    /// Takes the maximum of the named fields under `Value` ordering.
    pub fn max<F>(self, agg_fields: F) -> Self
    where
        F: IntoFields,
    {
        self.apply_aggregate(agg_fields.into_fields(), AggregateFunc::Max)
    }

    /// Counts records into a `count` field, per group if a grouping is
    /// pending, otherwise over the whole working sequence.
    pub fn count(mut self) -> Self {
        match mem::take(&mut self.group) {
            GroupState::Pending(group_fields) => {
                self.result = ops::aggregate_grouped(
                    &self.result,
                    &group_fields,
                    &[String::from("count")],
                    AggregateFunc::Count,
                );
            }
            GroupState::Idle => {
                let total = self.result.len() as i64;
                self.result = alloc::vec![Record::new().with("count", total)];
            }
        }
        debug_op!("count: {} rows", self.result.len());
        self
    }

    fn apply_aggregate(mut self, agg_fields: Vec<String>, func: AggregateFunc) -> Self {
        // Consume the pending grouping whatever happens next.
        match mem::take(&mut self.group) {
            GroupState::Pending(group_fields) => {
                self.result =
                    ops::aggregate_grouped(&self.result, &group_fields, &agg_fields, func);
                debug_op!("{:?}: {} groups", func, self.result.len());
            }
            GroupState::Idle => {
                if let Some(field) = agg_fields.first() {
                    self.result =
                        alloc::vec![ops::aggregate_ungrouped(&self.result, field, func)];
                }
            }
        }
        self
    }

    /// Stable ascending sort by the named fields under `Value` ordering.
    ///
    /// Numeric fields sort numerically, strings lexicographically; absent
    /// fields read as zero. An empty field list or an empty working
    /// sequence is a no-op.
    pub fn order_by<F>(mut self, sort_fields: F) -> Self
    where
        F: IntoFields,
    {
        let sort_fields = sort_fields.into_fields();
        if sort_fields.is_empty() || self.result.is_empty() {
            return self;
        }
        self.result = ops::sort_by_fields(mem::take(&mut self.result), &sort_fields);
        self
    }

    /// Stable sort with a caller-supplied three-way comparator.
    pub fn order_by_with<C>(mut self, compare: C) -> Self
    where
        C: Fn(&Record, &Record) -> Ordering,
    {
        if self.result.is_empty() {
            return self;
        }
        self.result = ops::sort_with(mem::take(&mut self.result), compare);
        self
    }

    /// Reverses the current order in place. This does not re-sort: without
    /// a prior sort it simply reverses whatever order the working sequence
    /// is in.
    pub fn desc(mut self) -> Self {
        self.result.reverse();
        self
    }

    /// Keeps the first `amount` records (negative: the last `|amount|`,
    /// zero: none). Clamps to the available length.
    pub fn top(mut self, amount: i64) -> Self {
        self.result = ops::take_top(mem::take(&mut self.result), amount);
        debug_op!("top({}): {} records", amount, self.result.len());
        self
    }

    /// Replaces the working sequence with the distinct values of `field`,
    /// each as a one-field record, in first-occurrence order.
    pub fn distinct(mut self, field: &str) -> Self {
        self.result = ops::distinct_field(&self.result, field);
        debug_op!("distinct({}): {} records", field, self.result.len());
        self
    }

    /// Terminal read: projects the requested fields into new records.
    ///
    /// A present field keeps its value (a present `0` stays `0`); an
    /// absent field yields `Null`. An empty field list returns the working
    /// sequence as-is. Does not consume or mutate the builder, so repeated
    /// reads return equal results.
    pub fn select<F>(&self, out_fields: F) -> Vec<Record>
    where
        F: IntoFields,
    {
        let out_fields = out_fields.into_fields();
        if out_fields.is_empty() {
            return self.result.clone();
        }
        ops::project_fields(&self.result, &out_fields)
    }

    /// Terminal read: the working sequence as-is.
    pub fn select_all(&self) -> Vec<Record> {
        self.result.clone()
    }

    /// Returns the number of records currently in the working sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.result.len()
    }

    /// Returns true if the working sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use quarry_core::Value;

    fn sample() -> Vec<Record> {
        vec![
            Record::new().with("p", "a").with("n", 1),
            Record::new().with("p", "a").with("n", 2),
            Record::new().with("p", "b").with("n", 5),
        ]
    }

    #[test]
    fn test_from_copies_source_into_result() {
        let q = Pipeline::new().from(sample());
        assert_eq!(q.len(), 3);
        assert_eq!(q.select_all(), sample());
    }

    #[test]
    fn test_from_overwrites_prior_state() {
        let q = Pipeline::new()
            .from(sample())
            .filter(|_| false)
            .from(vec![Record::new().with("x", 1)]);
        // The second `from` discards the filtered-out state entirely.
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_concat_appends() {
        let q = Pipeline::new()
            .from(vec![Record::new().with("n", 1)])
            .concat(vec![Record::new().with("n", 2)]);
        let rows = q.select_all();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("n"), Some(&Value::Int64(1)));
        assert_eq!(rows[1].get("n"), Some(&Value::Int64(2)));
    }

    #[test]
    fn test_group_state_consumed_by_aggregation() {
        let q = Pipeline::new().from(sample()).group_by("p");
        assert_eq!(q.group, GroupState::Pending(vec![String::from("p")]));

        let q = q.sum("n");
        assert_eq!(q.group, GroupState::Idle);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_group_by_overwrites_pending_fields() {
        let q = Pipeline::new().from(sample()).group_by("p").group_by("n");
        assert_eq!(q.group, GroupState::Pending(vec![String::from("n")]));

        let empty: [&str; 0] = [];
        let q = q.group_by(empty);
        assert_eq!(q.group, GroupState::Idle);
    }

    #[test]
    fn test_grouping_without_aggregation_has_no_effect() {
        let q = Pipeline::new().from(sample()).group_by("p");
        assert_eq!(q.select_all(), sample());
    }

    #[test]
    fn test_ungrouped_sum_is_single_record() {
        let rows = Pipeline::new().from(sample()).sum("n").select_all();
        assert_eq!(rows, vec![Record::new().with("n", 8)]);
    }

    #[test]
    fn test_ungrouped_sum_ignores_extra_fields() {
        let rows = Pipeline::new().from(sample()).sum(["n", "p"]).select_all();
        assert_eq!(rows, vec![Record::new().with("n", 8)]);
    }

    #[test]
    fn test_ungrouped_sum_without_fields_is_noop() {
        let empty: [&str; 0] = [];
        let rows = Pipeline::new().from(sample()).sum(empty).select_all();
        assert_eq!(rows, sample());
    }

    #[test]
    fn test_count_ungrouped_and_grouped() {
        let rows = Pipeline::new().from(sample()).count().select_all();
        assert_eq!(rows, vec![Record::new().with("count", 3)]);

        let rows = Pipeline::new()
            .from(sample())
            .group_by("p")
            .count()
            .select_all();
        assert_eq!(rows[0], Record::new().with("p", "a").with("count", 2));
        assert_eq!(rows[1], Record::new().with("p", "b").with("count", 1));
    }

    #[test]
    fn test_desc_reverses_without_sorting() {
        let rows = Pipeline::new().from(sample()).desc().select_all();
        assert_eq!(rows[0].get("n"), Some(&Value::Int64(5)));
        assert_eq!(rows[2].get("n"), Some(&Value::Int64(1)));
    }

    #[test]
    fn test_order_by_empty_fields_is_noop() {
        let empty: [&str; 0] = [];
        let rows = Pipeline::new().from(sample()).desc().order_by(empty).select_all();
        assert_eq!(rows[0].get("n"), Some(&Value::Int64(5)));
    }

    #[test]
    fn test_select_does_not_consume() {
        let q = Pipeline::new().from(sample()).filter(|r| r.get_or_zero("n") != Value::Int64(5));
        let first = q.select(["p", "n"]);
        let second = q.select(["p", "n"]);
        assert_eq!(first, second);
        // And the unprojected state is intact too.
        assert_eq!(q.select_all().len(), 2);
    }

    #[test]
    fn test_empty_pipeline() {
        let q = Pipeline::new();
        assert!(q.is_empty());
        assert!(q.select_all().is_empty());
        assert!(q.select(["a"]).is_empty());
    }
}
