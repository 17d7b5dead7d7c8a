//! Aggregate operator.
//!
//! One engine backs every aggregation the pipeline exposes. In grouped mode
//! each record contributes its grouping-key tuple (read with the zero
//! convention) and one value per aggregated field; output rows appear in
//! first-appearance order of their keys. Accumulator state is held per
//! (group key, field) pair, indexed by the structural key tuple, never by
//! a serialized form of it.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use quarry_core::{Record, Value};

/// Aggregate functions supported by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateFunc {
    /// Running total.
    Sum,
    /// Running total divided by contribution count.
    Avg,
    /// Record count.
    Count,
    /// Minimum under `Value` ordering.
    Min,
    /// Maximum under `Value` ordering.
    Max,
}

/// Running state for one (group key, field) pair.
enum Accumulator {
    Sum { total: f64, all_int: bool, seen: bool },
    Avg { count: u64, total: f64 },
    Count { count: i64 },
    Min { current: Option<Value> },
    Max { current: Option<Value> },
}

impl Accumulator {
    fn new(func: AggregateFunc) -> Self {
        match func {
            AggregateFunc::Sum => Accumulator::Sum {
                total: 0.0,
                all_int: true,
                seen: false,
            },
            AggregateFunc::Avg => Accumulator::Avg {
                count: 0,
                total: 0.0,
            },
            AggregateFunc::Count => Accumulator::Count { count: 0 },
            AggregateFunc::Min => Accumulator::Min { current: None },
            AggregateFunc::Max => Accumulator::Max { current: None },
        }
    }

    /// Folds one value into the running state.
    ///
    /// Sum and avg read values through `Value::as_number`; a non-numeric
    /// value contributes neither to the total nor to avg's count. Count
    /// counts every record. Min and max skip nulls.
    fn fold(&mut self, value: &Value) {
        match self {
            Accumulator::Sum {
                total,
                all_int,
                seen,
            } => {
                if let Some(n) = value.as_number() {
                    *total += n;
                    *seen = true;
                    if !matches!(value, Value::Int64(_)) {
                        *all_int = false;
                    }
                }
            }
            Accumulator::Avg { count, total } => {
                if let Some(n) = value.as_number() {
                    *count += 1;
                    *total += n;
                }
            }
            Accumulator::Count { count } => {
                *count += 1;
            }
            Accumulator::Min { current } => {
                if !value.is_null() && current.as_ref().map_or(true, |c| value < c) {
                    *current = Some(value.clone());
                }
            }
            Accumulator::Max { current } => {
                if !value.is_null() && current.as_ref().map_or(true, |c| value > c) {
                    *current = Some(value.clone());
                }
            }
        }
    }

    /// Returns the aggregate value for the current running state.
    ///
    /// A sum fed only Int64 values stays Int64, otherwise Float64; an avg
    /// with no numeric contributions is Null, as are min/max over nothing.
    fn current(&self) -> Value {
        match self {
            Accumulator::Sum {
                total,
                all_int,
                seen,
            } => {
                if *seen && !*all_int {
                    Value::Float64(*total)
                } else {
                    Value::Int64(*total as i64)
                }
            }
            Accumulator::Avg { count, total } => {
                if *count == 0 {
                    Value::Null
                } else {
                    Value::Float64(*total / *count as f64)
                }
            }
            Accumulator::Count { count } => Value::Int64(*count),
            Accumulator::Min { current } | Accumulator::Max { current } => {
                current.clone().unwrap_or(Value::Null)
            }
        }
    }
}

/// Groups records by the tuple of `group_fields` values and folds each of
/// `agg_fields` per group.
///
/// Output rows carry the grouping fields followed by the aggregated fields
/// and appear in first-appearance order of their keys. With an empty
/// `agg_fields` the output is exactly the distinct key rows.
pub fn aggregate_grouped(
    records: &[Record],
    group_fields: &[String],
    agg_fields: &[String],
    func: AggregateFunc,
) -> Vec<Record> {
    let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
    let mut rows: Vec<Record> = Vec::new();
    let mut accums: Vec<Vec<Accumulator>> = Vec::new();

    for record in records {
        let key: Vec<Value> = group_fields
            .iter()
            .map(|field| record.get_or_zero(field))
            .collect();

        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                // Seed the output row with the key fields, zero convention
                // included, so it matches the lookup key exactly.
                rows.push(record.subset(group_fields));
                accums.push(agg_fields.iter().map(|_| Accumulator::new(func)).collect());
                index.insert(key, rows.len() - 1);
                rows.len() - 1
            }
        };

        for (i, field) in agg_fields.iter().enumerate() {
            let value = record.get_or_zero(field);
            accums[slot][i].fold(&value);
            rows[slot].insert(field.clone(), accums[slot][i].current());
        }
    }

    rows
}

/// Folds a single named column across all records into one output record
/// `{field: aggregate}`.
pub fn aggregate_ungrouped(records: &[Record], field: &str, func: AggregateFunc) -> Record {
    let mut acc = Accumulator::new(func);
    for record in records {
        acc.fold(&record.get_or_zero(field));
    }
    Record::new().with(field, acc.current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sales() -> Vec<Record> {
        vec![
            Record::new().with("p", "a").with("n", 1),
            Record::new().with("p", "a").with("n", 2),
            Record::new().with("p", "b").with("n", 5),
        ]
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn test_grouped_sum() {
        let result = aggregate_grouped(&sales(), &fields(&["p"]), &fields(&["n"]), AggregateFunc::Sum);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], Record::new().with("p", "a").with("n", 3));
        assert_eq!(result[1], Record::new().with("p", "b").with("n", 5));
    }

    #[test]
    fn test_grouped_avg() {
        let result = aggregate_grouped(&sales(), &fields(&["p"]), &fields(&["n"]), AggregateFunc::Avg);

        assert_eq!(result[0], Record::new().with("p", "a").with("n", 1.5));
        assert_eq!(result[1], Record::new().with("p", "b").with("n", 5.0));
    }

    #[test]
    fn test_grouped_count_min_max() {
        let result =
            aggregate_grouped(&sales(), &fields(&["p"]), &fields(&["n"]), AggregateFunc::Count);
        assert_eq!(result[0].get("n"), Some(&Value::Int64(2)));
        assert_eq!(result[1].get("n"), Some(&Value::Int64(1)));

        let result =
            aggregate_grouped(&sales(), &fields(&["p"]), &fields(&["n"]), AggregateFunc::Min);
        assert_eq!(result[0].get("n"), Some(&Value::Int64(1)));

        let result =
            aggregate_grouped(&sales(), &fields(&["p"]), &fields(&["n"]), AggregateFunc::Max);
        assert_eq!(result[0].get("n"), Some(&Value::Int64(2)));
    }

    #[test]
    fn test_first_appearance_order() {
        let records = vec![
            Record::new().with("p", "z").with("n", 1),
            Record::new().with("p", "a").with("n", 1),
            Record::new().with("p", "z").with("n", 1),
        ];
        let result =
            aggregate_grouped(&records, &fields(&["p"]), &fields(&["n"]), AggregateFunc::Sum);

        assert_eq!(result[0].get("p"), Some(&Value::String("z".into())));
        assert_eq!(result[1].get("p"), Some(&Value::String("a".into())));
    }

    #[test]
    fn test_multi_field_key() {
        let records = vec![
            Record::new().with("a", 1).with("b", 1).with("n", 10),
            Record::new().with("a", 1).with("b", 2).with("n", 20),
            Record::new().with("a", 1).with("b", 1).with("n", 30),
        ];
        let result = aggregate_grouped(
            &records,
            &fields(&["a", "b"]),
            &fields(&["n"]),
            AggregateFunc::Sum,
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].get("n"), Some(&Value::Int64(40)));
        assert_eq!(result[1].get("n"), Some(&Value::Int64(20)));
    }

    #[test]
    fn test_missing_group_field_reads_zero() {
        let records = vec![
            Record::new().with("n", 1),
            Record::new().with("g", 0).with("n", 2),
        ];
        // Both records key to g = 0: one from the zero convention, one real.
        let result =
            aggregate_grouped(&records, &fields(&["g"]), &fields(&["n"]), AggregateFunc::Sum);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].get("n"), Some(&Value::Int64(3)));
    }

    #[test]
    fn test_structural_keys_do_not_collide() {
        // Int64(1) and String("1") stringify alike but are distinct keys.
        let records = vec![
            Record::new().with("g", 1).with("n", 10),
            Record::new().with("g", "1").with("n", 20),
        ];
        let result =
            aggregate_grouped(&records, &fields(&["g"]), &fields(&["n"]), AggregateFunc::Sum);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].get("n"), Some(&Value::Int64(10)));
        assert_eq!(result[1].get("n"), Some(&Value::Int64(20)));
    }

    #[test]
    fn test_empty_agg_fields_yields_distinct_keys() {
        let result = aggregate_grouped(&sales(), &fields(&["p"]), &[], AggregateFunc::Sum);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], Record::new().with("p", "a"));
        assert_eq!(result[1], Record::new().with("p", "b"));
    }

    #[test]
    fn test_non_numeric_values_skipped() {
        let records = vec![
            Record::new().with("p", "a").with("n", 1),
            Record::new().with("p", "a").with("n", "oops"),
            Record::new().with("p", "a").with("n", 3),
        ];
        let sum = aggregate_grouped(&records, &fields(&["p"]), &fields(&["n"]), AggregateFunc::Sum);
        assert_eq!(sum[0].get("n"), Some(&Value::Int64(4)));

        // The string contributes to neither total nor count: avg is 2, not 4/3.
        let avg = aggregate_grouped(&records, &fields(&["p"]), &fields(&["n"]), AggregateFunc::Avg);
        assert_eq!(avg[0].get("n"), Some(&Value::Float64(2.0)));
    }

    #[test]
    fn test_sum_numeric_affinity() {
        let ints = vec![Record::new().with("n", 1), Record::new().with("n", 2)];
        let result = aggregate_ungrouped(&ints, "n", AggregateFunc::Sum);
        assert_eq!(result.get("n"), Some(&Value::Int64(3)));

        let mixed = vec![Record::new().with("n", 1), Record::new().with("n", 2.5)];
        let result = aggregate_ungrouped(&mixed, "n", AggregateFunc::Sum);
        assert_eq!(result.get("n"), Some(&Value::Float64(3.5)));
    }

    #[test]
    fn test_ungrouped_sum_and_avg() {
        let records = vec![
            Record::new().with("n", 10),
            Record::new().with("n", 20),
            Record::new().with("n", 30),
        ];
        let sum = aggregate_ungrouped(&records, "n", AggregateFunc::Sum);
        assert_eq!(sum, Record::new().with("n", 60));

        let avg = aggregate_ungrouped(&records, "n", AggregateFunc::Avg);
        assert_eq!(avg, Record::new().with("n", 20.0));
    }

    #[test]
    fn test_ungrouped_min_max() {
        let records = vec![
            Record::new().with("n", 30),
            Record::new().with("n", 10),
            Record::new().with("n", 20),
        ];
        let min = aggregate_ungrouped(&records, "n", AggregateFunc::Min);
        assert_eq!(min.get("n"), Some(&Value::Int64(10)));

        let max = aggregate_ungrouped(&records, "n", AggregateFunc::Max);
        assert_eq!(max.get("n"), Some(&Value::Int64(30)));
    }

    #[test]
    fn test_empty_input() {
        let sum = aggregate_ungrouped(&[], "n", AggregateFunc::Sum);
        assert_eq!(sum.get("n"), Some(&Value::Int64(0)));

        let avg = aggregate_ungrouped(&[], "n", AggregateFunc::Avg);
        assert_eq!(avg.get("n"), Some(&Value::Null));

        let min = aggregate_ungrouped(&[], "n", AggregateFunc::Min);
        assert_eq!(min.get("n"), Some(&Value::Null));

        assert!(aggregate_grouped(&[], &fields(&["p"]), &fields(&["n"]), AggregateFunc::Sum)
            .is_empty());
    }
}
