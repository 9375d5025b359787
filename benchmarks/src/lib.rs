//! Input builders shared by the tidymap benchmark suites.

use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;

/// `n` integers `0..n`, every third replaced by text so `ln` fails there.
#[must_use]
pub fn mixed_numbers(n: usize) -> Collection {
    let values = (0..n)
        .map(|i| {
            if i % 3 == 2 {
                Value::from("x")
            } else {
                Value::Int(i64::try_from(i + 1).unwrap_or(i64::MAX))
            }
        })
        .collect();
    Collection::from_values(values)
}

/// `n` integers `1..=n`.
#[must_use]
pub fn numbers(n: usize) -> Collection {
    Collection::from_values(
        (1..=n)
            .map(|i| Value::Int(i64::try_from(i).unwrap_or(i64::MAX)))
            .collect(),
    )
}

/// `rows` named records, each with `fields` integer fields `f0..`.
#[must_use]
pub fn records(rows: usize, fields: usize) -> Collection {
    let field_names: Vec<String> = (0..fields).map(|f| format!("f{f}")).collect();
    let values = (0..rows)
        .map(|r| {
            let row = (0..fields)
                .map(|f| Value::Int(i64::try_from(r * fields + f).unwrap_or(i64::MAX)))
                .collect();
            Collection::with_names(row, field_names.clone())
                .map_or(Value::Null, Value::List)
        })
        .collect();
    Collection::from_values(values)
}
