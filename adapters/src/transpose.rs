//! Rows to columns and back.
//!
//! [`transpose`] turns a collection of records (named lists of the same
//! fields) into one column per field. Each column is index-aligned with
//! the input and carries the input's names. [`zip_fields`] is the inverse.

use std::collections::BTreeMap;

use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;

use crate::error::TransposeError;

/// Turn records into columns keyed by the first record's fields, in the
/// first record's order. Later records may list the same fields in any
/// order. An empty input yields an empty named list.
///
/// Records with no fields produce no columns, so their count is lost:
/// `[{}, {}]` transposes to `{}`, which [`zip_fields`] turns into `[]`.
///
/// # Errors
///
/// [`TransposeError::NotARecord`] for an element that is not a named list;
/// [`TransposeError::ShapeMismatch`] for a record whose fields differ from
/// the first.
pub fn transpose(rows: &Collection) -> Result<Collection, TransposeError> {
    let records = rows
        .values()
        .iter()
        .enumerate()
        .map(|(index, v)| match v {
            Value::List(row) if row.is_named() => Ok(row),
            other => Err(TransposeError::NotARecord {
                index,
                actual: other.value_type(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = records.first() else {
        return Ok(Collection::from(BTreeMap::new()));
    };
    for (index, row) in records.iter().enumerate().skip(1) {
        let same_fields = row.len() == first.len()
            && first.iter().all(|(name, _)| name.is_some_and(|n| row.index_of(n).is_some()));
        if !same_fields {
            return Err(TransposeError::ShapeMismatch {
                index,
                expected: field_names(first),
                found: field_names(row),
            });
        }
    }

    first.map_same_shape(|field_index, _| {
        let field = first.name(field_index).unwrap_or_default();
        rows.map_same_shape(|index, _| {
            Ok::<_, TransposeError>(
                records[index]
                    .get_by_name(field)
                    .cloned()
                    .unwrap_or_default(),
            )
        })
        .map(Value::List)
    })
}

/// Rebuild records from a named list of equal-length columns. Output names
/// are the first column's names.
///
/// # Errors
///
/// [`TransposeError::NotAColumn`] if `columns` is unnamed or a column is not
/// a list; [`TransposeError::ColumnLength`] if columns differ in length.
pub fn zip_fields(columns: &Collection) -> Result<Collection, TransposeError> {
    let mut lists = Vec::with_capacity(columns.len());
    for (name, v) in columns.iter() {
        let field = name.unwrap_or_default().to_string();
        match (name, v) {
            (Some(_), Value::List(list)) => lists.push((field, list)),
            (_, other) => {
                return Err(TransposeError::NotAColumn {
                    field,
                    actual: other.value_type(),
                })
            }
        }
    }

    let Some((_, first)) = lists.first() else {
        return Ok(Collection::new());
    };
    let len = first.len();
    if let Some((field, list)) = lists.iter().find(|(_, list)| list.len() != len) {
        return Err(TransposeError::ColumnLength {
            field: field.clone(),
            expected: len,
            found: list.len(),
        });
    }

    first.map_same_shape(|index, _| {
        columns
            .map_same_shape(|field_index, _| {
                Ok::<_, TransposeError>(
                    lists[field_index].1.get(index).cloned().unwrap_or_default(),
                )
            })
            .map(Value::List)
    })
}

fn field_names(row: &Collection) -> Vec<String> {
    row.names().map(<[String]>::to_vec).unwrap_or_default()
}
