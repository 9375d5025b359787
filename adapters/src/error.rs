//! Adapter error types.

use std::fmt;

use tidymap_kernel::data::value::ValueType;
use tidymap_kernel::engine::error::MapError;

/// Failure to reshape between rows and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransposeError {
    /// Element `index` is not a named list.
    NotARecord { index: usize, actual: ValueType },
    /// Row `index` does not have the first row's fields.
    ShapeMismatch {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// The columns passed to `zip_fields` are not a named list of lists.
    NotAColumn { field: String, actual: ValueType },
    /// Column `field` differs in length from the first column.
    ColumnLength {
        field: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for TransposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotARecord { index, actual } => {
                write!(f, "element {index} is not a record (a named list), found {actual}")
            }
            Self::ShapeMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "element {index} has fields [{}], expected [{}]",
                found.join(", "),
                expected.join(", ")
            ),
            Self::NotAColumn { field, actual } => {
                write!(f, "column {field:?} is not a list, found {actual}")
            }
            Self::ColumnLength {
                field,
                expected,
                found,
            } => write!(f, "column {field:?} has length {found}, expected {expected}"),
        }
    }
}

impl std::error::Error for TransposeError {}

/// Failure to split a wrapped batch.
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// Inputs and wrapped results differ in length.
    Misaligned(MapError),
    /// Element `index` of the batch is not a wrapped result.
    NotWrapped { index: usize },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned(e) => write!(f, "cannot partition: {e}"),
            Self::NotWrapped { index } => {
                write!(f, "element {index} is not a wrapped result")
            }
        }
    }
}

impl std::error::Error for PartitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Misaligned(e) => Some(e),
            Self::NotWrapped { .. } => None,
        }
    }
}

impl From<MapError> for PartitionError {
    fn from(e: MapError) -> Self {
        Self::Misaligned(e)
    }
}
