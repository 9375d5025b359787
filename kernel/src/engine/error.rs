//! Typed mapping errors.
//!
//! `MapError` covers contract violations (size, kind, resolution, policy),
//! which abort the whole operation, and callable failure, which the engine
//! propagates unchanged with the index of the failing element. Isolation of
//! callable failure is opt-in through the adapters crate.

use std::fmt;

use crate::call::error::CallError;
use crate::data::kind::ResultKind;
use crate::data::value::ValueType;

/// Typed failure for a mapping or dispatch operation. Fail-closed.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Parallel inputs of unequal length. `input` is the position of the
    /// first input whose length differs from the first input's.
    SizeMismatch {
        operation: &'static str,
        input: usize,
        expected: usize,
        found: usize,
    },
    /// A produced value does not match the declared kind.
    KindMismatch {
        index: usize,
        expected: ResultKind,
        actual: ValueType,
    },
    /// A parallel-map input is not a list.
    NotACollection { input: usize, actual: ValueType },
    /// A callable name did not resolve. `position` is the index of the
    /// reference in a batch, if any.
    UnresolvedCallable {
        name: String,
        position: Option<usize>,
    },
    /// The callable failed at element `index`.
    Call { index: usize, error: CallError },
    /// `reduce` over an empty collection without an initial value.
    EmptyReduce,
    /// The active `MapPolicy` forbids the operation.
    PolicyViolation { detail: String },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                operation,
                input,
                expected,
                found,
            } => write!(
                f,
                "{operation}: input {input} has length {found}, expected {expected}"
            ),
            Self::KindMismatch {
                index,
                expected,
                actual,
            } => write!(f, "result {index} must be {expected}, not {actual}"),
            Self::NotACollection { input, actual } => {
                write!(f, "input {input} must be a list, not {actual}")
            }
            Self::UnresolvedCallable { name, position } => match position {
                Some(p) => write!(f, "could not find function {name:?} (position {p})"),
                None => write!(f, "could not find function {name:?}"),
            },
            Self::Call { index, error } => write!(f, "element {index}: {error}"),
            Self::EmptyReduce => f.write_str("reduce of an empty collection with no initial value"),
            Self::PolicyViolation { detail } => write!(f, "map policy violation: {detail}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Call { error, .. } => Some(error),
            _ => None,
        }
    }
}
