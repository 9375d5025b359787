//! Split a batch mapped through `safely` into successes and failures.

use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;
use tidymap_kernel::engine::zip::check_aligned;

use crate::error::PartitionError;
use crate::wrapped::{Diagnostic, WrappedResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Success {
    pub index: usize,
    pub name: Option<String>,
    pub value: Value,
}

/// A failed element, with the input that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub index: usize,
    pub name: Option<String>,
    pub input: Value,
    pub diagnostic: Diagnostic,
}

/// Both sides of a wrapped batch, each in ascending index order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub successes: Vec<Success>,
    pub failures: Vec<Failure>,
}

impl Partition {
    #[must_use]
    pub fn success_indices(&self) -> Vec<usize> {
        self.successes.iter().map(|s| s.index).collect()
    }

    #[must_use]
    pub fn failure_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.index).collect()
    }

    /// Successful values as a collection, unnamed.
    #[must_use]
    pub fn success_values(&self) -> Collection {
        self.successes.iter().map(|s| s.value.clone()).collect()
    }
}

/// Pair each wrapped result with the input that produced it.
///
/// # Errors
///
/// [`PartitionError::Misaligned`] if the lengths differ;
/// [`PartitionError::NotWrapped`] for an element that is not a wrapped
/// result.
pub fn partition(inputs: &Collection, wrapped: &Collection) -> Result<Partition, PartitionError> {
    check_aligned("partition", &[inputs.len(), wrapped.len()])?;
    let mut out = Partition::default();
    for (index, (input, w)) in inputs.values().iter().zip(wrapped.values()).enumerate() {
        let name = inputs.name(index).map(str::to_string);
        match WrappedResult::from_value(w).ok_or(PartitionError::NotWrapped { index })? {
            WrappedResult::Ok(value) => out.successes.push(Success { index, name, value }),
            WrappedResult::Failed(diagnostic) => out.failures.push(Failure {
                index,
                name,
                input: input.clone(),
                diagnostic,
            }),
        }
    }
    Ok(out)
}
