//! `Collection`: an ordered sequence of values, optionally named.
//!
//! A collection is either fully unnamed or fully named. Names, when present,
//! are unique; uniqueness is enforced at construction time and a
//! duplicate is rejected (no silent overwrite).
//!
//! Mapping operations never mutate a collection. They build a new one of the
//! same shape through [`Collection::map_same_shape`], which is the single
//! place where output element *i* inherits input element *i*'s name.

use std::collections::BTreeMap;
use std::fmt;

use crate::data::value::Value;

/// Ordered values with optional unique names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    values: Vec<Value>,
    names: Option<Vec<String>>,
}

/// Error type for collection construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The same name appears at two positions.
    DuplicateName {
        name: String,
        first_index: usize,
        second_index: usize,
    },
    /// Names were supplied for a different number of values.
    NameCountMismatch { values: usize, names: usize },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName {
                name,
                first_index,
                second_index,
            } => write!(
                f,
                "duplicate name {name:?} at positions {first_index} and {second_index}"
            ),
            Self::NameCountMismatch { values, names } => {
                write!(f, "{names} names supplied for {values} values")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

impl Collection {
    /// An empty, unnamed collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            names: None,
        }
    }

    /// An unnamed collection over `values`.
    #[must_use]
    pub const fn from_values(values: Vec<Value>) -> Self {
        Self {
            values,
            names: None,
        }
    }

    /// A named collection from `(name, value)` pairs, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateName`] if a name repeats.
    pub fn named<I, K>(entries: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<Value>) =
            entries.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self::with_names(values, names)
    }

    /// Attach `names` to `values`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NameCountMismatch`] if the lengths differ,
    /// or [`CollectionError::DuplicateName`] if a name repeats.
    pub fn with_names(values: Vec<Value>, names: Vec<String>) -> Result<Self, CollectionError> {
        if values.len() != names.len() {
            return Err(CollectionError::NameCountMismatch {
                values: values.len(),
                names: names.len(),
            });
        }
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, name) in names.iter().enumerate() {
            if let Some(&first_index) = seen.get(name.as_str()) {
                return Err(CollectionError::DuplicateName {
                    name: name.clone(),
                    first_index,
                    second_index: index,
                });
            }
            seen.insert(name.as_str(), index);
        }
        Ok(Self {
            values,
            names: Some(names),
        })
    }

    /// Build from entries whose keys are already known to be unique
    /// (JSON object keys).
    pub(crate) fn from_unique_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let (names, values) = entries.into_iter().unzip();
        Self {
            values,
            names: Some(names),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every element carries a name.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        self.names.is_some()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Name of the element at `index`, if the collection is named.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.as_ref()?.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Position of the element named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.as_ref()?.iter().position(|n| n == name)
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.index_of(name).and_then(|i| self.values.get(i))
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Iterate `(name, value)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Value)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (self.name(i), v))
    }

    /// Build a collection of the same length and names by applying `f` to
    /// each `(index, value)` in ascending order. Stops at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn map_same_shape<E, F>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(usize, &Value) -> Result<Value, E>,
    {
        let mut values = Vec::with_capacity(self.values.len());
        for (index, value) in self.values.iter().enumerate() {
            values.push(f(index, value)?);
        }
        Ok(Self {
            values,
            names: self.names.clone(),
        })
    }

    /// The sub-collection at `indices` (ascending), names carried along.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        let values = indices
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect();
        let names = self.names.as_ref().map(|names| {
            indices
                .iter()
                .filter_map(|&i| names.get(i).cloned())
                .collect()
        });
        Self { values, names }
    }

    /// All elements as `f64`, if every element is numeric.
    #[must_use]
    pub fn as_doubles(&self) -> Option<Vec<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }

    /// All elements as `i64`, if every element is an `Int`.
    #[must_use]
    pub fn as_ints(&self) -> Option<Vec<i64>> {
        self.values.iter().map(Value::as_i64).collect()
    }

    /// All elements as text, if every element is `Text`.
    #[must_use]
    pub fn as_texts(&self) -> Option<Vec<&str>> {
        self.values.iter().map(Value::as_str).collect()
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

/// A named collection in key order. Map keys are unique, so this cannot fail.
impl From<BTreeMap<String, Value>> for Collection {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self::from_unique_entries(fields)
    }
}
