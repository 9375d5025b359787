//! `Args`: the argument bundle handed to a callable.
//!
//! Positional values keep their order; named values are kept sorted by
//! name (`BTreeMap`) so that rendering a bundle is deterministic.
//!
//! # Merging
//!
//! [`Args::merged_over`] layers a per-call bundle over a shared one:
//! positional values of the per-call bundle come first, followed by the
//! shared positional values; on a named-key collision the per-call value
//! wins. The engine uses the same rule to forward extra arguments after
//! the element arguments.

use std::collections::BTreeMap;

use crate::data::collection::Collection;
use crate::data::value::Value;

/// Positional and named call arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl Args {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A bundle of positional values only.
    #[must_use]
    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            positional: values,
            named: BTreeMap::new(),
        }
    }

    /// Builder: append a positional value.
    #[must_use]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Builder: set a named value.
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn push(&mut self, value: Value) {
        self.positional.push(value);
    }

    /// Set a named value, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.named.insert(name.into(), value)
    }

    /// Positional value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Argument matching: by `name` first, then by `position`.
    #[must_use]
    pub fn lookup(&self, name: &str, position: usize) -> Option<&Value> {
        self.named.get(name).or_else(|| self.positional.get(position))
    }

    #[must_use]
    pub fn positional_values(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_values(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.named.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Layer `self` over `shared`. See the module docs for the rule.
    #[must_use]
    pub fn merged_over(&self, shared: &Self) -> Self {
        let mut positional = Vec::with_capacity(self.positional.len() + shared.positional.len());
        positional.extend(self.positional.iter().cloned());
        positional.extend(shared.positional.iter().cloned());

        let mut named = shared.named.clone();
        for (k, v) in &self.named {
            named.insert(k.clone(), v.clone());
        }
        Self { positional, named }
    }

    /// Render as a row `{named: {...}, positional: [...]}` for diagnostics.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let named = Collection::from_unique_entries(
            self.named.iter().map(|(k, v)| (k.clone(), v.clone())),
        );
        Value::List(Collection::from_unique_entries([
            ("named".to_string(), Value::List(named)),
            (
                "positional".to_string(),
                Value::List(Collection::from_values(self.positional.clone())),
            ),
        ]))
    }

    /// Inverse of [`Args::to_value`].
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let row = value.as_list()?;
        let positional = row.get_by_name("positional")?.as_list()?.values().to_vec();
        let named_row = row.get_by_name("named")?.as_list()?;
        let mut named = BTreeMap::new();
        for (name, v) in named_row.iter() {
            named.insert(name?.to_string(), v.clone());
        }
        Some(Self { positional, named })
    }
}
