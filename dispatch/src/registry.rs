//! Name → callable resolution scope.

use std::collections::BTreeMap;
use std::fmt;

use tidymap_kernel::call::callable::Callable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A name was registered twice.
    DuplicateName { name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "callable {name:?} is already registered")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Callables addressable by name. Names are unique; iteration is in name
/// order.
#[derive(Default)]
pub struct CallableRegistry {
    entries: BTreeMap<String, Box<dyn Callable>>,
}

impl CallableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, callable)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] on the first repeated name.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (String, Box<dyn Callable>)>,
    {
        let mut registry = Self::new();
        for (name, callable) in entries {
            registry.register_boxed(name, callable)?;
        }
        Ok(registry)
    }

    /// Register `callable` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if `name` is taken; the
    /// existing entry is kept.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callable: impl Callable + 'static,
    ) -> Result<(), RegistryError> {
        self.register_boxed(name.into(), Box::new(callable))
    }

    /// [`Self::register`] for an already boxed callable.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if `name` is taken.
    pub fn register_boxed(
        &mut self,
        name: String,
        callable: Box<dyn Callable>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }
        self.entries.insert(name, callable);
        Ok(())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Callable + 'static)> {
        self.entries.get_mut(name).map(|c| &mut **c)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, Box<dyn Callable>>> for CallableRegistry {
    fn from(entries: BTreeMap<String, Box<dyn Callable>>) -> Self {
        Self { entries }
    }
}

impl fmt::Debug for CallableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
