//! Function references and selectors.
//!
//! A [`FnRef`] is a callable given directly or by registry name. A
//! [`Selector`] adds the accessor shorthands: a field name or a 0-based
//! position selects that element of each list argument. A selector is
//! resolved once per mapping, so an unknown name fails before any call.

use std::fmt;

use tracing::warn;

use tidymap_kernel::call::accessor::Accessor;
use tidymap_kernel::call::callable::Callable;
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::kind::ResultKind;
use tidymap_kernel::data::value::Value;
use tidymap_kernel::engine::error::MapError;
use tidymap_kernel::engine::map::Mapper;

use crate::registry::CallableRegistry;

/// A callable, given directly or by name.
pub enum FnRef {
    Direct(Box<dyn Callable>),
    Name(String),
}

impl FnRef {
    pub fn direct(callable: impl Callable + 'static) -> Self {
        Self::Direct(Box::new(callable))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Resolve against `registry`. `position` is reported in the error
    /// when the reference is one of several.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnresolvedCallable`] for an unknown name.
    pub fn resolve<'a>(
        &'a mut self,
        registry: &'a mut CallableRegistry,
        position: Option<usize>,
    ) -> Result<&'a mut (dyn Callable + 'static), MapError> {
        match self {
            Self::Direct(callable) => Ok(&mut **callable),
            Self::Name(name) => registry.get_mut(name).ok_or_else(|| unresolved(name, position)),
        }
    }

    /// Whether this reference can be resolved against `registry`.
    #[must_use]
    pub fn is_resolvable(&self, registry: &CallableRegistry) -> bool {
        match self {
            Self::Direct(_) => true,
            Self::Name(name) => registry.contains(name),
        }
    }
}

impl From<&str> for FnRef {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for FnRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Debug for FnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("FnRef::Direct(..)"),
            Self::Name(name) => write!(f, "FnRef::Name({name:?})"),
        }
    }
}

/// What to apply to each element of a mapping.
pub enum Selector {
    Direct(Box<dyn Callable>),
    Name(String),
    /// Extract this named element of each list argument.
    Field(String),
    /// Extract this 0-based element of each list argument.
    Position(usize),
}

impl Selector {
    /// Resolve to something callable.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnresolvedCallable`] for an unknown name.
    pub fn resolve<'a>(
        &'a mut self,
        registry: &'a mut CallableRegistry,
    ) -> Result<Resolved<'a>, MapError> {
        match self {
            Self::Direct(callable) => Ok(Resolved::Callable(&mut **callable)),
            Self::Name(name) => registry
                .get_mut(name)
                .map(Resolved::Callable)
                .ok_or_else(|| unresolved(name, None)),
            Self::Field(name) => Ok(Resolved::Accessor(Accessor::Field(name.clone()))),
            Self::Position(index) => Ok(Resolved::Accessor(Accessor::Position(*index))),
        }
    }
}

impl From<FnRef> for Selector {
    fn from(r: FnRef) -> Self {
        match r {
            FnRef::Direct(callable) => Self::Direct(callable),
            FnRef::Name(name) => Self::Name(name),
        }
    }
}

impl From<Accessor> for Selector {
    fn from(a: Accessor) -> Self {
        match a {
            Accessor::Field(name) => Self::Field(name),
            Accessor::Position(index) => Self::Position(index),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("Selector::Direct(..)"),
            Self::Name(name) => write!(f, "Selector::Name({name:?})"),
            Self::Field(name) => write!(f, "Selector::Field({name:?})"),
            Self::Position(index) => write!(f, "Selector::Position({index})"),
        }
    }
}

/// A resolved [`Selector`].
pub enum Resolved<'a> {
    Callable(&'a mut (dyn Callable + 'static)),
    Accessor(Accessor),
}

impl Callable for Resolved<'_> {
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError> {
        match self {
            Self::Callable(f) => f.call(args, cx),
            Self::Accessor(a) => a.call(args, cx),
        }
    }
}

/// [`Mapper::map`] through a selector, under the default policy.
///
/// # Errors
///
/// [`MapError::UnresolvedCallable`] before any call, or any error of
/// [`Mapper::map`].
pub fn map_selected(
    registry: &mut CallableRegistry,
    input: &Collection,
    selector: &mut Selector,
    kind: ResultKind,
    extra: &Args,
) -> Result<Collection, MapError> {
    map_selected_with(&Mapper::default(), registry, input, selector, kind, extra)
}

/// [`map_selected`] under `mapper`'s policy.
///
/// # Errors
///
/// As [`map_selected`].
pub fn map_selected_with(
    mapper: &Mapper,
    registry: &mut CallableRegistry,
    input: &Collection,
    selector: &mut Selector,
    kind: ResultKind,
    extra: &Args,
) -> Result<Collection, MapError> {
    let mut resolved = selector.resolve(registry)?;
    mapper.map(input, &mut resolved, kind, extra)
}

pub(crate) fn unresolved(name: &str, position: Option<usize>) -> MapError {
    warn!(name, ?position, "no callable registered under this name");
    MapError::UnresolvedCallable {
        name: name.to_string(),
        position,
    }
}
