//! Accessor callables: extract an element of a list argument by name or
//! by position.
//!
//! These are the shorthand selectors of the mapping family: mapping
//! `Accessor::Field("r2")` over a collection of rows pulls the `r2` field
//! out of each one. A missing field or an out-of-range position yields
//! `Null` (so a typed mapping reports it as a kind mismatch, not a crash).
//! Positions are 0-based.

use std::fmt;

use crate::call::callable::{first_arg, Callable};
use crate::call::context::CallContext;
use crate::call::error::CallError;
use crate::data::args::Args;
use crate::data::value::Value;

/// Element extractor over a list argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Element with this name.
    Field(String),
    /// Element at this 0-based position.
    Position(usize),
}

impl Accessor {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Apply to a single value without going through `Args`.
    ///
    /// # Errors
    ///
    /// Returns a `type_error` if `target` is not a list.
    pub fn extract(&self, target: &Value) -> Result<Value, CallError> {
        let Value::List(list) = target else {
            return Err(CallError::type_error(format!(
                "cannot extract {self} from a {} value",
                target.value_type()
            )));
        };
        let found = match self {
            Self::Field(name) => list.get_by_name(name),
            Self::Position(index) => list.get(*index),
        };
        Ok(found.cloned().unwrap_or(Value::Null))
    }
}

impl Callable for Accessor {
    fn call(&mut self, args: &Args, _cx: &mut CallContext) -> Result<Value, CallError> {
        self.extract(first_arg(args, "accessor")?)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "field {name:?}"),
            Self::Position(index) => write!(f, "position {index}"),
        }
    }
}
