//! Wrapped results: the data form of "succeeded with a value" or "failed
//! with a diagnostic".
//!
//! As a [`Value`] a wrapped result is the named list
//! `{error, result}` with `Null` in the absent slot. The `error` slot
//! decides which side is populated: a success whose value is `Null` still
//! has `error: null`.

use std::collections::BTreeMap;

use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;

/// Field holding the outcome of a successful call.
pub const RESULT_FIELD: &str = "result";
/// Field holding the diagnostic of a failed call.
pub const ERROR_FIELD: &str = "error";

/// Why a call failed, and what it was called with.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub error: CallError,
    pub args: Args,
}

impl Diagnostic {
    /// Render as `{args, class, message}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = BTreeMap::new();
        fields.insert("args".to_string(), self.args.to_value());
        fields.insert("class".to_string(), Value::from(self.error.class.as_str()));
        fields.insert("message".to_string(), Value::from(self.error.message.as_str()));
        Value::List(Collection::from(fields))
    }

    /// Inverse of [`Diagnostic::to_value`].
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let row = value.as_list()?;
        let class = row.get_by_name("class")?.as_str()?;
        let message = row.get_by_name("message")?.as_str()?;
        let args = Args::from_value(row.get_by_name("args")?)?;
        Some(Self {
            error: CallError::new(class, message),
            args,
        })
    }
}

/// Outcome of one isolated call. Exactly one side is populated.
#[derive(Debug, Clone, PartialEq)]
pub enum WrappedResult {
    Ok(Value),
    Failed(Diagnostic),
}

impl WrappedResult {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&Value> {
        match self {
            Self::Ok(v) => Some(v),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Ok(_) => None,
            Self::Failed(d) => Some(d),
        }
    }

    /// Render as the `{error, result}` named list.
    #[must_use]
    pub fn into_value(self) -> Value {
        let (result, error) = match self {
            Self::Ok(v) => (v, Value::Null),
            Self::Failed(d) => (Value::Null, d.to_value()),
        };
        let mut fields = BTreeMap::new();
        fields.insert(RESULT_FIELD.to_string(), result);
        fields.insert(ERROR_FIELD.to_string(), error);
        Value::List(Collection::from(fields))
    }

    /// Read back a value produced by [`WrappedResult::into_value`].
    ///
    /// `None` if `value` is not a `{error, result}` list or the error slot
    /// is neither `Null` nor a diagnostic.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let row = value.as_list()?;
        if row.len() != 2 {
            return None;
        }
        let result = row.get_by_name(RESULT_FIELD)?;
        match row.get_by_name(ERROR_FIELD)? {
            Value::Null => Some(Self::Ok(result.clone())),
            error => Diagnostic::from_value(error).map(Self::Failed),
        }
    }
}
