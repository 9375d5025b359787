//! `quietly`: run a callable with its side output captured as data.
//!
//! Printed text, warnings and messages written through the
//! [`CallContext`] are collected instead of emitted. A failure of the
//! inner callable still propagates; whatever it wrote before failing is
//! discarded with it.

use std::collections::BTreeMap;

use tidymap_kernel::call::callable::Callable;
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;

/// A value together with the side output produced while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuietResult {
    pub result: Value,
    pub output: String,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

impl QuietResult {
    /// Render as the named list `{messages, output, result, warnings}`.
    #[must_use]
    pub fn into_value(self) -> Value {
        let texts = |items: Vec<String>| Value::List(items.into_iter().map(Value::Text).collect());
        let mut fields = BTreeMap::new();
        fields.insert("result".to_string(), self.result);
        fields.insert("output".to_string(), Value::Text(self.output));
        fields.insert("warnings".to_string(), texts(self.warnings));
        fields.insert("messages".to_string(), texts(self.messages));
        Value::List(Collection::from(fields))
    }
}

/// Wrapper built by [`quietly`].
#[derive(Debug, Clone)]
pub struct Quietly<F> {
    inner: F,
}

pub fn quietly<F: Callable>(f: F) -> Quietly<F> {
    Quietly { inner: f }
}

impl<F: Callable> Quietly<F> {
    /// Call with a capturing context.
    ///
    /// # Errors
    ///
    /// Returns the inner callable's [`CallError`] unchanged.
    pub fn call_quiet(&mut self, args: &Args) -> Result<QuietResult, CallError> {
        let mut cx = CallContext::capturing();
        let result = self.inner.call(args, &mut cx)?;
        let captured = cx.take_captured();
        Ok(QuietResult {
            result,
            output: captured.output,
            warnings: captured.warnings,
            messages: captured.messages,
        })
    }
}

impl<F: Callable> Callable for Quietly<F> {
    fn call(&mut self, args: &Args, _cx: &mut CallContext) -> Result<Value, CallError> {
        self.call_quiet(args).map(QuietResult::into_value)
    }
}
