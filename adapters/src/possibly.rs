//! `possibly`: substitute a default value for any failure.

use tracing::debug;

use tidymap_kernel::call::callable::Callable;
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::value::Value;

use crate::isolate::call_isolated;

/// Wrapper built by [`possibly`].
#[derive(Debug, Clone)]
pub struct Possibly<F> {
    inner: F,
    default: Value,
}

/// Wrap `f` so that an error or panic yields `default`. The failure detail
/// is dropped after being logged at `debug`.
pub fn possibly<F: Callable>(f: F, default: impl Into<Value>) -> Possibly<F> {
    Possibly {
        inner: f,
        default: default.into(),
    }
}

impl<F: Callable> Callable for Possibly<F> {
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError> {
        match call_isolated(&mut self.inner, args, cx) {
            Ok(value) => Ok(value),
            Err(error) => {
                debug!(
                    class = %error.class,
                    message = %error.message,
                    "possibly substituted default"
                );
                Ok(self.default.clone())
            }
        }
    }
}
