//! `safely`: a callable that never fails.
//!
//! Every call yields a [`WrappedResult`]: the inner callable's value, or a
//! [`Diagnostic`] built from the returned error or caught panic together
//! with the arguments of the failing call. Mapping a `Safely` with
//! `ResultKind::Row` therefore always completes.

use tracing::debug;

use tidymap_kernel::call::callable::Callable;
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::value::Value;

use crate::isolate::call_isolated;
use crate::wrapped::{Diagnostic, WrappedResult};

/// Failure-isolating wrapper built by [`safely`].
#[derive(Debug, Clone)]
pub struct Safely<F> {
    inner: F,
}

/// Wrap `f` so that failure becomes data.
pub fn safely<F: Callable>(f: F) -> Safely<F> {
    Safely { inner: f }
}

impl<F: Callable> Safely<F> {
    /// Call the wrapped callable, returning the typed wrapped result.
    pub fn call_wrapped(&mut self, args: &Args, cx: &mut CallContext) -> WrappedResult {
        match call_isolated(&mut self.inner, args, cx) {
            Ok(value) => WrappedResult::Ok(value),
            Err(error) => {
                debug!(class = %error.class, "safely isolated a failure");
                WrappedResult::Failed(Diagnostic {
                    error,
                    args: args.clone(),
                })
            }
        }
    }
}

impl<F: Callable> Callable for Safely<F> {
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError> {
        Ok(self.call_wrapped(args, cx).into_value())
    }
}
