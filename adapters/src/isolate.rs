//! Panic isolation for a single call.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tidymap_kernel::call::callable::Callable;
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::value::Value;

/// Call `f`, turning a panic into a `CallError` of class `"panic"`.
///
/// `f` may be left in whatever state it reached when it panicked; callers
/// keep using it, as the batch continues with the next element.
pub(crate) fn call_isolated<F: Callable + ?Sized>(
    f: &mut F,
    args: &Args,
    cx: &mut CallContext,
) -> Result<Value, CallError> {
    match catch_unwind(AssertUnwindSafe(|| f.call(args, cx))) {
        Ok(result) => result,
        Err(payload) => Err(CallError::panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "callable panicked".to_string()
    }
}
