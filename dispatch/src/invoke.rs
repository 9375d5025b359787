//! The invocation dispatcher.
//!
//! `invoke_map` pairs a list of function references with a list of
//! argument sets and calls each function with its own arguments layered
//! over a shared set. Every name is resolved before the first call, so an
//! unknown name aborts the batch with no side effects.

use tracing::debug;

use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;
use tidymap_kernel::engine::error::MapError;
use tidymap_kernel::engine::map::call_at;
use tidymap_kernel::engine::zip::{check_aligned, zip_aligned};

use crate::registry::CallableRegistry;
use crate::selector::{unresolved, FnRef};

/// Call one function reference with `args`.
///
/// # Errors
///
/// [`MapError::UnresolvedCallable`] for an unknown name, or
/// [`MapError::Call`] (index 0) if the callable fails.
pub fn invoke(
    registry: &mut CallableRegistry,
    fn_ref: &mut FnRef,
    args: &Args,
) -> Result<Value, MapError> {
    let f = fn_ref.resolve(registry, None)?;
    call_at(f, 0, args, &mut CallContext::emitting())
}

/// Call `refs[i]` with `arg_sets[i].merged_over(shared)` for each `i` in
/// ascending order. Results are unverified (kind `Any`) and unnamed.
///
/// # Errors
///
/// [`MapError::SizeMismatch`] if `refs` and `arg_sets` differ in length,
/// [`MapError::UnresolvedCallable`] naming the first unknown reference, both
/// before any call; [`MapError::Call`] at the first failing call.
pub fn invoke_map(
    registry: &mut CallableRegistry,
    refs: &mut [FnRef],
    arg_sets: &[Args],
    shared: &Args,
) -> Result<Collection, MapError> {
    check_aligned("invoke_map", &[refs.len(), arg_sets.len()])?;
    for (position, fn_ref) in refs.iter().enumerate() {
        if let FnRef::Name(name) = fn_ref {
            if !registry.contains(name) {
                return Err(unresolved(name, Some(position)));
            }
        }
    }
    debug!(op = "invoke_map", len = refs.len(), "invoking batch");
    let mut cx = CallContext::emitting();
    let values = zip_aligned("invoke_map", refs.iter_mut(), arg_sets, |index, fn_ref, args| {
        let f = fn_ref.resolve(registry, Some(index))?;
        call_at(f, index, &args.merged_over(shared), &mut cx)
    })?;
    Ok(Collection::from_values(values))
}
