//! `Callable`: the unit of computation every mapping goes through.
//!
//! Closures become callables through [`func`] (full form, with access to
//! the [`CallContext`]) or [`pure`] (arguments only). Boxed and borrowed
//! callables are callables too, so registries can hold
//! `Box<dyn Callable>` and the engine can take `&mut dyn Callable`.

use crate::call::context::CallContext;
use crate::call::error::CallError;
use crate::data::args::Args;
use crate::data::value::Value;

/// A function of an argument bundle that produces one value or fails.
///
/// `call` takes `&mut self`: a callable may keep state between calls. The
/// engine calls it in strictly ascending element order.
pub trait Callable {
    /// Invoke with `args`, writing any side output to `cx`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] when the computation fails.
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError>;
}

impl<C: Callable + ?Sized> Callable for Box<C> {
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError> {
        (**self).call(args, cx)
    }
}

impl<C: Callable + ?Sized> Callable for &mut C {
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError> {
        (**self).call(args, cx)
    }
}

/// A closure with access to the call context. Built by [`func`].
#[derive(Debug, Clone)]
pub struct Func<F>(F);

impl<F> Callable for Func<F>
where
    F: FnMut(&Args, &mut CallContext) -> Result<Value, CallError>,
{
    fn call(&mut self, args: &Args, cx: &mut CallContext) -> Result<Value, CallError> {
        (self.0)(args, cx)
    }
}

/// Wrap a closure that may write side output.
pub fn func<F>(f: F) -> Func<F>
where
    F: FnMut(&Args, &mut CallContext) -> Result<Value, CallError>,
{
    Func(f)
}

/// A closure of its arguments only. Built by [`pure`].
#[derive(Debug, Clone)]
pub struct Pure<F>(F);

impl<F> Callable for Pure<F>
where
    F: FnMut(&Args) -> Result<Value, CallError>,
{
    fn call(&mut self, args: &Args, _cx: &mut CallContext) -> Result<Value, CallError> {
        (self.0)(args)
    }
}

/// Wrap a closure that ignores the call context.
pub fn pure<F>(f: F) -> Pure<F>
where
    F: FnMut(&Args) -> Result<Value, CallError>,
{
    Pure(f)
}

/// The first positional argument, or a `type_error` naming `what`.
///
/// # Errors
///
/// Returns [`CallError`] of class `type_error` if no positional argument
/// was supplied.
pub fn first_arg<'a>(args: &'a Args, what: &str) -> Result<&'a Value, CallError> {
    args.get(0)
        .ok_or_else(|| CallError::type_error(format!("{what} called without an argument")))
}
