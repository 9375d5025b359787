//! Folds: `reduce`, `reduce_with`, `accumulate`.
//!
//! The binary callable receives `(accumulator, element)` positionally.
//! Results are not kind-checked; a fold's accumulator type is whatever the
//! callable makes it.

use tracing::debug;

use crate::call::callable::Callable;
use crate::call::context::CallContext;
use crate::data::args::Args;
use crate::data::collection::Collection;
use crate::data::value::Value;
use crate::engine::error::MapError;
use crate::engine::map::{call_at, Mapper};

impl Mapper {
    /// Left fold seeded with the first element.
    ///
    /// # Errors
    ///
    /// [`MapError::EmptyReduce`] for an empty input; `Call` at the first
    /// failing step (indexed by the element being folded in).
    pub fn reduce<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        f: &mut F,
    ) -> Result<Value, MapError> {
        let Some((first, rest)) = input.values().split_first() else {
            return Err(MapError::EmptyReduce);
        };
        self.policy().check_len("reduce", input.len())?;
        debug!(op = "reduce", len = input.len(), "folding collection");
        let mut cx = CallContext::emitting();
        let mut acc = first.clone();
        for (offset, value) in rest.iter().enumerate() {
            acc = step(f, offset + 1, acc, value, &mut cx)?;
        }
        Ok(acc)
    }

    /// Left fold seeded with `init`. An empty input yields `init`.
    ///
    /// # Errors
    ///
    /// `Call` at the first failing step.
    pub fn reduce_with<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        init: Value,
        f: &mut F,
    ) -> Result<Value, MapError> {
        self.policy().check_len("reduce", input.len())?;
        let mut cx = CallContext::emitting();
        let mut acc = init;
        for (index, value) in input.values().iter().enumerate() {
            acc = step(f, index, acc, value, &mut cx)?;
        }
        Ok(acc)
    }

    /// Every intermediate accumulator of `reduce`, one per element, names
    /// kept. Element 0 is the first input unchanged.
    ///
    /// # Errors
    ///
    /// `Call` at the first failing step.
    pub fn accumulate<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        f: &mut F,
    ) -> Result<Collection, MapError> {
        self.policy().check_len("accumulate", input.len())?;
        let mut cx = CallContext::emitting();
        let mut acc: Option<Value> = None;
        input.map_same_shape(|index, value| {
            let next = match acc.take() {
                None => value.clone(),
                Some(prev) => step(&mut *f, index, prev, value, &mut cx)?,
            };
            acc = Some(next.clone());
            Ok(next)
        })
    }
}

fn step<F: Callable + ?Sized>(
    f: &mut F,
    index: usize,
    acc: Value,
    value: &Value,
    cx: &mut CallContext,
) -> Result<Value, MapError> {
    let args = Args::positional(vec![acc, value.clone()]);
    call_at(f, index, &args, cx)
}
