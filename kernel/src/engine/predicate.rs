//! Predicate functionals: `keep`, `discard`, `some`, `every`, `detect`,
//! `detect_index`, `head_while`, `tail_while`.
//!
//! A predicate is any callable returning `Bool`. Anything else is a
//! `KindMismatch` at that index, whatever the policy's null handling.
//! `some`, `every`, `detect` and `detect_index` stop calling at the first
//! decisive element. `tail_while` scans from the last element backwards;
//! every other operation scans in ascending order.

use tracing::debug;

use crate::call::callable::Callable;
use crate::call::context::CallContext;
use crate::data::args::Args;
use crate::data::collection::Collection;
use crate::data::kind::ResultKind;
use crate::data::value::Value;
use crate::engine::error::MapError;
use crate::engine::map::{call_at, Mapper};

impl Mapper {
    /// Elements for which `pred` holds, names kept.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn keep<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<Collection, MapError> {
        self.filter("keep", input, pred, true)
    }

    /// Elements for which `pred` does not hold, names kept.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn discard<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<Collection, MapError> {
        self.filter("discard", input, pred, false)
    }

    /// Whether `pred` holds for at least one element. `false` when empty.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn some<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<bool, MapError> {
        Ok(self.detect_index(input, pred)?.is_some())
    }

    /// Whether `pred` holds for every element. `true` when empty.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn every<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<bool, MapError> {
        self.policy().check_len("every", input.len())?;
        let mut cx = CallContext::emitting();
        for (index, value) in input.values().iter().enumerate() {
            if !test(pred, index, value, &mut cx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// First element for which `pred` holds.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn detect<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<Option<Value>, MapError> {
        Ok(self
            .detect_index(input, pred)?
            .and_then(|i| input.get(i).cloned()))
    }

    /// Index of the first element for which `pred` holds.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn detect_index<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<Option<usize>, MapError> {
        self.policy().check_len("detect", input.len())?;
        let mut cx = CallContext::emitting();
        for (index, value) in input.values().iter().enumerate() {
            if test(pred, index, value, &mut cx)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Leading elements while `pred` holds.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn head_while<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<Collection, MapError> {
        self.policy().check_len("head_while", input.len())?;
        let mut cx = CallContext::emitting();
        let mut end = 0;
        for (index, value) in input.values().iter().enumerate() {
            if !test(pred, index, value, &mut cx)? {
                break;
            }
            end = index + 1;
        }
        Ok(input.select(&(0..end).collect::<Vec<_>>()))
    }

    /// Trailing elements while `pred` holds, scanning from the end.
    ///
    /// # Errors
    ///
    /// `Call` or `KindMismatch` at the first failing element.
    pub fn tail_while<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        pred: &mut F,
    ) -> Result<Collection, MapError> {
        self.policy().check_len("tail_while", input.len())?;
        let mut cx = CallContext::emitting();
        let mut start = input.len();
        for (index, value) in input.values().iter().enumerate().rev() {
            if !test(pred, index, value, &mut cx)? {
                break;
            }
            start = index;
        }
        Ok(input.select(&(start..input.len()).collect::<Vec<_>>()))
    }

    fn filter<F: Callable + ?Sized>(
        &self,
        operation: &str,
        input: &Collection,
        pred: &mut F,
        wanted: bool,
    ) -> Result<Collection, MapError> {
        self.policy().check_len(operation, input.len())?;
        debug!(op = operation, len = input.len(), "filtering collection");
        let mut cx = CallContext::emitting();
        let mut indices = Vec::new();
        for (index, value) in input.values().iter().enumerate() {
            if test(pred, index, value, &mut cx)? == wanted {
                indices.push(index);
            }
        }
        Ok(input.select(&indices))
    }
}

fn test<F: Callable + ?Sized>(
    pred: &mut F,
    index: usize,
    value: &Value,
    cx: &mut CallContext,
) -> Result<bool, MapError> {
    let args = Args::positional(vec![value.clone()]);
    match call_at(pred, index, &args, cx)? {
        Value::Bool(b) => Ok(b),
        other => Err(MapError::KindMismatch {
            index,
            expected: ResultKind::Bool,
            actual: other.value_type(),
        }),
    }
}
