//! The Typed-Map Engine.
//!
//! [`Mapper`] applies a callable to every element of a collection (or to
//! corresponding elements of several collections) and produces a new
//! collection with the same length and names, each element verified against
//! a declared [`ResultKind`].
//!
//! # Ordering
//!
//! Calls happen strictly in ascending index order, one at a time. A
//! callable that mutates external state observes the effects of every
//! earlier call; the engine adds no isolation and takes no locks.
//!
//! # Failure
//!
//! Contract violations (`SizeMismatch`, `NotACollection`, `PolicyViolation`)
//! are detected before the first call. `KindMismatch` and callable failure
//! abort at the failing element: no partial result is returned. Wrap the
//! callable with an adapter from `tidymap_adapters` to turn failure into data.
//!
//! # Argument layout
//!
//! Element arguments come first (positionally, or named for a named
//! `pmap`), followed by `extra` merged per [`Args::merged_over`].

use tracing::{debug, trace};

use crate::call::callable::Callable;
use crate::call::context::CallContext;
use crate::data::args::Args;
use crate::data::collection::Collection;
use crate::data::kind::ResultKind;
use crate::data::value::Value;
use crate::engine::error::MapError;
use crate::engine::policy::MapPolicy;
use crate::engine::verify::verify_kind;
use crate::engine::zip::check_aligned;

/// Runs mapping operations under a [`MapPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    policy: MapPolicy,
}

impl Mapper {
    #[must_use]
    pub const fn new(policy: MapPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &MapPolicy {
        &self.policy
    }

    /// `map(input, f, kind)`: element *i* is `f(input[i], ...extra)`.
    ///
    /// # Errors
    ///
    /// - `PolicyViolation` if the input exceeds `max_elements`
    /// - `Call` at the first element whose call fails
    /// - `KindMismatch` at the first element whose result is not `kind`
    pub fn map<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        f: &mut F,
        kind: ResultKind,
        extra: &Args,
    ) -> Result<Collection, MapError> {
        self.policy.check_len("map", input.len())?;
        debug!(op = "map", len = input.len(), %kind, "mapping collection");
        let mut cx = CallContext::emitting();
        input.map_same_shape(|index, value| {
            let args = Args::positional(vec![value.clone()]).merged_over(extra);
            self.produce(&mut *f, index, &args, kind, &mut cx)
        })
    }

    /// `map2(a, b, f, kind)`: element *i* is `f(a[i], b[i], ...extra)`.
    /// The output carries `a`'s names.
    ///
    /// # Errors
    ///
    /// - `SizeMismatch` if `a` and `b` differ in length (no call is made)
    /// - otherwise as [`Mapper::map`]
    pub fn map2<F: Callable + ?Sized>(
        &self,
        a: &Collection,
        b: &Collection,
        f: &mut F,
        kind: ResultKind,
        extra: &Args,
    ) -> Result<Collection, MapError> {
        check_aligned("map2", &[a.len(), b.len()])?;
        self.policy.check_len("map2", a.len())?;
        debug!(op = "map2", len = a.len(), %kind, "mapping collection pair");
        let mut cx = CallContext::emitting();
        let right = b.values();
        a.map_same_shape(|index, x| {
            let args = Args::positional(vec![x.clone(), right[index].clone()]).merged_over(extra);
            self.produce(&mut *f, index, &args, kind, &mut cx)
        })
    }

    /// `pmap(inputs, f, kind)` over a list of equal-length lists.
    ///
    /// If `inputs` is named, element *i* of each list is passed as a named
    /// argument under that list's name; otherwise positionally in input
    /// order. The output carries the first list's names. No inputs yield
    /// an empty collection.
    ///
    /// # Errors
    ///
    /// - `NotACollection` if an entry of `inputs` is not a list
    /// - `SizeMismatch` if the lists differ in length (no call is made)
    /// - otherwise as [`Mapper::map`]
    pub fn pmap<F: Callable + ?Sized>(
        &self,
        inputs: &Collection,
        f: &mut F,
        kind: ResultKind,
        extra: &Args,
    ) -> Result<Collection, MapError> {
        let columns = input_columns(inputs)?;
        let Some(first) = columns.first() else {
            return Ok(Collection::new());
        };
        let lens: Vec<usize> = columns.iter().map(|c| c.len()).collect();
        check_aligned("pmap", &lens)?;
        self.policy.check_len("pmap", first.len())?;
        debug!(
            op = "pmap",
            inputs = columns.len(),
            len = first.len(),
            named = inputs.is_named(),
            %kind,
            "mapping parallel collections"
        );

        let names = inputs.names();
        let mut cx = CallContext::emitting();
        first.map_same_shape(|index, _| {
            let mut element_args = Args::new();
            for (col, column) in columns.iter().enumerate() {
                let value = column.values()[index].clone();
                match names {
                    Some(names) => {
                        element_args.insert(names[col].clone(), value);
                    }
                    None => element_args.push(value),
                }
            }
            let args = element_args.merged_over(extra);
            self.produce(&mut *f, index, &args, kind, &mut cx)
        })
    }

    /// `walk(input, f)`: call `f` for its side effects, return `input`.
    ///
    /// # Errors
    ///
    /// As [`Mapper::map`], except that no `KindMismatch` can occur.
    pub fn walk<F: Callable + ?Sized>(
        &self,
        input: &Collection,
        f: &mut F,
        extra: &Args,
    ) -> Result<Collection, MapError> {
        self.map(input, f, ResultKind::Unit, extra)?;
        Ok(input.clone())
    }

    /// `walk2(a, b, f)`: call `f(a[i], b[i])` for its side effects, return `a`.
    ///
    /// # Errors
    ///
    /// As [`Mapper::map2`], except that no `KindMismatch` can occur.
    pub fn walk2<F: Callable + ?Sized>(
        &self,
        a: &Collection,
        b: &Collection,
        f: &mut F,
        extra: &Args,
    ) -> Result<Collection, MapError> {
        self.map2(a, b, f, ResultKind::Unit, extra)?;
        Ok(a.clone())
    }

    /// `pwalk(inputs, f)`: parallel walk, returns `inputs`.
    ///
    /// # Errors
    ///
    /// As [`Mapper::pmap`], except that no `KindMismatch` can occur.
    pub fn pwalk<F: Callable + ?Sized>(
        &self,
        inputs: &Collection,
        f: &mut F,
        extra: &Args,
    ) -> Result<Collection, MapError> {
        self.pmap(inputs, f, ResultKind::Unit, extra)?;
        Ok(inputs.clone())
    }

    /// Call `f` for element `index` and verify the result against `kind`.
    pub(crate) fn produce<F: Callable + ?Sized>(
        &self,
        f: &mut F,
        index: usize,
        args: &Args,
        kind: ResultKind,
        cx: &mut CallContext,
    ) -> Result<Value, MapError> {
        let value = call_at(f, index, args, cx)?;
        verify_kind(kind, index, value, &self.policy)
    }
}

/// Call `f` for element `index`, tagging a failure with the index.
///
/// # Errors
///
/// Returns [`MapError::Call`] carrying `index` and the callable's error.
pub fn call_at<F: Callable + ?Sized>(
    f: &mut F,
    index: usize,
    args: &Args,
    cx: &mut CallContext,
) -> Result<Value, MapError> {
    trace!(index, "calling");
    f.call(args, cx).map_err(|error| {
        debug!(index, class = %error.class, "callable failed; aborting");
        MapError::Call { index, error }
    })
}

fn input_columns(inputs: &Collection) -> Result<Vec<&Collection>, MapError> {
    inputs
        .values()
        .iter()
        .enumerate()
        .map(|(input, v)| match v {
            Value::List(list) => Ok(list),
            other => Err(MapError::NotACollection {
                input,
                actual: other.value_type(),
            }),
        })
        .collect()
}

/// [`Mapper::map`] under the default policy.
///
/// # Errors
///
/// See [`Mapper::map`].
pub fn map<F: Callable + ?Sized>(
    input: &Collection,
    f: &mut F,
    kind: ResultKind,
    extra: &Args,
) -> Result<Collection, MapError> {
    Mapper::default().map(input, f, kind, extra)
}

/// [`Mapper::map2`] under the default policy.
///
/// # Errors
///
/// See [`Mapper::map2`].
pub fn map2<F: Callable + ?Sized>(
    a: &Collection,
    b: &Collection,
    f: &mut F,
    kind: ResultKind,
    extra: &Args,
) -> Result<Collection, MapError> {
    Mapper::default().map2(a, b, f, kind, extra)
}

/// [`Mapper::pmap`] under the default policy.
///
/// # Errors
///
/// See [`Mapper::pmap`].
pub fn pmap<F: Callable + ?Sized>(
    inputs: &Collection,
    f: &mut F,
    kind: ResultKind,
    extra: &Args,
) -> Result<Collection, MapError> {
    Mapper::default().pmap(inputs, f, kind, extra)
}

/// [`Mapper::walk`] under the default policy.
///
/// # Errors
///
/// See [`Mapper::walk`].
pub fn walk<F: Callable + ?Sized>(
    input: &Collection,
    f: &mut F,
    extra: &Args,
) -> Result<Collection, MapError> {
    Mapper::default().walk(input, f, extra)
}

/// [`Mapper::walk2`] under the default policy.
///
/// # Errors
///
/// See [`Mapper::walk2`].
pub fn walk2<F: Callable + ?Sized>(
    a: &Collection,
    b: &Collection,
    f: &mut F,
    extra: &Args,
) -> Result<Collection, MapError> {
    Mapper::default().walk2(a, b, f, extra)
}

/// [`Mapper::pwalk`] under the default policy.
///
/// # Errors
///
/// See [`Mapper::pwalk`].
pub fn pwalk<F: Callable + ?Sized>(
    inputs: &Collection,
    f: &mut F,
    extra: &Args,
) -> Result<Collection, MapError> {
    Mapper::default().pwalk(inputs, f, extra)
}
