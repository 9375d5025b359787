//! The stock registry: numeric callables and seeded random draws.
//!
//! | name             | arguments (name, position)             | result            |
//! |------------------|----------------------------------------|-------------------|
//! | `ln`             | `x` 0, `base` 1 (default e)            | `Double` or list  |
//! | `sqrt`           | `x` 0                                  | `Double` or list  |
//! | `uniform_random` | `n` 0, `min` 1 (0), `max` 2 (1)        | list of `Double`  |
//! | `normal_random`  | `n` 0, `mean` 1 (0), `sd` 2 (1)        | list of `Double`  |
//! | `poisson_random` | `n` 0, `lambda` 1 (required)           | list of `Int`     |
//!
//! `ln` and `sqrt` accept a number or a list of numbers. A result outside
//! the function's domain is `NaN` with the warning "NaNs produced". The
//! random callables share one generator seeded at construction, advanced
//! in call order, so a registry built from the same seed replays the same
//! draws. Invalid distribution parameters give `NaN` (or `Null` for
//! Poisson counts) with the warning "NAs produced". A Poisson mean above
//! 2^53 is treated as invalid. An `n` above [`MAX_DRAWS`] is an
//! `invalid_input` failure, raised before anything is allocated.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::f64::consts::{E, TAU};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use tidymap_kernel::call::callable::{func, Callable};
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::value::Value;

use crate::registry::CallableRegistry;

const NON_NUMERIC: &str = "non-numeric argument to mathematical function";
const NANS_PRODUCED: &str = "NaNs produced";
const NAS_PRODUCED: &str = "NAs produced";

/// Largest sample size a single call may request.
pub const MAX_DRAWS: usize = 1 << 24;

/// Knuth's method loses precision once `exp(-lambda)` underflows toward
/// the uniform's resolution; moderate means are drawn as sums of chunks.
const POISSON_CHUNK: f64 = 30.0;

/// Above this mean, counts are drawn from the normal approximation.
const POISSON_NORMAL_ABOVE: f64 = 1_000.0;

/// Counts above 2^53 are no longer exact in a `Double` mean; larger means
/// give `Null`.
const POISSON_MAX_MEAN: f64 = 9_007_199_254_740_992.0;

type SharedRng = Rc<RefCell<StdRng>>;
type Entries = BTreeMap<String, Box<dyn Callable>>;

/// A registry holding `ln`, `sqrt`, `uniform_random`, `normal_random` and
/// `poisson_random`, with the random draws seeded by `seed`.
#[must_use]
pub fn stock_registry(seed: u64) -> CallableRegistry {
    debug!(seed, "building stock registry");
    let rng: SharedRng = Rc::new(RefCell::new(StdRng::seed_from_u64(seed)));
    let mut entries = Entries::new();
    add_math(&mut entries);
    add_random(&mut entries, &rng);
    CallableRegistry::from(entries)
}

fn add(entries: &mut Entries, name: &str, callable: impl Callable + 'static) {
    entries.insert(name.to_string(), Box::new(callable));
}

fn add_math(entries: &mut Entries) {
    add(
        entries,
        "ln",
        func(|args: &Args, cx: &mut CallContext| {
            let base = optional_number(args, "base", 1, E)?;
            math(args, cx, |x| x.ln() / base.ln())
        }),
    );
    add(
        entries,
        "sqrt",
        func(|args: &Args, cx: &mut CallContext| math(args, cx, f64::sqrt)),
    );
}

fn add_random(entries: &mut Entries, rng: &SharedRng) {
    let shared = Rc::clone(rng);
    add(
        entries,
        "uniform_random",
        func(move |args: &Args, cx: &mut CallContext| {
            let n = count(args)?;
            let min = optional_number(args, "min", 1, 0.0)?;
            let max = optional_number(args, "max", 2, 1.0)?;
            if !(min.is_finite() && max.is_finite() && min <= max) {
                cx.warn(NAS_PRODUCED);
                return Ok(doubles(vec![f64::NAN; n]));
            }
            let mut rng = shared.borrow_mut();
            Ok(doubles((0..n).map(|_| min + (max - min) * rng.gen::<f64>()).collect()))
        }),
    );

    let shared = Rc::clone(rng);
    add(
        entries,
        "normal_random",
        func(move |args: &Args, cx: &mut CallContext| {
            let n = count(args)?;
            let mean = optional_number(args, "mean", 1, 0.0)?;
            let sd = optional_number(args, "sd", 2, 1.0)?;
            if !(mean.is_finite() && sd.is_finite() && sd >= 0.0) {
                cx.warn(NAS_PRODUCED);
                return Ok(doubles(vec![f64::NAN; n]));
            }
            let mut rng = shared.borrow_mut();
            Ok(doubles((0..n).map(|_| mean + sd * standard_normal(&mut rng)).collect()))
        }),
    );

    let shared = Rc::clone(rng);
    add(
        entries,
        "poisson_random",
        func(move |args: &Args, cx: &mut CallContext| {
            let n = count(args)?;
            let lambda = required_number(args, "lambda", 1)?;
            if !(0.0..=POISSON_MAX_MEAN).contains(&lambda) {
                cx.warn(NAS_PRODUCED);
                return Ok(Value::List(vec![Value::Null; n].into_iter().collect()));
            }
            let mut rng = shared.borrow_mut();
            Ok(Value::List(
                (0..n).map(|_| Value::Int(poisson(&mut rng, lambda))).collect(),
            ))
        }),
    );
}

/// Apply `f` to a number or to each number of a list.
fn math(
    args: &Args,
    cx: &mut CallContext,
    f: impl Fn(f64) -> f64,
) -> Result<Value, CallError> {
    let x = args
        .lookup("x", 0)
        .ok_or_else(|| CallError::missing_argument("x"))?;
    let mut produced_nan = false;
    let mut apply = |v: &Value| -> Result<Value, CallError> {
        let input = v.as_f64().ok_or_else(|| CallError::invalid_input(NON_NUMERIC))?;
        let out = f(input);
        produced_nan |= out.is_nan() && !input.is_nan();
        Ok(Value::Double(out))
    };
    let result = match x {
        Value::List(list) => Value::List(list.map_same_shape(|_, v| apply(v))?),
        scalar => apply(scalar)?,
    };
    if produced_nan {
        cx.warn(NANS_PRODUCED);
    }
    Ok(result)
}

/// The sample size `n`: a non-negative integer (an integral `Double` is
/// accepted) no larger than [`MAX_DRAWS`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(args: &Args) -> Result<usize, CallError> {
    let invalid = || {
        CallError::invalid_input(format!(
            "invalid arguments: n must be an integer in 0..={MAX_DRAWS}"
        ))
    };
    let n = match args.lookup("n", 0) {
        None => return Err(CallError::missing_argument("n")),
        Some(Value::Int(n)) => usize::try_from(*n).map_err(|_| invalid())?,
        Some(Value::Double(d)) if d.is_finite() && *d >= 0.0 && d.fract() == 0.0 => {
            // Saturating cast; anything past usize::MAX fails the cap below.
            *d as usize
        }
        Some(_) => return Err(invalid()),
    };
    if n > MAX_DRAWS {
        return Err(invalid());
    }
    Ok(n)
}

fn required_number(args: &Args, name: &str, position: usize) -> Result<f64, CallError> {
    let v = args
        .lookup(name, position)
        .ok_or_else(|| CallError::missing_argument(name))?;
    v.as_f64().ok_or_else(|| {
        CallError::invalid_input(format!("invalid arguments: {name} must be numeric"))
    })
}

fn optional_number(
    args: &Args,
    name: &str,
    position: usize,
    default: f64,
) -> Result<f64, CallError> {
    match args.lookup(name, position) {
        None => Ok(default),
        Some(_) => required_number(args, name, position),
    }
}

fn doubles(values: Vec<f64>) -> Value {
    Value::List(values.into_iter().map(Value::Double).collect::<Collection>())
}

/// Box–Muller, one draw per pair of uniforms.
fn standard_normal(rng: &mut StdRng) -> f64 {
    // 1 - U lies in (0, 1], keeping ln finite.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

#[allow(clippy::cast_possible_truncation)]
fn poisson(rng: &mut StdRng, lambda: f64) -> i64 {
    if lambda > POISSON_NORMAL_ABOVE {
        let draw = lambda + lambda.sqrt() * standard_normal(rng);
        return draw.round().max(0.0) as i64;
    }
    let mut remaining = lambda;
    let mut total = 0;
    while remaining > 0.0 {
        let step = remaining.min(POISSON_CHUNK);
        total += knuth_poisson(rng, step);
        remaining -= step;
    }
    total
}

fn knuth_poisson(rng: &mut StdRng, lambda: f64) -> i64 {
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut p = rng.gen::<f64>();
    while p > limit {
        k += 1;
        p *= rng.gen::<f64>();
    }
    k
}
