//! Failure isolation end to end: `safely`, `possibly`, `quietly`,
//! `partition` and `transpose` over callables from the stock registry.

use lock_tests::{list, mixed_inputs, safely_ln};
use serde_json::json;
use tidymap_adapters::partition::partition;
use tidymap_adapters::possibly::possibly;
use tidymap_adapters::quietly::quietly;
use tidymap_adapters::safely::safely;
use tidymap_adapters::transpose::{transpose, zip_fields};
use tidymap_adapters::wrapped::{WrappedResult, ERROR_FIELD, RESULT_FIELD};
use tidymap_dispatch::stock::stock_registry;
use tidymap_kernel::call::callable::pure;
use tidymap_kernel::call::context::CallContext;
use tidymap_kernel::call::error::{CallError, CLASS_PANIC};
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::kind::ResultKind;
use tidymap_kernel::data::value::Value;
use tidymap_kernel::engine::map::map;

#[test]
fn safely_ln_wraps_each_element() {
    let out = safely_ln(&mixed_inputs()).unwrap();
    assert_eq!(out.len(), 3);
    let wrapped: Vec<_> = out
        .values()
        .iter()
        .map(|v| WrappedResult::from_value(v).unwrap())
        .collect();
    assert_eq!(wrapped[0].outcome(), Some(&Value::Double(0.0)));
    assert_eq!(wrapped[1].outcome(), Some(&Value::Double(10f64.ln())));
    assert!(wrapped[0].diagnostic().is_none() && wrapped[1].diagnostic().is_none());

    let diag = wrapped[2].diagnostic().unwrap();
    assert!(wrapped[2].outcome().is_none());
    assert!(diag.error.is_class("invalid_input"));
    assert_eq!(diag.error.message, "non-numeric argument to mathematical function");
    assert_eq!(diag.args.get(0), Some(&Value::from("a")));
}

#[test]
fn partition_splits_successes_and_failures() {
    let inputs = mixed_inputs();
    let out = safely_ln(&inputs).unwrap();
    let p = partition(&inputs, &out).unwrap();
    assert_eq!(p.success_indices(), vec![0, 1]);
    assert_eq!(p.failure_indices(), vec![2]);
    assert_eq!(p.failures[0].input, Value::from("a"));
    assert_eq!(p.success_values().as_doubles(), Some(vec![0.0, 10f64.ln()]));
}

#[test]
fn transposed_wrapped_results_give_result_and_error_columns() {
    let out = safely_ln(&mixed_inputs()).unwrap();
    let cols = transpose(&out).unwrap();
    let results = cols.get_by_name(RESULT_FIELD).unwrap().as_list().unwrap();
    let errors = cols.get_by_name(ERROR_FIELD).unwrap().as_list().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(errors.len(), 3);
    assert_eq!(results.get(2), Some(&Value::Null));
    assert_eq!(errors.get(0), Some(&Value::Null));
    assert!(errors.get(2).and_then(Value::as_list).is_some());

    assert_eq!(zip_fields(&cols).unwrap(), out);
}

#[test]
fn safely_never_fails_even_on_panic() {
    let input = list(&json!([1, 2, 3]));
    let mut f = safely(pure(|args: &Args| -> Result<Value, CallError> {
        match args.get(0).and_then(Value::as_i64) {
            Some(2) => panic!("two is not allowed"),
            Some(x) => Ok(Value::Int(x)),
            None => Err(CallError::invalid_input("missing")),
        }
    }));
    let out = map(&input, &mut f, ResultKind::Row, &Args::new()).unwrap();
    let p = partition(&input, &out).unwrap();
    assert_eq!(p.success_indices(), vec![0, 2]);
    assert!(p.failures[0].diagnostic.error.is_class(CLASS_PANIC));
    assert_eq!(p.failures[0].diagnostic.error.message, "two is not allowed");
}

#[test]
fn possibly_equals_f_on_success_and_default_on_failure() {
    let mut registry = stock_registry(0);
    let ln = registry.get_mut("ln").unwrap();
    let mut f = possibly(ln, f64::NAN);
    let out = map(&mixed_inputs(), &mut f, ResultKind::Double, &Args::new()).unwrap();
    let xs = out.as_doubles().unwrap();
    assert_eq!(xs[0], 0.0);
    assert_eq!(xs[1], 10f64.ln());
    assert!(xs[2].is_nan());
}

#[test]
fn quietly_captures_the_nan_warning() {
    let mut registry = stock_registry(0);
    let sqrt = registry.get_mut("sqrt").unwrap();
    let mut f = quietly(sqrt);
    let out = f.call_quiet(&Args::new().with(-4)).unwrap();
    assert!(out.result.as_f64().unwrap().is_nan());
    assert_eq!(out.warnings, vec!["NaNs produced".to_string()]);
    assert!(out.output.is_empty());
}

#[test]
fn safely_wraps_an_unallocatable_sample_size() {
    let mut registry = stock_registry(0);
    let uniform = registry.get_mut("uniform_random").unwrap();
    let mut f = safely(uniform);
    let args = Args::new()
        .with_named("n", 1e15)
        .with_named("min", 2)
        .with_named("max", 1);
    let wrapped = f.call_wrapped(&args, &mut CallContext::emitting());
    assert!(!wrapped.is_ok());
    assert!(wrapped.diagnostic().unwrap().error.is_class("invalid_input"));
}
