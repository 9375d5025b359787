//! Typed-map contract tests across the public surface.
//!
//! Proves:
//! 1. Output length and names follow the input for every result kind
//! 2. Empty input maps to empty output without calling the function
//! 3. Unequal parallel inputs fail before any call
//! 4. An un-adapted failure aborts the batch with no partial result
//! 5. Kind verification happens per element, at the offending index

use std::cell::Cell;

use lock_tests::list;
use serde_json::json;
use tidymap_kernel::call::callable::pure;
use tidymap_kernel::call::error::CallError;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::kind::ResultKind;
use tidymap_kernel::data::value::{Value, ValueType};
use tidymap_kernel::engine::error::MapError;
use tidymap_kernel::engine::map::{map, map2, pmap, walk};

fn describe() -> impl tidymap_kernel::call::callable::Callable {
    pure(|args: &Args| Ok(Value::Text(format!("{}", args.get(0).cloned().unwrap_or_default()))))
}

#[test]
fn length_and_names_are_preserved() {
    let input = list(&json!({"alpha": 1, "beta": 2.5, "gamma": "g"}));
    let out = map(&input, &mut describe(), ResultKind::Text, &Args::new()).unwrap();
    assert_eq!(out.len(), input.len());
    assert_eq!(out.names(), input.names());
    for i in 0..input.len() {
        assert_eq!(out.name(i), input.name(i));
    }
}

#[test]
fn empty_input_is_empty_output_for_every_kind() {
    let calls = Cell::new(0);
    let mut f = pure(|_args: &Args| {
        calls.set(calls.get() + 1);
        Ok(Value::Null)
    });
    for kind in [
        ResultKind::Any,
        ResultKind::Bool,
        ResultKind::Int,
        ResultKind::Double,
        ResultKind::Text,
        ResultKind::Row,
        ResultKind::Unit,
    ] {
        let out = map(&Collection::new(), &mut f, kind, &Args::new()).unwrap();
        assert!(out.is_empty(), "{kind}");
    }
    drop(f);
    assert_eq!(calls.get(), 0);
}

#[test]
fn map2_pairs_by_index_and_rejects_unequal_lengths() {
    let a = list(&json!([1, 2, 3]));
    let b = list(&json!([10, 20, 30]));
    let mut sum = pure(|args: &Args| {
        let x = args.get(0).and_then(Value::as_i64).unwrap_or(0);
        let y = args.get(1).and_then(Value::as_i64).unwrap_or(0);
        Ok(Value::Int(x + y))
    });
    let out = map2(&a, &b, &mut sum, ResultKind::Int, &Args::new()).unwrap();
    assert_eq!(out.as_ints(), Some(vec![11, 22, 33]));

    let short = list(&json!([1]));
    let err = map2(&a, &short, &mut sum, ResultKind::Int, &Args::new()).unwrap_err();
    assert!(matches!(err, MapError::SizeMismatch { expected: 3, found: 1, .. }));
}

#[test]
fn pmap_reports_the_unequal_input() {
    let inputs = list(&json!([[1, 2], [1, 2], [1]]));
    let err = pmap(&inputs, &mut describe(), ResultKind::Text, &Args::new()).unwrap_err();
    assert!(matches!(err, MapError::SizeMismatch { input: 2, .. }));
}

#[test]
fn unadapted_failure_aborts_with_no_partial_result() {
    let input = list(&json!([1, 2, "x", 4]));
    let seen = Cell::new(0);
    let mut strict = pure(|args: &Args| {
        seen.set(seen.get() + 1);
        args.get(0)
            .and_then(Value::as_i64)
            .map(Value::Int)
            .ok_or_else(|| CallError::invalid_input("not an integer"))
    });
    let err = map(&input, &mut strict, ResultKind::Int, &Args::new()).unwrap_err();
    match err {
        MapError::Call { index, error } => {
            assert_eq!(index, 2);
            assert!(error.is_class("invalid_input"));
        }
        other => panic!("expected Call, got {other:?}"),
    }
    drop(strict);
    assert_eq!(seen.get(), 3, "element 3 must never be called");
}

#[test]
fn kind_mismatch_names_index_and_types() {
    let input = list(&json!([1, 2]));
    let mut halve = pure(|args: &Args| {
        let x = args.get(0).and_then(Value::as_i64).unwrap_or(0);
        Ok(if x == 2 { Value::Double(1.0) } else { Value::Int(x) })
    });
    let err = map(&input, &mut halve, ResultKind::Int, &Args::new()).unwrap_err();
    assert_eq!(
        err,
        MapError::KindMismatch {
            index: 1,
            expected: ResultKind::Int,
            actual: ValueType::Double,
        }
    );
    assert_eq!(err.to_string(), "result 1 must be int, not double");
}

#[test]
fn walk_returns_its_input_for_chaining() {
    let input = list(&json!({"a": 1}));
    let out = walk(&input, &mut describe(), &Args::new()).unwrap();
    assert_eq!(out, input);
}
