//! Map policy as a file: load, apply, render back, digest.

use std::fs;

use lock_tests::list;
use serde_json::json;
use tidymap_kernel::call::callable::pure;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::kind::ResultKind;
use tidymap_kernel::data::value::Value;
use tidymap_kernel::engine::error::MapError;
use tidymap_kernel::engine::map::Mapper;
use tidymap_kernel::engine::policy::{MapPolicy, NumericPromotion, PolicyError};

fn count_chars() -> impl tidymap_kernel::call::callable::Callable {
    pure(|args: &Args| {
        let n = args.get(0).and_then(Value::as_str).map_or(0, str::len);
        Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
    })
}

#[test]
fn policy_file_round_trip_and_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map_policy.json");
    fs::write(
        &path,
        br#"{"schema_version":"map_policy.v1","numeric":"widen_int_to_double","max_elements":3}"#,
    )
    .unwrap();

    let policy = MapPolicy::from_json_bytes(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(policy.numeric, NumericPromotion::WidenIntToDouble);
    assert_eq!(policy.max_elements, Some(3));

    let mapper = Mapper::new(policy.clone());
    let words = list(&json!(["a", "bb", "ccc"]));
    let out = mapper
        .map(&words, &mut count_chars(), ResultKind::Double, &Args::new())
        .unwrap();
    assert_eq!(out.as_doubles(), Some(vec![1.0, 2.0, 3.0]));

    let too_many = list(&json!(["a", "b", "c", "d"]));
    let err = mapper
        .map(&too_many, &mut count_chars(), ResultKind::Double, &Args::new())
        .unwrap_err();
    assert!(matches!(err, MapError::PolicyViolation { .. }));

    let rendered = dir.path().join("rendered.json");
    fs::write(&rendered, policy.canonical_bytes()).unwrap();
    let reloaded = MapPolicy::from_json_bytes(&fs::read(&rendered).unwrap()).unwrap();
    assert_eq!(reloaded, policy);
    assert_eq!(reloaded.digest(), policy.digest());
}

#[test]
fn strict_default_rejects_int_for_double() {
    let words = list(&json!(["a"]));
    let err = Mapper::default()
        .map(&words, &mut count_chars(), ResultKind::Double, &Args::new())
        .unwrap_err();
    assert!(matches!(err, MapError::KindMismatch { index: 0, .. }));
}

#[test]
fn malformed_policy_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, br#"{"schema_version":"map_policy.v1","numerics":"strict"}"#).unwrap();
    let err = MapPolicy::from_json_bytes(&fs::read(&path).unwrap()).unwrap_err();
    assert!(matches!(err, PolicyError::Parse { .. }));

    fs::write(&path, br#"{"schema_version":"map_policy.v1","max_elements":0}"#).unwrap();
    let err = MapPolicy::from_json_bytes(&fs::read(&path).unwrap()).unwrap_err();
    assert!(matches!(err, PolicyError::Invalid { .. }));
}
