//! Shared scenarios for the lock tests and the `digest_fixture` binary.
//!
//! Each scenario runs a fixed pipeline end to end and reduces its output to
//! a content hash, so determinism can be checked within one process (by
//! repetition) and across processes (by comparing fixture output).

use tidymap_adapters::safely::safely;
use tidymap_dispatch::invoke::invoke_map;
use tidymap_dispatch::selector::FnRef;
use tidymap_dispatch::stock::stock_registry;
use tidymap_kernel::data::args::Args;
use tidymap_kernel::data::collection::Collection;
use tidymap_kernel::data::kind::ResultKind;
use tidymap_kernel::data::value::Value;
use tidymap_kernel::engine::error::MapError;
use tidymap_kernel::engine::map::Mapper;
use tidymap_kernel::engine::policy::MapPolicy;
use tidymap_kernel::proof::canon::collection_digest;
use tidymap_kernel::proof::hash::ContentHash;

/// Build a collection from JSON. Arrays are unnamed, objects named.
///
/// # Panics
///
/// If `json` is not an array or object.
#[must_use]
pub fn list(json: &serde_json::Value) -> Collection {
    match Value::from_json(json) {
        Value::List(c) => c,
        other => panic!("fixture is not a list: {other:?}"),
    }
}

/// `[1, 10, "a"]`: two numbers and one value `ln` rejects.
#[must_use]
pub fn mixed_inputs() -> Collection {
    list(&serde_json::json!([1, 10, "a"]))
}

/// `[1, 10, "a"]` mapped through `safely(ln)`.
///
/// # Errors
///
/// Only on an engine contract violation; callable failure is wrapped.
pub fn safely_ln(inputs: &Collection) -> Result<Collection, MapError> {
    let mut registry = stock_registry(0);
    let ln = registry
        .get_mut("ln")
        .ok_or_else(|| MapError::UnresolvedCallable {
            name: "ln".into(),
            position: None,
        })?;
    let mut f = safely(ln);
    Mapper::default().map(inputs, &mut f, ResultKind::Row, &Args::new())
}

/// The three-distribution `invoke_map` batch with a shared `n`.
///
/// # Errors
///
/// Propagates any dispatcher error.
pub fn random_batch(seed: u64, n: i64) -> Result<Collection, MapError> {
    let mut registry = stock_registry(seed);
    let mut refs = vec![
        FnRef::from("uniform_random"),
        FnRef::from("normal_random"),
        FnRef::from("poisson_random"),
    ];
    let arg_sets = vec![
        Args::new().with_named("min", -1).with_named("max", 1),
        Args::new().with_named("sd", 5),
        Args::new().with_named("lambda", 10),
    ];
    invoke_map(&mut registry, &mut refs, &arg_sets, &Args::new().with_named("n", n))
}

/// `pmap` of `normal_random` over named `(n, mean, sd)` columns.
///
/// # Errors
///
/// Propagates any engine error.
pub fn normal_columns(seed: u64) -> Result<Collection, MapError> {
    let mut registry = stock_registry(seed);
    let inputs = list(&serde_json::json!({
        "n": [1, 2, 3],
        "mean": [0, 10, 100],
        "sd": [1, 1, 0.5],
    }));
    let normal = registry
        .get_mut("normal_random")
        .ok_or_else(|| MapError::UnresolvedCallable {
            name: "normal_random".into(),
            position: None,
        })?;
    Mapper::default().pmap(&inputs, normal, ResultKind::Any, &Args::new())
}

/// `key=value` lines for every scenario, in fixed order.
///
/// # Errors
///
/// Propagates the first scenario error.
pub fn scenario_digests(seed: u64) -> Result<Vec<(&'static str, ContentHash)>, MapError> {
    Ok(vec![
        ("safely_digest", collection_digest(&safely_ln(&mixed_inputs())?)),
        ("invoke_map_digest", collection_digest(&random_batch(seed, 5)?)),
        ("pmap_digest", collection_digest(&normal_columns(seed)?)),
        ("policy_digest", MapPolicy::default().digest()),
    ])
}
