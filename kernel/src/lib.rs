//! tidymap kernel: the typed-map core of tidymap.
//!
//! # API Surface
//!
//! - [`engine::map::Mapper`] -- `map`, `map2`, `pmap` and the `walk` family,
//!   plus predicate functionals and folds, all under a [`engine::policy::MapPolicy`]
//! - [`call::callable::Callable`] -- the seam every mapped function goes through
//! - [`data::collection::Collection`] -- ordered, optionally named values
//! - [`proof::canon::collection_digest`] -- content hash of a mapped result
//!
//! # Module Dependency Direction
//!
//! `data` ← `call` ← `engine`, and `proof` ← `data`
//!
//! One-way only. No cycles. `engine` never depends on any adapter; failure
//! isolation is layered on top by the `tidymap_adapters` crate.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod call;
pub mod data;
pub mod engine;
pub mod proof;
