//! Typed-Map Engine: `map`, `map2`, `pmap`, the `walk` family, predicate
//! functionals and folds.
//!
//! Depends on `data` and `call`.

pub mod error;
pub mod fold;
pub mod map;
pub mod policy;
pub mod predicate;
pub mod verify;
pub mod zip;
