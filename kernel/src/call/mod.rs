//! The `Callable` seam, its side-output context, and callable failures.
//!
//! Depends on `data`. Does not import from `engine`.

pub mod accessor;
pub mod callable;
pub mod context;
pub mod error;
