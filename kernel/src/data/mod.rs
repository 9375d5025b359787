//! Data model: values, collections, argument bundles and result kinds.
//!
//! Depends on nothing internal except `proof` for content hashing.

pub mod args;
pub mod collection;
pub mod kind;
pub mod value;
