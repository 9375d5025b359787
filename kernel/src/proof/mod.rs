//! Canonical bytes and content hashing for collections and policies.

pub mod canon;
pub mod hash;
pub mod hash_domain;
