//! tidymap adapters: failure isolation and reshaping over the kernel.
//!
//! This crate depends only on `tidymap_kernel`. The kernel engine never
//! isolates a callable failure itself; wrapping a callable in one of these
//! adapters before mapping is how a caller opts in.
//!
//! ```text
//! tidymap_kernel  ←  tidymap_adapters
//!        ↑
//!        └──────────  tidymap_dispatch
//! ```
//!
//! # Key types
//!
//! - [`safely::Safely`] -- never fails; returns a [`wrapped::WrappedResult`]
//! - [`possibly::Possibly`] -- falls back to a default value on failure
//! - [`quietly::Quietly`] -- captures printed output, warnings and messages
//! - [`transpose::transpose`] / [`transpose::zip_fields`] -- rows ⇄ columns
//! - [`partition::partition`] -- split a wrapped batch into successes and failures

#![forbid(unsafe_code)]

pub mod error;
mod isolate;
pub mod partition;
pub mod possibly;
pub mod quietly;
pub mod safely;
pub mod transpose;
pub mod wrapped;
