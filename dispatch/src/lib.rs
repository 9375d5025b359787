//! tidymap dispatch: calling functions by name or reference.
//!
//! Depends only on `tidymap_kernel`. Names resolve through an explicit
//! [`registry::CallableRegistry`] passed by the caller; there is no global
//! lookup scope.
//!
//! # Key types
//!
//! - [`registry::CallableRegistry`] -- name → callable
//! - [`selector::FnRef`] -- a callable given directly or by name
//! - [`selector::Selector`] -- a callable, a name, or an element accessor
//! - [`invoke::invoke_map`] -- call a list of functions with a list of argument sets
//! - [`stock::stock_registry`] -- seeded numeric and random-draw callables

#![forbid(unsafe_code)]

pub mod invoke;
pub mod registry;
pub mod selector;
pub mod stock;
