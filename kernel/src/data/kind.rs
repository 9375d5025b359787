//! `ResultKind`: the declared element type a mapping must produce.

use std::fmt;

/// Closed set of output kinds for a mapping.
///
/// `Any` accepts every value. `Unit` marks a side-effect-only mapping:
/// results are accepted and stored as `Null`. The remaining kinds are
/// checked per element by the engine (see [`crate::engine::verify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// Generic value, heterogeneous results permitted.
    Any,
    Bool,
    Int,
    Double,
    Text,
    /// Record row: a fully named list.
    Row,
    /// Side effect only.
    Unit,
}

impl ResultKind {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Double => "double",
            Self::Text => "text",
            Self::Row => "row",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
