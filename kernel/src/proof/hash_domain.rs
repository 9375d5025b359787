//! Domain separators for content hashing.
//!
//! Each digest the crate produces is prefixed with exactly one of these
//! byte strings, so a collection digest can never collide with a policy
//! digest over the same bytes.

/// Declares `HashDomain`, `as_bytes()`, `ALL` and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Domain separator for [`super::hash::canonical_hash`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// Null-terminated prefix bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// Every domain, in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Canonical bytes of a [`crate::data::collection::Collection`].
    Collection => b"TIDYMAP::COLLECTION::V1\0",

    /// Canonical bytes of a [`crate::engine::policy::MapPolicy`].
    MapPolicy => b"TIDYMAP::MAP_POLICY::V1\0",
}
