//! Map policy: configuration for kind verification and input limits.
//!
//! The policy is plain data with a `Default`. It can be loaded from JSON
//! (`map_policy.v1`) and rendered back to canonical bytes, which is what
//! its digest commits to.
//!
//! ```json
//! {"max_elements":null,"null_in_typed":"reject","numeric":"strict","schema_version":"map_policy.v1"}
//! ```

use std::fmt;

use crate::engine::error::MapError;
use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Schema tag carried by serialized policies.
pub const MAP_POLICY_SCHEMA: &str = "map_policy.v1";

/// How numeric results are verified against `Int`/`Double` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericPromotion {
    /// `Int` and `Double` are distinct kinds. Default.
    Strict,
    /// An `Int` result is accepted for a `Double` kind and stored as
    /// `Double`. A `Double` is never narrowed to `Int`.
    WidenIntToDouble,
}

impl NumericPromotion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::WidenIntToDouble => "widen_int_to_double",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strict" => Some(Self::Strict),
            "widen_int_to_double" => Some(Self::WidenIntToDouble),
            _ => None,
        }
    }
}

/// Whether `Null` satisfies a typed kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// `Null` in a typed mapping is a kind mismatch. Default.
    Reject,
    /// `Null` is stored as-is in any kind.
    Allow,
}

impl NullPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Allow => "allow",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reject" => Some(Self::Reject),
            "allow" => Some(Self::Allow),
            _ => None,
        }
    }
}

/// Mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPolicy {
    pub numeric: NumericPromotion,
    pub null_in_typed: NullPolicy,
    /// Hard cap on input length. `None` means unbounded.
    pub max_elements: Option<usize>,
}

impl Default for MapPolicy {
    fn default() -> Self {
        Self {
            numeric: NumericPromotion::Strict,
            null_in_typed: NullPolicy::Reject,
            max_elements: None,
        }
    }
}

/// Error loading or validating a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Malformed JSON, unknown key, or wrong value type.
    Parse { detail: String },
    /// Well-formed but meaningless settings.
    Invalid { detail: String },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "map policy parse error: {detail}"),
            Self::Invalid { detail } => write!(f, "invalid map policy: {detail}"),
        }
    }
}

impl std::error::Error for PolicyError {}

const KNOWN_KEYS: [&str; 4] = ["max_elements", "null_in_typed", "numeric", "schema_version"];

impl MapPolicy {
    /// Reject settings that cannot be meant.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Invalid`] if `max_elements` is `Some(0)`.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_elements == Some(0) {
            return Err(PolicyError::Invalid {
                detail: "max_elements of 0 forbids every mapping; use null for unbounded".into(),
            });
        }
        Ok(())
    }

    /// Enforce `max_elements` for an operation over `len` elements.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PolicyViolation`] when `len` exceeds the cap.
    pub fn check_len(&self, operation: &str, len: usize) -> Result<(), MapError> {
        match self.max_elements {
            Some(max) if len > max => Err(MapError::PolicyViolation {
                detail: format!("{operation} over {len} elements exceeds max_elements {max}"),
            }),
            _ => Ok(()),
        }
    }

    /// Parse a `map_policy.v1` JSON document. Missing keys take their
    /// defaults; `schema_version` is required.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Parse`] for malformed JSON, a missing or wrong
    /// `schema_version`, unknown keys, or wrong value types, and
    /// [`PolicyError::Invalid`] if the parsed policy fails [`Self::validate`].
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, PolicyError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| PolicyError::Parse {
                detail: format!("JSON parse: {e}"),
            })?;
        let obj = value.as_object().ok_or_else(|| PolicyError::Parse {
            detail: "expected JSON object".into(),
        })?;

        if let Some(unknown) = obj.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            return Err(PolicyError::Parse {
                detail: format!("unknown key {unknown:?}"),
            });
        }

        match obj.get("schema_version").and_then(serde_json::Value::as_str) {
            Some(MAP_POLICY_SCHEMA) => {}
            other => {
                return Err(PolicyError::Parse {
                    detail: format!("schema_version must be {MAP_POLICY_SCHEMA:?}, got {other:?}"),
                })
            }
        }

        let mut policy = Self::default();

        if let Some(v) = obj.get("numeric") {
            policy.numeric = v
                .as_str()
                .and_then(NumericPromotion::parse)
                .ok_or_else(|| PolicyError::Parse {
                    detail: format!("numeric: unrecognized value {v}"),
                })?;
        }

        if let Some(v) = obj.get("null_in_typed") {
            policy.null_in_typed = v
                .as_str()
                .and_then(NullPolicy::parse)
                .ok_or_else(|| PolicyError::Parse {
                    detail: format!("null_in_typed: unrecognized value {v}"),
                })?;
        }

        if let Some(v) = obj.get("max_elements") {
            policy.max_elements = match v {
                serde_json::Value::Null => None,
                other => {
                    let n = other.as_u64().ok_or_else(|| PolicyError::Parse {
                        detail: format!("max_elements: expected non-negative integer, got {other}"),
                    })?;
                    Some(usize::try_from(n).map_err(|_| PolicyError::Parse {
                        detail: format!("max_elements: {n} does not fit usize"),
                    })?)
                }
            };
        }

        policy.validate()?;
        Ok(policy)
    }

    /// Canonical JSON bytes: sorted keys, compact, every key present.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let max_elements = self
            .max_elements
            .map_or(serde_json::Value::Null, |n| serde_json::Value::from(n as u64));
        let value = serde_json::json!({
            "max_elements": max_elements,
            "null_in_typed": self.null_in_typed.as_str(),
            "numeric": self.numeric.as_str(),
            "schema_version": MAP_POLICY_SCHEMA,
        });
        // serde_json's default map is ordered by key and `to_vec` is compact.
        serde_json::to_vec(&value).unwrap_or_default()
    }

    /// Content hash of [`Self::canonical_bytes`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::MapPolicy, &self.canonical_bytes())
    }
}
