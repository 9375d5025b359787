//! Per-element kind verification.
//!
//! Called by the engine at the point each output element is produced, so a
//! mismatch is reported with the offending index before any later element
//! is computed.

use tracing::warn;

use crate::data::kind::ResultKind;
use crate::data::value::Value;
use crate::engine::error::MapError;
use crate::engine::policy::{MapPolicy, NullPolicy, NumericPromotion};

/// Check `value` against `kind` under `policy`, returning the value to store.
///
/// `Unit` stores `Null`. Under [`NumericPromotion::WidenIntToDouble`] an
/// `Int` for a `Double` kind is stored as `Double`.
///
/// # Errors
///
/// Returns [`MapError::KindMismatch`] naming `index`, the expected kind and
/// the actual value type.
#[allow(clippy::cast_precision_loss)]
pub fn verify_kind(
    kind: ResultKind,
    index: usize,
    value: Value,
    policy: &MapPolicy,
) -> Result<Value, MapError> {
    let accepted = match (kind, value) {
        (ResultKind::Any, v) => Ok(v),
        (ResultKind::Unit, _) => Ok(Value::Null),
        (_, Value::Null) if policy.null_in_typed == NullPolicy::Allow => Ok(Value::Null),
        (ResultKind::Bool, v @ Value::Bool(_))
        | (ResultKind::Int, v @ Value::Int(_))
        | (ResultKind::Double, v @ Value::Double(_))
        | (ResultKind::Text, v @ Value::Text(_)) => Ok(v),
        (ResultKind::Double, Value::Int(i))
            if policy.numeric == NumericPromotion::WidenIntToDouble =>
        {
            Ok(Value::Double(i as f64))
        }
        (ResultKind::Row, Value::List(list)) if list.is_named() => Ok(Value::List(list)),
        (expected, v) => Err(MapError::KindMismatch {
            index,
            expected,
            actual: v.value_type(),
        }),
    };
    if let Err(err) = &accepted {
        warn!(index, %kind, "{err}");
    }
    accepted
}
