//! Aligned iteration over parallel inputs.
//!
//! Every multi-input operation (`map2`, `pmap`, `invoke_map`) checks its
//! inputs through [`check_aligned`] before the first call, so a size
//! mismatch is reported without any element having been processed.

use tracing::warn;

use crate::engine::error::MapError;

/// Check that all `lens` are equal, returning the common length.
///
/// An empty `lens` is aligned with length 0.
///
/// # Errors
///
/// Returns [`MapError::SizeMismatch`] naming the first input whose length
/// differs from input 0.
pub fn check_aligned(operation: &'static str, lens: &[usize]) -> Result<usize, MapError> {
    let Some(&expected) = lens.first() else {
        return Ok(0);
    };
    if let Some((input, &found)) = lens.iter().enumerate().find(|&(_, &len)| len != expected) {
        warn!(operation, input, expected, found, "parallel inputs differ in length");
        return Err(MapError::SizeMismatch {
            operation,
            input,
            expected,
            found,
        });
    }
    Ok(expected)
}

/// Walk two equal-length sequences in ascending index order, collecting
/// `f(index, a_i, b_i)`. Stops at the first error.
///
/// # Errors
///
/// Returns [`MapError::SizeMismatch`] if the lengths differ (before any
/// call to `f`), or the first error returned by `f`.
pub fn zip_aligned<A, B, T, F>(
    operation: &'static str,
    a: A,
    b: B,
    mut f: F,
) -> Result<Vec<T>, MapError>
where
    A: IntoIterator,
    A::IntoIter: ExactSizeIterator,
    B: IntoIterator,
    B::IntoIter: ExactSizeIterator,
    F: FnMut(usize, A::Item, B::Item) -> Result<T, MapError>,
{
    let a = a.into_iter();
    let b = b.into_iter();
    let len = check_aligned(operation, &[a.len(), b.len()])?;
    let mut out = Vec::with_capacity(len);
    for (index, (x, y)) in a.zip(b).enumerate() {
        out.push(f(index, x, y)?);
    }
    Ok(out)
}
