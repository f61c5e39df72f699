//! Runtime contracts on engine output.
//!
//! Debug-mode assertions only: zero-cost in release builds. They catch engine
//! bugs at the point of construction, before anything is written.

use crate::types::SaIndex;

/// The anchor terminator (last offset) must sort first.
///
/// # Panics (debug builds only)
/// Panics if `sa[0] != sa.len() - 1`.
#[inline]
pub fn check_anchor<I: SaIndex>(sa: &[I]) {
    if let Some(&first) = sa.first() {
        debug_assert_eq!(
            first.to_usize(),
            sa.len() - 1,
            "Contract violation: anchor suffix is not SA[0]"
        );
    }
}

/// Every offset in `[0, len)` must appear exactly once.
///
/// # Panics (debug builds only)
/// Panics on an out-of-range or repeated offset.
#[inline]
pub fn check_permutation<I: SaIndex>(sa: &[I]) {
    if cfg!(debug_assertions) {
        let mut seen = vec![false; sa.len()];
        for (i, &pos) in sa.iter().enumerate() {
            let pos = pos.to_usize();
            debug_assert!(
                pos < sa.len() && !seen[pos],
                "Contract violation: SA[{}] = {} is out of range or repeated",
                i,
                pos
            );
            if pos < sa.len() {
                seen[pos] = true;
            }
        }
    }
}
