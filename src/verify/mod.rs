// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: independent checks of engine output.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Validation checks** (`check_*`, [`validate`]) that recompute what the
//!    engine claims by a different route and return a report. Used by the
//!    orchestrator's `-c` flag and by the tests.
//!
//! 2. **Runtime contracts** ([`contracts`]) that panic in debug builds right
//!    after the engine returns.
//!
//! The pairwise order checks fan out over rayon when the `parallel` feature is
//! enabled. Nothing here writes output.

mod types;
pub mod contracts;

pub use types::*;

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::types::{SaIndex, SEPARATOR};
use crate::utils::compare_segments;

/// Adjacent suffixes are non-decreasing when compared up to and including the
/// first separator.
pub fn check_sorted<I: SaIndex>(buffer: &[u8], sa: &[I]) -> bool {
    let ordered = |pair: &[I]| {
        compare_segments(buffer, pair[0].to_usize(), pair[1].to_usize()) != Ordering::Greater
    };

    #[cfg(feature = "parallel")]
    {
        sa.par_windows(2).all(ordered)
    }
    #[cfg(not(feature = "parallel"))]
    {
        sa.windows(2).all(ordered)
    }
}

/// Adjacent suffixes are strictly increasing as whole byte strings, document
/// boundaries included. Stronger than [`check_sorted`].
pub fn check_generalized_order<I: SaIndex>(buffer: &[u8], sa: &[I]) -> bool {
    let increasing = |pair: &[I]| buffer[pair[0].to_usize()..] < buffer[pair[1].to_usize()..];

    #[cfg(feature = "parallel")]
    {
        sa.par_windows(2).all(increasing)
    }
    #[cfg(not(feature = "parallel"))]
    {
        sa.windows(2).all(increasing)
    }
}

/// Every offset of a `len`-symbol buffer appears exactly once.
pub fn check_permutation<I: SaIndex>(sa: &[I], len: usize) -> bool {
    if sa.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &pos in sa {
        let pos = pos.to_usize();
        if pos >= len || seen[pos] {
            return false;
        }
        seen[pos] = true;
    }
    true
}

/// The anchor terminator sorts first.
pub fn check_anchor<I: SaIndex>(buffer: &[u8], sa: &[I]) -> bool {
    match (buffer.len(), sa.first()) {
        (0, None) => true,
        (len, Some(&first)) => first.to_usize() == len - 1 && buffer[len - 1] == SEPARATOR,
        _ => false,
    }
}

/// Recompute every LCP value with the Φ array and compare.
///
/// `Φ[SA[i]] = SA[i-1]` links each suffix to its predecessor. Walking the
/// buffer in text order, the shared prefix with the predecessor drops by at
/// most one per step, so the whole pass is linear. Separators never match.
pub fn check_lcp<I: SaIndex>(buffer: &[u8], sa: &[I], lcp: &[I]) -> LcpReport {
    let n = sa.len();
    let mut report = LcpReport {
        checked: n,
        ..Default::default()
    };
    if lcp.len() != n {
        report.record(LcpMismatch {
            index: lcp.len().min(n),
            expected: n as u64,
            found: lcp.len() as u64,
        });
        return report;
    }
    if n == 0 {
        return report;
    }

    const NONE: usize = usize::MAX;
    let mut phi = vec![NONE; n];
    for i in 1..n {
        phi[sa[i].to_usize()] = sa[i - 1].to_usize();
    }

    // Permuted LCP, text order
    let mut plcp = vec![0usize; n];
    let mut l = 0usize;
    for p in 0..n {
        let q = phi[p];
        if q == NONE {
            l = 0;
            continue;
        }
        while p + l < n
            && q + l < n
            && buffer[p + l] == buffer[q + l]
            && buffer[p + l] != SEPARATOR
        {
            l += 1;
        }
        plcp[p] = l;
        l = l.saturating_sub(1);
    }

    if lcp[0].to_u64() != 0 {
        report.record(LcpMismatch {
            index: 0,
            expected: 0,
            found: lcp[0].to_u64(),
        });
    }
    for i in 1..n {
        let expected = plcp[sa[i].to_usize()] as u64;
        let found = lcp[i].to_u64();
        if expected != found {
            report.record(LcpMismatch {
                index: i,
                expected,
                found,
            });
        }
    }
    report
}

/// Run every check on one sorted buffer.
pub fn validate<I: SaIndex>(buffer: &[u8], sa: &[I], lcp: Option<&[I]>) -> ValidationReport {
    let permutation = check_permutation(sa, buffer.len());
    // The order checks index the buffer by SA entries
    let in_range = permutation || sa.iter().all(|p| p.to_usize() < buffer.len());
    ValidationReport {
        permutation,
        anchor: check_anchor(buffer, sa),
        sorted: in_range && check_sorted(buffer, sa),
        generalized_order: in_range && check_generalized_order(buffer, sa),
        lcp: match lcp {
            Some(lcp) if permutation => Some(check_lcp(buffer, sa, lcp)),
            Some(lcp) => Some(LcpReport {
                checked: lcp.len(),
                mismatch_count: lcp.len().max(1),
                mismatches: Vec::new(),
            }),
            None => None,
        },
    }
}
