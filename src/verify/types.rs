// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Validation reports.
//!
//! A failed check is a diagnostic: the run keeps going and the report says what
//! was wrong and where.

use std::fmt;

/// Mismatches kept in a report; the count covers all of them.
pub const MAX_REPORTED: usize = 16;

/// One LCP entry that disagrees with the recomputed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcpMismatch {
    pub index: usize,
    pub expected: u64,
    pub found: u64,
}

impl fmt::Display for LcpMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LCP[{}] = {} but suffixes share {}",
            self.index, self.found, self.expected
        )
    }
}

/// Outcome of an LCP cross-check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcpReport {
    /// Entries compared.
    pub checked: usize,
    /// Total number of disagreeing entries.
    pub mismatch_count: usize,
    /// The first [`MAX_REPORTED`] disagreements, in index order.
    pub mismatches: Vec<LcpMismatch>,
}

impl LcpReport {
    pub fn is_ok(&self) -> bool {
        self.mismatch_count == 0
    }

    pub(crate) fn record(&mut self, mismatch: LcpMismatch) {
        self.mismatch_count += 1;
        if self.mismatches.len() < MAX_REPORTED {
            self.mismatches.push(mismatch);
        }
    }
}

impl fmt::Display for LcpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return write!(f, "LCP ok ({} entries)", self.checked);
        }
        write!(
            f,
            "LCP mismatch in {} of {} entries",
            self.mismatch_count, self.checked
        )?;
        for m in &self.mismatches {
            write!(f, "\n  {}", m)?;
        }
        Ok(())
    }
}

/// Every check run on one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Each offset of the buffer appears exactly once.
    pub permutation: bool,
    /// The anchor terminator sorts first.
    pub anchor: bool,
    /// Adjacent suffixes ordered within their separator-terminated segments.
    pub sorted: bool,
    /// Adjacent suffixes ordered across document boundaries as well.
    pub generalized_order: bool,
    /// Present when an LCP array was checked.
    pub lcp: Option<LcpReport>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.permutation
            && self.anchor
            && self.sorted
            && self.generalized_order
            && self.lcp.as_ref().map_or(true, LcpReport::is_ok)
    }

    /// Short verdicts, one per check.
    pub fn verdicts(&self) -> Vec<(&'static str, bool)> {
        let mut verdicts = vec![
            ("permutation", self.permutation),
            ("anchor", self.anchor),
            ("sorted", self.sorted),
            ("generalized order", self.generalized_order),
        ];
        if let Some(lcp) = &self.lcp {
            verdicts.push(("LCP", lcp.is_ok()));
        }
        verdicts
    }
}
