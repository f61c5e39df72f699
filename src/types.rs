// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offset types shared by the engine, the serializers and the orchestrator.
//!
//! Suffix and LCP arrays are stored in a fixed-width unsigned integer chosen at
//! build time. The default is 4 bytes, enough for chunks of up to 2^31 symbols.
//! Enabling the `index64` feature switches [`Offset`] to 8 bytes for larger
//! collections at twice the memory per entry.
//!
//! Half of the integer range is addressable, mirroring a signed offset type; the
//! top value doubles as the engine's "empty slot" marker.

use std::fmt;

/// Document separator and anchor terminator.
pub const SEPARATOR: u8 = 0;

/// Fixed-width unsigned integer used for SA and LCP entries.
pub trait SaIndex: Copy + Eq + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Width of one entry in bytes.
    const BYTES: usize;
    /// Marker for unfilled slots during induced sorting. Never a valid offset.
    const EMPTY: Self;
    /// Largest buffer length this width can index: `2^(8 * BYTES) / 2`.
    const MAX_LEN: u64;

    fn from_usize(value: usize) -> Self;
    fn to_usize(self) -> usize;
    fn to_u64(self) -> u64;

    #[inline]
    fn zero() -> Self {
        Self::from_usize(0)
    }
}

impl SaIndex for u32 {
    const BYTES: usize = 4;
    const EMPTY: Self = u32::MAX;
    const MAX_LEN: u64 = 1 << 31;

    #[inline]
    fn from_usize(value: usize) -> Self {
        debug_assert!(value <= u32::MAX as usize);
        value as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl SaIndex for u64 {
    const BYTES: usize = 8;
    const EMPTY: Self = u64::MAX;
    const MAX_LEN: u64 = 1 << 63;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn to_u64(self) -> u64 {
        self
    }
}

/// Offset width selected for this build.
#[cfg(not(feature = "index64"))]
pub type Offset = u32;

/// Offset width selected for this build.
#[cfg(feature = "index64")]
pub type Offset = u64;

/// Largest value of the signed counterpart of [`Offset`], used as the default
/// memory ceiling in bytes when none is configured.
pub const fn default_memory_ceiling() -> u64 {
    <Offset as SaIndex>::MAX_LEN - 1
}

/// Result of sorting one sentinel-delimited buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSort<I> {
    /// Suffix start offsets in generalized suffix order.
    pub sa: Vec<I>,
    /// `lcp[i]` is the common prefix of `sa[i - 1]` and `sa[i]`; `lcp[0] == 0`.
    pub lcp: Option<Vec<I>>,
    /// Deepest recursion level reached while sorting the reduced problem.
    pub depth: usize,
}

impl<I: SaIndex> SuffixSort<I> {
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }
}
