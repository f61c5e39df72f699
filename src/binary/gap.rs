// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Gap LCP: LCP values in a reduced per-entry width.
//!
//! Most LCP values in real collections are small, so storing them in 1 or 2
//! bytes instead of the full offset width saves most of the file. A value that
//! does not fit is a hard error, never a silent truncation. The whole chunk is
//! checked before the first byte is written.

use std::io::{Read, Write};

use super::encoding::{encode_fixed, read_fixed};
use crate::error::{Error, Result};
use crate::types::{Offset, SaIndex};

/// Bytes per gap-LCP entry, 1 to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapWidth(usize);

impl GapWidth {
    pub const MAX: usize = 7;

    /// Validate a width against the supported range and the offset width of
    /// this build.
    pub fn new(width: usize) -> Result<Self> {
        if !(1..=Self::MAX).contains(&width) {
            return Err(Error::InvalidGapWidth { width });
        }
        let index_bytes = <Offset as SaIndex>::BYTES;
        if width > index_bytes {
            return Err(Error::GapWidthExceedsIndex { width, index_bytes });
        }
        Ok(GapWidth(width))
    }

    #[inline]
    pub fn bytes(self) -> usize {
        self.0
    }

    /// Largest value an entry can hold: `2^(8D) - 1`.
    #[inline]
    pub fn limit(self) -> u64 {
        (1u64 << (8 * self.0)) - 1
    }

    /// Output suffix for this width, e.g. `2.lcp`.
    pub fn extension(self) -> String {
        format!("{}.lcp", self.0)
    }
}

/// Write `lcp[1..]` at `width` bytes per entry. Returns the bytes written.
///
/// Fails with [`Error::LcpOverflow`] naming the first offending index before
/// anything reaches `out`.
pub fn write_gap_lcp<I: SaIndex, W: Write>(out: &mut W, lcp: &[I], width: GapWidth) -> Result<u64> {
    let limit = width.limit();
    if let Some((index, value)) = lcp
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, v)| (i, v.to_u64()))
        .find(|&(_, v)| v > limit)
    {
        return Err(Error::LcpOverflow {
            index,
            value,
            limit,
            width: width.bytes(),
        });
    }

    let mut buf = Vec::with_capacity(width.bytes() * 4096);
    let mut written = 0u64;
    for block in lcp.get(1..).unwrap_or(&[]).chunks(4096) {
        buf.clear();
        for value in block {
            encode_fixed(value.to_u64(), width.bytes(), &mut buf);
        }
        out.write_all(&buf)?;
        written += buf.len() as u64;
    }
    Ok(written)
}

/// Decode a gap-LCP stream written at `width`.
pub fn read_gap_lcp<R: Read>(input: &mut R, width: GapWidth) -> Result<Vec<u64>> {
    Ok(read_fixed(input, width.bytes())?)
}
