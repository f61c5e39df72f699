// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Burrows-Wheeler column and its run-length packing.
//!
//! The BWT symbol of sorted suffix `i` is the byte just before `SA[i]`. Row 0
//! is the anchor terminator and is never emitted, so a chunk of `len` symbols
//! yields `len - 1` BWT bytes.
//!
//! # RLE unit
//!
//! ```text
//!   7      3 2    0
//! ┌─────────┬──────┐
//! │ run - 1 │ code │   run in 1..=32, code in {$:0, A:1, C:2, G:3, N:4, T:5}
//! └─────────┴──────┘
//! ```
//!
//! Runs longer than 32 are split. Only the nucleotide alphabet and the
//! separator have codes.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{SaIndex, SEPARATOR};

/// Longest run one packed unit can hold.
pub const MAX_RUN: u8 = 32;

/// Symbols with an RLE code, indexed by code.
const RLE_ALPHABET: [u8; 6] = [SEPARATOR, b'A', b'C', b'G', b'N', b'T'];

/// Which BWT artifact a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BwtMode {
    #[default]
    None,
    /// One byte per symbol (`.bwt`).
    Plain,
    /// Packed runs (`.rle.bwt`).
    Rle,
}

impl BwtMode {
    /// Output suffix for this mode, without the leading dot.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            BwtMode::None => None,
            BwtMode::Plain => Some("bwt"),
            BwtMode::Rle => Some("rle.bwt"),
        }
    }
}

/// BWT column of `buffer` in suffix order, skipping the anchor row.
///
/// `SA[i] == 0` falls back to the last buffer byte, the cyclic predecessor.
pub fn bwt<'a, I: SaIndex>(buffer: &'a [u8], sa: &'a [I]) -> impl Iterator<Item = u8> + 'a {
    sa.iter().skip(1).map(move |&pos| match pos.to_usize() {
        0 => buffer[buffer.len() - 1],
        p => buffer[p - 1],
    })
}

/// One run of identical BWT symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleUnit {
    pub symbol: u8,
    pub run: u8,
}

impl RleUnit {
    /// Pack into one byte. Fails for symbols outside `$ACGNT`.
    pub fn pack(self) -> Result<u8> {
        debug_assert!((1..=MAX_RUN).contains(&self.run));
        let code = RLE_ALPHABET
            .iter()
            .position(|&s| s == self.symbol)
            .ok_or(Error::UnsupportedRleSymbol {
                symbol: self.symbol,
            })?;
        Ok(((self.run - 1) << 3) | code as u8)
    }

    /// Inverse of [`RleUnit::pack`]. Returns `None` for an unassigned code.
    pub fn unpack(byte: u8) -> Option<Self> {
        let symbol = *RLE_ALPHABET.get((byte & 0b111) as usize)?;
        Some(RleUnit {
            symbol,
            run: (byte >> 3) + 1,
        })
    }
}

/// Groups consecutive equal symbols into runs of at most [`MAX_RUN`].
pub struct Runs<It: Iterator<Item = u8>> {
    symbols: std::iter::Peekable<It>,
}

/// Run-length view of a symbol stream.
pub fn runs<It: IntoIterator<Item = u8>>(symbols: It) -> Runs<It::IntoIter> {
    Runs {
        symbols: symbols.into_iter().peekable(),
    }
}

impl<It: Iterator<Item = u8>> Iterator for Runs<It> {
    type Item = RleUnit;

    fn next(&mut self) -> Option<RleUnit> {
        let symbol = self.symbols.next()?;
        let mut run = 1;
        while run < MAX_RUN && self.symbols.next_if_eq(&symbol).is_some() {
            run += 1;
        }
        Some(RleUnit { symbol, run })
    }
}

/// Stream the BWT of one chunk to `out`. Returns the number of bytes written.
pub fn write_bwt<I: SaIndex, W: Write>(
    out: &mut W,
    buffer: &[u8],
    sa: &[I],
    mode: BwtMode,
) -> Result<u64> {
    let mut written = 0u64;
    match mode {
        BwtMode::None => {}
        BwtMode::Plain => {
            for symbol in bwt(buffer, sa) {
                out.write_all(&[symbol])?;
                written += 1;
            }
        }
        BwtMode::Rle => {
            for unit in runs(bwt(buffer, sa)) {
                out.write_all(&[unit.pack()?])?;
                written += 1;
            }
        }
    }
    Ok(written)
}
