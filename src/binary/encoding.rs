// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width little-endian integers and the raw SA / SA+LCP streams.
//!
//! Nothing clever: every entry is `width` bytes, least significant first, no
//! header and no framing. A reader has to know the width it was written with.

use std::io::{self, Read, Write};

use crate::types::SaIndex;

/// Append the low `width` bytes of `value`, little-endian.
#[inline]
pub fn encode_fixed(value: u64, width: usize, buf: &mut Vec<u8>) {
    debug_assert!((1..=8).contains(&width));
    buf.extend_from_slice(&value.to_le_bytes()[..width]);
}

/// Decode a little-endian integer of `bytes.len()` bytes (at most 8).
#[inline]
pub fn decode_fixed(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    let mut raw = [0u8; 8];
    raw[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(raw)
}

/// Write SA entries at the offset width.
pub fn write_sa<I: SaIndex, W: Write>(out: &mut W, sa: &[I]) -> io::Result<u64> {
    let mut buf = Vec::with_capacity(I::BYTES * 1024);
    let mut written = 0u64;
    for chunk in sa.chunks(1024) {
        buf.clear();
        for &pos in chunk {
            encode_fixed(pos.to_u64(), I::BYTES, &mut buf);
        }
        out.write_all(&buf)?;
        written += buf.len() as u64;
    }
    Ok(written)
}

/// Write interleaved `(SA[i], LCP[i])` pairs at the offset width.
pub fn write_sa_lcp<I: SaIndex, W: Write>(out: &mut W, sa: &[I], lcp: &[I]) -> io::Result<u64> {
    debug_assert_eq!(sa.len(), lcp.len());
    let mut buf = Vec::with_capacity(2 * I::BYTES * 1024);
    let mut written = 0u64;
    for (sa, lcp) in sa.chunks(1024).zip(lcp.chunks(1024)) {
        buf.clear();
        for (&pos, &value) in sa.iter().zip(lcp) {
            encode_fixed(pos.to_u64(), I::BYTES, &mut buf);
            encode_fixed(value.to_u64(), I::BYTES, &mut buf);
        }
        out.write_all(&buf)?;
        written += buf.len() as u64;
    }
    Ok(written)
}

/// Read every `width`-byte entry of a stream.
///
/// A trailing partial entry is an `UnexpectedEof` error.
pub fn read_fixed<R: Read>(input: &mut R, width: usize) -> io::Result<Vec<u64>> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    if bytes.len() % width != 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "stream of {} bytes is not a whole number of {}-byte entries",
                bytes.len(),
                width
            ),
        ));
    }
    Ok(bytes.chunks_exact(width).map(decode_fixed).collect())
}

/// Read a `.sa` stream.
pub fn read_sa<I: SaIndex, R: Read>(input: &mut R) -> io::Result<Vec<I>> {
    Ok(read_fixed(input, I::BYTES)?
        .into_iter()
        .map(|v| I::from_usize(v as usize))
        .collect())
}

/// Read a `.sa_lcp` stream back into separate SA and LCP arrays.
pub fn read_sa_lcp<I: SaIndex, R: Read>(input: &mut R) -> io::Result<(Vec<I>, Vec<I>)> {
    let values = read_fixed(input, I::BYTES)?;
    if values.len() % 2 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "SA/LCP stream ends inside a pair",
        ));
    }
    Ok(values
        .chunks_exact(2)
        .map(|pair| (I::from_usize(pair[0] as usize), I::from_usize(pair[1] as usize)))
        .unzip())
}
