// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sentinel-delimited chunk buffer.

use crate::error::{Error, Result};
use crate::types::SEPARATOR;

/// Documents of one chunk, each followed by one separator byte.
///
/// The final separator is the anchor terminator the engine requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    bytes: Vec<u8>,
    starts: Vec<usize>,
}

/// Concatenate `docs` in order, appending a separator to each.
///
/// A document containing byte 0 is rejected with its position in `docs`.
pub fn build_buffer<D: AsRef<[u8]>>(docs: &[D]) -> Result<Buffer> {
    let total: usize = docs.iter().map(|d| d.as_ref().len() + 1).sum();
    let mut bytes = Vec::with_capacity(total);
    let mut starts = Vec::with_capacity(docs.len());

    for (document, doc) in docs.iter().enumerate() {
        let doc = doc.as_ref();
        if doc.contains(&SEPARATOR) {
            return Err(Error::SeparatorInDocument { document });
        }
        starts.push(bytes.len());
        bytes.extend_from_slice(doc);
        bytes.push(SEPARATOR);
    }

    Ok(Buffer { bytes, starts })
}

impl Buffer {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn document_count(&self) -> usize {
        self.starts.len()
    }

    /// Buffer offset where each document begins.
    pub fn document_starts(&self) -> &[usize] {
        &self.starts
    }

    /// Document `i` without its separator.
    pub fn document(&self, i: usize) -> Option<&[u8]> {
        let start = *self.starts.get(i)?;
        let end = self.starts.get(i + 1).copied().unwrap_or(self.bytes.len());
        Some(&self.bytes[start..end - 1])
    }

    /// Index of the document containing buffer offset `pos`.
    pub fn document_of(&self, pos: usize) -> usize {
        self.starts.partition_point(|&s| s <= pos).saturating_sub(1)
    }
}
