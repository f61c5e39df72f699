// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunk planning under a memory ceiling.
//!
//! One chunk of `len` symbols costs `len` bytes of buffer plus `len` offsets
//! per array (SA, and LCP when requested):
//!
//! ```text
//! footprint(len) = len × (width × arrays + 1) ≤ ceiling
//! capacity       = ⌊ceiling / (width × arrays + 1)⌋
//! ```
//!
//! Documents are grouped greedily in input order: a chunk closes as soon as the
//! next document (plus its separator) would push it past the capacity.

use crate::error::{Error, Result};

/// Largest buffer a `width`-byte offset can address: `2^(8w) / 2`.
#[inline]
pub fn max_len(width: usize) -> u64 {
    1u64 << (8 * width - 1)
}

/// Bytes needed to sort a chunk of `len` symbols.
#[inline]
pub fn footprint(len: u64, width: usize, arrays: usize) -> u64 {
    len * (width * arrays + 1) as u64
}

/// Document grouping for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Most symbols one chunk may hold.
    pub capacity: u64,
    /// `K[b]`: number of documents in chunk `b`.
    pub documents: Vec<usize>,
    /// Buffer length of chunk `b`, separators included.
    pub lengths: Vec<u64>,
}

impl ChunkPlan {
    /// Largest chunk that fits `ceiling` bytes.
    pub fn capacity(ceiling: u64, width: usize, arrays: usize) -> Result<u64> {
        let capacity = ceiling / (width * arrays + 1) as u64;
        if capacity == 0 {
            return Err(Error::CeilingTooSmall { ceiling });
        }
        let max = max_len(width);
        if capacity > max {
            return Err(Error::ChunkTooLarge { capacity, max });
        }
        Ok(capacity)
    }

    /// Greedy consecutive grouping of documents with byte lengths `doc_lengths`.
    pub fn partition(doc_lengths: &[u64], capacity: u64) -> Result<ChunkPlan> {
        let mut plan = ChunkPlan {
            capacity,
            documents: Vec::new(),
            lengths: Vec::new(),
        };
        let mut count = 0usize;
        let mut len = 0u64;

        for (document, &doc_len) in doc_lengths.iter().enumerate() {
            let need = doc_len + 1;
            if need > capacity {
                return Err(Error::DocumentTooLarge {
                    document,
                    len: need,
                    capacity,
                });
            }
            if len + need > capacity {
                plan.documents.push(count);
                plan.lengths.push(len);
                count = 0;
                len = 0;
            }
            count += 1;
            len += need;
        }
        if count > 0 {
            plan.documents.push(count);
            plan.lengths.push(len);
        }
        Ok(plan)
    }

    /// Capacity, collection size check and partition in one step.
    pub fn plan(doc_lengths: &[u64], ceiling: u64, width: usize, arrays: usize) -> Result<ChunkPlan> {
        let capacity = Self::capacity(ceiling, width, arrays)?;
        let total: u64 = doc_lengths.iter().map(|&l| l + 1).sum();
        let max = max_len(width);
        if total > max {
            return Err(Error::CollectionTooLarge { total, max });
        }
        Self::partition(doc_lengths, capacity)
    }

    pub fn chunk_count(&self) -> usize {
        self.documents.len()
    }

    /// Symbols over all chunks.
    pub fn total_len(&self) -> u64 {
        self.lengths.iter().sum()
    }

    /// Documents over all chunks.
    pub fn document_count(&self) -> usize {
        self.documents.iter().sum()
    }

    /// Largest per-chunk footprint of this plan.
    pub fn peak_footprint(&self, width: usize, arrays: usize) -> u64 {
        self.lengths
            .iter()
            .map(|&len| footprint(len, width, arrays))
            .max()
            .unwrap_or(0)
    }
}
