//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the brute-force oracles every faster path is checked against.

#![doc(hidden)]

use crate::types::{SaIndex, SEPARATOR};
use crate::utils::segment_lcp;

/// Join documents into a sentinel-delimited buffer, one separator after each.
pub fn concat_documents<D: AsRef<[u8]>>(docs: &[D]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for doc in docs {
        buffer.extend_from_slice(doc.as_ref());
        buffer.push(SEPARATOR);
    }
    buffer
}

/// Suffix array by sorting every suffix slice. O(n² log n), tests only.
pub fn naive_suffix_array(buffer: &[u8]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..buffer.len()).collect();
    sa.sort_by(|&a, &b| buffer[a..].cmp(&buffer[b..]));
    sa
}

/// LCP array of `sa` by direct comparison, stopping at separators.
pub fn naive_lcp<I: SaIndex>(buffer: &[u8], sa: &[I]) -> Vec<usize> {
    let mut lcp = vec![0; sa.len()];
    for i in 1..sa.len() {
        lcp[i] = segment_lcp(buffer, sa[i - 1].to_usize(), sa[i].to_usize());
    }
    lcp
}

/// Burrows-Wheeler transform from the naive suffix array.
pub fn naive_bwt(buffer: &[u8]) -> Vec<u8> {
    naive_suffix_array(buffer)
        .into_iter()
        .map(|p| if p == 0 { buffer[buffer.len() - 1] } else { buffer[p - 1] })
        .collect()
}

/// Document index of every buffer offset.
pub fn document_of(buffer: &[u8]) -> Vec<usize> {
    let mut doc = 0;
    buffer
        .iter()
        .map(|&b| {
            let d = doc;
            if b == SEPARATOR {
                doc += 1;
            }
            d
        })
        .collect()
}
