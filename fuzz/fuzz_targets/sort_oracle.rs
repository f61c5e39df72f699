// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target: the engine against brute-force sorting.
//!
//! Any byte string becomes a collection by splitting on 0 and terminating the
//! last document. SA and LCP must match the oracle exactly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use gsais::testing::{naive_lcp, naive_suffix_array};
use gsais::{sort, validate};

fuzz_target!(|data: &[u8]| {
    // Brute force is quadratic; keep inputs small
    if data.len() > 2048 {
        return;
    }
    let mut buffer = data.to_vec();
    if buffer.last() != Some(&0) {
        buffer.push(0);
    }

    let sorted = sort::<u32>(&buffer, true).expect("terminated buffer must sort");
    let sa: Vec<usize> = sorted.sa.iter().map(|&p| p as usize).collect();
    assert_eq!(sa, naive_suffix_array(&buffer), "SA differs from oracle");

    let lcp = sorted.lcp.as_deref().expect("LCP was requested");
    let lcp_usize: Vec<usize> = lcp.iter().map(|&v| v as usize).collect();
    assert_eq!(lcp_usize, naive_lcp(&buffer, &sorted.sa), "LCP differs from oracle");

    assert!(validate(&buffer, &sorted.sa, Some(lcp)).is_ok());
});
