// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for gap-LCP serialization.
//!
//! Values that fit must round-trip; a value that does not fit must fail the
//! whole write with nothing emitted.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use gsais::binary::{read_gap_lcp, write_gap_lcp, GapWidth};
use gsais::Error;

#[derive(Arbitrary, Debug)]
struct Input {
    width: u8,
    lcp: Vec<u32>,
}

fuzz_target!(|input: Input| {
    let Ok(width) = GapWidth::new(usize::from(input.width % 5)) else {
        return;
    };
    let mut out = Vec::new();
    match write_gap_lcp(&mut out, &input.lcp, width) {
        Ok(written) => {
            assert_eq!(written as usize, out.len());
            let back = read_gap_lcp(&mut out.as_slice(), width).expect("own output must decode");
            let expected: Vec<u64> = input.lcp.iter().skip(1).map(|&v| u64::from(v)).collect();
            assert_eq!(back, expected);
        }
        Err(Error::LcpOverflow { value, limit, .. }) => {
            assert!(value > limit);
            assert!(out.is_empty(), "overflow must not leave partial output");
        }
        Err(e) => panic!("unexpected error: {}", e),
    }
});
