// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the collection readers.
//!
//! Garbage input may be rejected but must never panic, and a reader must stop
//! after its first error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use gsais::build::{DocumentReader, Format};

fuzz_target!(|data: &[u8]| {
    for format in [Format::Text, Format::Fasta, Format::Fastq] {
        let mut reader = DocumentReader::new(data, format, "fuzz");
        let mut failed = false;
        for doc in reader.by_ref() {
            assert!(!failed, "reader continued after an error");
            match doc {
                Ok(doc) => assert!(doc.len() <= data.len()),
                Err(_) => failed = true,
            }
        }
        assert!(reader.next().is_none());
    }
});
