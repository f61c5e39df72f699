// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk layouts of the per-chunk artifacts.
//!
//! Every artifact is a bare little-endian stream without a header; the chunk
//! boundaries live in the `.size` side stream written by the orchestrator.
//!
//! ```text
//! <base>.<b>.sa       SA[0..len]                       offset width
//! <base>.<b>.sa_lcp   SA[0] LCP[0] SA[1] LCP[1] ...    offset width
//! <base>.<D>.lcp      LCP[1..len] per chunk, appended  D bytes (1..=7)
//! <base>.size         len - 1 per chunk                u64
//! ```

mod encoding;
mod gap;

pub use encoding::{
    decode_fixed, encode_fixed, read_fixed, read_sa, read_sa_lcp, write_sa, write_sa_lcp,
};
pub use gap::{read_gap_lcp, write_gap_lcp, GapWidth};
