//! Generalized suffix array, LCP and BWT construction for string collections.
//!
//! Documents are concatenated into one buffer, each followed by a `0`
//! separator, and sorted with an induced-sorting engine that computes the LCP
//! array alongside. Collections larger than a memory ceiling are split into
//! chunks of whole documents and sorted one at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ build::      │────▶│  sais        │────▶│  bwt, binary │
//! │ document,    │     │ (sort, LCP   │     │ (BWT / RLE,  │
//! │ chunk,buffer │     │  induction)  │     │  SA, gap LCP)│
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                    │                    │
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      verify                          │
//! │  (order, permutation, anchor, Φ-based LCP check)     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use gsais::testing::concat_documents;
//!
//! let buffer = concat_documents(&["ab", "ba"]);
//! let sorted = gsais::sort::<u32>(&buffer, true).unwrap();
//! assert_eq!(sorted.sa, vec![5, 2, 4, 0, 1, 3]);
//! assert_eq!(sorted.lcp.unwrap(), vec![0, 0, 0, 1, 0, 1]);
//! ```

pub mod binary;
pub mod build;
pub mod bwt;
pub mod error;
mod sais;
pub mod testing;
pub mod types;
mod utils;
pub mod verify;

pub use bwt::{bwt, runs, write_bwt, BwtMode, RleUnit, MAX_RUN};
pub use error::{Error, ErrorKind, Result};
pub use sais::sort;
pub use types::{default_memory_ceiling, Offset, SaIndex, SuffixSort, SEPARATOR};
pub use utils::{compare_segments, segment_lcp};
pub use verify::{validate, ValidationReport};
