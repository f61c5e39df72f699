// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type for the whole pipeline.
//!
//! Every error here is fatal for the run: the computation is a single batch pass,
//! and continuing past any of these would produce a structurally wrong index.
//! Validation mismatches are not errors; they live in [`crate::verify`] reports
//! unless a strict run asks for them with [`crate::build::BuildReport::require_valid`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a failure. The binary derives its exit status from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid settings or limits exceeded before processing starts.
    Configuration,
    /// The input collection does not match what the run expects.
    Data,
    /// An LCP value does not fit the requested gap width.
    Overflow,
    /// Reading input or writing an output artifact failed.
    Io,
    /// A strict run produced a chunk that failed validation.
    Validation,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid LCP width {width}: must be between 1 and 7 bytes per entry")]
    InvalidGapWidth { width: usize },

    #[error(
        "LCP width {width} exceeds the {index_bytes}-byte offset type; rebuild with the `index64` feature to use wider LCP entries"
    )]
    GapWidthExceedsIndex { width: usize, index_bytes: usize },

    #[error(
        "buffer of {len} symbols exceeds the addressable maximum of {max}; rebuild with the `index64` feature"
    )]
    BufferTooLarge { len: u64, max: u64 },

    #[error(
        "chunk capacity of {capacity} symbols exceeds the addressable maximum of {max}; lower the memory ceiling or rebuild with the `index64` feature"
    )]
    ChunkTooLarge { capacity: u64, max: u64 },

    #[error(
        "collection of {total} symbols exceeds the addressable maximum of {max}; rebuild with the `index64` feature"
    )]
    CollectionTooLarge { total: u64, max: u64 },

    #[error(
        "document {document} needs {len} symbols but a chunk holds at most {capacity}; raise the memory ceiling"
    )]
    DocumentTooLarge { document: usize, len: u64, capacity: u64 },

    #[error("memory ceiling of {ceiling} bytes cannot hold a single symbol")]
    CeilingTooSmall { ceiling: u64 },

    #[error("buffer must end with the separator byte 0 (the anchor terminator)")]
    MissingAnchor,

    #[error("document {document} contains byte 0, which is reserved as the separator")]
    SeparatorInDocument { document: usize },

    #[error("less than {requested} documents in {} (found {found})", path.display())]
    NotEnoughDocuments {
        path: PathBuf,
        requested: usize,
        found: usize,
    },

    #[error(
        "LCP entry {value} at index {index} is larger than {limit}; re-run with more bytes per LCP entry (width {width}) or a wider offset type"
    )]
    LcpOverflow {
        index: usize,
        value: u64,
        limit: u64,
        width: usize,
    },

    #[error("validation failed for {failed} chunk(s), first at chunk {first}")]
    ValidationFailed { failed: usize, first: usize },

    #[error("symbol {symbol:#04x} cannot be run-length encoded; RLE output supports the alphabet $ACGNT")]
    UnsupportedRleSymbol { symbol: u8 },

    #[error("unsupported input format for {}: expected .txt, .fasta/.fa or .fastq/.fq", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("malformed {format} record near line {line} of {}", path.display())]
    MalformedRecord {
        path: PathBuf,
        format: &'static str,
        line: usize,
    },

    #[error("invalid configuration file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),
}

/// Result type alias for gsais operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidGapWidth { .. }
            | Error::GapWidthExceedsIndex { .. }
            | Error::BufferTooLarge { .. }
            | Error::ChunkTooLarge { .. }
            | Error::CollectionTooLarge { .. }
            | Error::DocumentTooLarge { .. }
            | Error::CeilingTooSmall { .. }
            | Error::Config { .. } => ErrorKind::Configuration,
            Error::MissingAnchor
            | Error::SeparatorInDocument { .. }
            | Error::NotEnoughDocuments { .. }
            | Error::UnsupportedRleSymbol { .. }
            | Error::UnsupportedFormat { .. }
            | Error::MalformedRecord { .. } => ErrorKind::Data,
            Error::LcpOverflow { .. } => ErrorKind::Overflow,
            Error::ValidationFailed { .. } => ErrorKind::Validation,
            Error::Io { .. } | Error::Stream(_) => ErrorKind::Io,
        }
    }
}
