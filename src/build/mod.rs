// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunk orchestrator: the only part of the pipeline with cross-chunk state.
//!
//! ```text
//! Init ─▶ ┌ LoadChunk ─▶ BuildBuffer ─▶ Sort ─▶ {BWT, SA, gap LCP, validate} ─▶ Release ┐ ─▶ Finalize
//!         └──────────────────────────────── × chunks ─────────────────────────────────────┘
//! ```
//!
//! Chunk `b` is written and all of its memory dropped before chunk `b + 1` is
//! read, so peak memory is one chunk's footprint. Results are per chunk; there
//! is no merged suffix array.

pub mod buffer;
pub mod chunk;
pub mod config;
pub mod document;
pub mod inspect;
pub mod output;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::sais::sort;
use crate::types::{Offset, SaIndex, SuffixSort};
use crate::verify::{validate, ValidationReport};

pub use buffer::{build_buffer, Buffer};
pub use chunk::{footprint, max_len, ChunkPlan};
pub use config::{artifact_path, BuildConfig};
pub use document::{open_collection, scan_lengths, DocumentReader, Format};
pub use inspect::{inspect, BwtArtifact, GapArtifact, InspectReport};
pub use output::{Artifacts, ChunkBytes, Extractor};

/// Rows shown per chunk at trace level.
const TRACE_ROWS: usize = 20;

/// What happened to one chunk.
#[derive(Debug, Clone)]
pub struct ChunkReport {
    pub index: usize,
    /// `K[b]`.
    pub documents: usize,
    /// Buffer length, separators included.
    pub len: u64,
    /// Bytes of buffer plus offset arrays held while sorting.
    pub footprint: u64,
    /// Engine recursion depth; `None` in extract mode.
    pub depth: Option<usize>,
    pub validation: Option<ValidationReport>,
    pub bytes: ChunkBytes,
    pub sort_time: Duration,
    pub elapsed: Duration,
}

/// What happened to the whole run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub input: PathBuf,
    pub base: PathBuf,
    pub ceiling: u64,
    /// Most symbols one chunk may hold.
    pub capacity: u64,
    /// K: documents processed.
    pub documents: usize,
    /// N: total symbols plus one.
    pub symbols: u64,
    /// Offset width in bytes.
    pub index_bytes: usize,
    pub extract: bool,
    pub chunks: Vec<ChunkReport>,
    pub artifacts: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Every validated chunk passed. True when nothing was validated.
    pub fn is_valid(&self) -> bool {
        self.chunks
            .iter()
            .filter_map(|c| c.validation.as_ref())
            .all(ValidationReport::is_ok)
    }

    /// Indices of the chunks whose validation failed.
    pub fn failed_chunks(&self) -> Vec<usize> {
        self.chunks
            .iter()
            .filter(|c| c.validation.as_ref().is_some_and(|v| !v.is_ok()))
            .map(|c| c.index)
            .collect()
    }

    /// `Err` when any validated chunk failed; strict runs end on it.
    pub fn require_valid(&self) -> Result<()> {
        let failed = self.failed_chunks();
        match failed.first() {
            Some(&first) => Err(Error::ValidationFailed {
                failed: failed.len(),
                first,
            }),
            None => Ok(()),
        }
    }

    pub fn peak_footprint(&self) -> u64 {
        self.chunks.iter().map(|c| c.footprint).max().unwrap_or(0)
    }
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Scan `input`, plan chunks and process each one.
pub fn run(input: &Path, config: &BuildConfig) -> Result<BuildReport> {
    let started = Instant::now();
    let gap = config.check()?;
    let width = <Offset as SaIndex>::BYTES;
    let arrays = config.arrays();
    let ceiling = config.ceiling();

    let lengths = scan_lengths(input, config.documents)?;
    if let Some(requested) = config.documents {
        if lengths.len() < requested {
            return Err(Error::NotEnoughDocuments {
                path: input.to_path_buf(),
                requested,
                found: lengths.len(),
            });
        }
    }
    let plan = ChunkPlan::plan(&lengths, ceiling, width, arrays)?;
    drop(lengths);

    let base = config.output_base(input);
    info!(
        ceiling,
        capacity = plan.capacity,
        documents = plan.document_count(),
        symbols = plan.total_len() + 1,
        chunks = plan.chunk_count(),
        index_bytes = width,
        "planned run"
    );

    let mut report = BuildReport {
        input: input.to_path_buf(),
        base: base.clone(),
        ceiling,
        capacity: plan.capacity,
        documents: plan.document_count(),
        symbols: plan.total_len() + 1,
        index_bytes: width,
        extract: config.extract,
        chunks: Vec::with_capacity(plan.chunk_count()),
        artifacts: Vec::new(),
        elapsed: Duration::ZERO,
    };

    #[cfg(feature = "parallel")]
    let pb = if config.verbosity == 0 {
        ProgressBar::new(plan.chunk_count() as u64)
    } else {
        ProgressBar::hidden()
    };
    #[cfg(feature = "parallel")]
    {
        pb.set_style(create_progress_style());
        pb.set_prefix(if config.extract { "Extracting" } else { "Sorting" });
    }

    let mut reader = open_collection(input)?;

    if config.extract {
        let mut extractor = Extractor::open(&base, plan.document_count())?;
        for (b, (&k, &len)) in plan.documents.iter().zip(&plan.lengths).enumerate() {
            let chunk_started = Instant::now();
            for doc in load_chunk(&mut reader, input, k)? {
                extractor.write_document(&doc)?;
            }
            debug!(chunk = b, documents = k, len, "extracted chunk");
            report.chunks.push(ChunkReport {
                index: b,
                documents: k,
                len,
                footprint: len,
                depth: None,
                validation: None,
                bytes: ChunkBytes::default(),
                sort_time: Duration::ZERO,
                elapsed: chunk_started.elapsed(),
            });
            #[cfg(feature = "parallel")]
            pb.inc(1);
        }
        report.artifacts = extractor.finish()?;
    } else {
        let mut artifacts = Artifacts::open(&base, config.output_sa, config.bwt, gap)?;
        let mut first_document = 0;
        for (b, &k) in plan.documents.iter().enumerate() {
            let chunk = process_chunk(b, &mut reader, input, k, first_document, config, &mut artifacts)?;
            first_document += k;
            #[cfg(feature = "parallel")]
            {
                pb.set_message(format!("chunk {} ({} symbols)", b, chunk.len));
                pb.inc(1);
            }
            report.chunks.push(chunk);
        }
        report.artifacts = artifacts.finish()?;
    }

    #[cfg(feature = "parallel")]
    pb.finish_and_clear();

    report.elapsed = started.elapsed();
    info!(elapsed_ms = report.elapsed.as_millis() as u64, "run complete");
    Ok(report)
}

/// Read the next `k` documents, failing if the collection runs out.
fn load_chunk<R: std::io::BufRead>(
    reader: &mut DocumentReader<R>,
    input: &Path,
    k: usize,
) -> Result<Vec<Vec<u8>>> {
    let docs = reader.by_ref().take(k).collect::<Result<Vec<_>>>()?;
    if docs.len() < k {
        return Err(Error::NotEnoughDocuments {
            path: input.to_path_buf(),
            requested: k,
            found: docs.len(),
        });
    }
    Ok(docs)
}

/// Load, sort, emit and validate one chunk. Everything chunk-sized is dropped
/// on return.
fn process_chunk<R: std::io::BufRead>(
    b: usize,
    reader: &mut DocumentReader<R>,
    input: &Path,
    k: usize,
    first_document: usize,
    config: &BuildConfig,
    artifacts: &mut Artifacts,
) -> Result<ChunkReport> {
    let started = Instant::now();

    let docs = load_chunk(reader, input, k)?;
    let buffer = build_buffer(&docs).map_err(|e| match e {
        Error::SeparatorInDocument { document } => Error::SeparatorInDocument {
            document: first_document + document,
        },
        other => other,
    })?;
    drop(docs);
    let len = buffer.len() as u64;
    debug!(chunk = b, documents = k, len, "loaded chunk");

    let sort_started = Instant::now();
    let sorted: SuffixSort<Offset> = sort(buffer.as_bytes(), config.wants_lcp())?;
    let sort_time = sort_started.elapsed();
    debug!(
        chunk = b,
        depth = sorted.depth,
        sort_ms = sort_time.as_millis() as u64,
        "sorted chunk"
    );
    trace_rows(b, buffer.as_bytes(), &sorted);

    let validation = config.wants_validation().then(|| {
        let report = validate(buffer.as_bytes(), &sorted.sa, sorted.lcp.as_deref());
        for (check, ok) in report.verdicts() {
            info!(chunk = b, check, ok, "validation");
        }
        report
    });

    let bytes = artifacts.write_chunk(b, buffer.as_bytes(), &sorted)?;

    let arrays = if sorted.lcp.is_some() { 2 } else { 1 };
    Ok(ChunkReport {
        index: b,
        documents: k,
        len,
        footprint: footprint(len, <Offset as SaIndex>::BYTES, arrays),
        depth: Some(sorted.depth),
        validation,
        bytes,
        sort_time,
        elapsed: started.elapsed(),
    })
}

/// First rows of a sorted chunk at trace level.
fn trace_rows<I: SaIndex>(b: usize, buffer: &[u8], sorted: &SuffixSort<I>) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let rows = if sorted.lcp.is_some() { TRACE_ROWS } else { TRACE_ROWS / 2 };
    for (i, &pos) in sorted.sa.iter().take(rows).enumerate() {
        let start = pos.to_usize();
        let end = buffer[start..]
            .iter()
            .position(|&c| c == crate::types::SEPARATOR)
            .map_or(buffer.len(), |p| start + p);
        let suffix = String::from_utf8_lossy(&buffer[start..end.min(start + 40)]);
        let lcp = sorted.lcp.as_ref().map(|l| l[i].to_u64());
        trace!(chunk = b, row = i, sa = pos.to_u64(), lcp, suffix = %suffix, "row");
    }
}
