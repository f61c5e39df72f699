// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Output artifacts of a run.
//!
//! Collection-wide streams (BWT, sizes, gap LCP) stay open for the whole run
//! and grow by one segment per chunk. SA files are per chunk and written in
//! one go.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::binary::{write_gap_lcp, write_sa, write_sa_lcp, GapWidth};
use crate::bwt::{write_bwt, BwtMode};
use crate::error::{Error, Result};
use crate::types::{SaIndex, SuffixSort};

use super::config::artifact_path;

/// A buffered output file that remembers its path for error reporting.
struct Sink {
    path: PathBuf,
    out: BufWriter<File>,
}

impl Sink {
    fn create(path: PathBuf) -> Result<Self> {
        let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
        Ok(Sink {
            path,
            out: BufWriter::new(file),
        })
    }

    fn finish(mut self) -> Result<PathBuf> {
        self.out.flush().map_err(|e| Error::io(&self.path, e))?;
        Ok(self.path)
    }
}

/// Bytes one chunk added to each artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkBytes {
    pub sa: u64,
    pub bwt: u64,
    pub gap_lcp: u64,
}

/// Open output streams of one run.
pub struct Artifacts {
    base: PathBuf,
    output_sa: bool,
    bwt: Option<(BwtMode, Sink, Sink)>,
    gap: Option<(GapWidth, Sink)>,
    written: Vec<PathBuf>,
}

impl Artifacts {
    /// Create the collection-wide streams the run asks for.
    pub fn open(base: &Path, output_sa: bool, bwt: BwtMode, gap: Option<GapWidth>) -> Result<Self> {
        let bwt = match bwt.extension() {
            Some(ext) => Some((
                bwt,
                Sink::create(artifact_path(base, ext))?,
                Sink::create(artifact_path(base, "size"))?,
            )),
            None => None,
        };
        let gap = match gap {
            Some(width) => Some((width, Sink::create(artifact_path(base, &width.extension()))?)),
            None => None,
        };
        Ok(Artifacts {
            base: base.to_path_buf(),
            output_sa,
            bwt,
            gap,
            written: Vec::new(),
        })
    }

    /// Path of the SA file of chunk `b`.
    pub fn sa_path(base: &Path, b: usize, with_lcp: bool) -> PathBuf {
        let ext = if with_lcp { "sa_lcp" } else { "sa" };
        artifact_path(base, &format!("{}.{}", b, ext))
    }

    /// Append chunk `b` to every requested artifact.
    pub fn write_chunk<I: SaIndex>(
        &mut self,
        b: usize,
        buffer: &[u8],
        sorted: &SuffixSort<I>,
    ) -> Result<ChunkBytes> {
        let mut bytes = ChunkBytes::default();

        if let Some((mode, bwt, size)) = self.bwt.as_mut() {
            bytes.bwt = write_bwt(&mut bwt.out, buffer, &sorted.sa, *mode)
                .map_err(|e| with_path(e, &bwt.path))?;
            let len1 = sorted.len().saturating_sub(1) as u64;
            size.out
                .write_all(&len1.to_le_bytes())
                .map_err(|e| Error::io(&size.path, e))?;
        }

        if self.output_sa {
            let path = Self::sa_path(&self.base, b, sorted.lcp.is_some());
            let mut sink = Sink::create(path)?;
            bytes.sa = match &sorted.lcp {
                Some(lcp) => write_sa_lcp(&mut sink.out, &sorted.sa, lcp),
                None => write_sa(&mut sink.out, &sorted.sa),
            }
            .map_err(|e| Error::io(&sink.path, e))?;
            self.written.push(sink.finish()?);
        }

        if let (Some((width, gap)), Some(lcp)) = (self.gap.as_mut(), &sorted.lcp) {
            bytes.gap_lcp =
                write_gap_lcp(&mut gap.out, lcp, *width).map_err(|e| with_path(e, &gap.path))?;
        }

        Ok(bytes)
    }

    /// Flush everything and return the paths of all artifacts.
    pub fn finish(mut self) -> Result<Vec<PathBuf>> {
        if let Some((_, bwt, size)) = self.bwt.take() {
            self.written.push(bwt.finish()?);
            self.written.push(size.finish()?);
        }
        if let Some((_, gap)) = self.gap.take() {
            self.written.push(gap.finish()?);
        }
        Ok(self.written)
    }
}

/// Raw extraction of the first K documents.
///
/// `<base>.<K>.cat` holds each document followed by byte 0; `<base>.<K>.cat.len`
/// holds each document's length plus one as a 4-byte little-endian integer.
pub struct Extractor {
    cat: Sink,
    len: Sink,
    documents: usize,
}

impl Extractor {
    pub fn open(base: &Path, k: usize) -> Result<Self> {
        Ok(Extractor {
            cat: Sink::create(artifact_path(base, &format!("{}.cat", k)))?,
            len: Sink::create(artifact_path(base, &format!("{}.cat.len", k)))?,
            documents: 0,
        })
    }

    pub fn write_document(&mut self, doc: &[u8]) -> Result<()> {
        let len = u32::try_from(doc.len() + 1).map_err(|_| Error::BufferTooLarge {
            len: doc.len() as u64 + 1,
            max: u64::from(u32::MAX),
        })?;
        self.len
            .out
            .write_all(&len.to_le_bytes())
            .map_err(|e| Error::io(&self.len.path, e))?;
        self.cat
            .out
            .write_all(doc)
            .and_then(|()| self.cat.out.write_all(&[0]))
            .map_err(|e| Error::io(&self.cat.path, e))?;
        self.documents += 1;
        Ok(())
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn finish(self) -> Result<Vec<PathBuf>> {
        Ok(vec![self.cat.finish()?, self.len.finish()?])
    }
}

/// Attach a path to bare stream errors.
fn with_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Stream(source) => Error::io(path, source),
        other => other,
    }
}
