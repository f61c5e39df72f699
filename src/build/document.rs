// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Collection readers: one document at a time, format chosen by extension.
//!
//! | Extension          | Document                                      |
//! |--------------------|-----------------------------------------------|
//! | `.txt`             | one line, line terminator removed             |
//! | `.fasta` / `.fa`   | sequence lines of one `>` record, joined      |
//! | `.fastq` / `.fq`   | second line of each 4-line `@` record         |

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Input collection format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Fasta,
    Fastq,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") => Ok(Format::Text),
            Some("fasta") | Some("fa") => Ok(Format::Fasta),
            Some("fastq") | Some("fq") => Ok(Format::Fastq),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Fasta => "FASTA",
            Format::Fastq => "FASTQ",
        }
    }
}

/// Streaming document reader over any buffered source.
pub struct DocumentReader<R> {
    reader: R,
    format: Format,
    path: PathBuf,
    line: usize,
    /// FASTA header already consumed while reading the previous record.
    pending_header: bool,
    done: bool,
}

/// Open a collection file, picking the parser from its extension.
pub fn open_collection(path: &Path) -> Result<DocumentReader<BufReader<File>>> {
    let format = Format::from_path(path)?;
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(DocumentReader::new(BufReader::new(file), format, path))
}

/// Byte length of each of the first `limit` documents (all when `None`).
pub fn scan_lengths(path: &Path, limit: Option<usize>) -> Result<Vec<u64>> {
    let reader = open_collection(path)?;
    let mut lengths = Vec::new();
    for doc in reader.take(limit.unwrap_or(usize::MAX)) {
        lengths.push(doc?.len() as u64);
    }
    Ok(lengths)
}

impl<R: BufRead> DocumentReader<R> {
    pub fn new(reader: R, format: Format, path: impl Into<PathBuf>) -> Self {
        DocumentReader {
            reader,
            format,
            path: path.into(),
            line: 0,
            pending_header: false,
            done: false,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::io(&self.path, e))?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn malformed(&self) -> Error {
        Error::MalformedRecord {
            path: self.path.clone(),
            format: self.format.name(),
            line: self.line,
        }
    }

    fn next_text(&mut self) -> Result<Option<Vec<u8>>> {
        self.read_line()
    }

    fn next_fasta(&mut self) -> Result<Option<Vec<u8>>> {
        if !self.pending_header {
            // Skip blank lines up to the first header
            loop {
                match self.read_line()? {
                    None => return Ok(None),
                    Some(line) if line.is_empty() => continue,
                    Some(line) if line.starts_with(b">") => break,
                    Some(_) => return Err(self.malformed()),
                }
            }
        }
        self.pending_header = false;

        let mut sequence = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.starts_with(b">") {
                self.pending_header = true;
                break;
            }
            sequence.extend_from_slice(&line);
        }
        Ok(Some(sequence))
    }

    fn next_fastq(&mut self) -> Result<Option<Vec<u8>>> {
        let header = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
            }
        };
        if !header.starts_with(b"@") {
            return Err(self.malformed());
        }
        let sequence = self.read_line()?.ok_or_else(|| self.malformed())?;
        let plus = self.read_line()?.ok_or_else(|| self.malformed())?;
        if !plus.starts_with(b"+") {
            return Err(self.malformed());
        }
        let quality = self.read_line()?.ok_or_else(|| self.malformed())?;
        if quality.len() != sequence.len() {
            return Err(self.malformed());
        }
        Ok(Some(sequence))
    }
}

impl<R: BufRead> Iterator for DocumentReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = match self.format {
            Format::Text => self.next_text(),
            Format::Fasta => self.next_fasta(),
            Format::Fastq => self.next_fastq(),
        };
        match next {
            Ok(Some(doc)) => Some(Ok(doc)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
