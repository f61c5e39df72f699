// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Summary of the collection-wide artifacts of a finished run.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::binary::{read_fixed, GapWidth};
use crate::bwt::{BwtMode, RleUnit};
use crate::error::{Error, Result};

use super::config::artifact_path;

/// One BWT artifact found next to the size table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtArtifact {
    pub path: PathBuf,
    pub mode: BwtMode,
    pub bytes: u64,
    /// Decoded BWT symbols; equals `bytes` for plain output.
    pub symbols: u64,
}

/// One gap-LCP artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapArtifact {
    pub path: PathBuf,
    pub width: usize,
    pub entries: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub base: PathBuf,
    /// `len - 1` of every chunk, from `<base>.size`.
    pub chunk_sizes: Vec<u64>,
    pub bwt: Vec<BwtArtifact>,
    pub gap_lcp: Vec<GapArtifact>,
}

impl InspectReport {
    pub fn total(&self) -> u64 {
        self.chunk_sizes.iter().sum()
    }

    /// Every artifact holds exactly one entry per non-anchor suffix.
    pub fn is_consistent(&self) -> bool {
        let total = self.total();
        self.bwt.iter().all(|b| b.symbols == total) && self.gap_lcp.iter().all(|g| g.entries == total)
    }
}

/// Read `<base>.size` and measure whichever BWT and gap-LCP files exist.
pub fn inspect(base: &Path) -> Result<InspectReport> {
    let size_path = artifact_path(base, "size");
    let file = File::open(&size_path).map_err(|e| Error::io(&size_path, e))?;
    let chunk_sizes = read_fixed(&mut BufReader::new(file), 8).map_err(|e| Error::io(&size_path, e))?;

    let mut bwt = Vec::new();
    for mode in [BwtMode::Plain, BwtMode::Rle] {
        let Some(ext) = mode.extension() else { continue };
        let path = artifact_path(base, ext);
        if !path.exists() {
            continue;
        }
        let data = fs::read(&path).map_err(|e| Error::io(&path, e))?;
        let symbols = match mode {
            BwtMode::Rle => data
                .iter()
                .map(|&b| RleUnit::unpack(b).map_or(0, |u| u64::from(u.run)))
                .sum(),
            _ => data.len() as u64,
        };
        bwt.push(BwtArtifact {
            path,
            mode,
            bytes: data.len() as u64,
            symbols,
        });
    }

    let mut gap_lcp = Vec::new();
    for width in 1..=GapWidth::MAX {
        let path = artifact_path(base, &format!("{}.lcp", width));
        if let Ok(meta) = fs::metadata(&path) {
            gap_lcp.push(GapArtifact {
                path,
                width,
                entries: meta.len() / width as u64,
            });
        }
    }

    Ok(InspectReport {
        base: base.to_path_buf(),
        chunk_sizes,
        bwt,
        gap_lcp,
    })
}
