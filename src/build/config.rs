// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! Built from command-line flags, optionally layered over a JSON file:
//!
//! ```json
//! { "validate": true, "compute_lcp": true, "memory_ceiling": 67108864,
//!   "bwt": "rle", "gap_lcp_width": 2 }
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::binary::GapWidth;
use crate::bwt::BwtMode;
use crate::error::{Error, Result};
use crate::types::default_memory_ceiling;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Run the validator on every chunk.
    pub validate: bool,
    /// Turn a failed validation into an error; implies `validate`.
    pub strict: bool,
    /// Derive the LCP array alongside the SA.
    pub compute_lcp: bool,
    /// Memory ceiling in bytes; the largest signed offset when unset.
    pub memory_ceiling: Option<u64>,
    /// Write `<base>.<b>.sa` / `.sa_lcp` per chunk.
    pub output_sa: bool,
    pub bwt: BwtMode,
    /// Bytes per gap-LCP entry; implies `compute_lcp`.
    pub gap_lcp_width: Option<usize>,
    pub verbosity: u8,
    /// Number of leading documents to process (K); all when unset.
    pub documents: Option<usize>,
    /// Output base name; the input path when unset.
    pub output: Option<PathBuf>,
    /// Write the raw `.cat` / `.cat.len` extraction and stop.
    pub extract: bool,
}

impl BuildConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate settings that do not depend on the input. Returns the gap
    /// width when gap LCP output is on.
    pub fn check(&self) -> Result<Option<GapWidth>> {
        if let Some(ceiling) = self.memory_ceiling {
            if ceiling == 0 {
                return Err(Error::CeilingTooSmall { ceiling });
            }
        }
        self.gap_lcp_width.map(GapWidth::new).transpose()
    }

    pub fn wants_validation(&self) -> bool {
        self.validate || self.strict
    }

    pub fn wants_lcp(&self) -> bool {
        self.compute_lcp || self.gap_lcp_width.is_some()
    }

    /// Offset arrays held per chunk: SA, plus LCP when requested.
    pub fn arrays(&self) -> usize {
        if self.wants_lcp() {
            2
        } else {
            1
        }
    }

    pub fn ceiling(&self) -> u64 {
        self.memory_ceiling.unwrap_or_else(default_memory_ceiling)
    }

    /// Base name every artifact path is derived from.
    pub fn output_base(&self, input: &Path) -> PathBuf {
        self.output.clone().unwrap_or_else(|| input.to_path_buf())
    }
}

/// `<base>.<suffix>`, appended to the full base name.
pub fn artifact_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
