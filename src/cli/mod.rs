// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the gsais command-line interface.
//!
//! Three subcommands: `build` sorts a collection chunk by chunk and writes the
//! requested artifacts, `extract` dumps the first K documents in raw
//! concatenated form, and `inspect` summarizes the artifacts of a finished run.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gsais::build::BuildConfig;
use gsais::bwt::BwtMode;

#[derive(Parser)]
#[command(
    name = "gsais",
    about = "Generalized suffix array, LCP and BWT construction for string collections",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute SA (and optionally LCP and BWT) for the first K documents
    Build(BuildArgs),

    /// Write the first K documents as a raw concatenation (.K.cat, .K.cat.len)
    Extract {
        /// Collection file (.txt, .fasta/.fa, .fastq/.fq)
        file: PathBuf,

        /// Number of documents; all when omitted
        k: Option<usize>,

        /// Output base name (default: the input path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Increase diagnostic detail (repeatable)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },

    /// Summarize the .size, BWT and gap-LCP artifacts under a base name
    Inspect {
        /// Output base name used by the build
        base: PathBuf,
    },
}

#[derive(Args)]
pub struct BuildArgs {
    /// Collection file (.txt, .fasta/.fa, .fastq/.fq)
    pub file: PathBuf,

    /// Number of documents; all when omitted
    pub k: Option<usize>,

    /// Check every chunk: order, permutation, anchor and LCP
    #[arg(short = 'c', long)]
    pub validate: bool,

    /// Fail with a non-zero exit status when a chunk does not validate; implies -c
    #[arg(long)]
    pub strict: bool,

    /// Write SA per chunk (.b.sa, or .b.sa_lcp with LCP)
    #[arg(short = 's', long = "output-sa")]
    pub output_sa: bool,

    /// Compute the LCP array
    #[arg(short = 'l', long)]
    pub lcp: bool,

    /// Write the BWT (.bwt)
    #[arg(short = 'b', long, conflicts_with = "rle")]
    pub bwt: bool,

    /// Write the run-length encoded BWT (.rle.bwt)
    #[arg(short = 'r', long)]
    pub rle: bool,

    /// Write gap-encoded LCP with D bytes per entry (.D.lcp); implies -l
    #[arg(short = 'g', long = "gap", value_name = "D")]
    pub gap: Option<usize>,

    /// Memory ceiling in MB
    #[arg(short = 'm', long = "memory", value_name = "MB")]
    pub memory_mb: Option<u64>,

    /// Output base name (default: the input path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase diagnostic detail (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

const MB: u64 = 1 << 20;

impl BuildArgs {
    /// Layer the flags over `base` (defaults or a config file).
    pub fn apply(&self, mut config: BuildConfig) -> BuildConfig {
        config.validate |= self.validate;
        config.strict |= self.strict;
        config.output_sa |= self.output_sa;
        config.compute_lcp |= self.lcp;
        if self.rle {
            config.bwt = BwtMode::Rle;
        } else if self.bwt {
            config.bwt = BwtMode::Plain;
        }
        if let Some(width) = self.gap {
            // 0 turns gap output off, as if the flag were absent
            config.gap_lcp_width = (width != 0).then_some(width);
        }
        if let Some(mb) = self.memory_mb {
            config.memory_ceiling = Some(mb.saturating_mul(MB));
        }
        if self.output.is_some() {
            config.output = self.output.clone();
        }
        if self.k.is_some() {
            config.documents = self.k;
        }
        config.verbosity = config.verbosity.max(self.verbose);
        config
    }
}
