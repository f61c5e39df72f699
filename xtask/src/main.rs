//! Custom cargo commands for gsais.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (default features only)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask sample N  - Write N random reads to target/sample/reads.fq

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("sample") => {
            let reads = match args.next() {
                Some(n) => n.parse().with_context(|| format!("invalid read count {:?}", n))?,
                None => 10_000,
            };
            sample(reads)?;
        }
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (both offset widths, serial build, clippy)
  test      Run all Rust tests
  check     Quick check (cargo check + test + clippy, default features)
  bench     Run benchmarks
  sample N  Write N random 100-symbol reads to target/sample/reads.fq
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("gsais Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Running tests (32-bit offsets)...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ Tests passed\n");

    println!("[2/4] Running tests (64-bit offsets)...");
    run_cargo(&["test", "--quiet", "--features", "index64"])?;
    println!("✓ Tests passed\n");

    println!("[3/4] Running tests (serial, no progress bar)...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Tests passed\n");

    println!("[4/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Random FASTQ input for manual runs: `reads` records of 100 symbols.
fn sample(reads: usize) -> Result<()> {
    let dir = project_root()?.join("target/sample");
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    // xorshift; reproducible without a dependency
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut body = String::with_capacity(reads * 220);
    for i in 0..reads {
        let mut read = String::with_capacity(100);
        for _ in 0..100 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            read.push(b"ACGT"[(state % 4) as usize] as char);
        }
        let _ = write!(body, "@read{}\n{}\n+\n{}\n", i, read, "I".repeat(100));
    }

    let path = dir.join("reads.fq");
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {} reads to {}", reads, path.display());
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
