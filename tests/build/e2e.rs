//! End-to-end tests for the build workflow.

use std::fs::{self, File};
use std::io::BufReader;

use crate::common::{full_config, write_fasta, write_fastq, write_text, READS};
use gsais::binary::{read_fixed, read_gap_lcp, read_sa, read_sa_lcp, GapWidth};
use gsais::build::{artifact_path, inspect, run, Artifacts, BuildConfig};
use gsais::{BwtMode, Offset, SaIndex};
use tempfile::TempDir;

#[test]
fn test_banana_scenario() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "banana.txt", &["banana"]);
    let base = dir.path().join("banana");
    let report = run(&input, &full_config(&base)).unwrap();

    assert_eq!(report.documents, 1);
    assert_eq!(report.symbols, 8);
    assert!(report.is_valid());

    let file = File::open(Artifacts::sa_path(&base, 0, true)).unwrap();
    let (sa, lcp) = read_sa_lcp::<Offset, _>(&mut BufReader::new(file)).unwrap();
    let sa: Vec<u64> = sa.iter().map(|p| p.to_u64()).collect();
    let lcp: Vec<u64> = lcp.iter().map(|p| p.to_u64()).collect();
    assert_eq!(sa, vec![6, 5, 3, 1, 0, 4, 2]);
    assert_eq!(lcp, vec![0, 0, 1, 3, 0, 0, 2]);

    assert_eq!(fs::read(artifact_path(&base, "bwt")).unwrap(), b"nnb\0aa");
    let sizes = read_fixed(&mut File::open(artifact_path(&base, "size")).unwrap(), 8).unwrap();
    assert_eq!(sizes, vec![6]);
}

#[test]
fn test_default_base_is_input_path() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "two.txt", &["ab", "ba"]);
    let config = BuildConfig {
        output_sa: true,
        ..Default::default()
    };
    let report = run(&input, &config).unwrap();
    assert_eq!(report.base, input);

    let sa_path = Artifacts::sa_path(&input, 0, false);
    assert!(sa_path.ends_with("two.txt.0.sa"));
    let sa: Vec<Offset> = read_sa(&mut File::open(sa_path).unwrap()).unwrap();
    let sa: Vec<u64> = sa.iter().map(|p| p.to_u64()).collect();
    assert_eq!(sa, vec![5, 2, 4, 0, 1, 3]);
    assert_eq!(report.artifacts.len(), 1);
}

#[test]
fn test_rle_and_gap_on_fastq() {
    let dir = TempDir::new().unwrap();
    let input = write_fastq(dir.path(), "reads.fq", READS);
    let base = dir.path().join("reads");
    let config = BuildConfig {
        bwt: BwtMode::Rle,
        gap_lcp_width: Some(1),
        memory_ceiling: Some(20 * (2 * <Offset as SaIndex>::BYTES as u64 + 1)),
        output: Some(base.clone()),
        validate: true,
        ..Default::default()
    };
    let report = run(&input, &config).unwrap();
    assert!(report.chunk_count() > 1);
    assert!(report.is_valid());

    let symbols: u64 = READS.iter().map(|r| r.len() as u64).sum::<u64>() + READS.len() as u64;
    let summary = inspect(&base).unwrap();
    assert_eq!(summary.chunk_sizes.len(), report.chunk_count());
    // one BWT symbol and one gap entry per non-anchor row of every chunk
    assert_eq!(summary.total(), symbols - report.chunk_count() as u64);
    assert_eq!(summary.bwt.len(), 1);
    assert_eq!(summary.bwt[0].mode, BwtMode::Rle);
    assert_eq!(summary.gap_lcp.len(), 1);
    assert!(summary.is_consistent());

    let gap = read_gap_lcp(
        &mut File::open(artifact_path(&base, "1.lcp")).unwrap(),
        GapWidth::new(1).unwrap(),
    )
    .unwrap();
    assert_eq!(gap.len() as u64, summary.total());
}

#[test]
fn test_fasta_first_k_documents() {
    let dir = TempDir::new().unwrap();
    let input = write_fasta(dir.path(), "genome.fasta", READS, 4);
    let base = dir.path().join("genome");
    let config = BuildConfig {
        documents: Some(2),
        bwt: BwtMode::Plain,
        output: Some(base.clone()),
        ..Default::default()
    };
    let report = run(&input, &config).unwrap();
    assert_eq!(report.documents, 2);
    assert_eq!(report.symbols, (8 + 1) + (4 + 1) + 1);
    assert_eq!(fs::read(artifact_path(&base, "bwt")).unwrap().len(), 13);
}

#[test]
fn test_extract_writes_raw_documents() {
    let dir = TempDir::new().unwrap();
    let input = write_fastq(dir.path(), "reads.fastq", READS);
    let base = dir.path().join("reads");
    let config = BuildConfig {
        extract: true,
        documents: Some(3),
        output: Some(base.clone()),
        ..Default::default()
    };
    let report = run(&input, &config).unwrap();
    assert!(report.extract);
    assert_eq!(report.artifacts.len(), 2);

    let cat = fs::read(artifact_path(&base, "3.cat")).unwrap();
    assert_eq!(cat, b"ACGTACGT\0ACGT\0TTGACGTA\0");
    let lens = read_fixed(&mut File::open(artifact_path(&base, "3.cat.len")).unwrap(), 4).unwrap();
    assert_eq!(lens, vec![9, 5, 9]);
}

#[test]
fn test_config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "x.txt", &["GATTACA", "TACA"]);
    let config_path = dir.path().join("gsais.json");
    fs::write(
        &config_path,
        r#"{ "validate": true, "bwt": "plain", "gap_lcp_width": 2, "output": "OUT" }"#
            .replace("OUT", &dir.path().join("run").display().to_string()),
    )
    .unwrap();
    let config = BuildConfig::from_file(&config_path).unwrap();
    let report = run(&input, &config).unwrap();
    assert!(report.is_valid());
    assert!(dir.path().join("run.bwt").exists());
    assert!(dir.path().join("run.2.lcp").exists());
    assert!(dir.path().join("run.size").exists());
}
