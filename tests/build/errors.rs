//! Fatal failures, each reported with the offending value.

use std::fs;

use crate::common::{write_fastq, write_text};
use gsais::build::{run, BuildConfig};
use gsais::{Error, ErrorKind, Offset, SaIndex};
use tempfile::TempDir;

#[test]
fn test_document_larger_than_capacity() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "x.txt", &["AC", "ACGTACGTACGT", "A"]);
    let config = BuildConfig {
        memory_ceiling: Some(5 * (<Offset as SaIndex>::BYTES as u64 + 1)),
        output: Some(dir.path().join("out")),
        ..Default::default()
    };
    match run(&input, &config) {
        Err(Error::DocumentTooLarge { document, len, capacity }) => {
            assert_eq!((document, len, capacity), (1, 13, 5));
        }
        other => panic!("unexpected: {:?}", other.map(|r| r.documents)),
    }
    // planning fails before any output is created
    assert!(!dir.path().join("out.0.sa").exists());
}

#[test]
fn test_ceiling_too_small() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "x.txt", &["A"]);
    for ceiling in [0, 1] {
        let config = BuildConfig {
            memory_ceiling: Some(ceiling),
            ..Default::default()
        };
        assert!(matches!(run(&input, &config), Err(Error::CeilingTooSmall { .. })));
    }
}

#[test]
fn test_gap_width_wider_than_offsets() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "x.txt", &["A"]);
    let config = BuildConfig {
        gap_lcp_width: Some(<Offset as SaIndex>::BYTES + 1),
        ..Default::default()
    };
    let err = run(&input, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_malformed_fastq_reports_line() {
    let dir = TempDir::new().unwrap();
    let input = write_fastq(dir.path(), "x.fq", &["ACGT"]);
    let mut body = fs::read_to_string(&input).unwrap();
    body.push_str("@broken\nACGT\n-\nIIII\n");
    fs::write(&input, body).unwrap();
    match run(&input, &BuildConfig::default()) {
        Err(Error::MalformedRecord { format, line, .. }) => {
            assert_eq!(format, "FASTQ");
            assert_eq!(line, 7);
        }
        other => panic!("unexpected: {:?}", other.map(|r| r.documents)),
    }
}

#[test]
fn test_too_few_documents() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "x.txt", &["A", "C"]);
    let config = BuildConfig {
        documents: Some(3),
        ..Default::default()
    };
    let err = run(&input, &config).unwrap_err();
    assert!(err.to_string().contains("less than 3 documents"));
}

#[test]
fn test_rle_rejects_text_alphabet() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "x.txt", &["hello"]);
    let config = BuildConfig {
        bwt: gsais::BwtMode::Rle,
        output: Some(dir.path().join("out")),
        ..Default::default()
    };
    assert!(matches!(run(&input, &config), Err(Error::UnsupportedRleSymbol { .. })));
}

#[test]
fn test_unknown_config_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "validate": true, "ceiling": 10 }"#).unwrap();
    let err = BuildConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_lcp_overflow_for_one_byte_gap() {
    let dir = TempDir::new().unwrap();
    let run_of_a = "A".repeat(300);
    let input = write_text(dir.path(), "x.txt", &["ACGT", &run_of_a]);
    let config = BuildConfig {
        gap_lcp_width: Some(1),
        output: Some(dir.path().join("out")),
        ..Default::default()
    };
    let err = run(&input, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
    match err {
        Error::LcpOverflow { value, limit, width, .. } => {
            // suffixes of the run sort shortest first, so LCPs climb by one
            assert_eq!((value, limit, width), (256, 255, 1));
        }
        other => panic!("unexpected: {:?}", other),
    }
    // the chunk is rejected before any gap entry is written
    let written = fs::metadata(dir.path().join("out.1.lcp")).map_or(0, |m| m.len());
    assert_eq!(written, 0);
}
