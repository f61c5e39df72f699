//! Collection files on disk: the three formats and the chunk buffer.

use crate::common::{write_fasta, write_fastq, write_text, READS};
use gsais::build::{build_buffer, open_collection, scan_lengths, Format};
use gsais::Error;
use tempfile::TempDir;

fn expected_lengths() -> Vec<u64> {
    READS.iter().map(|r| r.len() as u64).collect()
}

#[test]
fn test_same_documents_in_every_format() {
    let dir = TempDir::new().unwrap();
    let paths = [
        write_text(dir.path(), "reads.txt", READS),
        write_fasta(dir.path(), "reads.fasta", READS, 3),
        write_fastq(dir.path(), "reads.fq", READS),
    ];
    for path in &paths {
        let docs: Vec<Vec<u8>> = open_collection(path).unwrap().collect::<Result<_, _>>().unwrap();
        let expected: Vec<Vec<u8>> = READS.iter().map(|r| r.as_bytes().to_vec()).collect();
        assert_eq!(docs, expected, "{}", path.display());
        assert_eq!(scan_lengths(path, None).unwrap(), expected_lengths());
    }
}

#[test]
fn test_scan_lengths_stops_at_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_text(dir.path(), "reads.txt", READS);
    assert_eq!(scan_lengths(&path, Some(2)).unwrap(), vec![8, 4]);
}

#[test]
fn test_format_detected_from_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_fastq(dir.path(), "reads.fastq", READS);
    assert_eq!(open_collection(&path).unwrap().format(), Format::Fastq);

    let other = dir.path().join("reads.bam");
    std::fs::write(&other, b"").unwrap();
    assert!(matches!(open_collection(&other), Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_missing_file_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.txt");
    match open_collection(&path) {
        Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_buffer_layout() {
    let buffer = build_buffer(&READS[..3]).unwrap();
    assert_eq!(buffer.len(), 8 + 1 + 4 + 1 + 8 + 1);
    assert_eq!(buffer.document_starts(), &[0, 9, 14]);
    assert_eq!(buffer.document(1), Some(&b"ACGT"[..]));
    assert_eq!(buffer.document_of(13), 1);
    assert_eq!(buffer.document_of(14), 2);
    assert_eq!(*buffer.as_bytes().last().unwrap(), gsais::SEPARATOR);
}

#[test]
fn test_buffer_rejects_embedded_separator() {
    let docs: [&[u8]; 2] = [b"ok", b"b\0ad"];
    assert!(matches!(build_buffer(&docs), Err(Error::SeparatorInDocument { document: 1 })));
}
