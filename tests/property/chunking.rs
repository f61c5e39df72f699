//! Whole runs under different ceilings.

use std::fs::{self, File};
use std::io::BufReader;

use crate::common::{naive_bwt, project, to_usize};
use gsais::binary::read_sa_lcp;
use gsais::build::{self, artifact_path, build_buffer, footprint, Artifacts, BuildConfig, ChunkPlan};
use gsais::{sort, BwtMode, Offset, SaIndex};
use proptest::prelude::*;
use tempfile::TempDir;

/// Bytes per symbol with SA and LCP held.
fn per_symbol() -> u64 {
    (2 * <Offset as SaIndex>::BYTES + 1) as u64
}

fn collection() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ACGT]{0,12}", 1..12)
}

/// Run with SA+LCP and BWT output at `capacity` symbols per chunk and return
/// the per-document SA projections plus the concatenated BWT.
fn run_at(docs: &[String], capacity: u64) -> (Vec<Vec<usize>>, Vec<u8>, build::BuildReport) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("docs.txt");
    fs::write(&input, docs.iter().map(|d| format!("{}\n", d)).collect::<String>()).unwrap();
    let base = dir.path().join("out");
    let config = BuildConfig {
        validate: true,
        compute_lcp: true,
        output_sa: true,
        bwt: BwtMode::Plain,
        memory_ceiling: Some(capacity * per_symbol()),
        output: Some(base.clone()),
        ..Default::default()
    };
    let report = build::run(&input, &config).unwrap();

    let mut projections = Vec::new();
    let mut next = 0;
    for chunk in &report.chunks {
        let members = &docs[next..next + chunk.documents];
        next += chunk.documents;
        let buffer = build_buffer(members).unwrap();
        let file = File::open(Artifacts::sa_path(&base, chunk.index, true)).unwrap();
        let (sa, _lcp) = read_sa_lcp::<Offset, _>(&mut BufReader::new(file)).unwrap();
        for d in 0..members.len() {
            projections.push(project(buffer.as_bytes(), &sa, d));
        }
    }
    let bwt = fs::read(artifact_path(&base, "bwt")).unwrap();
    (projections, bwt, report)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Per-document suffix order does not depend on chunk boundaries.
    #[test]
    fn prop_chunk_independence(docs in collection(), small in 13u64..40) {
        let (whole, _, whole_report) = run_at(&docs, 1 << 12);
        let (split, _, split_report) = run_at(&docs, small);
        prop_assert_eq!(whole_report.chunk_count(), 1);
        prop_assert_eq!(whole_report.documents, split_report.documents);
        prop_assert_eq!(whole, split);
        prop_assert!(split_report.is_valid());
    }

    /// Every chunk fits the ceiling and documents are neither lost nor split.
    #[test]
    fn prop_memory_bound(docs in collection(), small in 13u64..40) {
        let ceiling = small * per_symbol();
        let (_, _, report) = run_at(&docs, small);
        prop_assert!(report.peak_footprint() <= ceiling);
        prop_assert_eq!(report.chunks.iter().map(|c| c.documents).sum::<usize>(), docs.len());
        let symbols: u64 = docs.iter().map(|d| d.len() as u64 + 1).sum();
        prop_assert_eq!(report.chunks.iter().map(|c| c.len).sum::<u64>(), symbols);
    }

    /// The BWT stream is the per-chunk BWTs back to back, anchor rows dropped.
    #[test]
    fn prop_bwt_per_chunk(docs in collection(), small in 13u64..40) {
        let (_, bwt, report) = run_at(&docs, small);
        let mut expected = Vec::new();
        let mut next = 0;
        for chunk in &report.chunks {
            let buffer = build_buffer(&docs[next..next + chunk.documents]).unwrap();
            next += chunk.documents;
            expected.extend_from_slice(&naive_bwt(buffer.as_bytes())[1..]);
        }
        prop_assert_eq!(bwt, expected);
    }

    /// Greedy plans never exceed capacity and keep document order.
    #[test]
    fn prop_plan_respects_capacity(
        lengths in prop::collection::vec(0u64..50, 0..40),
        extra in 0u64..100,
    ) {
        let capacity = lengths.iter().max().copied().unwrap_or(0) + 1 + extra;
        let plan = ChunkPlan::partition(&lengths, capacity).unwrap();
        prop_assert!(plan.lengths.iter().all(|&len| len <= capacity));
        prop_assert_eq!(plan.document_count(), lengths.len());
        let mut next = 0;
        for (&k, &len) in plan.documents.iter().zip(&plan.lengths) {
            prop_assert!(k > 0);
            let sum: u64 = lengths[next..next + k].iter().map(|l| l + 1).sum();
            prop_assert_eq!(sum, len);
            next += k;
        }
    }
}

#[test]
fn test_single_document_chunks_match_standalone_sort() {
    let docs: Vec<String> = ["GATTACA", "ACGTACGTACGT", "TTTT"].iter().map(|s| s.to_string()).collect();
    // capacity of exactly the longest document plus its separator
    let (projections, _, report) = run_at(&docs, 13);
    assert_eq!(report.chunk_count(), 3);
    for (doc, projection) in docs.iter().zip(&projections) {
        let buffer = build_buffer(&[doc]).unwrap();
        let alone = sort::<u32>(buffer.as_bytes(), false).unwrap();
        assert_eq!(&to_usize(&alone.sa), projection);
    }
    assert_eq!(report.peak_footprint(), footprint(13, <Offset as SaIndex>::BYTES, 2));
}
