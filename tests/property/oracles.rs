//! Engine against brute force, for both offset widths.

use crate::common::{concat_documents, naive_lcp, naive_suffix_array, to_usize};
use gsais::verify::{check_anchor, check_generalized_order, check_lcp, check_permutation, check_sorted};
use gsais::{sort, SaIndex};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Documents over a small alphabet, empty ones included.
fn dna_collection() -> impl Strategy<Value = Vec<Vec<u8>>> {
    let doc = prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), 0..40);
    prop::collection::vec(doc, 1..8)
}

/// Periodic documents: one seed repeated, which drives the reduction deep.
fn periodic_collection() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (prop::collection::vec(1u8..=4, 1..5), 2usize..30, 1usize..4)
        .prop_map(|(seed, reps, docs)| vec![seed.repeat(reps); docs])
}

/// Arbitrary non-zero bytes.
fn byte_collection() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(1u8..=255, 0..30), 1..5)
}

fn check_against_oracles<I: SaIndex>(docs: &[Vec<u8>]) -> Result<(), TestCaseError> {
    let buffer = concat_documents(docs);
    let sorted = sort::<I>(&buffer, true).unwrap();
    let lcp = sorted.lcp.as_deref().unwrap();

    prop_assert_eq!(to_usize(&sorted.sa), naive_suffix_array(&buffer));
    prop_assert_eq!(to_usize(lcp), naive_lcp(&buffer, &sorted.sa));
    prop_assert!(check_permutation(&sorted.sa, buffer.len()));
    prop_assert!(check_anchor(&buffer, &sorted.sa));
    prop_assert!(check_sorted(&buffer, &sorted.sa));
    prop_assert!(check_generalized_order(&buffer, &sorted.sa));
    prop_assert!(check_lcp(&buffer, &sorted.sa, lcp).is_ok());
    Ok(())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_dna_u32(docs in dna_collection()) {
        check_against_oracles::<u32>(&docs)?;
    }

    #[test]
    fn prop_dna_u64(docs in dna_collection()) {
        check_against_oracles::<u64>(&docs)?;
    }

    #[test]
    fn prop_periodic(docs in periodic_collection()) {
        check_against_oracles::<u32>(&docs)?;
    }

    #[test]
    fn prop_bytes(docs in byte_collection()) {
        check_against_oracles::<u32>(&docs)?;
    }

    /// Offset width changes storage only.
    #[test]
    fn prop_widths_agree(docs in dna_collection()) {
        let buffer = concat_documents(&docs);
        let narrow = sort::<u32>(&buffer, true).unwrap();
        let wide = sort::<u64>(&buffer, true).unwrap();
        prop_assert_eq!(to_usize(&narrow.sa), to_usize(&wide.sa));
        prop_assert_eq!(to_usize(&narrow.lcp.unwrap()), to_usize(&wide.lcp.unwrap()));
        prop_assert_eq!(narrow.depth, wide.depth);
    }

    /// Swapping two adjacent rows breaks the whole-buffer order check.
    #[test]
    fn prop_validator_rejects_swaps(docs in dna_collection(), at in any::<prop::sample::Index>()) {
        let buffer = concat_documents(&docs);
        prop_assume!(buffer.len() >= 3);
        let sorted = sort::<u32>(&buffer, false).unwrap();
        let mut sa = sorted.sa.clone();
        // rows 1.. only, so the anchor stays in place
        let i = 1 + at.index(sa.len() - 2);
        sa.swap(i, i + 1);
        prop_assert!(!check_generalized_order(&buffer, &sa));
        prop_assert!(check_permutation(&sa, buffer.len()));
    }
}
