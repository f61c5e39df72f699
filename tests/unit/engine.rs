//! Known suffix arrays and LCP arrays from the engine's public entry point.

use crate::common::{concat_documents, naive_lcp, naive_suffix_array, to_usize};
use gsais::{sort, validate, Error, SEPARATOR};

#[test]
fn test_banana() {
    let buffer = concat_documents(&["banana"]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    assert_eq!(sorted.sa, vec![6, 5, 3, 1, 0, 4, 2]);
    assert_eq!(sorted.sa[0] as usize, buffer.len() - 1);
    assert_eq!(sorted.lcp.unwrap(), vec![0, 0, 1, 3, 0, 0, 2]);
}

#[test]
fn test_separator_suffixes_sort_first() {
    let buffer = concat_documents(&["ab", "ba"]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    assert_eq!(sorted.sa[0], 5);
    // both separator suffixes precede every real-symbol suffix
    let leading: Vec<u32> = sorted.sa[..2].to_vec();
    assert!(leading.contains(&2) && leading.contains(&5));
    assert!(sorted.sa[2..].iter().all(|&p| buffer[p as usize] != SEPARATOR));
    assert_eq!(sorted.sa, vec![5, 2, 4, 0, 1, 3]);
}

#[test]
fn test_identical_documents_share_no_separator_prefix() {
    let buffer = concat_documents(&["abc", "abc", "abc"]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    let lcp = sorted.lcp.unwrap();
    // "abc\0" rows share exactly three symbols; separators never match
    let max = lcp.iter().copied().max().unwrap();
    assert_eq!(max, 3);
    assert_eq!(to_usize(&lcp), naive_lcp(&buffer, &sorted.sa));
}

#[test]
fn test_highly_repetitive_input() {
    let doc = "ab".repeat(200);
    let buffer = concat_documents(&[doc.as_str(), doc.as_str()]);
    let sorted = sort::<u64>(&buffer, true).unwrap();
    assert_eq!(to_usize(&sorted.sa), naive_suffix_array(&buffer));
    assert!(sorted.depth >= 1);
    assert!(validate(&buffer, &sorted.sa, sorted.lcp.as_deref()).is_ok());
}

#[test]
fn test_full_byte_alphabet() {
    let doc: Vec<u8> = (1..=255u8).rev().chain(1..=255u8).collect();
    let buffer = concat_documents(&[doc]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    assert_eq!(to_usize(&sorted.sa), naive_suffix_array(&buffer));
    assert_eq!(to_usize(&sorted.lcp.unwrap()), naive_lcp(&buffer, &sorted.sa));
}

#[test]
fn test_empty_documents() {
    let buffer = concat_documents(&["", "a", ""]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    assert_eq!(to_usize(&sorted.sa), naive_suffix_array(&buffer));
    assert!(sorted.lcp.unwrap().iter().all(|&v| v == 0));
}

#[test]
fn test_without_lcp() {
    let buffer = concat_documents(&["mississippi"]);
    let sorted = sort::<u32>(&buffer, false).unwrap();
    assert!(sorted.lcp.is_none());
    assert_eq!(sorted.sa, vec![11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
}

#[test]
fn test_unterminated_buffer_rejected() {
    let err = sort::<u32>(b"abc", false).unwrap_err();
    assert!(matches!(err, Error::MissingAnchor));
}

#[test]
fn test_long_periodic_document_lcp() {
    // Every LMS suffix of (AC)^k starts a long repeat of its neighbour
    let k = 500_000;
    let mut buffer = b"AC".repeat(k);
    buffer.push(SEPARATOR);
    let sorted = sort::<u32>(&buffer, true).unwrap();

    // "\0", then the A-suffixes shortest first, then the C-suffixes
    let mut sa = vec![2 * k];
    sa.extend((1..=k).map(|j| 2 * k - 2 * j));
    sa.extend((1..=k).map(|j| 2 * k - 2 * j + 1));
    let mut lcp = vec![0, 0];
    lcp.extend((2..=k).map(|j| 2 * (j - 1)));
    lcp.push(0);
    lcp.extend((2..=k).map(|j| 2 * j - 3));

    assert_eq!(to_usize(&sorted.sa), sa);
    assert_eq!(to_usize(&sorted.lcp.unwrap()), lcp);
}
