//! Gap LCP, RLE BWT and SA file encodings.

use std::io::Cursor;

use crate::common::concat_documents;
use gsais::binary::{read_gap_lcp, read_sa, read_sa_lcp, write_gap_lcp, write_sa, write_sa_lcp, GapWidth};
use gsais::{runs, sort, write_bwt, BwtMode, Error, RleUnit, MAX_RUN};

#[test]
fn test_gap_width_one_overflow() {
    let lcp: Vec<u32> = vec![0, 12, 300, 4];
    let mut out = Vec::new();
    let err = write_gap_lcp(&mut out, &lcp, GapWidth::new(1).unwrap()).unwrap_err();
    match err {
        Error::LcpOverflow { index, value, limit, width } => {
            assert_eq!((index, value, limit, width), (2, 300, 255, 1));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    // no truncated 255/44 bytes reach the stream
    assert!(out.is_empty());
}

#[test]
fn test_gap_width_two_round_trip() {
    let lcp: Vec<u32> = vec![0, 300, 65535, 0, 7];
    let width = GapWidth::new(2).unwrap();
    let mut out = Vec::new();
    assert_eq!(write_gap_lcp(&mut out, &lcp, width).unwrap(), 8);
    let back = read_gap_lcp(&mut Cursor::new(out), width).unwrap();
    assert_eq!(back, vec![300, 65535, 0, 7]);
}

#[test]
fn test_gap_from_engine_output() {
    let buffer = concat_documents(&["GATTACAGATTACA", "TACA"]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    let lcp = sorted.lcp.unwrap();
    let width = GapWidth::new(1).unwrap();
    let mut out = Vec::new();
    write_gap_lcp(&mut out, &lcp, width).unwrap();
    let back = read_gap_lcp(&mut Cursor::new(out), width).unwrap();
    let expected: Vec<u64> = lcp[1..].iter().map(|&v| u64::from(v)).collect();
    assert_eq!(back, expected);
}

#[test]
fn test_rle_splits_long_runs() {
    let units: Vec<RleUnit> = runs(std::iter::repeat(b'A').take(40)).collect();
    assert_eq!(
        units,
        vec![
            RleUnit { symbol: b'A', run: MAX_RUN },
            RleUnit { symbol: b'A', run: 8 },
        ]
    );
    let packed: Vec<u8> = units.iter().map(|u| u.pack().unwrap()).collect();
    assert_eq!(packed, vec![(31 << 3) | 1, (7 << 3) | 1]);
}

#[test]
fn test_rle_rejects_non_nucleotide() {
    let buffer = concat_documents(&["hello"]);
    let sorted = sort::<u32>(&buffer, false).unwrap();
    let mut out = Vec::new();
    let err = write_bwt(&mut out, &buffer, &sorted.sa, BwtMode::Rle).unwrap_err();
    assert!(matches!(err, Error::UnsupportedRleSymbol { .. }));
}

#[test]
fn test_rle_and_plain_agree() {
    let buffer = concat_documents(&["ACGTNACGT", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"]);
    let sorted = sort::<u32>(&buffer, false).unwrap();
    let mut plain = Vec::new();
    let mut rle = Vec::new();
    write_bwt(&mut plain, &buffer, &sorted.sa, BwtMode::Plain).unwrap();
    write_bwt(&mut rle, &buffer, &sorted.sa, BwtMode::Rle).unwrap();
    assert_eq!(plain.len(), buffer.len() - 1);
    let decoded: Vec<u8> = rle
        .iter()
        .flat_map(|&b| {
            let unit = RleUnit::unpack(b).unwrap();
            std::iter::repeat(unit.symbol).take(unit.run as usize)
        })
        .collect();
    assert_eq!(decoded, plain);
}

#[test]
fn test_sa_file_round_trip() {
    let buffer = concat_documents(&["banana", "bandana"]);
    let sorted = sort::<u32>(&buffer, true).unwrap();
    let lcp = sorted.lcp.clone().unwrap();

    let mut sa_only = Vec::new();
    write_sa(&mut sa_only, &sorted.sa).unwrap();
    assert_eq!(read_sa::<u32, _>(&mut Cursor::new(sa_only)).unwrap(), sorted.sa);

    let mut both = Vec::new();
    write_sa_lcp(&mut both, &sorted.sa, &lcp).unwrap();
    let (sa, back) = read_sa_lcp::<u32, _>(&mut Cursor::new(both)).unwrap();
    assert_eq!(sa, sorted.sa);
    assert_eq!(back, lcp);
}
