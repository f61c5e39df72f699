//! Symbol comparison helpers shared by the engine, the validator and the tests.

use std::cmp::Ordering;

use crate::types::SEPARATOR;

/// Common prefix length of the suffixes at `a` and `b`, stopping at the first
/// separator.
///
/// Separators never match, not even each other: each one closes its own
/// document. Offsets at or beyond the end of `buf` have an empty suffix.
#[inline]
pub fn segment_lcp(buf: &[u8], a: usize, b: usize) -> usize {
    if a >= buf.len() || b >= buf.len() {
        return 0;
    }
    buf[a..]
        .iter()
        .zip(&buf[b..])
        .take_while(|&(&x, &y)| x == y && x != SEPARATOR)
        .count()
}

/// Compare the suffixes at `a` and `b` up to and including the first separator.
///
/// Two suffixes whose segments match through a separator compare `Equal`; what
/// follows the separator is another document and is ignored here.
pub fn compare_segments(buf: &[u8], a: usize, b: usize) -> Ordering {
    let (mut i, mut j) = (a, b);
    loop {
        match (buf.get(i), buf.get(j)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&x), Some(&y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                if x == SEPARATOR {
                    return Ordering::Equal;
                }
            }
        }
        i += 1;
        j += 1;
    }
}
