//! SA-IS: generalized suffix array (and LCP) by induced sorting.
//!
//! Linear-time suffix sorting for a buffer of concatenated documents, each
//! closed by the separator byte 0. The last separator is the anchor terminator.
//!
//! # Algorithm Overview
//!
//! ```text
//! Input: "banana\0"          (# = virtual terminator, one past the end)
//!
//! Step 1: Shift every byte up by one and classify suffixes
//! ┌───┬───┬───┬───┬───┬───┬────┬───┐
//! │ b │ a │ n │ a │ n │ a │ \0 │ # │
//! ├───┼───┼───┼───┼───┼───┼────┼───┤
//! │ L │ S │ L │ S │ L │ L │ L  │ S │   (S = smaller than next, L = larger)
//! └───┴───┴───┴───┴───┴───┴────┴───┘
//!
//! Step 2: LMS (leftmost S-type) positions: 1, 3, 7
//!
//! Step 3: Induced sorting of LMS substrings
//!         - LMS suffixes at bucket tails
//!         - Induce L-type (left-to-right)
//!         - Induce S-type (right-to-left)
//!
//! Step 4: Name LMS substrings; recurse on the reduced string if names repeat.
//!         The reduced string and its suffix array share the caller's array.
//!
//! Step 5: Induce the final order from the sorted LMS suffixes, deriving LCP
//!         values on the way when requested.
//!
//! Output: [6, 5, 3, 1, 0, 4, 2]   (terminator slot dropped)
//! ```
//!
//! The separators need no special casing: byte 0 is the smallest symbol, so a
//! suffix that reaches a separator first sorts first, and the anchor suffix
//! `"\0"` is a prefix of every other separator suffix, which puts it at `SA[0]`.
//!
//! # Complexity
//!
//! - Time: O(n) for SA. LCP adds a Φ pass over LMS suffixes, a logarithmic
//!   range-minimum lookup per step, and one direct comparison per bucket.
//! - Space: SA (and LCP) of `n + 1` entries, a bit per symbol for suffix
//!   types, and per-level bucket tables. The LCP range-minimum stack holds
//!   at most twice the alphabet.
//!
//! # References
//!
//! - Nong, Zhang, Chan (2009): "Linear Suffix Array Construction by Almost Pure Induced-Sorting"
//! - Fischer (2011): "Inducing the LCP-Array"
//! - Louza, Gog, Telles (2017): "Inducing enhanced suffix arrays for string collections"

mod induce;
mod lcp;

use crate::error::{Error, Result};
use crate::types::{SaIndex, SuffixSort, SEPARATOR};

use induce::{induce_l, induce_s, Buckets, SuffixTypes};

/// Alphabet of the top level: 256 shifted bytes plus the virtual terminator.
const BYTE_ALPHABET: usize = 257;

/// Symbol of the document separator once shifted past the terminator.
const SEPARATOR_SYMBOL: usize = SEPARATOR as usize + 1;

/// Read-only view of a string over an integer alphabet whose last symbol is a
/// unique 0.
pub(crate) trait Text {
    fn len(&self) -> usize;
    fn symbol(&self, i: usize) -> usize;
}

/// A byte buffer followed by a virtual terminator smaller than every byte.
///
/// Bytes are shifted up by one so the terminator can take symbol 0 without
/// colliding with the separator.
#[derive(Clone, Copy)]
pub(crate) struct Terminated<'a>(pub(crate) &'a [u8]);

impl Text for Terminated<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len() + 1
    }

    #[inline]
    fn symbol(&self, i: usize) -> usize {
        match self.0.get(i) {
            Some(&b) => b as usize + 1,
            None => 0,
        }
    }
}

/// Reduced strings are stored as offsets in the caller's array.
impl<I: SaIndex> Text for [I] {
    #[inline]
    fn len(&self) -> usize {
        <[I]>::len(self)
    }

    #[inline]
    fn symbol(&self, i: usize) -> usize {
        self[i].to_usize()
    }
}

/// Build the generalized suffix array of `buffer`, and its LCP array when
/// `want_lcp` is set.
///
/// `buffer` must end with the separator byte 0 (the anchor terminator) and
/// its length must be addressable by `I`. The LCP array is only allocated when
/// requested.
///
/// # Example
///
/// ```
/// let sorted = gsais::sort::<u32>(b"banana\0", true).unwrap();
/// assert_eq!(sorted.sa, vec![6, 5, 3, 1, 0, 4, 2]);
/// assert_eq!(sorted.lcp.unwrap(), vec![0, 0, 1, 3, 0, 0, 2]);
/// ```
pub fn sort<I: SaIndex>(buffer: &[u8], want_lcp: bool) -> Result<SuffixSort<I>> {
    let len = buffer.len() as u64;
    if len > I::MAX_LEN {
        return Err(Error::BufferTooLarge {
            len,
            max: I::MAX_LEN,
        });
    }
    if buffer.is_empty() {
        return Ok(SuffixSort {
            sa: Vec::new(),
            lcp: want_lcp.then(Vec::new),
            depth: 0,
        });
    }
    if buffer.last() != Some(&SEPARATOR) {
        return Err(Error::MissingAnchor);
    }

    let text = Terminated(buffer);
    let mut sa = vec![I::EMPTY; text.len()];
    let mut lcp = want_lcp.then(|| vec![I::zero(); text.len()]);

    let depth = match lcp.as_deref_mut() {
        Some(lcp) => sort_level(&text, &mut sa, BYTE_ALPHABET, 0, Some((buffer, lcp))),
        None => sort_level(&text, &mut sa, BYTE_ALPHABET, 0, None),
    };

    // The virtual terminator always sorts first; drop its slot.
    sa.remove(0);
    if let Some(lcp) = lcp.as_mut() {
        lcp.remove(0);
        lcp[0] = I::zero();
    }

    crate::verify::contracts::check_anchor(&sa);
    crate::verify::contracts::check_permutation(&sa);

    Ok(SuffixSort { sa, lcp, depth })
}

/// Sort all suffixes of `text` into `sa`, returning the deepest recursion level.
///
/// `lcp` carries the raw buffer and the LCP array at the top level only; the
/// reduced problems never need LCP values.
fn sort_level<I, T>(
    text: &T,
    sa: &mut [I],
    alphabet: usize,
    level: usize,
    lcp: Option<(&[u8], &mut [I])>,
) -> usize
where
    I: SaIndex,
    T: Text + ?Sized,
{
    let n = text.len();
    debug_assert_eq!(sa.len(), n);
    if n == 1 {
        sa[0] = I::zero();
        return level;
    }

    let types = SuffixTypes::classify(text);
    let buckets = Buckets::count(text, alphabet);

    // Stage 1: sort LMS substrings
    sa.fill(I::EMPTY);
    let mut tails = buckets.tails();
    for i in (1..n).rev() {
        if types.is_lms(i) {
            let c = text.symbol(i);
            tails[c] -= 1;
            sa[tails[c]] = I::from_usize(i);
        }
    }
    induce_l(text, &types, &buckets, sa);
    induce_s(text, &types, &buckets, sa);

    // Stage 2: pack sorted LMS positions into sa[..m] and name their substrings
    let m = compact_lms(&types, sa);
    let names = name_lms(text, &types, sa, m);

    // Stage 3: sort the reduced string; it lives in sa[n - m..]
    let depth = {
        let (head, tail) = sa.split_at_mut(m);
        let offset = tail.len() - m;
        let reduced = &mut tail[offset..];

        let depth = if names < m {
            sort_level(&*reduced, head, names, level + 1, None)
        } else {
            for (i, name) in reduced.iter().enumerate() {
                head[name.to_usize()] = I::from_usize(i);
            }
            level
        };

        // Map reduced suffix ranks back to text positions
        let mut j = 0;
        for i in 1..n {
            if types.is_lms(i) {
                reduced[j] = I::from_usize(i);
                j += 1;
            }
        }
        for slot in head.iter_mut() {
            *slot = reduced[slot.to_usize()];
        }
        depth
    };

    // Stage 4: induce the final order from the sorted LMS suffixes
    sa[m..].fill(I::EMPTY);
    match lcp {
        Some((buffer, lcp)) => {
            let peak = lcp::induce_with_lcp(buffer, &types, &buckets, sa, lcp, m);
            debug_assert!(peak <= 2 * alphabet + 1, "LCP stack outgrew the alphabet");
        }
        None => {
            let mut tails = buckets.tails();
            for k in (0..m).rev() {
                let pos = sa[k];
                sa[k] = I::EMPTY;
                let c = text.symbol(pos.to_usize());
                tails[c] -= 1;
                sa[tails[c]] = pos;
            }
            induce_l(text, &types, &buckets, sa);
            induce_s(text, &types, &buckets, sa);
        }
    }

    depth
}

/// Move the LMS positions of a fully induced `sa` to its front, keeping their
/// order. Returns how many there are.
fn compact_lms<I: SaIndex>(types: &SuffixTypes, sa: &mut [I]) -> usize {
    let mut m = 0;
    for i in 0..sa.len() {
        let pos = sa[i];
        if pos != I::EMPTY && types.is_lms(pos.to_usize()) {
            sa[m] = pos;
            m += 1;
        }
    }
    m
}

/// Name the sorted LMS substrings in `sa[..m]` and pack the names, in text
/// order, into `sa[n - m..]`. Returns the number of distinct names.
///
/// LMS positions are at least two apart, so `m + pos / 2` gives every LMS
/// position its own slot in the upper part of the array.
fn name_lms<I, T>(text: &T, types: &SuffixTypes, sa: &mut [I], m: usize) -> usize
where
    I: SaIndex,
    T: Text + ?Sized,
{
    let n = sa.len();
    sa[m..].fill(I::EMPTY);

    let mut name = 0usize;
    let mut prev: Option<usize> = None;
    for k in 0..m {
        let pos = sa[k].to_usize();
        if let Some(prev) = prev {
            if !lms_substrings_equal(text, types, prev, pos) {
                name += 1;
            }
        }
        prev = Some(pos);
        sa[m + pos / 2] = I::from_usize(name);
    }

    let mut j = n;
    for i in (m..n).rev() {
        if sa[i] != I::EMPTY {
            j -= 1;
            sa[j] = sa[i];
        }
    }

    name + 1
}

/// Compare two LMS substrings for equality (symbols and types).
fn lms_substrings_equal<T: Text + ?Sized>(
    text: &T,
    types: &SuffixTypes,
    i: usize,
    j: usize,
) -> bool {
    if i == j {
        return true;
    }

    let n = text.len();
    let mut k = 0;

    loop {
        let pi = i + k;
        let pj = j + k;

        if pi >= n || pj >= n {
            return pi >= n && pj >= n;
        }

        if text.symbol(pi) != text.symbol(pj) {
            return false;
        }

        if types.is_s(pi) != types.is_s(pj) {
            return false;
        }

        // After the first symbol, both must reach the next LMS together
        if k > 0 {
            let lms_i = types.is_lms(pi);
            let lms_j = types.is_lms(pj);
            if lms_i && lms_j {
                return true;
            }
            if lms_i != lms_j {
                return false;
            }
        }

        k += 1;
    }
}
