//! Suffix classification, bucket bounds and the two induction passes.

use super::Text;
use crate::types::SaIndex;

/// S/L type of every suffix, one bit each (set = S-type).
pub(crate) struct SuffixTypes {
    bits: Vec<u64>,
}

impl SuffixTypes {
    /// Classify right to left. The last suffix is the unique smallest symbol
    /// and therefore S-type.
    pub(crate) fn classify<T: Text + ?Sized>(text: &T) -> Self {
        let n = text.len();
        let mut types = SuffixTypes {
            bits: vec![0; n.div_ceil(64)],
        };
        if n == 0 {
            return types;
        }

        types.set_s(n - 1);
        let mut next = text.symbol(n - 1);
        let mut next_s = true;
        for i in (0..n - 1).rev() {
            let c = text.symbol(i);
            let s = c < next || (c == next && next_s);
            if s {
                types.set_s(i);
            }
            next = c;
            next_s = s;
        }
        types
    }

    #[inline]
    fn set_s(&mut self, i: usize) {
        self.bits[i / 64] |= 1 << (i % 64);
    }

    #[inline]
    pub(crate) fn is_s(&self, i: usize) -> bool {
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    /// Leftmost S-type: S-type with an L-type left neighbour.
    #[inline]
    pub(crate) fn is_lms(&self, i: usize) -> bool {
        i > 0 && self.is_s(i) && !self.is_s(i - 1)
    }
}

/// Per-symbol bucket sizes of one text.
pub(crate) struct Buckets {
    sizes: Vec<usize>,
}

impl Buckets {
    pub(crate) fn count<T: Text + ?Sized>(text: &T, alphabet: usize) -> Self {
        let mut sizes = vec![0; alphabet];
        for i in 0..text.len() {
            sizes[text.symbol(i)] += 1;
        }
        Buckets { sizes }
    }

    pub(crate) fn alphabet(&self) -> usize {
        self.sizes.len()
    }

    /// First slot of each bucket.
    pub(crate) fn heads(&self) -> Vec<usize> {
        let mut heads = Vec::with_capacity(self.sizes.len());
        let mut sum = 0;
        for &size in &self.sizes {
            heads.push(sum);
            sum += size;
        }
        heads
    }

    /// One past the last slot of each bucket.
    pub(crate) fn tails(&self) -> Vec<usize> {
        let mut tails = Vec::with_capacity(self.sizes.len());
        let mut sum = 0;
        for &size in &self.sizes {
            sum += size;
            tails.push(sum);
        }
        tails
    }
}

/// Left-to-right pass: every L-type suffix is placed at the head of its bucket
/// once its successor suffix has been scanned.
pub(crate) fn induce_l<I, T>(text: &T, types: &SuffixTypes, buckets: &Buckets, sa: &mut [I])
where
    I: SaIndex,
    T: Text + ?Sized,
{
    let mut heads = buckets.heads();
    for i in 0..sa.len() {
        let pos = sa[i];
        if pos == I::EMPTY || pos == I::zero() {
            continue;
        }
        let j = pos.to_usize() - 1;
        if !types.is_s(j) {
            let c = text.symbol(j);
            sa[heads[c]] = I::from_usize(j);
            heads[c] += 1;
        }
    }
}

/// Right-to-left pass: every S-type suffix is placed at the tail of its bucket,
/// overwriting the LMS seeds.
pub(crate) fn induce_s<I, T>(text: &T, types: &SuffixTypes, buckets: &Buckets, sa: &mut [I])
where
    I: SaIndex,
    T: Text + ?Sized,
{
    let mut tails = buckets.tails();
    for i in (0..sa.len()).rev() {
        let pos = sa[i];
        if pos == I::EMPTY || pos == I::zero() {
            continue;
        }
        let j = pos.to_usize() - 1;
        if types.is_s(j) {
            let c = text.symbol(j);
            tails[c] -= 1;
            sa[tails[c]] = I::from_usize(j);
        }
    }
}
