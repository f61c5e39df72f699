//! LCP induction alongside the final top-level SA pass.
//!
//! Adjacent LMS suffixes get their values from a Φ pass over LMS positions in
//! text order. Every other value follows from the suffixes that induced its
//! neighbours: two suffixes `cX` and `cY` share `1 + lcp(X, Y)`, and
//! `lcp(X, Y)` is a range minimum over values already fixed by the scan.
//! Separators never match, so a pair that starts with one shares nothing.

use super::induce::{Buckets, SuffixTypes};
use super::{Terminated, Text, SEPARATOR_SYMBOL};
use crate::types::SaIndex;
use crate::utils::segment_lcp;

/// Monotone stack answering "minimum LCP since slot `k`" for a scan that only
/// moves in one direction.
///
/// Values strictly increase from bottom to top, so the first entry past a slot
/// holds the minimum of everything pushed after it. Queries only ever start at
/// a live `last[c]` boundary, so once the stack outgrows twice the alphabet it
/// is pruned to the first entry past each boundary. Its size stays O(σ)
/// whatever the chunk length.
struct MinStack {
    entries: Vec<(usize, usize)>,
    keep: Vec<bool>,
    capacity: usize,
    peak: usize,
    /// `before(slot, bound)`: the entry lies outside queries starting at `bound`.
    before: fn(usize, usize) -> bool,
}

impl MinStack {
    fn new(alphabet: usize, before: fn(usize, usize) -> bool) -> Self {
        let capacity = 2 * alphabet.max(1);
        MinStack {
            entries: Vec::with_capacity(capacity + 1),
            keep: Vec::with_capacity(capacity + 1),
            capacity,
            peak: 0,
            before,
        }
    }

    fn push(&mut self, slot: usize, value: usize, live: &[Option<usize>]) {
        while matches!(self.entries.last(), Some(&(_, top)) if top >= value) {
            self.entries.pop();
        }
        self.entries.push((slot, value));
        self.peak = self.peak.max(self.entries.len());
        if self.entries.len() > self.capacity {
            self.prune(live);
        }
    }

    /// Drop every entry that is not the first one past some live boundary.
    /// Boundaries set later lie past every current entry.
    fn prune(&mut self, live: &[Option<usize>]) {
        let before = self.before;
        self.keep.clear();
        self.keep.resize(self.entries.len(), false);
        for &bound in live.iter().flatten() {
            let k = self.entries.partition_point(|&(slot, _)| before(slot, bound));
            if let Some(flag) = self.keep.get_mut(k) {
                *flag = true;
            }
        }
        let keep = &self.keep;
        let mut k = 0;
        self.entries.retain(|_| {
            k += 1;
            keep[k - 1]
        });
    }

    /// Minimum over entries not before `bound`. The scan must have pushed at
    /// least one such entry.
    fn min_after(&self, bound: usize) -> usize {
        let before = self.before;
        let k = self.entries.partition_point(|&(slot, _)| before(slot, bound));
        self.entries[k].1
    }

    fn peak(&self) -> usize {
        self.peak
    }
}

/// Whether the run of equal symbols starting at `i` ends strictly inside
/// `..limit`, i.e. its closing pair `(t, t + 1)` lies before `limit`.
fn run_closes_before(text: &Terminated<'_>, i: usize, limit: usize) -> bool {
    let mut t = i;
    while t + 1 < limit && text.symbol(t) == text.symbol(t + 1) {
        t += 1;
    }
    t + 1 < limit
}

/// LCP of each sorted LMS suffix in `sa[..m]` with its predecessor, into
/// `lcp[..m]`.
///
/// Walks LMS positions in text order with Φ, the sorted predecessor, parked in
/// `sa[m + pos / 2]`. If `p` shared `h` symbols with `Φ(p)`, the next LMS
/// position `i = p + d` shares at least `h - d` with `Φ(i)` as long as the
/// shared prefix also covers the suffix types of `i - 1` and `i`: `Φ(p) + d`
/// is then an LMS suffix smaller than `i`. Otherwise the comparison restarts
/// from zero, which costs at most the symbol run at `i`. Runs at distinct LMS
/// positions are disjoint, so the pass is linear.
///
/// Expects `sa[m..]` empty and leaves it empty.
fn lms_lcp<I: SaIndex>(
    buffer: &[u8],
    types: &SuffixTypes,
    sa: &mut [I],
    lcp: &mut [I],
    m: usize,
) {
    let text = Terminated(buffer);
    let n = sa.len();

    // sa[0] is the terminator; it has no predecessor and its slot stays empty
    for k in 1..m {
        let pos = sa[k].to_usize();
        sa[m + pos / 2] = sa[k - 1];
    }

    let mut carry = 0usize;
    let mut prev: Option<usize> = None;
    for i in 1..n {
        if !types.is_lms(i) {
            continue;
        }
        let slot = m + i / 2;
        let start = match prev {
            Some(p) if carry > i - p && run_closes_before(&text, i, p + carry) => carry - (i - p),
            _ => 0,
        };
        let value = if sa[slot] == I::EMPTY {
            0
        } else {
            let phi = sa[slot].to_usize();
            start + segment_lcp(buffer, i + start, phi + start)
        };
        sa[slot] = I::from_usize(value);
        carry = value;
        prev = Some(i);
    }

    for (value, pos) in lcp[..m].iter_mut().zip(&sa[..m]) {
        *value = sa[m + pos.to_usize() / 2];
    }
    sa[m..].fill(I::EMPTY);
}

/// Final induced sort of the top level with LCP values.
///
/// Expects the sorted LMS positions packed in `sa[..m]` and the rest of `sa`
/// empty. Leaves the complete suffix array (terminator included) in `sa` and
/// `lcp[i] = lcp(sa[i - 1], sa[i])`. Returns the largest min-stack size
/// either pass reached.
pub(crate) fn induce_with_lcp<I: SaIndex>(
    buffer: &[u8],
    types: &SuffixTypes,
    buckets: &Buckets,
    sa: &mut [I],
    lcp: &mut [I],
    m: usize,
) -> usize {
    let text = Terminated(buffer);
    let n = sa.len();
    let alphabet = buckets.alphabet();

    let mut l_counts = vec![0usize; alphabet];
    let mut lms_counts = vec![0usize; alphabet];
    for i in 0..n {
        let c = text.symbol(i);
        if !types.is_s(i) {
            l_counts[c] += 1;
        } else if types.is_lms(i) {
            lms_counts[c] += 1;
        }
    }
    let starts = buckets.heads();
    let ends = buckets.tails();

    // LMS values while the LMS suffixes are still adjacent
    lms_lcp(buffer, types, sa, lcp, m);

    // Seed bucket tails, carrying the values along
    let mut tails = ends.clone();
    for k in (0..m).rev() {
        let pos = sa[k];
        let value = lcp[k];
        sa[k] = I::EMPTY;
        lcp[k] = I::zero();
        let c = text.symbol(pos.to_usize());
        tails[c] -= 1;
        sa[tails[c]] = pos;
        lcp[tails[c]] = value;
    }

    // L-type pass
    let mut heads = starts.clone();
    let mut last: Vec<Option<usize>> = vec![None; alphabet];
    let mut stack = MinStack::new(alphabet, |slot, bound| slot <= bound);
    for i in 0..n {
        let pos = sa[i];
        if pos == I::EMPTY {
            continue;
        }
        stack.push(i, lcp[i].to_usize(), &last);
        if pos == I::zero() {
            continue;
        }
        let j = pos.to_usize() - 1;
        if types.is_s(j) {
            continue;
        }

        let c = text.symbol(j);
        let s = heads[c];
        let value = match last[c] {
            Some(prev) if c != SEPARATOR_SYMBOL => 1 + stack.min_after(prev),
            _ => 0,
        };
        sa[s] = I::from_usize(j);
        lcp[s] = I::from_usize(value);
        heads[c] += 1;
        last[c] = Some(i);

        // The last L-type suffix of a bucket now precedes its first LMS seed
        if heads[c] == starts[c] + l_counts[c] && lms_counts[c] > 0 {
            let first = ends[c] - lms_counts[c];
            let v = segment_lcp(buffer, j, sa[first].to_usize());
            lcp[first] = I::from_usize(v);
        }
    }

    let l_peak = stack.peak();

    // S-type pass
    let mut tails = ends;
    let mut last: Vec<Option<usize>> = vec![None; alphabet];
    let mut stack = MinStack::new(alphabet, |slot, bound| slot > bound);
    for i in (0..n).rev() {
        if i + 1 < n {
            stack.push(i + 1, lcp[i + 1].to_usize(), &last);
        }
        let pos = sa[i];
        if pos == I::EMPTY || pos == I::zero() {
            continue;
        }
        let j = pos.to_usize() - 1;
        if !types.is_s(j) {
            continue;
        }

        let c = text.symbol(j);
        tails[c] -= 1;
        let s = tails[c];
        sa[s] = I::from_usize(j);

        if let Some(prev) = last[c] {
            let value = if c == SEPARATOR_SYMBOL {
                0
            } else {
                1 + stack.min_after(prev)
            };
            lcp[s + 1] = I::from_usize(value);
        }
        last[c] = Some(i);

        if s == starts[c] + l_counts[c] {
            let v = if l_counts[c] > 0 {
                segment_lcp(buffer, sa[s - 1].to_usize(), j)
            } else {
                0
            };
            lcp[s] = I::from_usize(v);
        }
    }

    l_peak.max(stack.peak())
}
