//! Edit-distance similarity and partial alignment.
//!
//! Similarity is the Indel ratio `200 * lcs / (len(a) + len(b))` on characters,
//! in `0.0..=100.0`. The longest common subsequence is computed bit-parallel
//! (Hyyrö), 64 query characters per machine word, so scoring a window of `n`
//! characters costs `n * ceil(m / 64)` word operations.
//!
//! Alignment slides a query-length window over the text and only scores windows
//! whose LCS bound can still beat the cutoff and the best window so far. Each
//! scored window lets the scan skip about as many following windows as its LCS
//! falls short of the cutoff, so long queries with no good match near the cutoff
//! remain the slowest case.

use std::collections::HashMap;

/// Slot for characters that never occur in the query.
pub const NO_SLOT: u32 = u32::MAX;

fn indel_score(lcs: usize, a_len: usize, b_len: usize) -> f64 {
    let total = a_len + b_len;
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs as f64 / total as f64
}

/// A query compiled for repeated comparisons.
#[derive(Debug, Clone)]
pub struct Pattern {
    len: usize,
    slots: HashMap<char, u32>,
    /// Match bit-vectors, `blocks` words per slot.
    masks: Vec<u64>,
    /// Occurrences of each slot in the query.
    counts: Vec<u32>,
    blocks: usize,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        let chars: Vec<char> = query.chars().collect();
        let blocks = chars.len().div_ceil(64).max(1);
        let mut slots: HashMap<char, u32> = HashMap::new();
        let mut masks: Vec<u64> = Vec::new();
        let mut counts: Vec<u32> = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            let slot = *slots.entry(c).or_insert_with(|| {
                counts.push(0);
                masks.resize(masks.len() + blocks, 0);
                (counts.len() - 1) as u32
            }) as usize;
            counts[slot] += 1;
            masks[slot * blocks + i / 64] |= 1u64 << (i % 64);
        }
        Self { len: chars.len(), slots, masks, counts, blocks }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Map text characters to query slots, [`NO_SLOT`] for foreign characters.
    pub fn encode(&self, text: &[char]) -> Vec<u32> {
        text.iter().map(|c| self.slots.get(c).copied().unwrap_or(NO_SLOT)).collect()
    }

    fn lcs(&self, window: &[u32], state: &mut Vec<u64>) -> usize {
        state.clear();
        state.resize(self.blocks, !0u64);
        for &slot in window {
            if slot == NO_SLOT {
                continue;
            }
            let at = slot as usize * self.blocks;
            let mask = &self.masks[at..at + self.blocks];
            let mut carry = 0u64;
            for (v, &m) in state.iter_mut().zip(mask) {
                let u = *v & m;
                let (sum, c1) = v.overflowing_add(u);
                let (sum, c2) = sum.overflowing_add(carry);
                carry = u64::from(c1 | c2);
                *v = sum | (*v & !m);
            }
        }
        let tail = self.len % 64;
        state
            .iter()
            .enumerate()
            .map(|(b, v)| {
                let valid = if b + 1 == self.blocks && tail != 0 { (1u64 << tail) - 1 } else { !0u64 };
                (!v & valid).count_ones() as usize
            })
            .sum()
    }

    /// Similarity of the whole query against `text`.
    pub fn ratio(&self, text: &str) -> f64 {
        let chars: Vec<char> = text.chars().collect();
        let encoded = self.encode(&chars);
        let mut state = Vec::with_capacity(self.blocks);
        indel_score(self.lcs(&encoded, &mut state), self.len, chars.len())
    }

    /// Find the window of `text` that is most similar to the whole query.
    ///
    /// Candidate windows are as long as the query (or the whole text when it is
    /// shorter), plus the shorter windows clipped at either end of the text. The
    /// earliest window with the highest score wins. Returns `None` when no window
    /// reaches `cutoff` or shares a single character with the query. Offsets are
    /// relative to `text`, end exclusive.
    pub fn align(&self, text: &[u32], cutoff: f64) -> Option<Alignment> {
        let n = text.len();
        if self.is_empty() || n == 0 {
            return None;
        }
        let w = self.len.min(n);
        let mut scan = WindowScan::new(self, cutoff);

        for end in 1..w {
            scan.push(text[end - 1]);
            scan.consider(text, 0, end);
            if scan.is_perfect() {
                return scan.best;
            }
        }
        scan.push(text[w - 1]);
        for start in 0..=n - w {
            if start > 0 {
                scan.pop(text[start - 1]);
                scan.push(text[start + w - 1]);
            }
            scan.consider(text, start, start + w);
            if scan.is_perfect() {
                return scan.best;
            }
        }
        for start in n - w + 1..n {
            scan.pop(text[start - 1]);
            scan.consider(text, start, n);
            if scan.is_perfect() {
                return scan.best;
            }
        }
        scan.best
    }
}

/// Indel similarity of two strings, `0.0..=100.0`.
pub fn ratio(a: &str, b: &str) -> f64 {
    Pattern::new(a).ratio(b)
}

/// Best-matching window of `text` for `query`, see [`Pattern::align`].
pub fn partial_ratio_alignment(query: &str, text: &str, cutoff: f64) -> Option<Alignment> {
    let pattern = Pattern::new(query);
    let chars: Vec<char> = text.chars().collect();
    pattern.align(&pattern.encode(&chars), cutoff)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

/// Bounds the LCS of each candidate window from above so that most windows are
/// skipped without running the LCS.
///
/// Two bounds are kept: the multiset overlap of the window with the query, from a
/// sliding character histogram, and the LCS of the last scored window plus the
/// number of characters the current window adds to it.
struct WindowScan<'p> {
    pattern: &'p Pattern,
    cutoff: f64,
    window_counts: Vec<u32>,
    overlap: usize,
    /// `(start, end, lcs)` of the last window the LCS ran on.
    last: Option<(usize, usize, usize)>,
    state: Vec<u64>,
    best: Option<Alignment>,
}

impl<'p> WindowScan<'p> {
    fn new(pattern: &'p Pattern, cutoff: f64) -> Self {
        Self {
            pattern,
            cutoff,
            window_counts: vec![0; pattern.counts.len()],
            overlap: 0,
            last: None,
            state: Vec::with_capacity(pattern.blocks),
            best: None,
        }
    }

    fn push(&mut self, slot: u32) {
        if slot == NO_SLOT {
            return;
        }
        let s = slot as usize;
        if self.window_counts[s] < self.pattern.counts[s] {
            self.overlap += 1;
        }
        self.window_counts[s] += 1;
    }

    fn pop(&mut self, slot: u32) {
        if slot == NO_SLOT {
            return;
        }
        let s = slot as usize;
        self.window_counts[s] -= 1;
        if self.window_counts[s] < self.pattern.counts[s] {
            self.overlap -= 1;
        }
    }

    fn consider(&mut self, text: &[u32], start: usize, end: usize) {
        if self.overlap == 0 {
            return;
        }
        let len = end - start;
        let mut reachable = self.overlap;
        if let Some((last_start, last_end, last_lcs)) = self.last {
            // each character outside the last window adds at most one to its LCS
            let shared = last_end.min(end).saturating_sub(last_start.max(start));
            reachable = reachable.min(last_lcs + len - shared);
        }
        let bound = indel_score(reachable, self.pattern.len, len);
        if bound < self.cutoff || self.best.is_some_and(|b| bound <= b.score) {
            return;
        }
        let lcs = self.pattern.lcs(&text[start..end], &mut self.state);
        self.last = Some((start, end, lcs));
        if lcs == 0 {
            return;
        }
        let score = indel_score(lcs, self.pattern.len, len);
        if score >= self.cutoff && self.best.map_or(true, |b| score > b.score) {
            self.best = Some(Alignment { score, start, end });
        }
    }

    fn is_perfect(&self) -> bool {
        self.best.is_some_and(|b| b.score >= 100.0)
    }
}
