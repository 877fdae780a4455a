//! Sturmian bit source - the Fibonacci word, generated lazily.
//!
//! The Fibonacci word is the fixed point of the morphism
//!
//! ```text
//! σ(0) = 01
//! σ(1) = 0
//! ```
//!
//! starting `0 1 0 0 1 0 1 0 0 1 0 0 1 …`. It codes the rotation by
//! `1/φ²` and is balanced: any two windows of equal length differ in their
//! count of 1s by at most one. In particular `11` never occurs.
//!
//! # Generation
//!
//! `σ^(k+1)(0) = σ^k(0) · σ^k(1)`, so once the prefix `σ^k(0)` has been
//! emitted the next chunk of the word is `σ^k(1)`. [`SturmianWord`] keeps a
//! stack of `(symbol, level)` entries, each standing for `σ^level(symbol)`.
//! Popping an entry expands it depth-first until level 0 and emits that
//! symbol. As soon as an emission drains the stack it is refilled with
//! `σ^k(1)` for the next `k`, so between calls the stack is never empty.
//!
//! ```text
//! stack            emitted
//! [(0,0)]          0            prefix σ⁰(0) = 0
//! [(1,0)]          1            prefix σ¹(0) = 01
//! [(1,1)]  → (0,0) 0            prefix σ²(0) = 010
//! [(1,2)]  → …     0 1          prefix σ³(0) = 01001
//! ```
//!
//! Each emitted bit costs amortized O(1) stack operations; the stack holds
//! O(log n) entries after n bits.

use alloc::vec;
use alloc::vec::Vec;

use crate::source::BitSource;

/// Pending expansion `σ^level(symbol)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    symbol: u8,
    level: u32,
}

/// Lazy generator of the Fibonacci word.
///
/// # Example
///
/// ```
/// use sturmwalk::SturmianWord;
///
/// let mut word = SturmianWord::new();
/// let head: Vec<u8> = (0..13).map(|_| word.next_bit()).collect();
/// assert_eq!(head, [0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SturmianWord {
    stack: Vec<Pending>,
    /// `k` of the next `σ^k(1)` refill.
    prefix_level: u32,
    position: u64,
}

impl SturmianWord {
    /// Creates a generator positioned at the start of the word.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Pending {
                symbol: 0,
                level: 0,
            }],
            prefix_level: 0,
            position: 0,
        }
    }

    /// Emits the next bit of the word.
    pub fn next_bit(&mut self) -> u8 {
        let Some(mut top) = self.stack.pop() else {
            // `new` and every call leave at least one pending entry.
            self.refill();
            return self.next_bit();
        };

        while top.level > 0 {
            let level = top.level - 1;
            top = match top.symbol {
                0 => {
                    self.stack.push(Pending { symbol: 1, level });
                    Pending { symbol: 0, level }
                }
                _ => Pending { symbol: 0, level },
            };
        }

        if self.stack.is_empty() {
            self.refill();
        }
        self.position += 1;
        top.symbol
    }

    /// Queues the next chunk of the fixed point, σ^k(1).
    fn refill(&mut self) {
        self.stack.push(Pending {
            symbol: 1,
            level: self.prefix_level,
        });
        self.prefix_level += 1;
    }

    /// Number of bits emitted so far.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Current number of pending stack entries.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for SturmianWord {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for SturmianWord {
    #[inline]
    fn next_bit(&mut self) -> u8 {
        SturmianWord::next_bit(self)
    }
}

impl Iterator for SturmianWord {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        Some(SturmianWord::next_bit(self))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// σ^k(0) built eagerly, for comparison.
    fn fibonacci_prefix(k: u32) -> Vec<u8> {
        let mut w = vec![0u8];
        for _ in 0..k {
            w = w
                .iter()
                .flat_map(|&c| if c == 0 { vec![0, 1] } else { vec![0] })
                .collect();
        }
        w
    }

    #[test]
    fn test_first_thirteen() {
        let bits: Vec<u8> = SturmianWord::new().take(13).collect();
        assert_eq!(bits, [0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_matches_eager_expansion() {
        let eager = fibonacci_prefix(20);
        let lazy: Vec<u8> = SturmianWord::new().take(eager.len()).collect();
        assert_eq!(lazy, eager);
    }

    #[test]
    fn test_no_double_one() {
        let bits: Vec<u8> = SturmianWord::new().take(100_000).collect();
        assert!(bits.windows(2).all(|w| w != [1, 1]));
    }

    #[test]
    fn test_prefix_lengths_are_fibonacci() {
        // σ^k(0) has length F(k+2) and contains F(k) ones.
        let fib: Vec<usize> = (0..30)
            .scan((0usize, 1usize), |s, _| {
                let out = s.0;
                *s = (s.1, s.0 + s.1);
                Some(out)
            })
            .collect();
        for k in 0..25u32 {
            let w = fibonacci_prefix(k);
            let ones = w.iter().filter(|&&b| b == 1).count();
            assert_eq!(w.len(), fib[k as usize + 2]);
            assert_eq!(ones, fib[k as usize]);
        }
    }

    #[test]
    fn test_position_counts_bits() {
        let mut word = SturmianWord::new();
        for _ in 0..1000 {
            word.next_bit();
        }
        assert_eq!(word.position(), 1000);
    }

    #[test]
    fn test_depth_stays_logarithmic() {
        let mut word = SturmianWord::new();
        let mut max_depth = 0;
        for _ in 0..1_000_000 {
            word.next_bit();
            max_depth = max_depth.max(word.depth());
        }
        // F(31) > 10^6, so at most ~30 nested levels are ever live.
        assert!(max_depth <= 32, "depth {max_depth}");
    }

    #[test]
    fn test_stack_never_empty_between_calls() {
        let mut word = SturmianWord::new();
        assert_eq!(word.depth(), 1);
        let mut head = Vec::new();
        for i in 0..200_000 {
            let bit = word.next_bit();
            if i < 13 {
                head.push(bit);
            }
            assert!(word.depth() >= 1, "drained after bit {i}");
        }
        assert_eq!(head, [0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_clone_replays() {
        let mut a = SturmianWord::new();
        for _ in 0..77 {
            a.next_bit();
        }
        let b = a.clone();
        let tail_a: Vec<u8> = a.take(50).collect();
        let tail_b: Vec<u8> = b.take(50).collect();
        assert_eq!(tail_a, tail_b);
    }
}
