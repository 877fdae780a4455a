//! Per-channel block statistics.

use serde::Serialize;
use sturmwalk::ChannelSet;

/// How many leading block lengths are kept per channel.
pub const HEAD_LEN: usize = 50;

/// What one channel contributed over the probed prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelProbe {
    /// Channel index in the set.
    pub index: usize,
    /// Modulus M.
    pub modulus: u64,
    /// Increment P.
    pub increment: u64,
    /// Threshold T.
    pub threshold: u64,
    /// `T / M`, the long-block share the channel tends to.
    pub alpha: f64,
    /// Blocks with one RIGHT.
    pub short_blocks: u64,
    /// Blocks with two RIGHTs.
    pub long_blocks: u64,
    /// The first [`HEAD_LEN`] block lengths `t` this channel produced.
    pub head: Vec<u8>,
}

impl ChannelProbe {
    /// Share of short blocks, `0.0` if the channel was never scheduled.
    pub fn short_ratio(&self) -> f64 {
        let total = self.short_blocks + self.long_blocks;
        if total == 0 {
            0.0
        } else {
            self.short_blocks as f64 / total as f64
        }
    }
}

/// Runs a copy of `set` for `blocks` blocks and tallies each channel.
///
/// The set itself is left untouched.
pub fn probe(set: &ChannelSet, blocks: usize) -> Vec<ChannelProbe> {
    let mut probes: Vec<ChannelProbe> = set
        .channels()
        .iter()
        .enumerate()
        .map(|(index, ch)| {
            let p = ch.params();
            ChannelProbe {
                index,
                modulus: p.modulus(),
                increment: p.increment(),
                threshold: p.threshold(),
                alpha: p.threshold() as f64 / p.modulus() as f64,
                short_blocks: 0,
                long_blocks: 0,
                head: Vec::with_capacity(HEAD_LEN),
            }
        })
        .collect();

    let mut run = set.clone();
    for _ in 0..blocks {
        let index = run.next_index();
        let t = 1 + run.next_bit();
        let entry = &mut probes[index];
        if t == 1 {
            entry.short_blocks += 1;
        } else {
            entry.long_blocks += 1;
        }
        if entry.head.len() < HEAD_LEN {
            entry.head.push(t);
        }
    }
    probes
}

#[cfg(test)]
mod tests {
    use super::*;
    use sturmwalk::{Channel, ChannelParams};

    #[test]
    fn test_counts_split_by_schedule() {
        let set = ChannelSet::default();
        let probes = probe(&set, 200);
        assert_eq!(probes.len(), 4);
        for p in &probes {
            assert_eq!(p.short_blocks + p.long_blocks, 50);
            assert_eq!(p.head.len(), HEAD_LEN);
            assert!(p.head.iter().all(|&t| t == 1 || t == 2));
        }
        // the probed copy did not disturb the original
        assert_eq!(set, ChannelSet::default());
    }

    #[test]
    fn test_head_matches_channel() {
        let set = ChannelSet::reference();
        let probes = probe(&set, 400);
        for (i, p) in probes.iter().enumerate() {
            let mut ch = Channel::new(set.channels()[i].params());
            let expected: Vec<u8> = (0..HEAD_LEN).map(|_| 1 + ch.advance()).collect();
            assert_eq!(p.head, expected, "channel {i}");
        }
    }

    #[test]
    fn test_uneven_and_empty() {
        let probes = probe(&ChannelSet::default(), 6);
        let totals: Vec<u64> = probes
            .iter()
            .map(|p| p.short_blocks + p.long_blocks)
            .collect();
        assert_eq!(totals.iter().sum::<u64>(), 6);
        assert!(probes.iter().any(|p| p.short_blocks + p.long_blocks == 1));

        let idle = probe(&ChannelSet::default(), 0);
        assert!(idle.iter().all(|p| p.short_ratio() == 0.0 && p.head.is_empty()));
    }

    #[test]
    fn test_threshold_extremes() {
        let never = ChannelParams::new(10, 3, 0).unwrap();
        let always = ChannelParams::new(10, 3, 10).unwrap();
        let set =
            ChannelSet::new(vec![Channel::new(never), Channel::new(always)], 1).unwrap();
        let probes = probe(&set, 20);
        assert_eq!((probes[0].short_blocks, probes[0].long_blocks), (10, 0));
        assert_eq!((probes[1].short_blocks, probes[1].long_blocks), (0, 10));
        assert_eq!(probes[0].short_ratio(), 1.0);
    }
}
