//! Driver - streams blocks into a move sink until told to stop.
//!
//! The sink is the only feedback path. It is consulted after every single
//! move, not once per block, and it is never called again once it has
//! returned `true`. The driver has no iteration bound of its own: a sink
//! that never answers `true` keeps it running, and any move ceiling belongs
//! to the caller.

use crate::block::{Block, Direction};
use crate::source::BitSource;

/// Receiver of the move stream.
///
/// `signal` returns `true` when the goal has been reached and the driver
/// must stop immediately.
pub trait MoveSink {
    /// Delivers one move.
    fn signal(&mut self, direction: Direction) -> bool;
}

impl<F: FnMut(Direction) -> bool> MoveSink for F {
    #[inline]
    fn signal(&mut self, direction: Direction) -> bool {
        self(direction)
    }
}

/// Counts at the moment the sink asked to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Termination {
    /// Moves delivered, including the one that triggered the stop.
    pub moves: u64,
    /// Blocks started, including a partially delivered last block.
    pub blocks: u64,
}

/// Owns a bit source and drives a sink with the block stream.
///
/// # Example
///
/// ```
/// use sturmwalk::{Direction, Driver, SturmianWord};
///
/// let mut seen = Vec::new();
/// let mut driver = Driver::new(SturmianWord::new());
/// let done = driver.run(|d: Direction| {
///     seen.push(d);
///     seen.len() == 4
/// });
/// assert_eq!(done.moves, 4);
/// assert_eq!(done.blocks, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Driver<S> {
    source: S,
}

impl<S: BitSource> Driver<S> {
    /// Wraps `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Emits moves into `sink` until it returns `true`.
    ///
    /// Bits are consumed from the owned source, so a second call starts
    /// with the block after the one the first call stopped in. The unsent
    /// tail of an interrupted block is dropped.
    pub fn run<K: MoveSink>(&mut self, mut sink: K) -> Termination {
        let mut done = Termination::default();
        loop {
            let block = Block::from_bit(self.source.next_bit());
            done.blocks += 1;
            for _ in 0..block.rights() {
                done.moves += 1;
                if sink.signal(Direction::Right) {
                    return done;
                }
            }
            done.moves += 1;
            if sink.signal(Direction::Up) {
                return done;
            }
        }
    }

    /// The bit source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the bit source.
    pub fn into_inner(self) -> S {
        self.source
    }
}
