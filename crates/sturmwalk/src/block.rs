//! Block assembly.
//!
//! One bit becomes one block: `t = 1 + bit` moves RIGHT, then one move UP.
//!
//! ```text
//! bit 0  →  R U
//! bit 1  →  R R U
//! ```

use core::fmt;

use crate::source::BitSource;

/// A move direction at the sink boundary.
///
/// The engine only ever emits [`Direction::Right`] and [`Direction::Up`];
/// the other two exist so a sink can share the type with a wider protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// +1 column.
    Right,
    /// −1 column.
    Left,
    /// +1 row.
    Up,
    /// −1 row.
    Down,
}

impl Direction {
    /// Upper-case protocol name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Right => "RIGHT",
            Self::Left => "LEFT",
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `t` RIGHT moves followed by one UP, `t ∈ {1, 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    rights: u8,
}

impl Block {
    /// The block for `bit`: `t = 1 + bit`. Any non-zero input counts as 1.
    #[inline]
    #[must_use]
    pub const fn from_bit(bit: u8) -> Self {
        Self {
            rights: 1 + (bit != 0) as u8,
        }
    }

    /// Number of RIGHT moves `t`.
    #[inline]
    #[must_use]
    pub const fn rights(self) -> u8 {
        self.rights
    }

    /// Total moves in the block, `t + 1`.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u8 {
        self.rights + 1
    }

    /// Always false.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Move `k` of the block, `k < len()`.
    #[inline]
    #[must_use]
    pub const fn step(self, k: u8) -> Direction {
        if k < self.rights {
            Direction::Right
        } else {
            Direction::Up
        }
    }
}

/// Infinite iterator of blocks over a bit source.
#[derive(Debug, Clone)]
pub struct Blocks<S> {
    source: S,
}

impl<S: BitSource> Blocks<S> {
    /// Wraps `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: BitSource> Iterator for Blocks<S> {
    type Item = Block;

    #[inline]
    fn next(&mut self) -> Option<Block> {
        Some(Block::from_bit(self.source.next_bit()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Infinite iterator of individual moves over a bit source.
///
/// # Example
///
/// ```
/// use sturmwalk::{Direction, Moves, SturmianWord};
///
/// let head: Vec<Direction> = Moves::new(SturmianWord::new()).take(5).collect();
/// // bits 0, 1 → R U, R R U
/// assert_eq!(
///     head,
///     [Direction::Right, Direction::Up, Direction::Right, Direction::Right, Direction::Up]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Moves<S> {
    blocks: Blocks<S>,
    current: Block,
    /// Position inside `current`; `current.len()` means exhausted.
    step: u8,
}

impl<S: BitSource> Moves<S> {
    /// Wraps `source`.
    pub const fn new(source: S) -> Self {
        let current = Block::from_bit(0);
        Self {
            blocks: Blocks::new(source),
            current,
            step: current.len(),
        }
    }
}

impl<S: BitSource> Iterator for Moves<S> {
    type Item = Direction;

    fn next(&mut self) -> Option<Direction> {
        if self.step == self.current.len() {
            self.current = Block::from_bit(self.blocks.source.next_bit());
            self.step = 0;
        }
        let direction = self.current.step(self.step);
        self.step += 1;
        Some(direction)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
