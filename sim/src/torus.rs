//! The judge: a torus that tracks the agent and the cells it has seen.

use sturmwalk::Direction;

use crate::board::Board;

/// Position and visited set on an `A × B` torus.
///
/// The agent starts on `(0, 0)`, which counts as visited. Coordinates wrap:
/// RIGHT is `x + 1 mod A`, UP is `y + 1 mod B`.
#[derive(Debug, Clone)]
pub struct Torus {
    board: Board,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    visited: Vec<u64>,
    covered: usize,
    moves: u64,
}

impl Torus {
    /// An empty torus with the agent on `(0, 0)`.
    pub fn new(board: Board) -> Self {
        // Board::new guarantees the area fits in usize.
        let width = board.width as usize;
        let height = board.height as usize;
        let area = width * height;
        let mut torus = Self {
            board,
            width,
            height,
            x: 0,
            y: 0,
            visited: vec![0; area.div_ceil(64)],
            covered: 0,
            moves: 0,
        };
        torus.mark();
        torus
    }

    /// Applies one move and marks the new cell.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Right => self.x = (self.x + 1) % self.width,
            Direction::Left => self.x = (self.x + self.width - 1) % self.width,
            Direction::Up => self.y = (self.y + 1) % self.height,
            Direction::Down => self.y = (self.y + self.height - 1) % self.height,
        }
        self.moves += 1;
        self.mark();
    }

    fn mark(&mut self) {
        let cell = self.y * self.width + self.x;
        let (word, bit) = (cell / 64, 1u64 << (cell % 64));
        if self.visited[word] & bit == 0 {
            self.visited[word] |= bit;
            self.covered += 1;
        }
    }

    /// Whether every cell has been visited.
    pub fn is_complete(&self) -> bool {
        self.covered == self.width * self.height
    }

    /// Whether `(x, y)` has been visited. Coordinates are taken modulo the
    /// board sides.
    pub fn is_visited(&self, x: u64, y: u64) -> bool {
        let x = (x % self.board.width) as usize;
        let y = (y % self.board.height) as usize;
        let cell = y * self.width + x;
        self.visited[cell / 64] & (1u64 << (cell % 64)) != 0
    }

    /// Current `(x, y)`.
    pub fn position(&self) -> (u64, u64) {
        (self.x as u64, self.y as u64)
    }

    /// Number of distinct visited cells.
    pub fn covered(&self) -> u64 {
        self.covered as u64
    }

    /// Moves applied so far.
    pub const fn moves(&self) -> u64 {
        self.moves
    }

    /// The board being walked.
    pub const fn board(&self) -> Board {
        self.board
    }
}
