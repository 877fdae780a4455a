//! Board shapes, parsing, and enumeration.

use core::fmt;
use core::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::SimError;

/// Largest accepted cell count. The visited set is a bitset over all cells,
/// so this caps it at 512 MiB.
pub const MAX_AREA: u64 = 1 << 32;

/// An `A × B` torus: `width` columns, `height` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Board {
    /// Width A (RIGHT wraps after A moves).
    pub width: u64,
    /// Height B (UP wraps after B moves).
    pub height: u64,
}

impl Board {
    /// A board with both sides positive and at most [`MAX_AREA`] cells.
    ///
    /// # Errors
    ///
    /// [`SimError::EmptyBoard`] if either side is zero,
    /// [`SimError::BoardTooLarge`] if the area exceeds [`MAX_AREA`].
    pub fn new(width: u64, height: u64) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyBoard { width, height });
        }
        match width.checked_mul(height) {
            Some(area) if area <= MAX_AREA && usize::try_from(area).is_ok() => {
                Ok(Self { width, height })
            }
            _ => Err(SimError::BoardTooLarge {
                width,
                height,
                max: MAX_AREA,
            }),
        }
    }

    /// Cell count `S = A·B`.
    pub const fn area(&self) -> u64 {
        self.width * self.height
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Board {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimError::InvalidBoard(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let (a, b) = lower.split_once('x').ok_or_else(invalid)?;
        let width = a.trim().parse::<u64>().map_err(|_| invalid())?;
        let height = b.trim().parse::<u64>().map_err(|_| invalid())?;
        Self::new(width, height)
    }
}

/// Every board with `S < max_area`, height-major: `1×1, 2×1, …, 1×2, …`.
///
/// `max_area` is clamped to `MAX_AREA + 1`.
pub fn all_boards(max_area: u64) -> impl Iterator<Item = Board> {
    let max_area = clamp_bound(max_area);
    (1..max_area)
        .map(move |height| (height, max_area.saturating_sub(1) / height))
        .take_while(|&(_, max_width)| max_width > 0)
        .flat_map(|(height, max_width)| (1..=max_width).map(move |width| Board { width, height }))
}

/// Number of boards [`all_boards`] yields.
pub fn board_count(max_area: u64) -> u64 {
    let max_area = clamp_bound(max_area);
    (1..max_area)
        .map(|height| max_area.saturating_sub(1) / height)
        .take_while(|&w| w > 0)
        .sum()
}

/// `count` random boards with `S < max_area`, reproducible from `seed`.
///
/// The height is drawn uniformly from `[1, max_area)` and the width
/// uniformly from the widths that keep the area below the bound, so short
/// wide boards and tall narrow ones are both well represented.
pub fn sample_boards(count: usize, max_area: u64, seed: u64) -> Vec<Board> {
    let max_area = clamp_bound(max_area);
    if max_area < 2 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let height = rng.gen_range(1..max_area);
            let max_width = (max_area - 1) / height;
            let width = rng.gen_range(1..=max_width);
            Board { width, height }
        })
        .collect()
}

/// Exclusive area bound no larger than what [`Board::new`] accepts.
const fn clamp_bound(max_area: u64) -> u64 {
    if max_area > MAX_AREA {
        MAX_AREA + 1
    } else {
        max_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "18x26226".parse::<Board>().unwrap(),
            Board {
                width: 18,
                height: 26226
            }
        );
        assert_eq!(
            " 3X5 ".parse::<Board>().unwrap(),
            Board {
                width: 3,
                height: 5
            }
        );
    }

    #[test]
    fn test_parse_rejects() {
        for bad in ["", "3", "x3", "3x", "3x-1", "3x3x3", "axb", "3*3"] {
            assert!(
                matches!(bad.parse::<Board>(), Err(SimError::InvalidBoard(_))),
                "{bad:?}"
            );
        }
        assert!(matches!(
            "0x5".parse::<Board>(),
            Err(SimError::EmptyBoard {
                width: 0,
                height: 5
            })
        ));
        assert!(matches!(
            format!("{}x2", u64::MAX).parse::<Board>(),
            Err(SimError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_area_limit() {
        assert!(matches!(
            "4000000000x4000000000".parse::<Board>(),
            Err(SimError::BoardTooLarge {
                width: 4_000_000_000,
                height: 4_000_000_000,
                max: MAX_AREA
            })
        ));
        assert!(matches!(
            Board::new(65_536, 65_537),
            Err(SimError::BoardTooLarge { .. })
        ));
        let edge = Board::new(65_536, 65_536).unwrap();
        assert_eq!(edge.area(), MAX_AREA);
        assert!(matches!(
            Board::new(MAX_AREA + 1, 1),
            Err(SimError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_enumeration_respects_area_limit() {
        let boards = sample_boards(200, u64::MAX, 3);
        assert_eq!(boards.len(), 200);
        assert!(boards.iter().all(|b| b.area() <= MAX_AREA));
        assert!(boards
            .iter()
            .all(|b| Board::new(b.width, b.height).is_ok()));
    }

    #[test]
    fn test_display_round_trip() {
        let board = Board::new(57, 55).unwrap();
        assert_eq!(board.to_string(), "57x55");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_all_boards_small() {
        let boards: Vec<String> = all_boards(5).map(|b| b.to_string()).collect();
        assert_eq!(
            boards,
            ["1x1", "2x1", "3x1", "4x1", "1x2", "2x2", "1x3", "1x4"]
        );
        assert_eq!(board_count(5), 8);
    }

    #[test]
    fn test_all_boards_bound_and_count() {
        let max = 600;
        let boards: Vec<Board> = all_boards(max).collect();
        assert!(boards.iter().all(|b| b.area() < max));
        assert_eq!(boards.len() as u64, board_count(max));
        assert!(all_boards(1).next().is_none());
        assert_eq!(board_count(1), 0);
    }

    #[test]
    fn test_sample_reproducible_and_bounded() {
        let a = sample_boards(500, 10_000, 42);
        let b = sample_boards(500, 10_000, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|board| board.area() < 10_000 && board.area() > 0));
        assert_ne!(a, sample_boards(500, 10_000, 43));
        assert!(sample_boards(10, 1, 0).is_empty());
    }
}
