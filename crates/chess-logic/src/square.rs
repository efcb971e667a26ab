//! Square addressing
//!
//! Squares are (file, rank) pairs with both components in 0..8. Externally
//! they travel either as the pair itself or as a label such as `"e2"`
//! (file letter + rank digit), which is the form used in notation, FEN
//! snapshots and audit logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Files a..h, indexed 0..8.
pub const FILE_KEYS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Ranks 1..8, indexed 0..8. Rank 0 is the light side's back rank.
pub const RANK_KEYS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// A board coordinate. Only values with both components in 0..8 denote a
/// real square; [`Square::is_on_board`] checks that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }

    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.file) && (0..8).contains(&self.rank)
    }

    /// Step by a (file, rank) delta, returning `None` when the result
    /// would leave the board. Generators use this so that off-board
    /// destinations are never produced.
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        let next = Square::new(self.file + d_file, self.rank + d_rank);
        next.is_on_board().then_some(next)
    }

    /// The external label, e.g. `"e2"` for (4, 1).
    pub fn label(self) -> String {
        format!(
            "{}{}",
            FILE_KEYS[self.file as usize], RANK_KEYS[self.rank as usize]
        )
    }

    /// Linear index 0..64 (rank-major, a1 = 0).
    pub(crate) fn index(self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    pub(crate) fn from_index(index: usize) -> Square {
        Square::new((index % 8) as i8, (index / 8) as i8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", self.label())
        } else {
            write!(f, "({},{})", self.file, self.rank)
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid square label: {0:?}")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) =
            (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseSquareError(s.to_string()));
        };
        let file = FILE_KEYS.iter().position(|&c| c == file_char);
        let rank = RANK_KEYS.iter().position(|&c| c == rank_char);
        match (file, rank) {
            (Some(f), Some(r)) => Ok(Square::new(f as i8, r as i8)),
            _ => Err(ParseSquareError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip() {
        for index in 0..64 {
            let square = Square::from_index(index);
            let parsed: Square = square.label().parse().expect("label should parse");
            assert_eq!(parsed, square);
        }
    }

    #[test]
    fn e2_is_file_4_rank_1() {
        let square: Square = "e2".parse().unwrap();
        assert_eq!(square, Square::new(4, 1));
        assert_eq!(square.label(), "e2");
    }

    #[test]
    fn offset_rejects_off_board() {
        assert_eq!(Square::new(0, 0).offset(-1, 0), None);
        assert_eq!(Square::new(7, 7).offset(1, 1), None);
        assert_eq!(Square::new(4, 1), Square::new(4, 0).offset(0, 1).unwrap());
    }

    #[test]
    fn bad_labels_are_rejected() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e22".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }
}
