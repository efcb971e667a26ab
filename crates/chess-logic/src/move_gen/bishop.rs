//! Bishop move generation: the four diagonal rays.

use super::sliding::{walk, DIAGONALS};
use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

pub(super) fn generate(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    walk(board, piece, &DIAGONALS, moves);
}
