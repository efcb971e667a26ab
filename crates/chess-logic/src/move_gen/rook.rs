//! Rook move generation: the four orthogonal rays.

use super::sliding::{walk, ORTHOGONALS};
use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

pub(super) fn generate(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    walk(board, piece, &ORTHOGONALS, moves);
}
