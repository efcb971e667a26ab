//! Queen move generation: orthogonal and diagonal rays combined.

use super::sliding::{walk, DIAGONALS, ORTHOGONALS};
use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

pub(super) fn generate(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    walk(board, piece, &ORTHOGONALS, moves);
    walk(board, piece, &DIAGONALS, moves);
}
