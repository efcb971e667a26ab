//! King move generation
//!
//! One step in any of the eight directions. Castling destinations are
//! not produced here; a king reaches those only through the castling
//! evaluator, which owns the unmoved/clear-path preconditions.

use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

const STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(super) fn generate(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    for &(d_file, d_rank) in &STEPS {
        let Some(next) = piece.square.offset(d_file, d_rank) else {
            continue;
        };
        match board.occupant(next) {
            None => moves.visits.push(next),
            Some(other) if other.color != piece.color => moves.kills.push(next),
            Some(_) => {}
        }
    }
}
