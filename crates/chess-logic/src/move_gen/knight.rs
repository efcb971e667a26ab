//! Knight move generation
//!
//! Fixed offset list filtered to the board and to squares not held by an
//! own piece.

use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

const JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(super) fn generate(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    for &(d_file, d_rank) in &JUMPS {
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
