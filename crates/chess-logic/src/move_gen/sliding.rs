//! Sliding piece move generation
//!
//! Common walk for rooks, bishops and queens: follow each direction
//! vector until the board edge, stopping short of an own piece and
//! including an enemy piece's square as a capture before stopping.

use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

pub(super) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(super) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(super) fn walk(board: &Board, piece: &Piece, directions: &[(i8, i8)], moves: &mut MoveSet) {
    for &(d_file, d_rank) in directions {
        let mut square = piece.square;
        while let Some(next) = square.offset(d_file, d_rank) {
            match board.occupant(next) {
                None => {
                    moves.visits.push(next);
                    square = next;
                }
                Some(other) if other.color != piece.color => {
                    moves.kills.push(next);
                    break;
                }
                Some(_) => break,
            }
        }
    }
}
