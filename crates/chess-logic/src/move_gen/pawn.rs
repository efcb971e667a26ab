//! Pawn move generation
//!
//! Forward pushes go into `visits` only while the path is clear: one
//! square always, two squares only from the pawn's home rank with both
//! intervening squares empty. Diagonal steps go into `kills` and only
//! when the square actually holds an enemy piece. En passant is not
//! modeled.

use super::MoveSet;
use crate::board::Board;
use crate::piece::Piece;

pub(super) fn generate(board: &Board, piece: &Piece, moves: &mut MoveSet) {
    let forward = piece.color.forward();

    for step in 1..=2 {
        if step == 2 && piece.square.rank != piece.color.pawn_rank() {
            break;
        }
        let Some(next) = piece.square.offset(0, forward * step) else {
            break;
        };
        if board.occupant(next).is_some() {
            break;
        }
        moves.visits.push(next);
    }

    for side in [-1, 1] {
        let Some(diagonal) = piece.square.offset(side, forward) else {
            continue;
        };
        if let Some(other) = board.occupant(diagonal) {
            if other.color != piece.color {
                moves.kills.push(diagonal);
            }
        }
    }
}
