//! Chess rules engine
//!
//! Pure board/move/legality logic with no I/O and no async. The server
//! crates own game sessions and turn order; this crate answers the
//! questions they ask: which squares a piece may visit or capture on,
//! whether a move would expose the mover's own king, whether castling is
//! available, and whether the side to move is in check or checkmated.

pub mod attack;
pub mod board;
pub mod castling;
pub mod fen;
pub mod move_gen;
pub mod notation;
pub mod piece;
pub mod safety;
pub mod square;

pub use attack::{check_status, is_attacked, CheckStatus};
pub use board::Board;
pub use castling::{evaluate_castling, CastlingRights, CastlingSide, CastlingSquares, RookState};
pub use fen::snapshot;
pub use move_gen::{possible_moves, MoveSet};
pub use notation::{algebraic, NotationInput};
pub use piece::{Color, Piece, PieceType};
pub use safety::filter_safe;
pub use square::{ParseSquareError, Square};
