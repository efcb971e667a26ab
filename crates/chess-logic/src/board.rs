//! Board model
//!
//! An owned 8x8 mailbox: one optional piece per square, mutated in place.
//! The board performs no rule validation of its own (`occupant`, `place`
//! and `clear` trust the caller); game sessions are the only writers.
//! `Clone` is cheap enough that the king-safety filter simulates
//! candidate moves on a copy without touching the live board.

use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

#[derive(Debug, Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Standard starting position: light on ranks 1-2, dark on ranks 7-8.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for color in [Color::Light, Color::Dark] {
            let back = color.home_rank();
            let back_rank = [
                PieceType::Rook,
                PieceType::Knight,
                PieceType::Bishop,
                PieceType::Queen,
                PieceType::King,
                PieceType::Bishop,
                PieceType::Knight,
                PieceType::Rook,
            ];
            for (file, kind) in back_rank.into_iter().enumerate() {
                let square = Square::new(file as i8, back);
                board.place(square, Piece::new(kind, color, square));
            }
            for file in 0..8 {
                let square = Square::new(file, color.pawn_rank());
                board.place(square, Piece::new(PieceType::Pawn, color, square));
            }
        }
        board
    }

    pub fn occupant(&self, square: Square) -> Option<&Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.squares[square.index()].as_ref()
    }

    /// Put `piece` on `square`, keeping the piece's own coordinate in
    /// sync. Any previous occupant is overwritten; callers that care use
    /// [`Board::clear`] or [`Board::apply_move`] instead.
    pub fn place(&mut self, square: Square, mut piece: Piece) {
        piece.square = square;
        self.squares[square.index()] = Some(piece);
    }

    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Relocate the piece on `from` to `to`, returning the captured
    /// occupant of `to` (if any) with its alive flag cleared. No legality
    /// checks; a missing source piece is a no-op returning `None`.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let Some(piece) = self.clear(from) else {
            return None;
        };
        let captured = self.clear(to).map(|mut fallen| {
            fallen.alive = false;
            fallen
        });
        self.place(to, piece);
        captured
    }

    /// All live pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceType::King)
            .map(|king| king.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_has_32_pieces() {
        let board = Board::initial();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_of(Color::Light).count(), 16);
        assert_eq!(board.king_square(Color::Light), Some(Square::new(4, 0)));
        assert_eq!(board.king_square(Color::Dark), Some(Square::new(4, 7)));
    }

    #[test]
    fn apply_move_relocates_and_marks_capture() {
        let mut board = Board::empty();
        let from = Square::new(0, 0);
        let to = Square::new(0, 7);
        board.place(from, Piece::new(PieceType::Rook, Color::Light, from));
        board.place(to, Piece::new(PieceType::Rook, Color::Dark, to));

        let captured = board.apply_move(from, to).expect("capture expected");
        assert!(!captured.alive);
        assert_eq!(captured.color, Color::Dark);
        assert!(board.occupant(from).is_none());
        let mover = board.occupant(to).expect("rook should have landed");
        assert_eq!(mover.color, Color::Light);
        assert_eq!(mover.square, to);
    }

    #[test]
    fn at_most_one_piece_per_square() {
        let mut board = Board::initial();
        board.apply_move(Square::new(4, 1), Square::new(4, 3));
        let occupied = board.pieces().count();
        // One square vacated, one filled: still a piece-per-square map.
        assert_eq!(occupied, 32);
        assert!(board.occupant(Square::new(4, 1)).is_none());
    }
}
