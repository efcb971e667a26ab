//! Standard algebraic notation
//!
//! Renders a finished move for move lists and persisted game records:
//! `e4`, `Nxe5+`, `exd4`, `O-O-O#`. Disambiguation between two identical
//! pieces reaching the same square is not emitted; the stored from/to
//! pair keeps records unambiguous.

use crate::castling::CastlingSide;
use crate::piece::PieceType;
use crate::square::{Square, FILE_KEYS};

#[derive(Debug, Clone, Copy)]
pub struct NotationInput {
    pub kind: PieceType,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
    pub castling: Option<CastlingSide>,
    pub is_check: bool,
    pub is_checkmate: bool,
}

pub fn algebraic(input: &NotationInput) -> String {
    if let Some(side) = input.castling {
        let base = match side {
            CastlingSide::Kingside => "O-O",
            CastlingSide::Queenside => "O-O-O",
        };
        return format!("{}{}", base, suffix(input));
    }

    let target = input.to.label();
    let captures = if input.captured.is_some() { "x" } else { "" };

    if input.kind == PieceType::Pawn {
        // Pawn captures are prefixed with the source file: exd4.
        let file_prefix = if input.captured.is_some() {
            FILE_KEYS[input.from.file as usize].to_string()
        } else {
            String::new()
        };
        return format!("{}{}{}{}", file_prefix, captures, target, suffix(input));
    }

    format!("{}{}{}{}", input.kind.symbol(), captures, target, suffix(input))
}

fn suffix(input: &NotationInput) -> &'static str {
    if input.is_checkmate {
        "#"
    } else if input.is_check {
        "+"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(kind: PieceType, from: &str, to: &str) -> NotationInput {
        NotationInput {
            kind,
            from: from.parse().unwrap(),
            to: to.parse().unwrap(),
            captured: None,
            castling: None,
            is_check: false,
            is_checkmate: false,
        }
    }

    #[test]
    fn pawn_push_and_capture() {
        assert_eq!(algebraic(&plain(PieceType::Pawn, "e2", "e4")), "e4");
        let mut capture = plain(PieceType::Pawn, "e3", "d4");
        capture.captured = Some(PieceType::Knight);
        assert_eq!(algebraic(&capture), "exd4");
    }

    #[test]
    fn piece_moves_with_check_suffixes() {
        let mut input = plain(PieceType::Knight, "g1", "f3");
        assert_eq!(algebraic(&input), "Nf3");
        input.captured = Some(PieceType::Pawn);
        input.is_check = true;
        assert_eq!(algebraic(&input), "Nxf3+");
        input.is_checkmate = true;
        assert_eq!(algebraic(&input), "Nxf3#");
    }

    #[test]
    fn castling_notation() {
        let mut input = plain(PieceType::King, "e1", "g1");
        input.castling = Some(CastlingSide::Kingside);
        assert_eq!(algebraic(&input), "O-O");
        input.castling = Some(CastlingSide::Queenside);
        input.is_checkmate = true;
        assert_eq!(algebraic(&input), "O-O-O#");
    }
}
