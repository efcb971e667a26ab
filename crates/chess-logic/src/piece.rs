//! Piece and color types
//!
//! Closed enums for the two colors and six piece types so every `match`
//! over them is exhaustiveness-checked, plus the piece record itself.
//! A captured piece stays in the session's fallen list with `alive`
//! cleared; it is never deleted, so captured-material accounting can be
//! rebuilt from state alone.

use crate::square::Square;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// FEN active-color token.
    pub fn fen_token(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }

    /// Back rank: where the king and rooks start.
    pub fn home_rank(self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Rank the pawns start on; a pawn still there may advance two squares.
    pub fn pawn_rank(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// Direction of travel along ranks: light moves up, dark moves down.
    pub fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// Conventional material value, used for fallen-piece accounting.
    pub fn points(self) -> u32 {
        match self {
            PieceType::King => 0,
            PieceType::Queen => 9,
            PieceType::Rook => 5,
            PieceType::Bishop => 3,
            PieceType::Knight => 3,
            PieceType::Pawn => 1,
        }
    }

    /// Lowercase FEN letter; uppercased for light pieces by the encoder.
    pub fn fen_char(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
        }
    }

    /// Algebraic-notation symbol; pawns have none.
    pub fn symbol(self) -> &'static str {
        match self {
            PieceType::King => "K",
            PieceType::Queen => "Q",
            PieceType::Rook => "R",
            PieceType::Bishop => "B",
            PieceType::Knight => "N",
            PieceType::Pawn => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    pub square: Square,
    pub alive: bool,
    pub points: u32,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            alive: true,
            points: kind.points(),
        }
    }
}
