//! Serializable session state
//!
//! The view of one game session that is broadcast to room participants
//! after every applied move and attached to game-over notifications.
//! It mirrors the authoritative in-memory session; clients never send
//! it back.

use chess_logic::{CastlingSide, Color, Piece, PieceType, Square};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One applied half-move. Immutable once appended; `seq` is the ply,
/// gapless and strictly increasing from 1 within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub castling: Option<CastlingSide>,
    pub seq: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    /// Live pieces, each carrying its square.
    pub pieces: Vec<Piece>,
    /// Captured pieces, retained for fallen-piece accounting.
    pub fallen: Vec<Piece>,
    pub active_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkmate: Option<Color>,
    pub move_history: Vec<MoveRecord>,
    /// FEN-style snapshot of the same position, for audit/replay.
    pub fen: String,
}
