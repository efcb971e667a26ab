//! Error types for the game server
//!
//! Every variant is a recoverable, request-scoped rejection: it is
//! reported to the single requester and never terminates a session or
//! touches other participants. `kind()` is the stable machine-readable
//! discriminator carried in error notifications; `Display` is the human
//! message.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// Move/castling/query against an unknown or already-concluded
    /// session. Indicates the caller holds a stale room/session mapping.
    #[error("no active game for room {room_id}")]
    SessionNotFound { room_id: String },

    /// Acting color is not the session's active color.
    #[error("it is not your turn")]
    NotYourTurn,

    /// The move's source square is empty.
    #[error("no piece at {square}")]
    NoPieceAtSquare { square: String },

    /// The piece on the source square belongs to the opponent.
    #[error("the piece at {square} is not yours")]
    NotYourPiece { square: String },

    /// Destination is not in the legal (king-safety-filtered) set.
    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: String, to: String },

    /// Rights lost, path blocked, or castling already completed.
    #[error("castling is not available")]
    CastlingUnavailable,

    /// Join rejected: the room already has two participants.
    #[error("room {room_id} is full")]
    RoomFull { room_id: String },

    /// Join rejected: the match has already started (or finished).
    #[error("room {room_id} has already started")]
    RoomAlreadyStarted { room_id: String },

    /// Join rejected: this participant is already in the room.
    #[error("already a participant of room {room_id}")]
    DuplicateParticipant { room_id: String },

    /// The referenced room does not exist.
    #[error("room {room_id} not found")]
    RoomNotFound { room_id: String },

    /// The requester is not a participant of any room (or holds no seat
    /// in the referenced one).
    #[error("you are not in a room")]
    NotInRoom,

    /// Start rejected: not the creator, or not enough participants.
    #[error("cannot start the game: {reason}")]
    CannotStart { reason: &'static str },
}

impl GameError {
    /// Stable snake_case discriminator for the wire protocol.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::SessionNotFound { .. } => "session_not_found",
            GameError::NotYourTurn => "not_your_turn",
            GameError::NoPieceAtSquare { .. } => "no_piece_at_square",
            GameError::NotYourPiece { .. } => "not_your_piece",
            GameError::IllegalMove { .. } => "illegal_move",
            GameError::CastlingUnavailable => "castling_unavailable",
            GameError::RoomFull { .. } => "room_full",
            GameError::RoomAlreadyStarted { .. } => "room_already_started",
            GameError::DuplicateParticipant { .. } => "duplicate_participant",
            GameError::RoomNotFound { .. } => "room_not_found",
            GameError::NotInRoom => "not_in_room",
            GameError::CannotStart { .. } => "cannot_start",
        }
    }
}
