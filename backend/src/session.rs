//! Game sessions and the session registry
//!
//! A [`GameSession`] is the single authoritative board-and-metadata
//! instance behind one active match. It owns all mutation: every move
//! or castling request is validated here (turn order, piece ownership,
//! legality via the rules crate) and either applied atomically or
//! rejected without a trace. Given the same sequence of validated
//! inputs a session always reaches the same state, so the move history
//! doubles as a replay log.
//!
//! The [`SessionRegistry`] is the only process-wide store of live
//! sessions, keyed by room id, owned by the coordinator and passed
//! around explicitly.

use crate::error::GameError;
use chess_logic::{
    check_status, evaluate_castling, filter_safe, possible_moves, snapshot, Board, CastlingRights,
    Color, Piece, PieceType, Square,
};
use chrono::{DateTime, Utc};
use shared::{GameOverReason, MoveRecord, SessionView};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Initialized, light to move, nothing applied yet.
    AwaitingFirstMove,
    /// At least one move applied.
    Active,
    /// Terminal; the first conclusion reason is retained.
    Concluded(GameOverReason),
}

/// Result of a successfully applied move or castling.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    pub check: Option<Color>,
    pub checkmate: Option<Color>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: String,
    board: Board,
    fallen: Vec<Piece>,
    light_rights: CastlingRights,
    dark_rights: CastlingRights,
    active_color: Color,
    check: Option<Color>,
    checkmate: Option<Color>,
    history: Vec<MoveRecord>,
    status: SessionStatus,
    /// Id of the persisted match record, when persistence is engaged.
    pub external_game_id: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(id: impl Into<String>) -> Self {
        GameSession {
            id: id.into(),
            board: Board::initial(),
            fallen: Vec::new(),
            light_rights: CastlingRights::initial(Color::Light),
            dark_rights: CastlingRights::initial(Color::Dark),
            active_color: Color::Light,
            check: None,
            checkmate: None,
            history: Vec::new(),
            status: SessionStatus::AwaitingFirstMove,
            external_game_id: None,
            started_at: Utc::now(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn check(&self) -> Option<Color> {
        self.check
    }

    pub fn checkmate(&self) -> Option<Color> {
        self.checkmate
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Validate and apply an ordinary move for `requesting_color`.
    ///
    /// On success the board is mutated, castling rights are updated for
    /// the moved piece's color, check/checkmate are recomputed against
    /// the opponent, a move record is appended and the active color
    /// toggles. On any error the session is untouched.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        requesting_color: Color,
    ) -> Result<MoveOutcome, GameError> {
        self.ensure_live()?;
        if requesting_color != self.active_color {
            return Err(GameError::NotYourTurn);
        }
        let Some(piece) = self.board.occupant(from).copied() else {
            return Err(GameError::NoPieceAtSquare {
                square: from.to_string(),
            });
        };
        if piece.color != requesting_color {
            return Err(GameError::NotYourPiece {
                square: from.to_string(),
            });
        }

        let candidates = possible_moves(&self.board, &piece);
        let legal = filter_safe(&self.board, &piece, &candidates);
        if !legal.contains(to) {
            return Err(GameError::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let captured = self.board.apply_move(from, to);
        // `piece` still carries the pre-move square, which is what the
        // rights tracking keys on.
        self.rights_mut(piece.color).note_move(&piece);
        if let Some(fallen) = captured {
            self.fallen.push(fallen);
        }

        self.finish_ply(MoveRecord {
            piece: piece.kind,
            from,
            to,
            color: piece.color,
            captured: captured.map(|fallen| fallen.kind),
            castling: None,
            seq: self.history.len() as u32 + 1,
            timestamp: Utc::now(),
        })
    }

    /// Validate and apply castling for the king on `king_square` with
    /// the rook on `rook_square`.
    pub fn apply_castling(
        &mut self,
        king_square: Square,
        rook_square: Square,
        requesting_color: Color,
    ) -> Result<MoveOutcome, GameError> {
        self.ensure_live()?;
        if requesting_color != self.active_color {
            return Err(GameError::NotYourTurn);
        }
        let Some(king) = self.board.occupant(king_square).copied() else {
            return Err(GameError::NoPieceAtSquare {
                square: king_square.to_string(),
            });
        };
        if king.color != requesting_color {
            return Err(GameError::NotYourPiece {
                square: king_square.to_string(),
            });
        }
        if king.kind != PieceType::King {
            return Err(GameError::CastlingUnavailable);
        }

        let rights = self.rights(requesting_color);
        if rights.completed || rights.king_moved {
            return Err(GameError::CastlingUnavailable);
        }
        match rights.rook(rook_square) {
            Some(rook) if !rook.moved => {}
            _ => return Err(GameError::CastlingUnavailable),
        }
        let rook_present = self
            .board
            .occupant(rook_square)
            .is_some_and(|p| p.kind == PieceType::Rook && p.color == requesting_color);
        if !rook_present {
            return Err(GameError::CastlingUnavailable);
        }

        let Some(squares) = evaluate_castling(&self.board, &king, rook_square) else {
            return Err(GameError::CastlingUnavailable);
        };

        if let Some(king_piece) = self.board.clear(king_square) {
            self.board.place(squares.king_to, king_piece);
        }
        if let Some(rook_piece) = self.board.clear(rook_square) {
            self.board.place(squares.rook_to, rook_piece);
        }
        self.rights_mut(requesting_color).mark_completed();

        self.finish_ply(MoveRecord {
            piece: PieceType::King,
            from: king_square,
            to: squares.king_to,
            color: requesting_color,
            captured: None,
            castling: Some(squares.side),
            seq: self.history.len() as u32 + 1,
            timestamp: Utc::now(),
        })
    }

    /// Transition to `Concluded`. Idempotent: the first reason is
    /// retained, later calls are no-ops (disconnect and checkmate can
    /// race through the event queue).
    pub fn conclude(&mut self, reason: GameOverReason) -> GameOverReason {
        match self.status {
            SessionStatus::Concluded(first) => first,
            _ => {
                self.status = SessionStatus::Concluded(reason);
                reason
            }
        }
    }

    /// Serializable view of the full session state for broadcasts.
    pub fn view(&self) -> SessionView {
        SessionView {
            pieces: self.board.pieces().copied().collect(),
            fallen: self.fallen.clone(),
            active_color: self.active_color,
            check: self.check,
            checkmate: self.checkmate,
            move_history: self.history.clone(),
            fen: self.fen(),
        }
    }

    /// FEN-style audit snapshot of the current position.
    pub fn fen(&self) -> String {
        snapshot(
            &self.board,
            self.active_color,
            &self.light_rights,
            &self.dark_rights,
        )
    }

    fn finish_ply(&mut self, record: MoveRecord) -> Result<MoveOutcome, GameError> {
        let status = check_status(&self.board, record.color);
        self.check = status.check;
        self.checkmate = status.checkmate;
        self.history.push(record.clone());
        self.active_color = self.active_color.opposite();
        self.status = SessionStatus::Active;
        Ok(MoveOutcome {
            record,
            check: status.check,
            checkmate: status.checkmate,
        })
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        match self.status {
            SessionStatus::Concluded(_) => Err(GameError::SessionNotFound {
                room_id: self.id.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn rights(&self, color: Color) -> &CastlingRights {
        match color {
            Color::Light => &self.light_rights,
            Color::Dark => &self.dark_rights,
        }
    }

    fn rights_mut(&mut self, color: Color) -> &mut CastlingRights {
        match color {
            Color::Light => &mut self.light_rights,
            Color::Dark => &mut self.dark_rights,
        }
    }
}

/// Process-wide store of live sessions, keyed by room id. Created and
/// destroyed by match lifecycle events; only the coordinator touches it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, GameSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// Create the session for `room_id`, replacing any stale entry.
    pub fn create(&mut self, room_id: &str) -> &mut GameSession {
        self.sessions
            .insert(room_id.to_string(), GameSession::new(room_id));
        self.sessions
            .get_mut(room_id)
            .expect("session inserted above")
    }

    pub fn get(&self, room_id: &str) -> Result<&GameSession, GameError> {
        self.sessions
            .get(room_id)
            .ok_or_else(|| GameError::SessionNotFound {
                room_id: room_id.to_string(),
            })
    }

    pub fn get_mut(&mut self, room_id: &str) -> Result<&mut GameSession, GameError> {
        self.sessions
            .get_mut(room_id)
            .ok_or_else(|| GameError::SessionNotFound {
                room_id: room_id.to_string(),
            })
    }

    pub fn remove(&mut self, room_id: &str) -> Option<GameSession> {
        self.sessions.remove(room_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
