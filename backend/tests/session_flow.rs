//! Session-level game flow tests
//!
//! Drive a `GameSession` through full sequences of validated moves and
//! verify the state machine: turn alternation, gapless ply numbering,
//! check/checkmate detection, castling and its rejections, and the
//! idempotent conclusion.

use backend::error::GameError;
use backend::session::{GameSession, SessionStatus};
use chess_logic::{Color, PieceType, Square};
use shared::GameOverReason;

fn sq(label: &str) -> Square {
    label.parse().expect("valid square label")
}

/// Apply an alternating sequence of moves that must all succeed.
fn play(session: &mut GameSession, moves: &[(&str, &str)]) {
    for (index, (from, to)) in moves.iter().enumerate() {
        let color = if index % 2 == 0 {
            Color::Light
        } else {
            Color::Dark
        };
        session
            .apply_move(sq(from), sq(to), color)
            .unwrap_or_else(|err| panic!("move {from}->{to} rejected: {err}"));
    }
}

#[test]
fn opening_pawn_push() {
    let mut session = GameSession::new("room");
    let outcome = session
        .apply_move(sq("e2"), sq("e4"), Color::Light)
        .expect("e4 is legal");
    assert_eq!(outcome.record.piece, PieceType::Pawn);
    assert_eq!(outcome.record.captured, None);
    assert_eq!(session.active_color(), Color::Dark);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].seq, 1);
}

#[test]
fn active_color_strictly_alternates_and_plies_are_gapless() {
    let mut session = GameSession::new("room");
    play(
        &mut session,
        &[("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")],
    );
    assert_eq!(session.active_color(), Color::Light);
    let seqs: Vec<u32> = session.history().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4]);
    let colors: Vec<Color> = session.history().iter().map(|r| r.color).collect();
    assert_eq!(
        colors,
        vec![Color::Light, Color::Dark, Color::Light, Color::Dark]
    );
}

#[test]
fn fools_mate_ends_in_checkmate_for_light() {
    let mut session = GameSession::new("room");
    play(&mut session, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    let outcome = session
        .apply_move(sq("d8"), sq("h4"), Color::Dark)
        .expect("queen to h4 is legal");
    assert_eq!(outcome.check, Some(Color::Light));
    assert_eq!(outcome.checkmate, Some(Color::Light));
    assert_eq!(session.checkmate(), Some(Color::Light));
    assert_eq!(session.history().len(), 4);
}

#[test]
fn capture_is_recorded_and_piece_falls() {
    let mut session = GameSession::new("room");
    play(&mut session, &[("e2", "e4"), ("d7", "d5")]);
    let outcome = session
        .apply_move(sq("e4"), sq("d5"), Color::Light)
        .expect("pawn takes d5");
    assert_eq!(outcome.record.captured, Some(PieceType::Pawn));

    let view = session.view();
    assert_eq!(view.fallen.len(), 1);
    assert_eq!(view.fallen[0].color, Color::Dark);
    assert!(!view.fallen[0].alive);
    assert_eq!(view.pieces.len(), 31);
}

#[test]
fn move_that_leaves_own_king_in_check_is_rejected() {
    let mut session = GameSession::new("room");
    play(
        &mut session,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("d1", "h5"),
            ("a7", "a6"),
            ("h5", "f7"), // queen takes f7: dark is in check
        ],
    );
    assert_eq!(session.check(), Some(Color::Dark));

    let fen_before = session.fen();
    let err = session
        .apply_move(sq("a6"), sq("a5"), Color::Dark)
        .expect_err("a5 does not address the check");
    assert!(matches!(err, GameError::IllegalMove { .. }));
    assert_eq!(session.fen(), fen_before, "rejection must not mutate state");

    // Capturing the undefended queen with the king resolves it.
    session
        .apply_move(sq("e8"), sq("f7"), Color::Dark)
        .expect("king takes the attacker");
    assert_eq!(session.check(), None);
}

#[test]
fn kingside_castling_moves_both_pieces_and_completes_rights() {
    let mut session = GameSession::new("room");
    play(
        &mut session,
        &[
            ("g1", "f3"),
            ("a7", "a6"),
            ("e2", "e3"),
            ("b7", "b6"),
            ("f1", "e2"),
            ("c7", "c6"),
        ],
    );
    let outcome = session
        .apply_castling(sq("e1"), sq("h1"), Color::Light)
        .expect("kingside castling is available");
    assert_eq!(outcome.record.piece, PieceType::King);
    assert_eq!(outcome.record.to, sq("g1"));
    assert!(outcome.record.castling.is_some());

    let board = session.board();
    assert_eq!(
        board.occupant(sq("g1")).map(|p| p.kind),
        Some(PieceType::King)
    );
    assert_eq!(
        board.occupant(sq("f1")).map(|p| p.kind),
        Some(PieceType::Rook)
    );
    assert!(board.occupant(sq("e1")).is_none());
    assert!(board.occupant(sq("h1")).is_none());

    // Rights are closed: the FEN castling field loses the light tokens.
    let fen = session.fen();
    let tokens: Vec<&str> = fen.split(' ').collect();
    assert_eq!(tokens[2], "kq");
    assert_eq!(session.active_color(), Color::Dark);
}

#[test]
fn castling_after_rook_moved_is_unavailable() {
    let mut session = GameSession::new("room");
    play(
        &mut session,
        &[
            ("g1", "f3"),
            ("a7", "a6"),
            ("h1", "g1"), // rook leaves the corner
            ("b7", "b6"),
            ("g1", "h1"), // and returns
            ("c7", "c6"),
        ],
    );
    let err = session
        .apply_castling(sq("e1"), sq("h1"), Color::Light)
        .expect_err("the rook has moved");
    assert_eq!(err, GameError::CastlingUnavailable);
}

#[test]
fn castling_with_blocked_path_is_unavailable() {
    let mut session = GameSession::new("room");
    // Only the knight square is vacated; the bishop still sits on f1.
    play(&mut session, &[("g1", "f3"), ("a7", "a6")]);
    let err = session
        .apply_castling(sq("e1"), sq("h1"), Color::Light)
        .expect_err("f1 is occupied");
    assert_eq!(err, GameError::CastlingUnavailable);
}

#[test]
fn conclude_is_idempotent_and_blocks_further_play() {
    let mut session = GameSession::new("room");
    play(&mut session, &[("e2", "e4")]);
    assert_eq!(
        session.conclude(GameOverReason::Resign),
        GameOverReason::Resign
    );
    assert_eq!(
        session.conclude(GameOverReason::Disconnect),
        GameOverReason::Resign,
        "the first conclusion reason is retained"
    );
    assert_eq!(
        session.status(),
        SessionStatus::Concluded(GameOverReason::Resign)
    );
    assert!(matches!(
        session.apply_move(sq("e7"), sq("e5"), Color::Dark),
        Err(GameError::SessionNotFound { .. })
    ));
}

#[test]
fn snapshot_is_stable_across_repeated_calls() {
    let mut session = GameSession::new("room");
    play(&mut session, &[("e2", "e4"), ("c7", "c5"), ("g1", "f3")]);
    let first = session.fen();
    assert_eq!(session.fen(), first);
    assert_eq!(session.view().fen, first);
    assert_eq!(
        first,
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 1"
    );
}

#[test]
fn replaying_the_same_inputs_reproduces_the_same_state() {
    let script = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "c4"),
        ("g8", "f6"),
    ];
    let mut a = GameSession::new("a");
    let mut b = GameSession::new("b");
    play(&mut a, &script);
    play(&mut b, &script);
    assert_eq!(a.fen(), b.fen());
    assert_eq!(a.history().len(), b.history().len());
    for (x, y) in a.history().iter().zip(b.history()) {
        assert_eq!((x.piece, x.from, x.to, x.color, x.seq), (y.piece, y.from, y.to, y.color, y.seq));
    }
}
