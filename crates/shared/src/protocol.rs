//! Wire protocol
//!
//! JSON messages exchanged over the WebSocket gateway, tagged by a
//! `type` field so clients can dispatch without peeking at payloads.
//! Client events carry the acting participant implicitly (the
//! connection); the server resolves identity to a color before touching
//! a session.

use crate::room::{Player, Room, RoomSummary};
use crate::view::SessionView;
use chess_logic::{Color, Square};
use serde::{Deserialize, Serialize};

/// Client -> server events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    CreateRoom {
        room_name: String,
        player_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile_id: Option<String>,
    },
    JoinRoom {
        room_id: String,
        player_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile_id: Option<String>,
    },
    LeaveRoom,
    ListRooms,
    /// Creator-only: assigns colors, creates the session, starts play.
    StartGame,
    Move {
        room_id: String,
        from: Square,
        to: Square,
    },
    Castle {
        room_id: String,
        king: Square,
        rook: Square,
    },
    Resign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    Checkmate,
    Resign,
    Disconnect,
}

/// Server -> client events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    RoomCreated {
        room: Room,
    },
    RoomJoined {
        room: Room,
    },
    RoomUpdated {
        room: Room,
    },
    RoomList {
        rooms: Vec<RoomSummary>,
    },
    GameStarted {
        state: SessionView,
        your_color: Color,
        room: Room,
    },
    /// Broadcast to the whole room after every validated move.
    MoveApplied {
        state: SessionView,
    },
    GameOver {
        /// `None` is reserved for draws; every current end reason has a
        /// winner.
        winner: Option<Color>,
        reason: GameOverReason,
        state: SessionView,
    },
    PlayerDisconnected {
        player: Player,
        room: Room,
    },
    /// Sent only to the requester of a rejected request; `kind` is the
    /// stable machine-readable discriminator.
    Error {
        kind: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_round_trip_as_tagged_json() {
        let event = ClientEvent::Move {
            room_id: "r1".into(),
            from: Square::new(4, 1),
            to: Square::new(4, 3),
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"type\":\"move\""));
        let back: ClientEvent = serde_json::from_str(&json).expect("deserialize");
        match back {
            ClientEvent::Move { room_id, from, to } => {
                assert_eq!(room_id, "r1");
                assert_eq!(from, Square::new(4, 1));
                assert_eq!(to, Square::new(4, 3));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn join_without_profile_id_parses() {
        let json = r#"{"type":"join_room","room_id":"abc","player_name":"ada"}"#;
        let event: ClientEvent = serde_json::from_str(json).expect("deserialize");
        match event {
            ClientEvent::JoinRoom { profile_id, .. } => assert!(profile_id.is_none()),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn error_event_carries_kind_tag() {
        let event = ServerEvent::Error {
            kind: "not_your_turn".into(),
            message: "it is not your turn".into(),
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("\"kind\":\"not_your_turn\""));
    }
}
