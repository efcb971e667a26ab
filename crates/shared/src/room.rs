//! Room and participant records

use chess_logic::Color;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A room never holds more than two participants.
pub const MAX_PLAYERS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Transport-level identity (one WebSocket connection).
    pub id: String,
    pub display_name: String,
    /// External profile identifier, when the client supplied one; only
    /// used for persistence and stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    /// Assigned at match start, absent while the room is waiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_id: String,
    pub room_name: String,
    pub players: Vec<Player>,
    pub status: RoomStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.room_id.clone(),
            room_name: self.room_name.clone(),
            player_count: self.players.len(),
            status: self.status,
        }
    }
}

/// Lobby-list entry: enough to render a join button, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: String,
    pub room_name: String,
    pub player_count: usize,
    pub status: RoomStatus,
}
