//! Room bookkeeping
//!
//! Tracks rooms and which participant sits in which room. Colors are
//! assigned uniformly at random at match start, never earlier. A room
//! left with zero participants while still waiting is discarded
//! entirely; a playing room survives until the coordinator finishes the
//! match.

use crate::error::GameError;
use chess_logic::Color;
use chrono::Utc;
use rand::Rng;
use shared::{Player, Room, RoomStatus, RoomSummary, MAX_PLAYERS};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RoomService {
    rooms: HashMap<String, Room>,
    /// participant id -> room id
    participant_rooms: HashMap<String, String>,
}

impl RoomService {
    pub fn new() -> Self {
        RoomService::default()
    }

    pub fn create_room(&mut self, room_name: String, creator: Player) -> Room {
        let room_id = generate_room_id();
        let room = Room {
            room_id: room_id.clone(),
            room_name,
            created_by: creator.id.clone(),
            created_at: Utc::now(),
            players: vec![creator.clone()],
            status: RoomStatus::Waiting,
        };
        self.participant_rooms.insert(creator.id, room_id.clone());
        self.rooms.insert(room_id, room.clone());
        room
    }

    pub fn join_room(&mut self, room_id: &str, player: Player) -> Result<Room, GameError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| GameError::RoomNotFound {
                room_id: room_id.to_string(),
            })?;
        if room.status != RoomStatus::Waiting {
            return Err(GameError::RoomAlreadyStarted {
                room_id: room_id.to_string(),
            });
        }
        if room.players.len() >= MAX_PLAYERS {
            return Err(GameError::RoomFull {
                room_id: room_id.to_string(),
            });
        }
        if room.players.iter().any(|p| p.id == player.id) {
            return Err(GameError::DuplicateParticipant {
                room_id: room_id.to_string(),
            });
        }

        self.participant_rooms
            .insert(player.id.clone(), room_id.to_string());
        room.players.push(player);
        Ok(room.clone())
    }

    /// Remove `participant_id` from its room, if any. Returns the room
    /// state after removal plus the removed player. An emptied waiting
    /// room is dropped from the map (the returned snapshot is the last
    /// trace of it).
    pub fn leave_room(&mut self, participant_id: &str) -> Option<(Room, Player)> {
        let room_id = self.participant_rooms.remove(participant_id)?;
        let room = self.rooms.get_mut(&room_id)?;
        let index = room.players.iter().position(|p| p.id == participant_id)?;
        let player = room.players.remove(index);
        let snapshot = room.clone();
        if snapshot.players.is_empty() {
            self.rooms.remove(&room_id);
        }
        Some((snapshot, player))
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_of(&self, participant_id: &str) -> Option<&Room> {
        let room_id = self.participant_rooms.get(participant_id)?;
        self.rooms.get(room_id)
    }

    pub fn list(&self) -> Vec<RoomSummary> {
        let mut summaries: Vec<_> = self.rooms.values().map(Room::summary).collect();
        summaries.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        summaries
    }

    /// Flip a fair coin for the first seat; requires both participants
    /// present.
    pub fn assign_colors(&mut self, room_id: &str) {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return;
        };
        if room.players.len() != MAX_PLAYERS {
            return;
        }
        let first_light = rand::rng().random_bool(0.5);
        let (first, second) = if first_light {
            (Color::Light, Color::Dark)
        } else {
            (Color::Dark, Color::Light)
        };
        room.players[0].color = Some(first);
        room.players[1].color = Some(second);
    }

    pub fn set_status(&mut self, room_id: &str, status: RoomStatus) {
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.status = status;
        }
    }

    pub fn player_color(&self, room_id: &str, participant_id: &str) -> Option<Color> {
        self.rooms
            .get(room_id)?
            .players
            .iter()
            .find(|p| p.id == participant_id)?
            .color
    }
}

fn generate_room_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..8)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
