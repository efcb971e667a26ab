//! Match coordinator
//!
//! One task owns every room, every session and every client handle. All
//! inbound events (joins, moves, castlings, resignations, disconnects)
//! funnel through a single mpsc queue and are processed one at a time to
//! completion, so no room's state is ever mutated concurrently and the
//! engine needs no locks. Ordering on the queue resolves races: a
//! disconnect arriving before a move simply wins.
//!
//! Persistence and broadcast happen strictly after the authoritative
//! in-memory mutation. Persistence is spawned fire-and-forget; a failed
//! write is logged and never affects the game.

use crate::error::GameError;
use crate::rooms::RoomService;
use crate::session::{MoveOutcome, SessionRegistry};
use crate::store::{result_token, MatchStore, StatOutcome};
use chess_logic::{algebraic, Color, NotationInput, Square};
use chrono::Utc;
use shared::{ClientEvent, GameOverReason, Player, Room, RoomStatus, ServerEvent, MAX_PLAYERS};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Transport-level identity of one connected client.
pub type ClientId = String;

/// Everything the coordinator reacts to. The gateway translates socket
/// traffic into these; tests feed them directly.
#[derive(Debug)]
pub enum Event {
    Connected {
        client_id: ClientId,
        sender: mpsc::UnboundedSender<ServerEvent>,
    },
    Inbound {
        client_id: ClientId,
        event: ClientEvent,
    },
    Disconnected {
        client_id: ClientId,
    },
}

pub struct Coordinator {
    rooms: RoomService,
    sessions: SessionRegistry,
    store: MatchStore,
    clients: HashMap<ClientId, mpsc::UnboundedSender<ServerEvent>>,
}

impl Coordinator {
    pub fn new(store: MatchStore) -> Self {
        Coordinator {
            rooms: RoomService::new(),
            sessions: SessionRegistry::new(),
            store,
            clients: HashMap::new(),
        }
    }

    /// Drain the event queue until every sender is gone. This is the
    /// only place session or room state is touched.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Connected { client_id, sender } => self.on_connected(client_id, sender),
            Event::Inbound { client_id, event } => self.on_client_event(&client_id, event),
            Event::Disconnected { client_id } => self.on_disconnected(&client_id),
        }
    }

    fn on_client_event(&mut self, client_id: &str, event: ClientEvent) {
        match event {
            ClientEvent::CreateRoom {
                room_name,
                player_name,
                profile_id,
            } => self.on_create_room(client_id, room_name, player_name, profile_id),
            ClientEvent::JoinRoom {
                room_id,
                player_name,
                profile_id,
            } => self.on_join_room(client_id, &room_id, player_name, profile_id),
            ClientEvent::LeaveRoom => self.on_leave_room(client_id),
            ClientEvent::ListRooms => {
                let rooms = self.rooms.list();
                self.send(client_id, ServerEvent::RoomList { rooms });
            }
            ClientEvent::StartGame => self.on_start_game(client_id),
            ClientEvent::Move { room_id, from, to } => {
                self.on_move(client_id, &room_id, from, to)
            }
            ClientEvent::Castle {
                room_id,
                king,
                rook,
            } => self.on_castle(client_id, &room_id, king, rook),
            ClientEvent::Resign => self.on_resign(client_id),
        }
    }

    // ---- connection lifecycle ----

    fn on_connected(&mut self, client_id: ClientId, sender: mpsc::UnboundedSender<ServerEvent>) {
        info!(client = %client_id, "client connected");
        self.clients.insert(client_id.clone(), sender);
        let rooms = self.rooms.list();
        self.send(&client_id, ServerEvent::RoomList { rooms });
    }

    fn on_disconnected(&mut self, client_id: &str) {
        info!(client = %client_id, "client disconnected");
        self.clients.remove(client_id);
        let Some((room, player)) = self.rooms.leave_room(client_id) else {
            return;
        };

        if room.status == RoomStatus::Playing {
            // Mid-game disconnect forfeits: the remaining participant
            // wins, whichever color they hold.
            if let Some(winner) = room.players.first().and_then(|p| p.color) {
                self.finish_game(&room.room_id, Some(winner), GameOverReason::Disconnect);
            }
        }

        if let Some(current) = self.rooms.room(&room.room_id).cloned() {
            let event = ServerEvent::PlayerDisconnected {
                player,
                room: current.clone(),
            };
            for participant in &current.players {
                self.send(&participant.id, event.clone());
            }
        }
        self.broadcast_room_list();
    }

    // ---- lobby ----

    fn on_create_room(
        &mut self,
        client_id: &str,
        room_name: String,
        player_name: String,
        profile_id: Option<String>,
    ) {
        let creator = Player {
            id: client_id.to_string(),
            display_name: player_name,
            profile_id,
            color: None,
        };
        let room = self.rooms.create_room(room_name, creator);
        info!(room = %room.room_id, client = %client_id, "room created");
        self.send(client_id, ServerEvent::RoomCreated { room });
        self.broadcast_room_list();
    }

    fn on_join_room(
        &mut self,
        client_id: &str,
        room_id: &str,
        player_name: String,
        profile_id: Option<String>,
    ) {
        let player = Player {
            id: client_id.to_string(),
            display_name: player_name,
            profile_id,
            color: None,
        };
        match self.rooms.join_room(room_id, player) {
            Ok(room) => {
                info!(room = %room.room_id, client = %client_id, "player joined room");
                self.notify_others(&room, client_id);
                self.send(client_id, ServerEvent::RoomJoined { room });
                self.broadcast_room_list();
            }
            Err(err) => self.send_error(client_id, &err),
        }
    }

    fn on_leave_room(&mut self, client_id: &str) {
        let Some((room, _player)) = self.rooms.leave_room(client_id) else {
            return;
        };
        if let Some(current) = self.rooms.room(&room.room_id).cloned() {
            let event = ServerEvent::RoomUpdated {
                room: current.clone(),
            };
            for participant in &current.players {
                self.send(&participant.id, event.clone());
            }
        }
        self.broadcast_room_list();
    }

    // ---- match lifecycle ----

    fn on_start_game(&mut self, client_id: &str) {
        let Some(room) = self.rooms.room_of(client_id) else {
            self.send_error(client_id, &GameError::NotInRoom);
            return;
        };
        if room.created_by != client_id {
            self.send_error(
                client_id,
                &GameError::CannotStart {
                    reason: "only the room creator can start the game",
                },
            );
            return;
        }
        if room.players.len() != MAX_PLAYERS {
            self.send_error(
                client_id,
                &GameError::CannotStart {
                    reason: "need two players to start",
                },
            );
            return;
        }
        let room_id = room.room_id.clone();

        // Colors are decided now, not at join time.
        self.rooms.assign_colors(&room_id);
        self.rooms.set_status(&room_id, RoomStatus::Playing);
        let Some(room) = self.rooms.room(&room_id).cloned() else {
            return;
        };

        let white_profile = profile_of(&room, Color::Light);
        let black_profile = profile_of(&room, Color::Dark);
        let match_id = (white_profile.is_some() && black_profile.is_some())
            .then(|| Uuid::new_v4().to_string());

        let state = {
            let session = self.sessions.create(&room_id);
            session.external_game_id = match_id.clone();
            session.view()
        };
        info!(room = %room_id, "game started");

        if let (Some(match_id), Some(white), Some(black)) =
            (match_id, white_profile, black_profile)
        {
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(err) = store
                    .create_match_record(&match_id, &white, &black, "rapid")
                    .await
                {
                    warn!(%err, %match_id, "failed to create match record");
                }
            });
        }

        for player in &room.players {
            if let Some(color) = player.color {
                self.send(
                    &player.id,
                    ServerEvent::GameStarted {
                        state: state.clone(),
                        your_color: color,
                        room: room.clone(),
                    },
                );
            }
        }
        self.broadcast_room_list();
    }

    fn on_move(&mut self, client_id: &str, room_id: &str, from: Square, to: Square) {
        let Some(color) = self.acting_color(client_id, room_id) else {
            return;
        };
        let outcome = self
            .sessions
            .get_mut(room_id)
            .and_then(|session| session.apply_move(from, to, color));
        match outcome {
            Ok(outcome) => self.after_applied(client_id, room_id, color, outcome),
            Err(err) => self.send_error(client_id, &err),
        }
    }

    fn on_castle(&mut self, client_id: &str, room_id: &str, king: Square, rook: Square) {
        let Some(color) = self.acting_color(client_id, room_id) else {
            return;
        };
        let outcome = self
            .sessions
            .get_mut(room_id)
            .and_then(|session| session.apply_castling(king, rook, color));
        match outcome {
            Ok(outcome) => self.after_applied(client_id, room_id, color, outcome),
            Err(err) => self.send_error(client_id, &err),
        }
    }

    fn on_resign(&mut self, client_id: &str) {
        let Some(room) = self.rooms.room_of(client_id) else {
            self.send_error(client_id, &GameError::NotInRoom);
            return;
        };
        let room_id = room.room_id.clone();
        let Some(color) = self.rooms.player_color(&room_id, client_id) else {
            self.send_error(client_id, &GameError::NotInRoom);
            return;
        };
        info!(room = %room_id, client = %client_id, "resignation");
        self.finish_game(&room_id, Some(color.opposite()), GameOverReason::Resign);
    }

    /// Broadcast and persistence shared by moves and castlings; runs
    /// strictly after the session mutation succeeded.
    fn after_applied(&mut self, _client_id: &str, room_id: &str, color: Color, outcome: MoveOutcome) {
        let Ok(session) = self.sessions.get(room_id) else {
            return;
        };
        let state = session.view();
        let external_game_id = session.external_game_id.clone();
        let fen = state.fen.clone();

        self.broadcast_room(room_id, &ServerEvent::MoveApplied { state });

        if let Some(match_id) = external_game_id {
            let record = &outcome.record;
            let notation = algebraic(&NotationInput {
                kind: record.piece,
                from: record.from,
                to: record.to,
                captured: record.captured,
                castling: record.castling,
                is_check: outcome.check.is_some(),
                is_checkmate: outcome.checkmate.is_some(),
            });
            let player_id = self
                .rooms
                .room(room_id)
                .and_then(|room| profile_of(room, color));
            let ply = record.seq;
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(err) = store
                    .record_move(&match_id, ply, player_id.as_deref(), &notation, &fen)
                    .await
                {
                    warn!(%err, %match_id, ply, "failed to persist move");
                }
            });
        }

        if outcome.checkmate.is_some() {
            self.finish_game(room_id, Some(color), GameOverReason::Checkmate);
        }
    }

    /// Conclude the session, notify the room, settle persistence and
    /// evict the session from the registry. Safe to call when the
    /// session is already gone (the later of two racing end events just
    /// finds nothing to do).
    fn finish_game(&mut self, room_id: &str, winner: Option<Color>, reason: GameOverReason) {
        let Ok(session) = self.sessions.get_mut(room_id) else {
            self.rooms.set_status(room_id, RoomStatus::Finished);
            return;
        };
        let reason = session.conclude(reason);
        let state = session.view();
        let external_game_id = session.external_game_id.clone();
        let started_at = session.started_at;

        info!(room = %room_id, ?winner, ?reason, "game over");

        if let Some(match_id) = external_game_id {
            let winner_profile =
                winner.and_then(|color| self.room_profile(room_id, color));
            let loser_profile =
                winner.and_then(|color| self.room_profile(room_id, color.opposite()));
            let result = result_token(winner).to_string();
            let final_fen = state.fen.clone();
            let duration_seconds = (Utc::now() - started_at).num_seconds();
            let total_plies = state.move_history.len() as i64;
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(err) = store
                    .finalize_match(
                        &match_id,
                        &result,
                        reason_token(reason),
                        winner_profile.as_deref(),
                        &final_fen,
                        duration_seconds,
                        total_plies,
                    )
                    .await
                {
                    warn!(%err, %match_id, "failed to finalize match record");
                }
                for (profile, outcome) in [
                    (winner_profile, StatOutcome::Win),
                    (loser_profile, StatOutcome::Loss),
                ] {
                    if let Some(profile) = profile {
                        if let Err(err) = store.increment_player_stat(&profile, outcome).await {
                            warn!(%err, %profile, "failed to update player stats");
                        }
                    }
                }
            });
        }

        self.broadcast_room(
            room_id,
            &ServerEvent::GameOver {
                winner,
                reason,
                state,
            },
        );
        self.rooms.set_status(room_id, RoomStatus::Finished);
        self.sessions.remove(room_id);
        self.broadcast_room_list();
    }

    // ---- helpers ----

    fn acting_color(&self, client_id: &str, room_id: &str) -> Option<Color> {
        if self.rooms.room(room_id).is_none() {
            self.send_error(
                client_id,
                &GameError::RoomNotFound {
                    room_id: room_id.to_string(),
                },
            );
            return None;
        }
        match self.rooms.player_color(room_id, client_id) {
            Some(color) => Some(color),
            None => {
                self.send_error(client_id, &GameError::NotInRoom);
                None
            }
        }
    }

    fn room_profile(&self, room_id: &str, color: Color) -> Option<String> {
        self.rooms
            .room(room_id)
            .and_then(|room| profile_of(room, color))
    }

    fn notify_others(&self, room: &Room, except: &str) {
        let event = ServerEvent::RoomUpdated { room: room.clone() };
        for participant in room.players.iter().filter(|p| p.id != except) {
            self.send(&participant.id, event.clone());
        }
    }

    fn broadcast_room(&self, room_id: &str, event: &ServerEvent) {
        let Some(room) = self.rooms.room(room_id) else {
            return;
        };
        for participant in &room.players {
            self.send(&participant.id, event.clone());
        }
    }

    fn broadcast_room_list(&self) {
        let rooms = self.rooms.list();
        for sender in self.clients.values() {
            let _ = sender.send(ServerEvent::RoomList {
                rooms: rooms.clone(),
            });
        }
    }

    fn send(&self, client_id: &str, event: ServerEvent) {
        if let Some(sender) = self.clients.get(client_id) {
            // A dead receiver is cleaned up by the disconnect event.
            let _ = sender.send(event);
        }
    }

    fn send_error(&self, client_id: &str, err: &GameError) {
        debug!(client = %client_id, kind = err.kind(), %err, "request rejected");
        self.send(
            client_id,
            ServerEvent::Error {
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        );
    }
}

fn profile_of(room: &Room, color: Color) -> Option<String> {
    room.players
        .iter()
        .find(|p| p.color == Some(color))
        .and_then(|p| p.profile_id.clone())
}

fn reason_token(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::Checkmate => "checkmate",
        GameOverReason::Resign => "resign",
        GameOverReason::Disconnect => "disconnect",
    }
}
