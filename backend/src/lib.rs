//! Multiplayer chess server
//!
//! The authoritative side of a two-player chess service: rooms, game
//! sessions, a single-threaded match coordinator, a WebSocket gateway
//! and best-effort SQLite persistence. The rules themselves live in the
//! `chess_logic` crate; wire types in `shared`.

pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod rooms;
pub mod session;
pub mod store;

pub use coordinator::{Coordinator, Event};
pub use error::GameError;
pub use session::{GameSession, SessionRegistry, SessionStatus};
pub use store::MatchStore;
