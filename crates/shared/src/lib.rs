//! Types shared between the game server and its clients
//!
//! Wire protocol event enums, room/participant records, and the
//! serializable session view the server broadcasts after every applied
//! move. Everything here is plain data; the rules live in `chess_logic`
//! and the authoritative state in the backend.

pub mod protocol;
pub mod room;
pub mod view;

pub use protocol::{ClientEvent, GameOverReason, ServerEvent};
pub use room::{Player, Room, RoomStatus, RoomSummary, MAX_PLAYERS};
pub use view::{MoveRecord, SessionView};
