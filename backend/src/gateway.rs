//! WebSocket gateway
//!
//! Thin transport edge: upgrades `/ws` connections, assigns each socket
//! a client id, and pumps JSON frames between the socket and the
//! coordinator's event queue. No game state lives here; a malformed
//! frame is answered directly without bothering the coordinator.

use crate::coordinator::Event;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use shared::{ClientEvent, ServerEvent};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
struct GatewayState {
    events: mpsc::UnboundedSender<Event>,
}

pub fn router(events: mpsc::UnboundedSender<Event>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(GatewayState { events })
}

async fn ws_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.events))
}

async fn handle_socket(socket: WebSocket, events: mpsc::UnboundedSender<Event>) {
    let client_id = Uuid::new_v4().to_string();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ServerEvent>();

    if events
        .send(Event::Connected {
            client_id: client_id.clone(),
            sender: outbound_tx.clone(),
        })
        .is_err()
    {
        return;
    }

    let (mut sink, mut stream) = socket.split();

    // Server -> client pump.
    let writer = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Client -> server pump.
    while let Some(Ok(message)) = stream.next().await {
        let text = match message {
            Message::Text(text) => text.to_string(),
            Message::Close(_) => break,
            _ => continue,
        };
        match serde_json::from_str::<ClientEvent>(&text) {
            Ok(event) => {
                if events
                    .send(Event::Inbound {
                        client_id: client_id.clone(),
                        event,
                    })
                    .is_err()
                {
                    break;
                }
            }
            Err(err) => {
                debug!(client = %client_id, %err, "unparseable client frame");
                let _ = outbound_tx.send(ServerEvent::Error {
                    kind: "bad_request".to_string(),
                    message: format!("invalid message: {err}"),
                });
            }
        }
    }

    let _ = events.send(Event::Disconnected { client_id });
    writer.abort();
}
