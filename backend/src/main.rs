use backend::{coordinator::Coordinator, gateway, store::MatchStore};

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:rookery.db".to_string());
    let store = MatchStore::connect(&database_url)
        .await
        .expect("failed to open match database");

    let (events_tx, events_rx) = mpsc::unbounded_channel();

    // One task owns all game state; everything else only sends events.
    tokio::spawn(Coordinator::new(store).run(events_rx));

    let bind_addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .expect("invalid BIND_ADDR");

    let app = gateway::router(events_tx);
    tracing::info!(%bind_addr, "game server listening");
    let listener = TcpListener::bind(bind_addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("server terminated unexpectedly");
}
