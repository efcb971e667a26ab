//! Best-effort match persistence
//!
//! SQLite-backed records of matches, moves and per-profile win/loss
//! tallies. Every write here is fire-and-forget from the engine's point
//! of view: the coordinator spawns the call after the in-memory state
//! transition has completed, and a failure is logged, never surfaced to
//! players and never rolled back into the session.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Outcome column values for `finalize_match`.
pub fn result_token(winner: Option<chess_logic::Color>) -> &'static str {
    match winner {
        Some(chess_logic::Color::Light) => "light_win",
        Some(chess_logic::Color::Dark) => "dark_win",
        None => "draw",
    }
}

#[derive(Clone)]
pub struct MatchStore {
    pool: Pool<Sqlite>,
}

impl MatchStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        MatchStore { pool }
    }

    /// Open (creating if missing) the database at `url` and make sure
    /// the schema exists.
    pub async fn connect(url: &str) -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = MatchStore::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> sqlx::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                white_player_id TEXT NOT NULL,
                black_player_id TEXT NOT NULL,
                time_control TEXT NOT NULL,
                result TEXT,
                end_reason TEXT,
                winner_id TEXT,
                final_fen TEXT,
                duration_seconds INTEGER,
                total_plies INTEGER,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS moves (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id TEXT NOT NULL,
                ply INTEGER NOT NULL,
                player_id TEXT,
                notation TEXT NOT NULL,
                fen_after TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS profile_stats (
                profile_id TEXT PRIMARY KEY,
                wins INTEGER NOT NULL DEFAULT 0,
                losses INTEGER NOT NULL DEFAULT 0,
                draws INTEGER NOT NULL DEFAULT 0
            );",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn create_match_record(
        &self,
        match_id: &str,
        white_player_id: &str,
        black_player_id: &str,
        time_control: &str,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO games (id, white_player_id, black_player_id, time_control)
             VALUES (?, ?, ?, ?)",
        )
        .bind(match_id)
        .bind(white_player_id)
        .bind(black_player_id)
        .bind(time_control)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn record_move(
        &self,
        match_id: &str,
        ply: u32,
        player_id: Option<&str>,
        notation: &str,
        fen_after: &str,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO moves (game_id, ply, player_id, notation, fen_after)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(match_id)
        .bind(ply)
        .bind(player_id)
        .bind(notation)
        .bind(fen_after)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn finalize_match(
        &self,
        match_id: &str,
        result: &str,
        end_reason: &str,
        winner_id: Option<&str>,
        final_fen: &str,
        duration_seconds: i64,
        total_plies: i64,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "UPDATE games
             SET result = ?, end_reason = ?, winner_id = ?, final_fen = ?,
                 duration_seconds = ?, total_plies = ?
             WHERE id = ?",
        )
        .bind(result)
        .bind(end_reason)
        .bind(winner_id)
        .bind(final_fen)
        .bind(duration_seconds)
        .bind(total_plies)
        .bind(match_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Bump one of wins/losses/draws for `profile_id`, creating the row
    /// on first sight.
    pub async fn increment_player_stat(
        &self,
        profile_id: &str,
        outcome: StatOutcome,
    ) -> sqlx::Result<()> {
        let (wins, losses, draws) = match outcome {
            StatOutcome::Win => (1, 0, 0),
            StatOutcome::Loss => (0, 1, 0),
            StatOutcome::Draw => (0, 0, 1),
        };
        sqlx::query(
            "INSERT INTO profile_stats (profile_id, wins, losses, draws)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(profile_id) DO UPDATE SET
                 wins = wins + excluded.wins,
                 losses = losses + excluded.losses,
                 draws = draws + excluded.draws",
        )
        .bind(profile_id)
        .bind(wins)
        .bind(losses)
        .bind(draws)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOutcome {
    Win,
    Loss,
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    // One connection only: every pooled connection to `sqlite::memory:`
    // would otherwise see its own empty database.
    async fn memory_store() -> MatchStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        let store = MatchStore::new(pool);
        store.init_schema().await.expect("schema");
        store
    }

    #[tokio::test]
    async fn match_lifecycle_rows() {
        let store = memory_store().await;
        store
            .create_match_record("m1", "white", "black", "rapid")
            .await
            .expect("create");
        store
            .record_move("m1", 1, Some("white"), "e4", "fen-1")
            .await
            .expect("move");
        store
            .finalize_match("m1", "light_win", "checkmate", Some("white"), "fen-2", 30, 1)
            .await
            .expect("finalize");

        let (result, plies): (String, i64) =
            sqlx::query_as("SELECT result, total_plies FROM games WHERE id = ?")
                .bind("m1")
                .fetch_one(&store.pool)
                .await
                .expect("row");
        assert_eq!(result, "light_win");
        assert_eq!(plies, 1);
    }

    #[tokio::test]
    async fn stats_upsert_accumulates() {
        let store = memory_store().await;
        store
            .increment_player_stat("p1", StatOutcome::Win)
            .await
            .expect("first");
        store
            .increment_player_stat("p1", StatOutcome::Win)
            .await
            .expect("second");
        store
            .increment_player_stat("p1", StatOutcome::Loss)
            .await
            .expect("third");

        let (wins, losses): (i64, i64) =
            sqlx::query_as("SELECT wins, losses FROM profile_stats WHERE profile_id = ?")
                .bind("p1")
                .fetch_one(&store.pool)
                .await
                .expect("row");
        assert_eq!(wins, 2);
        assert_eq!(losses, 1);
    }

    #[test]
    fn result_tokens() {
        assert_eq!(result_token(Some(chess_logic::Color::Light)), "light_win");
        assert_eq!(result_token(Some(chess_logic::Color::Dark)), "dark_win");
        assert_eq!(result_token(None), "draw");
    }
}
