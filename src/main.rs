//! Tic Tac Toe terminal client over a replicated room store.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tictac_live::{FirebaseStore, MemoryStore, RoomId, Session, SyncConfig, run_client};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { room, config } => play(room, config).await,
        Command::Local => local().await,
    }
}

/// Joins (or creates) an online room through the configured database.
async fn play(room: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => SyncConfig::from_file(&path)?,
        None => SyncConfig::from_env()?,
    };

    let room = room
        .as_deref()
        .and_then(RoomId::parse)
        .unwrap_or_else(RoomId::generate);
    info!(room = %room, "starting online session");

    let store = Arc::new(FirebaseStore::new(
        config.database_url().clone(),
        config.auth_token().clone(),
    ));
    let session = Session::join(store, room.clone()).await?;

    let share_line = config
        .share_url(&room)
        .map(|url| format!("Share this link with your friend to play: {}", url))
        .unwrap_or_else(|| format!("Your friend joins with: tictac_live play --room {}", room));

    run_client(session, share_line).await
}

/// Runs a hot-seat game against an in-process store.
async fn local() -> Result<()> {
    let room = RoomId::generate();
    info!(room = %room, "starting local session");

    let store = Arc::new(MemoryStore::new());
    let session = Session::join(store, room).await?;

    run_client(
        session,
        "Local game - both marks share this terminal".to_string(),
    )
    .await
}
