//! Two-player tic-tac-toe replicated through a realtime database.
//!
//! # Architecture
//!
//! - **Game**: pure board evaluation (8 fixed lines plus draw detection)
//! - **Session**: room-scoped state machine, replicated last-write-wins
//! - **Store**: injected subscribe/write client (hosted realtime
//!   database REST surface, plus an in-process double)
//! - **Client**: ratatui terminal front end
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictac_live::{MemoryStore, RoomId, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let mut session = Session::join(store, RoomId::generate()).await?;
//! session.play(4).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod game;
mod room;
mod session;
mod store;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, SyncConfig};

// Crate-level exports - Game types and rules
pub use game::{Board, Mark, Outcome, check_winner, evaluate, is_full};

// Crate-level exports - Room identity
pub use room::RoomId;

// Crate-level exports - Session and the replicated record
pub use session::{RoomState, Session};

// Crate-level exports - Store implementations
pub use store::{FirebaseStore, MemoryStore, RoomStore, SnapshotStream, StoreError};

// Crate-level exports - Terminal client
pub use tui::run_client;
