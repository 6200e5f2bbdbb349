//! Room session: the replicated record and the move/reset state machine.

use crate::game::{Board, Mark, Outcome, evaluate};
use crate::room::RoomId;
use crate::store::{RoomStore, StoreError};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// The replicated room record.
///
/// This is the only shape ever written to or read from the store, and
/// the whole record is replaced on every write. Absent or malformed
/// remote data decodes to the default: empty board, X to move, no
/// winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomState {
    /// Board cells in row-major order.
    pub board: Board,
    /// Whether X makes the next move.
    pub x_is_next: bool,
    /// Final result, once the game has concluded.
    pub winner: Option<Outcome>,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            board: Board::new(),
            x_is_next: true,
            winner: None,
        }
    }
}

impl RoomState {
    /// The mark that moves next.
    pub fn mark_to_move(&self) -> Mark {
        if self.x_is_next { Mark::X } else { Mark::O }
    }

    /// True once a winner or draw is recorded.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// A client's view of one room, kept in sync through an injected store.
///
/// Every local mutation is written back to the store immediately, and
/// every incoming snapshot overwrites local state unconditionally.
/// There is no move ownership: whichever client acts places the mark
/// whose turn it is, and concurrent moves race on the store's delivery
/// order, last write winning. Dropping the session aborts the
/// subscription listener.
pub struct Session {
    room: RoomId,
    store: Arc<dyn RoomStore>,
    state: RoomState,
    updates: mpsc::UnboundedReceiver<RoomState>,
    listener: JoinHandle<()>,
    announced: bool,
}

impl Session {
    /// Joins a room: subscribes to the store and starts from the
    /// default record until the first snapshot arrives.
    #[instrument(skip(store))]
    pub async fn join(store: Arc<dyn RoomStore>, room: RoomId) -> Result<Self, StoreError> {
        info!(room = %room, "joining room");
        let mut snapshots = store.subscribe(&room).await?;
        let (tx, updates) = mpsc::unbounded_channel();
        let listener = tokio::spawn(async move {
            while let Some(snapshot) = snapshots.next().await {
                if tx.send(snapshot).is_err() {
                    break;
                }
            }
            debug!("snapshot stream ended");
        });
        Ok(Self {
            room,
            store,
            state: RoomState::default(),
            updates,
            listener,
            announced: false,
        })
    }

    /// The room this session is attached to.
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Current local view of the replicated record.
    pub fn state(&self) -> &RoomState {
        &self.state
    }

    /// True while the store subscription is still delivering snapshots.
    pub fn connected(&self) -> bool {
        !self.listener.is_finished()
    }

    /// Places the current mark at `cell` (0-8).
    ///
    /// Occupied cells, out-of-range cells, and concluded games are
    /// silently ignored. Returns the result notice when this move
    /// concludes the game.
    #[instrument(skip(self), fields(room = %self.room))]
    pub async fn play(&mut self, cell: usize) -> Option<Outcome> {
        if self.state.is_over() || !self.state.board.is_vacant(cell) {
            debug!(cell, "move ignored");
            return None;
        }
        let mark = self.state.mark_to_move();
        self.state.board.place(cell, mark);
        self.state.x_is_next = !self.state.x_is_next;
        info!(cell, %mark, "placed mark");
        self.push().await;
        self.settle().await
    }

    /// Clears the room back to an empty board with X to move and writes
    /// the cleared record. Callable from any state.
    #[instrument(skip(self), fields(room = %self.room))]
    pub async fn reset(&mut self) {
        info!("resetting room");
        self.state = RoomState::default();
        self.announced = false;
        self.push().await;
    }

    /// Applies a remote snapshot, overwriting the local record
    /// unconditionally. Returns a one-shot result notice when the
    /// snapshot concludes the game.
    #[instrument(skip(self, snapshot), fields(room = %self.room))]
    pub async fn apply(&mut self, snapshot: RoomState) -> Option<Outcome> {
        self.state = snapshot;
        debug!(board = %self.state.board.display(), "applied remote snapshot");
        self.settle().await
    }

    /// Waits for the next snapshot from the store. `None` once the
    /// subscription has ended.
    pub async fn next_snapshot(&mut self) -> Option<RoomState> {
        self.updates.recv().await
    }

    /// Non-blocking variant of [`next_snapshot`](Self::next_snapshot).
    pub fn try_snapshot(&mut self) -> Option<RoomState> {
        self.updates.try_recv().ok()
    }

    /// Runs the evaluator after a board change, records a fresh result
    /// in the store, and hands out at most one notice per concluded
    /// game.
    async fn settle(&mut self) -> Option<Outcome> {
        let Some(result) = evaluate(&self.state.board) else {
            self.announced = false;
            return None;
        };
        if self.state.winner != Some(result) {
            self.state.winner = Some(result);
            self.push().await;
        }
        if self.announced {
            return None;
        }
        self.announced = true;
        info!(%result, "game concluded");
        Some(result)
    }

    /// Writes the full record. Failures are logged and dropped; there
    /// is no retry.
    async fn push(&self) {
        if let Err(error) = self.store.write(&self.room, &self.state).await {
            warn!(room = %self.room, %error, "state write failed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
