//! In-process store for tests and hot-seat play.

use super::{RoomStore, SnapshotStream, StoreError};
use crate::room::RoomId;
use crate::session::RoomState;
use async_trait::async_trait;
use futures::stream;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::instrument;

/// Store backed by one `watch` channel per room.
///
/// Rooms are created implicitly on first use and never removed,
/// matching the hosted store's lifecycle. Every subscriber (the writer
/// included) observes every accepted write, coalesced to the latest
/// value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<String, watch::Sender<RoomState>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_room<T>(&self, room: &RoomId, f: impl FnOnce(&watch::Sender<RoomState>) -> T) -> T {
        let mut rooms = self.rooms.lock().unwrap();
        let sender = rooms
            .entry(room.as_str().to_string())
            .or_insert_with(|| watch::channel(RoomState::default()).0);
        f(sender)
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    #[instrument(skip(self), fields(room = %room))]
    async fn subscribe(&self, room: &RoomId) -> Result<SnapshotStream, StoreError> {
        let receiver = self.with_room(room, |sender| sender.subscribe());
        let snapshots = stream::unfold((receiver, true), |(mut receiver, first)| async move {
            if !first {
                receiver.changed().await.ok()?;
            }
            let snapshot = receiver.borrow_and_update().clone();
            Some((snapshot, (receiver, false)))
        });
        Ok(Box::pin(snapshots))
    }

    #[instrument(skip(self, state), fields(room = %room))]
    async fn write(&self, room: &RoomId, state: &RoomState) -> Result<(), StoreError> {
        self.with_room(room, |sender| sender.send_replace(state.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Mark;
    use futures::StreamExt;

    #[tokio::test]
    async fn subscribe_delivers_current_value_immediately() {
        let store = MemoryStore::new();
        let room = RoomId::generate();
        let mut feed = store.subscribe(&room).await.unwrap();
        assert_eq!(feed.next().await, Some(RoomState::default()));
    }

    #[tokio::test]
    async fn write_reaches_every_subscriber() {
        let store = MemoryStore::new();
        let room = RoomId::generate();
        let mut a = store.subscribe(&room).await.unwrap();
        let mut b = store.subscribe(&room).await.unwrap();
        assert_eq!(a.next().await, Some(RoomState::default()));
        assert_eq!(b.next().await, Some(RoomState::default()));

        let mut state = RoomState::default();
        state.board.place(4, Mark::X);
        state.x_is_next = false;
        store.write(&room, &state).await.unwrap();

        assert_eq!(a.next().await, Some(state.clone()));
        assert_eq!(b.next().await, Some(state));
    }

    #[tokio::test]
    async fn late_subscriber_sees_latest_record() {
        let store = MemoryStore::new();
        let room = RoomId::generate();

        let mut state = RoomState::default();
        state.board.place(0, Mark::X);
        state.x_is_next = false;
        store.write(&room, &state).await.unwrap();

        let mut feed = store.subscribe(&room).await.unwrap();
        assert_eq!(feed.next().await, Some(state));
    }

    #[tokio::test]
    async fn rooms_are_isolated_from_each_other() {
        let store = MemoryStore::new();
        let here = RoomId::generate();
        let there = RoomId::generate();

        let mut state = RoomState::default();
        state.board.place(8, Mark::O);
        store.write(&here, &state).await.unwrap();

        let mut feed = store.subscribe(&there).await.unwrap();
        assert_eq!(feed.next().await, Some(RoomState::default()));
    }
}
