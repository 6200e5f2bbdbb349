//! Replicated room store: the subscribe/write seam.
//!
//! The store is an external managed service treated as an opaque
//! key-value collection of room records. Sessions receive a store
//! handle at construction instead of reaching for process-wide state,
//! which is also what lets the test suite swap in [`MemoryStore`].

mod error;
mod firebase;
mod memory;

pub use error::StoreError;
pub use firebase::FirebaseStore;
pub use memory::MemoryStore;

use crate::room::RoomId;
use crate::session::RoomState;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Stream of room snapshots in the store's own delivery order.
pub type SnapshotStream = BoxStream<'static, RoomState>;

/// Subscribe/write access to replicated room records.
///
/// `write` replaces the whole record; no merge semantics are assumed.
/// `subscribe` delivers the current value immediately (the default
/// record when the room has never been written), then every subsequent
/// change, including echoes of the subscriber's own writes.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Opens the snapshot stream for `room`.
    async fn subscribe(&self, room: &RoomId) -> Result<SnapshotStream, StoreError>;

    /// Replaces the record at `room`.
    ///
    /// Callers that want fire-and-forget delivery simply drop the
    /// result; no retry happens either way.
    async fn write(&self, room: &RoomId, state: &RoomState) -> Result<(), StoreError>;
}
