//! Client for a Firebase-style realtime database REST surface.

use super::{RoomStore, SnapshotStream, StoreError};
use crate::room::RoomId;
use crate::session::RoomState;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use reqwest::{Method, header};
use serde::Deserialize;
use std::collections::VecDeque;
use tracing::{debug, info, instrument, warn};

/// Store backed by a hosted realtime database.
///
/// Room records live under `<database_url>/rooms/<room>.json`. Writes
/// replace the full record; subscriptions use the streaming REST
/// protocol (`Accept: text/event-stream`), where the server pushes a
/// `put` event for the current value on connect and for every change
/// after that.
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl FirebaseStore {
    /// Creates a client for the database at `database_url`.
    pub fn new(database_url: String, auth_token: Option<String>) -> Self {
        Self {
            base_url: database_url.trim_end_matches('/').to_string(),
            auth_token,
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, room: &RoomId) -> reqwest::RequestBuilder {
        let url = format!("{}/rooms/{}.json", self.base_url, room);
        let request = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

#[async_trait]
impl RoomStore for FirebaseStore {
    #[instrument(skip(self), fields(room = %room))]
    async fn subscribe(&self, room: &RoomId) -> Result<SnapshotStream, StoreError> {
        let response = self
            .request(Method::GET, room)
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;
        info!("subscribed to room feed");

        let source = response.bytes_stream().boxed();
        let parser = EventParser::default();
        let pending: VecDeque<RoomState> = VecDeque::new();

        let snapshots = stream::unfold(
            (source, parser, pending),
            |(mut source, mut parser, mut pending)| async move {
                loop {
                    if let Some(snapshot) = pending.pop_front() {
                        return Some((snapshot, (source, parser, pending)));
                    }
                    let chunk = match source.next().await {
                        Some(Ok(chunk)) => chunk,
                        Some(Err(error)) => {
                            warn!(%error, "room feed failed");
                            return None;
                        }
                        None => return None,
                    };
                    for event in parser.push(&String::from_utf8_lossy(&chunk)) {
                        match event.name.as_str() {
                            "put" => {
                                if let Some(snapshot) = decode_put(&event.data) {
                                    pending.push_back(snapshot);
                                }
                            }
                            // Sessions only ever write full records, so
                            // there is nothing to merge on a patch.
                            "patch" | "keep-alive" => {}
                            "cancel" | "auth_revoked" => return None,
                            other => debug!(event = other, "ignoring feed event"),
                        }
                    }
                }
            },
        );

        Ok(snapshots.boxed())
    }

    #[instrument(skip(self, state), fields(room = %room))]
    async fn write(&self, room: &RoomId, state: &RoomState) -> Result<(), StoreError> {
        debug!("writing room record");
        self.request(Method::PUT, room)
            .json(state)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// A dispatched server-sent event.
#[derive(Debug, PartialEq, Eq)]
struct FeedEvent {
    name: String,
    data: String,
}

/// Incremental parser for the `text/event-stream` wire format.
///
/// Chunks arrive split at arbitrary byte boundaries. Only the fields
/// the realtime feed uses are handled: `event:` and `data:` lines plus
/// the blank-line dispatch; comments and unknown fields are dropped.
#[derive(Debug, Default)]
struct EventParser {
    buffer: String,
    name: String,
    data: String,
}

impl EventParser {
    fn push(&mut self, chunk: &str) -> Vec<FeedEvent> {
        self.buffer.push_str(chunk);
        let mut events = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                if !self.name.is_empty() || !self.data.is_empty() {
                    events.push(FeedEvent {
                        name: std::mem::take(&mut self.name),
                        data: std::mem::take(&mut self.data),
                    });
                }
            } else if let Some(value) = line.strip_prefix("event:") {
                self.name = value.trim_start().to_string();
            } else if let Some(value) = line.strip_prefix("data:") {
                if !self.data.is_empty() {
                    self.data.push('\n');
                }
                self.data.push_str(value.trim_start());
            }
        }
        events
    }
}

#[derive(Debug, Deserialize)]
struct PutEnvelope {
    path: String,
    data: serde_json::Value,
}

/// Decodes a `put` event payload into a room snapshot.
///
/// Only root-path puts carry the full record. A null payload means the
/// room has never been written; an undecodable one is treated the same
/// way, with the default record substituted.
fn decode_put(data: &str) -> Option<RoomState> {
    let envelope: PutEnvelope = match serde_json::from_str(data) {
        Ok(envelope) => envelope,
        Err(error) => {
            warn!(%error, "undecodable feed payload");
            return None;
        }
    };
    if envelope.path != "/" {
        return None;
    }
    if envelope.data.is_null() {
        return Some(RoomState::default());
    }
    match serde_json::from_value(envelope.data) {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            warn!(%error, "undecodable room record, substituting defaults");
            Some(RoomState::default())
        }
    }
}
