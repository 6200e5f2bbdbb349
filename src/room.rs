//! Room identity: the partition key into the replicated store.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const ROOM_ID_LEN: usize = 6;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a shared room.
///
/// Generated ids are short random base-36 strings. Parsed ids are taken
/// verbatim from the last path segment of whatever the user pasted;
/// nothing beyond the generation alphabet is ever validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Synthesizes a fresh 6-character base-36 identifier.
    #[instrument]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id: String = (0..ROOM_ID_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        debug!(room = %id, "generated room id");
        Self(id)
    }

    /// Derives a room id from a bare id or a share URL.
    ///
    /// For URLs the last path segment is used. Returns `None` when the
    /// input carries no path, in which case callers generate a fresh id.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let path = match trimmed.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
            None => trimmed,
        };
        let tail = path.trim_matches('/').rsplit('/').next().unwrap_or("");
        if tail.is_empty() {
            None
        } else {
            Some(Self(tail.to_owned()))
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_six_base36_chars() {
        for _ in 0..32 {
            let id = RoomId::generate();
            assert_eq!(id.as_str().len(), 6);
            assert!(
                id.as_str()
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn parses_bare_ids_and_share_urls() {
        assert_eq!(RoomId::parse("k3x9p2").unwrap().as_str(), "k3x9p2");
        assert_eq!(
            RoomId::parse("https://play.example.com/k3x9p2").unwrap().as_str(),
            "k3x9p2"
        );
        assert_eq!(
            RoomId::parse("https://play.example.com/games/k3x9p2/")
                .unwrap()
                .as_str(),
            "k3x9p2"
        );
    }

    #[test]
    fn pathless_input_yields_no_room() {
        assert!(RoomId::parse("").is_none());
        assert!(RoomId::parse("   ").is_none());
        assert!(RoomId::parse("https://play.example.com").is_none());
        assert!(RoomId::parse("https://play.example.com/").is_none());
    }
}
