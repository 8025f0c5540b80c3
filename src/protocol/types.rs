use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Process-unique opaque identity assigned to a connection at registration.
pub type ConnectionId = Uuid;

/// Media resource flags declared by a connection.
///
/// New connections start with audio enabled and everything else off; the
/// screen flag is toggled by `shareScreen` / `unshareScreen` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub screen: bool,
    pub video: bool,
    pub audio: bool,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            screen: false,
            video: false,
            audio: true,
        }
    }
}

/// Snapshot of a room's membership at the moment of the call.
///
/// Read-committed only: concurrent joins and leaves may land before the
/// snapshot reaches the client, and under a distributed membership backend
/// the snapshot may be stale. Both are accepted properties of the protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDescription {
    pub clients: HashMap<ConnectionId, Resources>,
}

/// Time-scoped TURN credential per the TURN REST scheme
/// (draft-uberti-behave-turn-rest).
///
/// `username` is the expiry timestamp (Unix seconds) as decimal text and
/// `credential` is `base64(HMAC-SHA1(secret, username))`. Computed fresh for
/// every connection, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCredential {
    pub username: String,
    pub credential: String,
    pub url: String,
}
