use serde::{Deserialize, Serialize};

use super::error_codes::RoomError;
use super::types::{ConnectionId, Resources, RoomDescription, TurnCredential};

/// Event types received from a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join a named room. A frame whose name is not a JSON string fails
    /// deserialization and is dropped before reaching a handler.
    Join { name: String },
    /// Create a room, generating a globally unique name when none is given.
    Create {
        #[serde(default)]
        name: Option<String>,
    },
    /// Relay an opaque payload (`{to, ...}`) to another connection.
    /// Everything beyond `to`/`from` is SDP/ICE application data this server
    /// never interprets.
    Message(serde_json::Value),
    /// Full departure from the current room.
    Leave,
    /// Declare a screen feed.
    ShareScreen,
    /// Withdraw the screen feed; notifies the room without leaving it.
    UnshareScreen,
    /// Opaque WebRTC diagnostic record, logged and otherwise ignored.
    Trace(serde_json::Value),
}

/// `remove` broadcast payload: a member departed, or withdrew one feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePayload {
    pub id: ConnectionId,
    /// Feed kind for a partial removal (e.g. "screen"); absent on full
    /// departure.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub feed: Option<String>,
}

/// Event types sent to a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Outcome of a `join`: either an error code or the room description
    /// captured before the new member was added.
    JoinResult {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        error: Option<RoomError>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        room: Option<RoomDescription>,
    },
    /// Outcome of a `create`: either an error code or the final room name.
    CreateResult {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        error: Option<RoomError>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        name: Option<String>,
    },
    /// Broadcast to a room when a member leaves or withdraws a feed.
    Remove(RemovePayload),
    /// Configured STUN URLs (zero or one), sent once at connect.
    #[serde(rename = "stunservers")]
    StunServers(Vec<String>),
    /// Issued TURN credentials (zero or one), sent once at connect.
    #[serde(rename = "turnservers")]
    TurnServers(Vec<TurnCredential>),
    /// Relayed payload, delivered verbatim with `from` set to the sender.
    Message(serde_json::Value),
}

impl ServerEvent {
    /// Successful join reply carrying the pre-join membership snapshot.
    #[must_use]
    pub fn joined(room: RoomDescription) -> Self {
        Self::JoinResult {
            error: None,
            room: Some(room),
        }
    }

    /// Rejected join reply.
    #[must_use]
    pub const fn join_failed(error: RoomError) -> Self {
        Self::JoinResult {
            error: Some(error),
            room: None,
        }
    }

    /// Successful create reply carrying the final room name.
    #[must_use]
    pub fn created(name: String) -> Self {
        Self::CreateResult {
            error: None,
            name: Some(name),
        }
    }

    /// Rejected create reply.
    #[must_use]
    pub const fn create_failed(error: RoomError) -> Self {
        Self::CreateResult {
            error: Some(error),
            name: None,
        }
    }

    /// Full-departure broadcast for `id`.
    #[must_use]
    pub const fn remove(id: ConnectionId) -> Self {
        Self::Remove(RemovePayload { id, feed: None })
    }

    /// Partial-feed removal broadcast for `id`.
    #[must_use]
    pub fn remove_feed(id: ConnectionId, feed: &str) -> Self {
        Self::Remove(RemovePayload {
            id,
            feed: Some(feed.to_string()),
        })
    }
}

/// Convenience for tests and clients: a description with the given members.
impl FromIterator<(ConnectionId, Resources)> for RoomDescription {
    fn from_iter<T: IntoIterator<Item = (ConnectionId, Resources)>>(iter: T) -> Self {
        Self {
            clients: iter.into_iter().collect(),
        }
    }
}
