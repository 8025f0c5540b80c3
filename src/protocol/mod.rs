//! Wire protocol for the signaling relay.
//!
//! Events are JSON frames tagged with a `type` field and an optional `data`
//! payload. Client verbs mirror the classic signaling vocabulary (`join`,
//! `create`, `message`, `leave`, `shareScreen`, `unshareScreen`, `trace`);
//! server verbs are the typed replies plus the `remove`, `stunservers`,
//! `turnservers`, and relayed `message` events.

pub mod error_codes;
pub mod messages;
pub mod types;

pub use error_codes::RoomError;

pub use messages::{ClientEvent, RemovePayload, ServerEvent};

pub use types::{ConnectionId, Resources, RoomDescription, TurnCredential};
