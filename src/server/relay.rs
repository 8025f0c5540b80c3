use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::protocol::{ConnectionId, ServerEvent};

use super::SignalServer;

impl SignalServer {
    /// Forward an opaque payload to the connection named by `details.to`.
    ///
    /// At-most-once, fire-and-forget: malformed payloads and unknown targets
    /// are dropped without a word to the sender. The payload is delivered
    /// verbatim apart from `from` being stamped with the sender's identity;
    /// the SDP/ICE content inside is never inspected.
    pub(super) async fn handle_message(&self, sender_id: ConnectionId, mut details: Value) {
        let Some(target) = Self::target_of(&details) else {
            tracing::debug!(connection_id = %sender_id, "Message dropped, no usable target");
            return;
        };

        let Some(object) = details.as_object_mut() else {
            return;
        };
        object.insert("from".to_string(), Value::String(sender_id.to_string()));

        let delivered = self
            .bus
            .send_to(&target, Arc::new(ServerEvent::Message(details)))
            .await;
        if delivered {
            tracing::debug!(from = %sender_id, to = %target, "Message relayed");
        } else {
            tracing::debug!(from = %sender_id, to = %target, "Message dropped, unknown target");
        }
    }

    fn target_of(details: &Value) -> Option<ConnectionId> {
        details
            .get("to")
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
    }
}
