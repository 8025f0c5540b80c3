use std::sync::Arc;

use uuid::Uuid;

use crate::protocol::{ClientEvent, ConnectionId, RoomDescription, RoomError, ServerEvent};

use super::SignalServer;

impl SignalServer {
    /// Route one inbound event from a connection.
    ///
    /// Events from the same connection are handled sequentially in arrival
    /// order; nothing here blocks beyond in-memory work and fire-and-forget
    /// sends, so one slow peer cannot stall another.
    pub async fn handle_client_event(&self, id: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::Join { name } => self.handle_join(id, name).await,
            ClientEvent::Create { name } => self.handle_create(id, name).await,
            ClientEvent::Message(details) => self.handle_message(id, details).await,
            ClientEvent::Leave => self.remove_feed(&id, None).await,
            ClientEvent::ShareScreen => self.connections.set_screen(&id, true),
            ClientEvent::UnshareScreen => {
                self.connections.set_screen(&id, false);
                self.remove_feed(&id, Some("screen")).await;
            }
            ClientEvent::Trace(data) => Self::handle_trace(&id, &data),
        }
    }

    /// Join a named room, leaving any current room first.
    ///
    /// The reply carries the membership snapshot captured before the joiner
    /// is added, so a first member sees an empty room and later members see
    /// everyone already present.
    async fn handle_join(&self, id: ConnectionId, name: String) {
        let limit = self.config.max_clients_per_room;
        if !self.rooms.has_capacity(&name, limit) {
            tracing::debug!(connection_id = %id, room = %name, limit, "Join rejected, room full");
            self.bus
                .send_to(&id, Arc::new(ServerEvent::join_failed(RoomError::Full)))
                .await;
            return;
        }

        let description = self.join_room(&id, &name).await;
        tracing::info!(
            connection_id = %id,
            room = %name,
            members = description.clients.len() + 1,
            "Connection joined room"
        );
        self.bus
            .send_to(&id, Arc::new(ServerEvent::joined(description)))
            .await;
    }

    /// Create a room, generating a unique name when none was supplied.
    ///
    /// Generated names come from a space large enough that a collision
    /// between two simultaneous creates is effectively impossible; for
    /// client-supplied names the occupancy check is read-committed with no
    /// reservation, an accepted race.
    async fn handle_create(&self, id: ConnectionId, name: Option<String>) {
        let name = name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if self.rooms.is_occupied(&name) {
            tracing::debug!(connection_id = %id, room = %name, "Create rejected, name taken");
            self.bus
                .send_to(&id, Arc::new(ServerEvent::create_failed(RoomError::Taken)))
                .await;
            return;
        }

        self.join_room(&id, &name).await;
        tracing::info!(connection_id = %id, room = %name, "Connection created room");
        self.bus
            .send_to(&id, Arc::new(ServerEvent::created(name)))
            .await;
    }

    /// Shared join mechanics: implicit departure from the previous room,
    /// pre-join snapshot, then membership update. Capacity is the caller's
    /// concern.
    async fn join_room(&self, id: &ConnectionId, name: &str) -> RoomDescription {
        self.remove_feed(id, None).await;
        let description = self.describe_room(name);
        self.rooms.insert(name, *id);
        self.connections.set_room(id, Some(name.to_string()));
        description
    }

    /// Broadcast a `remove` for this connection to its current room.
    ///
    /// With no feed kind this is a full departure: membership and the room
    /// pointer are cleared. With a feed kind (e.g. "screen") only the
    /// notification fires and the connection stays in the room, so peers drop
    /// that one stream while the rest keep flowing. A connection with no
    /// current room is a no-op either way.
    pub(super) async fn remove_feed(&self, id: &ConnectionId, feed: Option<&str>) {
        let Some(room) = self.connections.room(id) else {
            return;
        };

        let event = match feed {
            Some(kind) => ServerEvent::remove_feed(*id, kind),
            None => ServerEvent::remove(*id),
        };
        // Everyone currently in the room hears it, the departing member
        // included.
        let members = self.rooms.members(&room);
        self.bus.send_to_many(&members, Arc::new(event)).await;

        if feed.is_none() {
            self.rooms.remove(&room, id);
            self.connections.set_room(id, None);
            tracing::info!(connection_id = %id, room = %room, "Connection left room");
        }
    }

    /// Emit one structured record for a client-side WebRTC trace. The six
    /// well-known fields are pulled out verbatim, no validation; anything
    /// the client omitted is simply absent.
    fn handle_trace(id: &ConnectionId, data: &serde_json::Value) {
        tracing::info!(
            target: "webrtc_trace",
            connection_id = %id,
            kind = ?data.get("type"),
            session = ?data.get("session"),
            prefix = ?data.get("prefix"),
            peer = ?data.get("peer"),
            time = ?data.get("time"),
            value = ?data.get("value"),
            "Client trace"
        );
    }
}
