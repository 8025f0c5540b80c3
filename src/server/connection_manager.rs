use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::protocol::{ConnectionId, Resources, ServerEvent};

/// Per-connection signaling state. The transport owns the connection's
/// lifetime; this is only the annotation the core keeps alongside it.
#[derive(Debug, Clone)]
pub(crate) struct ClientConnection {
    /// Current room, if joined. At most one at a time.
    pub room: Option<String>,
    /// Declared media resource flags.
    pub resources: Resources,
    pub sender: mpsc::Sender<Arc<ServerEvent>>,
}

pub(crate) struct ConnectionManager {
    clients: DashMap<ConnectionId, ClientConnection>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Register a fresh connection under a new process-unique id.
    pub fn register(&self, sender: mpsc::Sender<Arc<ServerEvent>>) -> ConnectionId {
        let id = Uuid::new_v4();
        self.register_with_id(id, sender);
        id
    }

    /// Register under a caller-chosen id (tests hydrate state this way).
    pub fn register_with_id(&self, id: ConnectionId, sender: mpsc::Sender<Arc<ServerEvent>>) {
        self.clients.insert(
            id,
            ClientConnection {
                room: None,
                resources: Resources::default(),
                sender,
            },
        );
        info!(connection_id = %id, "Connection registered");
    }

    pub fn remove(&self, id: &ConnectionId) -> Option<ClientConnection> {
        self.clients.remove(id).map(|(_, connection)| connection)
    }

    pub fn has(&self, id: &ConnectionId) -> bool {
        self.clients.contains_key(id)
    }

    pub fn room(&self, id: &ConnectionId) -> Option<String> {
        self.clients.get(id).and_then(|client| client.room.clone())
    }

    pub fn set_room(&self, id: &ConnectionId, room: Option<String>) {
        if let Some(mut client) = self.clients.get_mut(id) {
            client.room = room;
        }
    }

    pub fn resources(&self, id: &ConnectionId) -> Option<Resources> {
        self.clients.get(id).map(|client| client.resources)
    }

    pub fn set_screen(&self, id: &ConnectionId, sharing: bool) {
        if let Some(mut client) = self.clients.get_mut(id) {
            client.resources.screen = sharing;
        }
    }
}
