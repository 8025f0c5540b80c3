use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::TurnConfig;
use crate::coordination::SignalBus;
use crate::protocol::{ConnectionId, RoomDescription, ServerEvent};
use crate::turn;

mod connection_manager;
mod relay;
pub mod room_registry;
mod session;

use connection_manager::ConnectionManager;
use room_registry::RoomRegistry;

/// Runtime configuration for the signaling core, assembled from the loaded
/// config by the binary (or directly by tests).
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Maximum connections per room; 0 disables the limit.
    pub max_clients_per_room: usize,
    /// STUN URL advertised at connect time, if any.
    pub stun_url: Option<String>,
    /// TURN credential issuance settings.
    pub turn: TurnConfig,
    /// Inbound frames larger than this many bytes are dropped.
    pub max_message_size: usize,
}

/// The signaling core: connection sessions, room membership, and relay.
///
/// One instance serves the whole process. Transports register a connection,
/// feed its inbound events to [`SignalServer::handle_client_event`] in
/// arrival order, and call [`SignalServer::unregister_client`] on disconnect;
/// everything else is driven from those three calls.
pub struct SignalServer {
    connections: ConnectionManager,
    rooms: RoomRegistry,
    bus: Arc<dyn SignalBus>,
    config: ServerConfig,
}

impl SignalServer {
    #[must_use]
    pub fn new(config: ServerConfig, bus: Arc<dyn SignalBus>) -> Arc<Self> {
        Arc::new(Self {
            connections: ConnectionManager::new(),
            rooms: RoomRegistry::new(),
            bus,
            config,
        })
    }

    /// Register a new connection and emit the connect-time greeting.
    pub async fn register_client(&self, sender: mpsc::Sender<Arc<ServerEvent>>) -> ConnectionId {
        let id = self.connections.register(sender.clone());
        self.bus.register(id, sender).await;
        self.greet(&id).await;
        id
    }

    /// Register a connection under a caller-chosen id (used by tests that
    /// hydrate server state).
    pub async fn connect_client(&self, id: ConnectionId, sender: mpsc::Sender<Arc<ServerEvent>>) {
        self.connections.register_with_id(id, sender.clone());
        self.bus.register(id, sender).await;
        self.greet(&id).await;
    }

    /// Transport-initiated disconnect: unconditional and immediate. Leaves
    /// the current room (broadcasting `remove`) and forgets the connection.
    pub async fn unregister_client(&self, id: &ConnectionId) {
        self.remove_feed(id, None).await;
        self.connections.remove(id);
        self.bus.unregister(id).await;
        tracing::info!(connection_id = %id, "Connection unregistered");
    }

    /// Enumerate a room's members and their resource flags, read-committed
    /// at the moment of the call.
    #[must_use]
    pub fn describe_room(&self, name: &str) -> RoomDescription {
        self.rooms
            .members(name)
            .into_iter()
            .filter_map(|id| self.connections.resources(&id).map(|res| (id, res)))
            .collect()
    }

    /// Current member count; zero for a nonexistent room.
    #[must_use]
    pub fn count_in_room(&self, name: &str) -> usize {
        self.rooms.count(name)
    }

    /// Current room of a connection, if joined.
    #[must_use]
    pub fn client_room(&self, id: &ConnectionId) -> Option<String> {
        self.connections.room(id)
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// One-shot greeting: STUN info, then freshly issued TURN credentials.
    async fn greet(&self, id: &ConnectionId) {
        let stun_urls: Vec<String> = self.config.stun_url.iter().cloned().collect();
        self.bus
            .send_to(id, Arc::new(ServerEvent::StunServers(stun_urls)))
            .await;

        let credentials =
            turn::issue_for_connection(&self.config.turn, chrono::Utc::now().timestamp());
        self.bus
            .send_to(id, Arc::new(ServerEvent::TurnServers(credentials)))
            .await;
    }
}
