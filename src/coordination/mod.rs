//! Event delivery seam between the signaling core and connected transports.
//!
//! All outbound traffic flows through a [`SignalBus`]. The in-memory
//! implementation covers a single process; a multi-process deployment swaps
//! in a pub/sub-backed bus behind the same trait. Delivery is at-most-once
//! and fire-and-forget everywhere: a full or missing outbound queue drops the
//! event rather than blocking the event loop, because peers renegotiate at
//! the SDP/ICE level anyway.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::protocol::{ConnectionId, ServerEvent};

/// Outbound delivery to connections by opaque identity.
#[async_trait]
pub trait SignalBus: Send + Sync {
    /// Attach a connection's outbound queue.
    async fn register(&self, id: ConnectionId, sender: mpsc::Sender<Arc<ServerEvent>>);

    /// Detach a connection; subsequent sends to it are dropped.
    async fn unregister(&self, id: &ConnectionId);

    /// Deliver one event to one connection. Returns false when the target is
    /// unknown; the event is dropped either way on failure.
    async fn send_to(&self, id: &ConnectionId, event: Arc<ServerEvent>) -> bool;

    /// Deliver one event to each listed connection, best-effort.
    async fn send_to_many(&self, ids: &[ConnectionId], event: Arc<ServerEvent>);
}

/// Single-process bus keyed by connection id.
#[derive(Default)]
pub struct InMemorySignalBus {
    senders: RwLock<HashMap<ConnectionId, mpsc::Sender<Arc<ServerEvent>>>>,
}

impl InMemorySignalBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignalBus for InMemorySignalBus {
    async fn register(&self, id: ConnectionId, sender: mpsc::Sender<Arc<ServerEvent>>) {
        self.senders.write().await.insert(id, sender);
    }

    async fn unregister(&self, id: &ConnectionId) {
        self.senders.write().await.remove(id);
    }

    async fn send_to(&self, id: &ConnectionId, event: Arc<ServerEvent>) -> bool {
        let senders = self.senders.read().await;
        let Some(sender) = senders.get(id) else {
            return false;
        };
        if sender.try_send(event).is_err() {
            tracing::warn!(connection_id = %id, "Outbound queue full or closed, event dropped");
        }
        true
    }

    async fn send_to_many(&self, ids: &[ConnectionId], event: Arc<ServerEvent>) {
        let senders = self.senders.read().await;
        for id in ids {
            if let Some(sender) = senders.get(id) {
                if sender.try_send(Arc::clone(&event)).is_err() {
                    tracing::warn!(
                        connection_id = %id,
                        "Outbound queue full or closed, broadcast event dropped"
                    );
                }
            }
        }
    }
}
