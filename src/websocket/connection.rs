use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::protocol::{ClientEvent, ServerEvent};
use crate::server::SignalServer;

const OUTBOUND_QUEUE_CAPACITY: usize = 64;

pub(super) async fn handle_socket(socket: WebSocket, server: Arc<SignalServer>, addr: SocketAddr) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Arc<ServerEvent>>(OUTBOUND_QUEUE_CAPACITY);

    let connection_id = server.register_client(tx).await;
    tracing::info!(%connection_id, client_addr = %addr, "WebSocket connection established");

    // Writer task: drain the outbound queue onto the socket, one JSON text
    // frame per event.
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = match serde_json::to_string(event.as_ref()) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::error!(error = %err, "Failed to serialize server event");
                    continue;
                }
            };
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Reader loop: events from one connection are applied strictly in
    // arrival order, so joins and leaves cannot overtake each other.
    let receive_server = server.clone();
    let receive_task = tokio::spawn(async move {
        let max_size = receive_server.config().max_message_size;
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(err) => {
                    tracing::debug!(%connection_id, error = %err, "WebSocket error");
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    if text.len() > max_size {
                        tracing::warn!(
                            %connection_id,
                            size = text.len(),
                            max = max_size,
                            "Frame exceeds size limit, dropped"
                        );
                        continue;
                    }

                    let event: ClientEvent = match serde_json::from_str(&text) {
                        Ok(event) => event,
                        Err(err) => {
                            tracing::debug!(
                                %connection_id,
                                error = %err,
                                "Malformed frame dropped"
                            );
                            continue;
                        }
                    };

                    receive_server
                        .handle_client_event(connection_id, event)
                        .await;
                }
                Message::Close(_) => {
                    tracing::info!(%connection_id, "WebSocket connection closed");
                    break;
                }
                _ => {
                    // Binary, ping and pong frames carry no signaling payload.
                }
            }
        }
    });

    // Either side ending tears the connection down.
    tokio::select! {
        _ = send_task => {}
        _ = receive_task => {}
    }

    server.unregister_client(&connection_id).await;
}
