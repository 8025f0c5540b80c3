use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use signal_relay_server::config::TurnConfig;
use signal_relay_server::coordination::InMemorySignalBus;
use signal_relay_server::server::{ServerConfig, SignalServer};
use signal_relay_server::websocket::create_router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};

type WsSink = futures_util::stream::SplitSink<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    Message,
>;
type WsStream = futures_util::stream::SplitStream<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
>;

fn test_server_config() -> ServerConfig {
    ServerConfig {
        max_clients_per_room: 0,
        stun_url: Some("stun:stun.example.org".to_string()),
        turn: TurnConfig {
            enabled: true,
            secret: Some("test-shared-secret".to_string()),
            url: Some("turn:turn.example.org".to_string()),
            credential_ttl_secs: 3600,
        },
        max_message_size: 65_536,
    }
}

/// Spin up a server on an ephemeral port and return its address.
async fn start_test_server(config: ServerConfig) -> std::net::SocketAddr {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let server = SignalServer::new(config, Arc::new(InMemorySignalBus::new()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = create_router("*").with_state(server);
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await
        .unwrap();
    });

    addr
}

/// Connect and consume the two greeting frames (stunservers, turnservers).
async fn connect_client(addr: std::net::SocketAddr) -> (WsSink, WsStream) {
    let (sender, mut receiver) = connect_client_raw(addr).await;
    let stun = recv_value(&mut receiver).await;
    assert_eq!(stun["type"], "stunservers");
    let turn = recv_value(&mut receiver).await;
    assert_eq!(turn["type"], "turnservers");
    (sender, receiver)
}

async fn connect_client_raw(addr: std::net::SocketAddr) -> (WsSink, WsStream) {
    let url = format!("ws://{addr}/ws");
    let (ws_stream, _) =
        tokio::time::timeout(tokio::time::Duration::from_secs(10), connect_async(&url))
            .await
            .expect("WebSocket connection timed out")
            .expect("Failed to connect");
    ws_stream.split()
}

async fn send_json(sender: &mut WsSink, value: Value) {
    let json = serde_json::to_string(&value).unwrap();
    sender.send(Message::Text(json.into())).await.unwrap();
}

async fn recv_value(receiver: &mut WsStream) -> Value {
    let frame = tokio::time::timeout(tokio::time::Duration::from_secs(5), receiver.next())
        .await
        .expect("timeout waiting for frame")
        .expect("connection closed")
        .expect("WebSocket frame result");
    match frame {
        Message::Text(text) => serde_json::from_str(&text).expect("valid JSON frame"),
        other => panic!("expected text frame, got {other:?}"),
    }
}

async fn assert_no_frame(receiver: &mut WsStream) {
    let outcome =
        tokio::time::timeout(tokio::time::Duration::from_millis(300), receiver.next()).await;
    assert!(outcome.is_err(), "expected no frame, got {outcome:?}");
}

#[tokio::test]
async fn greeting_arrives_in_order_on_connect() {
    let addr = start_test_server(test_server_config()).await;
    let (_sender, mut receiver) = connect_client_raw(addr).await;

    let stun = recv_value(&mut receiver).await;
    assert_eq!(stun["type"], "stunservers");
    assert_eq!(stun["data"], json!(["stun:stun.example.org"]));

    let turn = recv_value(&mut receiver).await;
    assert_eq!(turn["type"], "turnservers");
    let credentials = turn["data"].as_array().unwrap();
    assert_eq!(credentials.len(), 1);
    assert_eq!(credentials[0]["url"], "turn:turn.example.org");
    let expiry: i64 = credentials[0]["username"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(expiry > chrono::Utc::now().timestamp());
    assert!(!credentials[0]["credential"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn join_reports_existing_members() {
    let addr = start_test_server(test_server_config()).await;
    let (mut sender_a, mut receiver_a) = connect_client(addr).await;
    let (mut sender_b, mut receiver_b) = connect_client(addr).await;

    send_json(&mut sender_a, json!({"type": "join", "data": {"name": "demo"}})).await;
    let reply = recv_value(&mut receiver_a).await;
    assert_eq!(reply["type"], "joinResult");
    assert!(reply["data"]["error"].is_null());
    assert_eq!(reply["data"]["room"]["clients"], json!({}));

    send_json(&mut sender_b, json!({"type": "join", "data": {"name": "demo"}})).await;
    let reply = recv_value(&mut receiver_b).await;
    assert_eq!(reply["type"], "joinResult");
    let clients = reply["data"]["room"]["clients"].as_object().unwrap();
    assert_eq!(clients.len(), 1);
    let resources = clients.values().next().unwrap();
    assert_eq!(resources["audio"], true);
    assert_eq!(resources["screen"], false);
}

#[tokio::test]
async fn relay_stamps_sender_and_reaches_only_the_target() {
    let addr = start_test_server(test_server_config()).await;
    let (mut sender_a, mut receiver_a) = connect_client(addr).await;
    let (mut sender_b, mut receiver_b) = connect_client(addr).await;

    send_json(&mut sender_a, json!({"type": "join", "data": {"name": "demo"}})).await;
    recv_value(&mut receiver_a).await;

    send_json(&mut sender_b, json!({"type": "join", "data": {"name": "demo"}})).await;
    let reply = recv_value(&mut receiver_b).await;
    let peer_a = reply["data"]["room"]["clients"]
        .as_object()
        .unwrap()
        .keys()
        .next()
        .unwrap()
        .clone();

    send_json(
        &mut sender_b,
        json!({"type": "message", "data": {"to": peer_a, "roomType": "video", "sdp": "v=0"}}),
    )
    .await;

    let relayed = recv_value(&mut receiver_a).await;
    assert_eq!(relayed["type"], "message");
    assert_eq!(relayed["data"]["to"], peer_a);
    assert_eq!(relayed["data"]["sdp"], "v=0");
    assert!(relayed["data"]["from"].is_string());

    assert_no_frame(&mut receiver_b).await;
}

#[tokio::test]
async fn disconnect_broadcasts_remove_to_the_room() {
    let addr = start_test_server(test_server_config()).await;
    let (mut sender_a, mut receiver_a) = connect_client(addr).await;
    let (mut sender_b, mut receiver_b) = connect_client(addr).await;

    send_json(&mut sender_a, json!({"type": "join", "data": {"name": "demo"}})).await;
    recv_value(&mut receiver_a).await;
    send_json(&mut sender_b, json!({"type": "join", "data": {"name": "demo"}})).await;
    let reply = recv_value(&mut receiver_b).await;
    let peer_a = reply["data"]["room"]["clients"]
        .as_object()
        .unwrap()
        .keys()
        .next()
        .unwrap()
        .clone();

    sender_a.close().await.unwrap();

    let removal = recv_value(&mut receiver_b).await;
    assert_eq!(removal["type"], "remove");
    assert_eq!(removal["data"]["id"], peer_a);
    assert!(removal["data"].get("type").is_none());
}

#[tokio::test]
async fn full_room_rejects_the_next_join() {
    let mut config = test_server_config();
    config.max_clients_per_room = 1;
    let addr = start_test_server(config).await;

    let (mut sender_a, mut receiver_a) = connect_client(addr).await;
    let (mut sender_b, mut receiver_b) = connect_client(addr).await;

    send_json(&mut sender_a, json!({"type": "join", "data": {"name": "demo"}})).await;
    recv_value(&mut receiver_a).await;

    send_json(&mut sender_b, json!({"type": "join", "data": {"name": "demo"}})).await;
    let reply = recv_value(&mut receiver_b).await;
    assert_eq!(reply["type"], "joinResult");
    assert_eq!(reply["data"]["error"], "full");
    assert!(reply["data"]["room"].is_null());
}

#[tokio::test]
async fn create_returns_generated_name_and_taken_conflicts() {
    let addr = start_test_server(test_server_config()).await;
    let (mut sender_a, mut receiver_a) = connect_client(addr).await;
    let (mut sender_b, mut receiver_b) = connect_client(addr).await;

    send_json(&mut sender_a, json!({"type": "create", "data": {}})).await;
    let reply = recv_value(&mut receiver_a).await;
    assert_eq!(reply["type"], "createResult");
    assert!(reply["data"]["error"].is_null());
    let name = reply["data"]["name"].as_str().unwrap().to_string();
    assert!(!name.is_empty());

    send_json(&mut sender_b, json!({"type": "create", "data": {"name": name}})).await;
    let reply = recv_value(&mut receiver_b).await;
    assert_eq!(reply["type"], "createResult");
    assert_eq!(reply["data"]["error"], "taken");
}

#[tokio::test]
async fn malformed_and_oversized_frames_leave_the_connection_usable() {
    let mut config = test_server_config();
    config.max_message_size = 256;
    let addr = start_test_server(config).await;

    let (mut sender, mut receiver) = connect_client(addr).await;

    // Not JSON at all.
    sender
        .send(Message::Text("this is not json".into()))
        .await
        .unwrap();
    // Unknown event type.
    send_json(&mut sender, json!({"type": "launch", "data": {}})).await;
    // Oversized frame.
    let big = "x".repeat(1024);
    send_json(&mut sender, json!({"type": "join", "data": {"name": big}})).await;
    assert_no_frame(&mut receiver).await;

    // The session still works afterwards.
    send_json(&mut sender, json!({"type": "join", "data": {"name": "demo"}})).await;
    let reply = recv_value(&mut receiver).await;
    assert_eq!(reply["type"], "joinResult");
    assert!(reply["data"]["error"].is_null());
}
