#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use signal_relay_server::config;
use signal_relay_server::coordination::InMemorySignalBus;
use signal_relay_server::logging;
use signal_relay_server::server::{ServerConfig, SignalServer};
use signal_relay_server::websocket;
use std::net::SocketAddr;
use std::sync::Arc;

/// Signal Relay -- WebSocket signaling server for WebRTC peers
#[derive(Parser, Debug)]
#[command(name = "signal-relay-server")]
#[command(about = "An in-memory WebSocket signaling server for WebRTC session establishment")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines and pre-deployment checks.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    /// Useful for debugging configuration loading from multiple sources.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from config.json if present; otherwise use code defaults.
    let cfg = Arc::new(config::load());

    // Handle --print-config: output the loaded configuration as JSON
    if cli.print_config {
        let json = serde_json::to_string_pretty(&*cfg)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let validation_result = config::validate(&cfg);

    // Handle --validate-config: exit after validation
    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Port: {}", cfg.port);
                println!(
                    "  Max clients per room: {}",
                    cfg.server.max_clients_per_room
                );
                println!("  TURN credentials enabled: {}", cfg.turn.enabled);
                println!("  Coordination adapter enabled: {}", cfg.coordination.enabled);
                println!("  CORS origins: {}", cfg.security.cors_origins);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    // In normal operation, propagate validation errors
    validation_result.map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize logging from config.
    logging::init_with_config(&cfg.logging);

    let port: u16 = cfg.port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "Starting signal relay server");

    // A distributed pub/sub adapter ships separately; without one the relay
    // runs single-process and the setting is only announced.
    if cfg.coordination.enabled {
        tracing::warn!(
            host = %cfg.coordination.host,
            port = cfg.coordination.port,
            "Coordination adapter configured but no adapter is built in; \
             running single-process"
        );
    }
    let bus = Arc::new(InMemorySignalBus::new());

    let server_config = ServerConfig {
        max_clients_per_room: cfg.server.max_clients_per_room,
        stun_url: cfg.server.stun_url.clone(),
        turn: cfg.turn.clone(),
        max_message_size: cfg.security.max_message_size,
    };
    let server = SignalServer::new(server_config, bus);

    // Create router with CORS configuration
    let app = websocket::create_router(&cfg.security.cors_origins).with_state(server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        cors_origins = %cfg.security.cors_origins,
        "Server started - WebSocket endpoint: /ws"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
