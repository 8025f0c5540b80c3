#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! # Signal Relay Server
//!
//! An in-memory WebSocket signaling server for WebRTC session establishment.
//!
//! Clients meet in named rooms, exchange opaque SDP and ICE payloads through
//! the relay, and receive short-lived TURN credentials at connect time. No
//! database, no cloud services; run the binary and connect via WebSocket.

/// Server configuration and environment variables
pub mod config;

/// Outbound event delivery seam (in-memory implementation)
pub mod coordination;

/// Structured logging configuration
pub mod logging;

/// Wire protocol definitions
pub mod protocol;

/// Main server orchestration
pub mod server;

/// Time-limited TURN credential issuance
pub mod turn;

/// WebSocket connection handling
pub mod websocket;
