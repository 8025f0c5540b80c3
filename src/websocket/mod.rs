// WebSocket transport for the signaling core.
//
// - handler: WebSocket upgrade handler (entry point)
// - connection: per-socket send/receive loops
// - routes: HTTP route setup (ws, health)

mod connection;
mod handler;
mod routes;

pub use handler::websocket_handler;
pub use routes::create_router;
