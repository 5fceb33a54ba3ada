//! WebSocket transport for realtime events.
//!
//! An alternative to the SSE stream for clients that want a bidirectional
//! channel. Each socket becomes one broadcaster connection:
//!
//! ```text
//!  EventBroadcaster ──try_send──▶ ChannelSink queue ──▶ send task ──▶ socket
//!                                                         ▲
//!  socket ──▶ recv task ──ping──▶ control queue ──pong────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Control protocol (ping/pong/error)
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod messages;

pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{ClientMessage, ErrorMessage, PongMessage, ServerMessage};
