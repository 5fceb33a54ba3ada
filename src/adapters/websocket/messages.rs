//! WebSocket control messages.
//!
//! Realtime events travel as their regular JSON envelope. These types only
//! cover the small control protocol layered next to them:
//! - Server → Client: pongs and protocol errors
//! - Client → Server: pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

// ============================================
// Server → Client Messages
// ============================================

/// Control messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Heartbeat response.
    Pong(PongMessage),

    /// The client sent something the server could not understand.
    Error(ErrorMessage),
}

impl ServerMessage {
    pub fn pong(timestamp: Timestamp) -> Self {
        ServerMessage::Pong(PongMessage { timestamp })
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>, timestamp: Timestamp) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.into(),
            message: message.into(),
            timestamp,
        })
    }
}

/// Heartbeat response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongMessage {
    pub timestamp: Timestamp,
}

/// Error message sent to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: Timestamp,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,
}
