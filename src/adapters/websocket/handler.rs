//! WebSocket transport for realtime events.
//!
//! Manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Register a queue-backed sink with the broadcaster
//! 3. Forward queued events and control replies until either side stops
//! 4. Drop the registration guard, which releases the user's seat locks

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::adapters::http::SubscribeQuery;
use crate::adapters::realtime::{ChannelSink, ConnectionGuard, EventBroadcaster};
use crate::domain::foundation::UserId;

use super::messages::{ClientMessage, ServerMessage};

/// Queued control replies per socket. Pings beyond this are dropped.
const CONTROL_BUFFER: usize = 8;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub broadcaster: Arc<EventBroadcaster>,
    /// Per-connection event queue length.
    pub sink_buffer: usize,
}

impl WebSocketState {
    pub fn new(broadcaster: Arc<EventBroadcaster>, sink_buffer: usize) -> Self {
        Self {
            broadcaster,
            sink_buffer,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /api/ws?userId=`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<SubscribeQuery>,
    State(state): State<WebSocketState>,
) -> Response {
    let user_id = query.user_id();
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state))
}

/// Runs for the lifetime of one socket.
async fn handle_socket(socket: WebSocket, user_id: Option<UserId>, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let (sink, mut events) = ChannelSink::channel(state.sink_buffer);
    let guard = ConnectionGuard::register(state.broadcaster.clone(), Arc::new(sink), user_id);
    let connection_id = guard.id().clone();

    let (control_tx, mut control_rx) = mpsc::channel::<ServerMessage>(CONTROL_BUFFER);

    // Forward queued events and control replies to the client
    let mut send_task = {
        let connection_id = connection_id.clone();
        tokio::spawn(async move {
            loop {
                let text = tokio::select! {
                    event = events.recv() => match event {
                        Some(json) => json,
                        // The broadcaster dropped us.
                        None => break,
                    },
                    control = control_rx.recv() => match control {
                        Some(msg) => match serde_json::to_string(&msg) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::warn!(error = %e, "Failed to encode control message");
                                continue;
                            }
                        },
                        None => break,
                    },
                };

                if let Err(e) = sender.send(Message::Text(text)).await {
                    tracing::debug!(connection_id = %connection_id, "Send error, closing connection: {}", e);
                    break;
                }
            }
        })
    };

    // Handle incoming messages from client
    let broadcaster = state.broadcaster.clone();
    let mut recv_task = {
        let connection_id = connection_id.clone();
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let reply = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(ClientMessage::Ping) => {
                                tracing::trace!(connection_id = %connection_id, "Received ping");
                                ServerMessage::pong(broadcaster.now())
                            }
                            Err(_) => ServerMessage::error(
                                "BAD_MESSAGE",
                                "Unrecognised client message",
                                broadcaster.now(),
                            ),
                        };
                        if control_tx.try_send(reply).is_err() {
                            tracing::debug!(connection_id = %connection_id, "Control queue full, reply dropped");
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(connection_id = %connection_id, "Received unsupported binary message");
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // Protocol-level heartbeats are answered by axum.
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    drop(guard);
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use std::time::Duration;

    #[test]
    fn websocket_state_shares_broadcaster() {
        let broadcaster = Arc::new(EventBroadcaster::new(
            Duration::from_secs(30),
            Arc::new(ManualClock::default()),
        ));
        let state = WebSocketState::new(broadcaster.clone(), 16);

        assert!(Arc::ptr_eq(&state.broadcaster, &broadcaster));
    }

    #[test]
    fn websocket_router_creates_route() {
        let _router = websocket_router();
    }
}
