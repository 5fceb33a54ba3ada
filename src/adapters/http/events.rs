//! Server-Sent Events transport for realtime events.
//!
//! Each open stream is one broadcaster connection. The registration guard
//! lives inside the stream state, so when the client goes away and axum
//! drops the stream the connection is unregistered and its user's seat
//! locks are released.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::adapters::realtime::{ChannelSink, ConnectionGuard, EventBroadcaster};
use crate::domain::foundation::UserId;

/// Query string accepted by the subscription endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeQuery {
    pub user_id: Option<String>,
}

impl SubscribeQuery {
    /// The subscriber's user, if a non-blank one was given. Anonymous
    /// subscribers receive events but hold no locks.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
            .as_deref()
            .and_then(|raw| UserId::new(raw.trim()).ok())
    }
}

#[derive(Clone)]
pub struct EventStreamState {
    pub broadcaster: Arc<EventBroadcaster>,
    pub sink_buffer: usize,
    pub keep_alive: Duration,
}

/// GET /api/events - Subscribe to realtime events
pub async fn subscribe(
    State(state): State<EventStreamState>,
    Query(query): Query<SubscribeQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (sink, rx) = ChannelSink::channel(state.sink_buffer);
    let guard = ConnectionGuard::register(state.broadcaster.clone(), Arc::new(sink), query.user_id());

    let events = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let json = rx.recv().await?;
        Some((Ok::<_, Infallible>(Event::default().data(json)), (rx, guard)))
    });

    Sse::new(events).keep_alive(KeepAlive::new().interval(state.keep_alive))
}

/// Creates the event stream router.
pub fn events_routes(state: EventStreamState) -> Router {
    Router::new()
        .route("/events", get(subscribe))
        .with_state(state)
}
