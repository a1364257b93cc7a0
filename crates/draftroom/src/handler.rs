//! Per-connection handler: registration, event fan-out and request routing.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Spawn the writer task on a fresh outbound channel
//!   2. Hand the channel to the draft, which subscribes it and sends the
//!      catch-up in one step
//!   3. Loop: receive frames, decode, forward to the draft actor
//!
//! Replies never come back through this loop. The draft actor pushes every
//! event into the registry, and the writer task drains this connection's
//! channel onto the socket.

use std::sync::Arc;

use draftroom_core::Notifier;
use draftroom_protocol::{ClientEvent, Codec, Notice, ServerEvent};
use draftroom_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::DraftroomError;
use crate::server::ServerState;

/// Drop guard that tells the draft a connection left.
///
/// Runs even if the handler panics. `Drop` is synchronous, so the
/// disconnect notice goes out from a fire-and-forget task. The draft
/// unsubscribes the connection when it handles the notice; if the draft
/// is gone the registry entry is dropped here instead.
struct ConnectionGuard<C: Codec> {
    conn_id: ConnectionId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            if state.draft.disconnect(conn_id).await.is_err() {
                state.registry.deregister(conn_id);
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), DraftroomError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::info!(%conn_id, peer = %conn.peer_addr(), "connection accepted");

    let (tx, rx) = mpsc::unbounded_channel();
    let guard = ConnectionGuard {
        conn_id,
        state: Arc::clone(&state),
    };
    let writer = tokio::spawn(write_events(Arc::clone(&conn), Arc::clone(&state), rx));

    let result = match state.draft.connect(conn_id, tx).await {
        Ok(()) => read_events(&conn, &state).await,
        Err(e) => Err(e.into()),
    };

    // Once the draft unsubscribes us, the only sender is gone and the
    // writer drains what is already queued and then stops.
    drop(guard);
    let _ = writer.await;
    let _ = conn.close().await;

    tracing::info!(%conn_id, "connection closed");
    result
}

/// Forwards decoded client events to the draft until the peer goes away.
async fn read_events<C: Codec>(
    conn: &WebSocketConnection,
    state: &ServerState<C>,
) -> Result<(), DraftroomError> {
    let conn_id = conn.id();

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%conn_id, "peer closed the connection");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                return Err(e.into());
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(%conn_id, error = %e, "failed to decode client event");
                state.registry.notify(
                    conn_id,
                    ServerEvent::DraftError(Notice::new(format!("Invalid message: {e}"))),
                );
                continue;
            }
        };

        let outcome = match event {
            ClientEvent::JoinTeam(request) => state
                .draft
                .join(conn_id, request.team_name)
                .await
                .map(|_slot| ()),
            ClientEvent::DraftPlayer(request) => state.draft.draft(conn_id, request).await,
        };

        // Rejections were already reported to the requester by the draft.
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_rejection() => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// Encodes queued events onto the socket, one frame each.
async fn write_events<C: Codec>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<C>>,
    mut events: mpsc::UnboundedReceiver<ServerEvent>,
) {
    let conn_id = conn.id();

    while let Some(event) = events.recv().await {
        let bytes = match state.codec.encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%conn_id, event = event.name(), error = %e, "failed to encode event");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%conn_id, error = %e, "send failed; writer stopping");
            break;
        }
    }
}
