//! Outbound fan-out: how the coordinator reaches participants.
//!
//! The coordinator only sees the [`Notifier`] trait. The server plugs in a
//! [`ConnectionRegistry`], which maps every live connection to the
//! channel its writer task drains.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use draftroom_protocol::ServerEvent;
use draftroom_transport::ConnectionId;
use tokio::sync::mpsc;

/// Delivery capability injected into the coordinator.
///
/// `notify` and `broadcast` are fire-and-forget. They must not block, and
/// a recipient that has gone away is skipped silently.
///
/// `attach` and `detach` are called from inside the draft actor, in the
/// same step as the connect catch-up and the disconnect. A connection
/// therefore sees no broadcast from before its catch-up. Notifiers that
/// do not route through channels can leave them as no-ops.
pub trait Notifier: Send + Sync + 'static {
    /// Sends `event` to one connection.
    fn notify(&self, conn: ConnectionId, event: ServerEvent);

    /// Sends `event` to every connected participant, spectators included.
    fn broadcast(&self, event: ServerEvent);

    /// Starts delivering events for `conn` into `sender`.
    fn attach(&self, _conn: ConnectionId, _sender: EventSender) {}

    /// Stops delivering events for `conn`.
    fn detach(&self, _conn: ConnectionId) {}
}

/// Channel a connection's writer task reads its events from.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// The set of live connections and their outbound channels.
///
/// Cloning shares the same registry. Channels are unbounded, so a slow
/// socket buffers in its own queue instead of back-pressuring the draft.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    senders: Arc<RwLock<HashMap<ConnectionId, EventSender>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts routing events for `conn` into `sender`.
    pub fn register(&self, conn: ConnectionId, sender: EventSender) {
        self.senders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(conn, sender);
        tracing::trace!(%conn, "connection registered");
    }

    /// Stops routing events for `conn`. Returns `false` if it was unknown.
    pub fn deregister(&self, conn: ConnectionId) -> bool {
        let removed = self
            .senders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&conn)
            .is_some();
        tracing::trace!(%conn, removed, "connection deregistered");
        removed
    }

    pub fn len(&self) -> usize {
        self.senders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ConnectionRegistry {
    fn notify(&self, conn: ConnectionId, event: ServerEvent) {
        let senders = self.senders.read().unwrap_or_else(PoisonError::into_inner);
        match senders.get(&conn) {
            Some(sender) => {
                if sender.send(event).is_err() {
                    tracing::trace!(%conn, "recipient gone, dropping event");
                }
            }
            None => tracing::trace!(%conn, "notify for unknown connection"),
        }
    }

    fn broadcast(&self, event: ServerEvent) {
        let senders = self.senders.read().unwrap_or_else(PoisonError::into_inner);
        tracing::trace!(event = event.name(), recipients = senders.len(), "broadcast");
        for sender in senders.values() {
            let _ = sender.send(event.clone());
        }
    }

    fn attach(&self, conn: ConnectionId, sender: EventSender) {
        self.register(conn, sender);
    }

    fn detach(&self, conn: ConnectionId) {
        self.deregister(conn);
    }
}
