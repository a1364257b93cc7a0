//! Draft actor: a Tokio task that owns the coordinator.
//!
//! Every join and pick is a check-then-act sequence (draw an open slot,
//! or check the turn then advance it). Funnelling all of them through one
//! task's mpsc queue means each runs to completion before the next is
//! dequeued, so none can interleave. No lock guards the session; only
//! this task ever touches it.

use draftroom_protocol::{PickRequest, SlotId};
use draftroom_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::{DraftCoordinator, DraftError, DraftSnapshot, EventSender, Notifier, SlotPicker};

/// Default command channel size for the draft actor.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Commands sent to the draft actor.
///
/// The `oneshot::Sender` in some variants is the reply channel: the caller
/// sends a command and waits for the outcome on it.
enum DraftCommand {
    Connect {
        conn: ConnectionId,
        sender: EventSender,
        reply: oneshot::Sender<()>,
    },
    Disconnect {
        conn: ConnectionId,
    },
    Join {
        conn: ConnectionId,
        team_name: String,
        reply: oneshot::Sender<Result<SlotId, DraftError>>,
    },
    Draft {
        conn: ConnectionId,
        request: PickRequest,
        reply: oneshot::Sender<Result<(), DraftError>>,
    },
    Snapshot {
        reply: oneshot::Sender<DraftSnapshot>,
    },
    Shutdown,
}

/// Handle to a running draft actor.
///
/// Cheap to clone: it is an `mpsc::Sender` wrapper. Every connection task
/// holds one.
#[derive(Clone)]
pub struct DraftHandle {
    sender: mpsc::Sender<DraftCommand>,
}

impl DraftHandle {
    /// Subscribes `conn` to draft events through `sender` and sends its
    /// catch-up, as a single actor step. Returns once both are done.
    pub async fn connect(
        &self,
        conn: ConnectionId,
        sender: EventSender,
    ) -> Result<(), DraftError> {
        let (reply, rx) = oneshot::channel();
        self.send(DraftCommand::Connect {
            conn,
            sender,
            reply,
        })
        .await?;
        rx.await.map_err(|_| DraftError::Unavailable)
    }

    /// Reports that `conn` has gone away and stops its events.
    pub async fn disconnect(&self, conn: ConnectionId) -> Result<(), DraftError> {
        self.send(DraftCommand::Disconnect { conn }).await
    }

    /// Asks for a slot and waits for the outcome.
    ///
    /// The requester has already been notified either way by the time this
    /// returns; the result is for the caller's own bookkeeping.
    pub async fn join(
        &self,
        conn: ConnectionId,
        team_name: impl Into<String>,
    ) -> Result<SlotId, DraftError> {
        let (reply, rx) = oneshot::channel();
        self.send(DraftCommand::Join {
            conn,
            team_name: team_name.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| DraftError::Unavailable)?
    }

    /// Attempts a pick and waits for the outcome.
    pub async fn draft(
        &self,
        conn: ConnectionId,
        request: PickRequest,
    ) -> Result<(), DraftError> {
        let (reply, rx) = oneshot::channel();
        self.send(DraftCommand::Draft {
            conn,
            request,
            reply,
        })
        .await?;
        rx.await.map_err(|_| DraftError::Unavailable)?
    }

    /// Current state of the draft.
    pub async fn snapshot(&self) -> Result<DraftSnapshot, DraftError> {
        let (reply, rx) = oneshot::channel();
        self.send(DraftCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| DraftError::Unavailable)
    }

    /// Stops the actor. Commands already queued ahead of this still run.
    pub async fn shutdown(&self) -> Result<(), DraftError> {
        self.send(DraftCommand::Shutdown).await
    }

    async fn send(&self, cmd: DraftCommand) -> Result<(), DraftError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| DraftError::Unavailable)
    }
}

struct DraftActor<N: Notifier, P: SlotPicker> {
    coordinator: DraftCoordinator<N, P>,
    receiver: mpsc::Receiver<DraftCommand>,
}

impl<N: Notifier, P: SlotPicker> DraftActor<N, P> {
    async fn run(mut self) {
        tracing::info!(
            max_picks = self.coordinator.session().max_picks(),
            items = self.coordinator.session().catalog().len(),
            "draft actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                DraftCommand::Connect {
                    conn,
                    sender,
                    reply,
                } => {
                    self.coordinator.admit(conn, sender);
                    let _ = reply.send(());
                }
                DraftCommand::Disconnect { conn } => {
                    self.coordinator.on_disconnect(conn);
                }
                DraftCommand::Join {
                    conn,
                    team_name,
                    reply,
                } => {
                    let result = self.coordinator.join_team(conn, &team_name);
                    let _ = reply.send(result);
                }
                DraftCommand::Draft {
                    conn,
                    request,
                    reply,
                } => {
                    let result = self.coordinator.draft_item(conn, &request);
                    let _ = reply.send(result);
                }
                DraftCommand::Snapshot { reply } => {
                    let _ = reply.send(self.coordinator.snapshot());
                }
                DraftCommand::Shutdown => {
                    tracing::info!("draft actor shutting down");
                    break;
                }
            }
        }

        tracing::info!("draft actor stopped");
    }
}

/// Spawns the draft actor and returns a handle to it.
///
/// `channel_size` bounds the command queue; callers wait when it is full.
pub fn spawn_draft<N, P>(
    coordinator: DraftCoordinator<N, P>,
    channel_size: usize,
) -> DraftHandle
where
    N: Notifier,
    P: SlotPicker,
{
    let (tx, rx) = mpsc::channel(channel_size);
    let actor = DraftActor {
        coordinator,
        receiver: rx,
    };
    tokio::spawn(actor.run());
    DraftHandle { sender: tx }
}
