//! `DraftServer` builder and accept loop.
//!
//! Ties the layers together: WebSocket transport, JSON codec, and one
//! draft actor shared by every connection.

use std::sync::Arc;

use draftroom_core::{
    Catalog, ConnectionRegistry, DEFAULT_CHANNEL_SIZE, DraftConfig, DraftCoordinator,
    DraftHandle, DraftSession, RandomPicker, SlotPicker, spawn_draft,
};
use draftroom_protocol::{Codec, JsonCodec};
use draftroom_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::{DEFAULT_PORT, DraftroomError, ServerConfig};

/// Shared server state passed to each connection handler task.
///
/// Nothing here needs a lock: the draft handle is a channel sender and the
/// registry locks internally.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) draft: DraftHandle,
    pub(crate) registry: ConnectionRegistry,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a draft server.
///
/// # Example
///
/// ```rust,ignore
/// use draftroom::prelude::*;
///
/// let server = DraftServerBuilder::new()
///     .bind("0.0.0.0:3000")
///     .draft_config(DraftConfig { total_teams: 4, picks_per_team: 6 })
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct DraftServerBuilder {
    bind_addr: String,
    draft: DraftConfig,
    catalog: Option<Catalog>,
    seed: Option<u64>,
    channel_size: usize,
}

impl DraftServerBuilder {
    /// Creates a builder for a default 4×6 draft over the built-in catalog.
    pub fn new() -> Self {
        Self {
            bind_addr: format!("127.0.0.1:{DEFAULT_PORT}"),
            draft: DraftConfig::default(),
            catalog: None,
            seed: None,
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }

    /// Starts from a [`ServerConfig`], loading its catalog.
    pub fn from_config(config: &ServerConfig) -> Result<Self, DraftroomError> {
        let mut builder = Self::new()
            .bind(&config.bind_addr())
            .draft_config(config.draft)
            .catalog(config.load_catalog()?);
        builder.seed = config.seed;
        Ok(builder)
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    pub fn draft_config(mut self, config: DraftConfig) -> Self {
        self.draft = config;
        self
    }

    /// Replaces the built-in catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Seeds slot assignment so runs are reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bounds the draft actor's command queue.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.channel_size = size.max(1);
        self
    }

    /// Builds the server with random slot assignment.
    pub async fn build(self) -> Result<DraftServer<JsonCodec>, DraftroomError> {
        let picker = match self.seed {
            Some(seed) => RandomPicker::seeded(seed),
            None => RandomPicker::new(),
        };
        self.build_with(picker).await
    }

    /// Builds the server with a caller-supplied slot picker.
    ///
    /// Validates the draft shape against the catalog, binds the listener
    /// and spawns the draft actor.
    pub async fn build_with<P: SlotPicker>(
        self,
        picker: P,
    ) -> Result<DraftServer<JsonCodec>, DraftroomError> {
        let catalog = self.catalog.unwrap_or_else(Catalog::fantasy_top30);
        let session = DraftSession::new(self.draft, catalog)?;
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let registry = ConnectionRegistry::new();
        let coordinator = DraftCoordinator::new(session, registry.clone(), picker);
        let draft = spawn_draft(coordinator, self.channel_size);

        let state = Arc::new(ServerState {
            draft,
            registry,
            codec: JsonCodec,
        });

        Ok(DraftServer { transport, state })
    }
}

impl Default for DraftServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A draft server, ready to accept participants.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct DraftServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> DraftServer<C> {
    pub fn builder() -> DraftServerBuilder {
        DraftServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// A handle to the draft actor, e.g. for snapshots.
    pub fn draft(&self) -> DraftHandle {
        self.state.draft.clone()
    }

    /// Runs the accept loop, spawning a handler task per connection.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), DraftroomError> {
        tracing::info!(addr = ?self.local_addr().ok(), "draft server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                }
            }
        }
    }
}
