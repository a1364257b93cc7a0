//! # Draftroom
//!
//! WebSocket server for a live, turn-based team draft.
//!
//! Up to four participants join, are dealt a random draft slot each, and
//! take turns picking from a shared catalog of players until every team
//! has its roster. Anyone else who connects watches the board fill up.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use draftroom::prelude::*;
//!
//! # async fn start() -> Result<(), DraftroomError> {
//! let config = ServerConfig::from_env()?;
//! let server = DraftServerBuilder::from_config(&config)?.build().await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use error::DraftroomError;
pub use server::{DraftServer, DraftServerBuilder};

/// Everything needed to embed a draft server, in one import.
pub mod prelude {
    pub use crate::{
        DEFAULT_HOST, DEFAULT_PORT, DraftServer, DraftServerBuilder, DraftroomError,
        ServerConfig,
    };
    pub use draftroom_core::{
        Catalog, DraftConfig, DraftError, DraftHandle, DraftSnapshot, Phase, RandomPicker,
        ScriptedPicker, SlotPicker,
    };
    pub use draftroom_protocol::{
        Category, ClientEvent, DraftItem, PickRequest, ServerEvent, SlotId,
    };
    pub use draftroom_transport::ConnectionId;
}
