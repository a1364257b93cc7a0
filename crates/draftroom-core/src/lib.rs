//! Draft session state machine for Draftroom.
//!
//! One draft runs as a single Tokio task (actor model) owning the session:
//! team slots, turn order, the item pool and the pick log.
//!
//! # Key types
//!
//! - [`DraftSession`]: the aggregate; validates and applies joins and picks
//! - [`DraftCoordinator`]: runs session operations and emits events
//! - [`DraftHandle`]: send commands to a running draft actor
//! - [`Notifier`] / [`ConnectionRegistry`]: outbound fan-out
//! - [`SlotPicker`]: random source for slot assignment
//! - [`DraftConfig`], [`Phase`], [`Catalog`]

mod actor;
mod catalog;
mod config;
mod coordinator;
mod error;
mod notify;
mod picker;
mod session;

pub use actor::{DEFAULT_CHANNEL_SIZE, DraftHandle, spawn_draft};
pub use catalog::Catalog;
pub use config::{DraftConfig, Phase};
pub use coordinator::DraftCoordinator;
pub use error::DraftError;
pub use notify::{ConnectionRegistry, EventSender, Notifier};
pub use picker::{RandomPicker, ScriptedPicker, SlotPicker};
pub use session::{
    DraftSession, DraftSnapshot, MAX_TEAM_NAME_CHARS, NameFallback, Pick, PickOutcome,
    TeamSlot, TeamSummary,
};
