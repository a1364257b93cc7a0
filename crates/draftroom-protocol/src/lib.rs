//! Wire protocol for Draftroom.
//!
//! This crate defines what draft clients and the server say to each other:
//!
//! - **Items** ([`DraftItem`], [`Category`]): the pool being drafted from.
//! - **Events** ([`ClientEvent`], [`ServerEvent`] and their payloads): one
//!   variant per named event on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how events become bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Wire shape
//!
//! Every frame is a JSON object naming the event and carrying its payload:
//!
//! ```text
//! { "event": "turn_updated", "data": { "currentTurn": 2, "currentTeamName": "Gridiron Gang" } }
//! ```
//!
//! The protocol layer knows nothing about sessions or turns. It only knows
//! how those events are spelled.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Category, ClientEvent, DraftItem, DraftSummary, JoinRequest, Notice,
    PickAnnouncement, PickRequest, ServerEvent, SlotId, TeamAssignment,
    TurnUpdate,
};
