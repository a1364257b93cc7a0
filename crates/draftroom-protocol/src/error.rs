//! Error types for the protocol layer.
//!
//! Each Draftroom crate defines its own error enum, so a `ProtocolError`
//! always means "the bytes were wrong", never "the move was illegal".

/// Errors that can occur while encoding or decoding wire events.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning an event into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into an event).
    ///
    /// Common causes: malformed JSON, an unknown `event` name, or a
    /// payload missing a required field such as `playerId`.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame parsed but is not a valid request.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
