//! Codec trait and the JSON implementation.
//!
//! The server never calls `serde_json` directly; it goes through a
//! [`Codec`]. Swapping the wire format means swapping the codec, nothing
//! else.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts wire events to bytes and back.
///
/// `Send + Sync + 'static` because a single codec value is shared by every
/// connection task the server spawns.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON is what browser draft boards already speak, and it can be read
/// straight out of DevTools while debugging a pick that went wrong.
///
/// ## Example
///
/// ```rust
/// use draftroom_protocol::{Codec, JsonCodec, ClientEvent, JoinRequest};
///
/// let codec = JsonCodec;
/// let bytes = br#"{"event":"join_team","data":{"teamName":"Blitz"}}"#;
///
/// let event: ClientEvent = codec.decode(bytes).unwrap();
/// assert_eq!(
///     event,
///     ClientEvent::JoinTeam(JoinRequest { team_name: "Blitz".into() })
/// );
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
