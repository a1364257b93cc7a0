//! Top-level error type for the draft server.

use std::path::PathBuf;

use draftroom_core::DraftError;
use draftroom_protocol::ProtocolError;
use draftroom_transport::TransportError;

/// Wraps the errors of every layer so `?` works across them.
#[derive(Debug, thiserror::Error)]
pub enum DraftroomError {
    /// A transport-level error (bind, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A draft-level error (bad setup, rejected request, actor gone).
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// An environment variable held a value that could not be used.
    #[error("invalid value for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// The catalog file could not be read.
    #[error("cannot read catalog {}: {source}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: DraftroomError = TransportError::AcceptFailed(io).into();
        assert!(matches!(err, DraftroomError::Transport(_)));
        assert!(err.to_string().contains("port taken"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: DraftroomError = ProtocolError::InvalidMessage("bad".into()).into();
        assert!(matches!(err, DraftroomError::Protocol(_)));
    }

    #[test]
    fn test_from_draft_error() {
        let err: DraftroomError = DraftError::Unavailable.into();
        assert!(matches!(err, DraftroomError::Draft(DraftError::Unavailable)));
    }

    #[test]
    fn test_config_error_names_the_variable() {
        let err = DraftroomError::Config {
            key: "PORT",
            reason: "not a number".into(),
        };
        assert_eq!(err.to_string(), "invalid value for PORT: not a number");
    }
}
