//! Error types for the draft layer.

use draftroom_protocol::SlotId;

/// Errors produced by draft operations.
///
/// The request-level variants (`DraftFull` through `DraftComplete`) are
/// local to the offending request: the requester is told, nobody else is,
/// and the session carries on untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// Every slot already has an owner.
    #[error("draft is full: all {0} slots are taken")]
    DraftFull(u8),

    /// The requester does not own the slot whose turn it is (or owns no
    /// slot at all). Carries the resolved name of the team on the clock.
    #[error("not your turn: {current_team} is on the clock")]
    NotYourTurn { current_turn: SlotId, current_team: String },

    /// The item id is unknown or has already been picked.
    #[error("item {0} is not in the pool")]
    ItemUnavailable(String),

    /// The connection already owns a slot.
    #[error("connection already joined as {team} ({slot})")]
    AlreadyJoined { slot: SlotId, team: String },

    /// Every pick has been made; the session accepts no more.
    #[error("draft is complete")]
    DraftComplete,

    /// The configuration cannot produce a finishable draft.
    #[error("invalid draft config: {0}")]
    InvalidConfig(String),

    /// The catalog failed validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The draft actor's command channel is closed.
    #[error("draft session is unavailable")]
    Unavailable,
}

impl DraftError {
    /// `true` for rejections of a single request. The session is fine and
    /// the connection should keep going.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::DraftFull(_)
                | Self::NotYourTurn { .. }
                | Self::ItemUnavailable(_)
                | Self::AlreadyJoined { .. }
                | Self::DraftComplete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_rejections() {
        assert!(DraftError::DraftFull(4).is_rejection());
        assert!(DraftError::ItemUnavailable("9".into()).is_rejection());
        assert!(DraftError::DraftComplete.is_rejection());
        assert!(
            DraftError::NotYourTurn {
                current_turn: SlotId(1),
                current_team: "Team 1".into()
            }
            .is_rejection()
        );
    }

    #[test]
    fn test_infrastructure_errors_are_not_rejections() {
        assert!(!DraftError::Unavailable.is_rejection());
        assert!(!DraftError::InvalidConfig("zero teams".into()).is_rejection());
    }

    #[test]
    fn test_not_your_turn_names_team_on_the_clock() {
        let err = DraftError::NotYourTurn {
            current_turn: SlotId(3),
            current_team: "Blitz".into(),
        };
        assert_eq!(err.to_string(), "not your turn: Blitz is on the clock");
    }
}
