//! The draft coordinator: session operations plus who hears about them.
//!
//! Every operation is a read-validate-mutate-notify sequence on the
//! session. The coordinator itself takes `&mut self` and does no locking;
//! serializing callers is the actor's job (see [`spawn_draft`]).
//!
//! [`spawn_draft`]: crate::spawn_draft

use draftroom_protocol::{
    DraftSummary, Notice, PickAnnouncement, PickRequest, ServerEvent, SlotId,
    TeamAssignment, TurnUpdate,
};
use draftroom_transport::ConnectionId;

use crate::session::{NameFallback, Pick, PickOutcome};
use crate::{DraftError, DraftSession, DraftSnapshot, EventSender, Notifier, SlotPicker};

/// Owns one [`DraftSession`] together with its injected notifier and slot
/// picker.
pub struct DraftCoordinator<N: Notifier, P: SlotPicker> {
    session: DraftSession,
    notifier: N,
    picker: P,
}

impl<N: Notifier, P: SlotPicker> DraftCoordinator<N, P> {
    pub fn new(session: DraftSession, notifier: N, picker: P) -> Self {
        Self {
            session,
            notifier,
            picker,
        }
    }

    /// Read access to the session. There is no mutable counterpart.
    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        self.session.snapshot()
    }

    /// Subscribes `conn` to events and sends it the catch-up, in one step.
    ///
    /// Nothing can be broadcast between the two, so the new connection
    /// sees every pick exactly once: either in the replay or live.
    pub fn admit(&self, conn: ConnectionId, sender: EventSender) {
        self.notifier.attach(conn, sender);
        self.on_connect(conn);
    }

    /// Brings a newly connected participant up to date.
    ///
    /// Sent to `conn` only: the current turn, the full catalog, every
    /// occupied slot's name, then a replay of the picks made so far (and
    /// the completion notice if the draft is over). Changes nothing.
    pub fn on_connect(&self, conn: ConnectionId) {
        let session = &self.session;
        tracing::info!(
            %conn,
            turn = %session.current_turn(),
            picks = session.total_picks(),
            "participant connected"
        );

        self.notifier
            .notify(conn, self.turn_update(NameFallback::Team));
        self.notifier.notify(
            conn,
            ServerEvent::PlayersLoaded(session.catalog().items().to_vec()),
        );
        for slot in session.slots().iter().filter(|s| s.is_occupied()) {
            self.notifier.notify(
                conn,
                ServerEvent::TeamUpdate(TeamAssignment {
                    team_name: slot.resolved_name(NameFallback::Team),
                    team_number: slot.id(),
                }),
            );
        }
        for pick in session.picks() {
            if let Some(announcement) = self.announcement(pick) {
                self.notifier
                    .notify(conn, ServerEvent::PlayerDrafted(announcement));
            }
        }
        if session.phase().is_complete() {
            self.notifier.notify(conn, self.summary());
        }
    }

    /// A participant went away.
    ///
    /// Slots are never released: the owner's slot stays bound to the dead
    /// connection and its turns still come around, so the draft waits on
    /// it indefinitely.
    pub fn on_disconnect(&self, conn: ConnectionId) {
        self.notifier.detach(conn);
        match self.session.slot_of(conn) {
            Some(slot) => tracing::warn!(
                %conn,
                %slot,
                team = %self.session.team_name(slot, NameFallback::Team),
                "slot owner disconnected; slot stays assigned"
            ),
            None => tracing::debug!(%conn, "spectator disconnected"),
        }
    }

    /// Assigns `conn` a random open slot under `requested_name`.
    ///
    /// On success the requester gets `team_joined`, then everyone gets
    /// `team_update` and a fresh `turn_updated`. On failure only the
    /// requester hears about it.
    pub fn join_team(
        &mut self,
        conn: ConnectionId,
        requested_name: &str,
    ) -> Result<SlotId, DraftError> {
        let slot = match self.session.assign_slot(conn, requested_name, &mut self.picker) {
            Ok(slot) => slot,
            Err(err) => {
                tracing::debug!(%conn, requested_name, error = %err, "join rejected");
                self.reject(conn, &err);
                return Err(err);
            }
        };

        let name = self.session.team_name(slot, NameFallback::DraftPosition);
        tracing::info!(
            %conn,
            %slot,
            team = %name,
            open = ?self.session.open_slots(),
            "team joined"
        );

        self.notifier.notify(
            conn,
            ServerEvent::TeamJoined(TeamAssignment {
                team_name: name,
                team_number: slot,
            }),
        );
        // Same label the connect catch-up uses.
        self.notifier
            .broadcast(ServerEvent::TeamUpdate(TeamAssignment {
                team_name: self.session.team_name(slot, NameFallback::Team),
                team_number: slot,
            }));
        self.notifier
            .broadcast(self.turn_update(NameFallback::DraftPosition));

        Ok(slot)
    }

    /// Attempts a pick of `request.player_id` on behalf of `conn`.
    ///
    /// A committed pick is announced to everyone, followed by either the
    /// next `turn_updated` or, after the final pick, `draft_complete`.
    pub fn draft_item(
        &mut self,
        conn: ConnectionId,
        request: &PickRequest,
    ) -> Result<(), DraftError> {
        let (pick, outcome) = match self.session.record_pick(conn, &request.player_id) {
            Ok(committed) => committed,
            Err(err) => {
                tracing::debug!(
                    %conn,
                    item = %request.player_id,
                    client_name = %request.player_name,
                    error = %err,
                    "pick rejected"
                );
                self.reject(conn, &err);
                return Err(err);
            }
        };

        if let Some(announcement) = self.announcement(&pick) {
            tracing::info!(
                %conn,
                slot = %pick.slot,
                team = %announcement.drafted_by,
                item = %announcement.player_id,
                player = %announcement.player_name,
                pick = self.session.total_picks(),
                "pick committed"
            );
            self.notifier
                .broadcast(ServerEvent::PlayerDrafted(announcement));
        }

        match outcome {
            PickOutcome::Completed => {
                tracing::info!(
                    total_picks = self.session.total_picks(),
                    "draft complete"
                );
                self.notifier.broadcast(self.summary());
            }
            PickOutcome::Advanced { next } => {
                tracing::debug!(%next, "turn advanced");
                self.notifier
                    .broadcast(self.turn_update(NameFallback::Team));
            }
        }

        Ok(())
    }

    fn turn_update(&self, fallback: NameFallback) -> ServerEvent {
        let turn = self.session.current_turn();
        ServerEvent::TurnUpdated(TurnUpdate {
            current_turn: turn,
            current_team_name: self.session.team_name(turn, fallback),
        })
    }

    /// The `player_drafted` payload for a logged pick. Item details come
    /// from the catalog, never from the client.
    fn announcement(&self, pick: &Pick) -> Option<PickAnnouncement> {
        let item = self.session.catalog().get(pick.item)?;
        Some(PickAnnouncement {
            player_id: item.id.clone(),
            player_name: item.name.clone(),
            player_details: item.details(),
            player_position: item.category,
            drafted_by: self.session.team_name(pick.slot, NameFallback::Team),
            drafted_by_team_number: pick.slot,
        })
    }

    fn summary(&self) -> ServerEvent {
        let max = self.session.max_picks();
        ServerEvent::DraftComplete(DraftSummary {
            message: format!("Draft complete! All {max} picks have been made."),
            total_picks: self.session.total_picks(),
            max_picks: max,
        })
    }

    /// Tells the requester, and only the requester, why it was turned down.
    fn reject(&self, conn: ConnectionId, err: &DraftError) {
        self.notifier.notify(conn, rejection_event(err));
    }
}

/// Maps a rejection to the event the requester sees.
fn rejection_event(err: &DraftError) -> ServerEvent {
    let message = match err {
        DraftError::DraftFull(total) => {
            return ServerEvent::DraftFull(Notice::new(format!(
                "Draft is full! All {total} positions are taken."
            )));
        }
        DraftError::NotYourTurn { current_team, .. } => {
            format!("It's not your turn! Currently {current_team}'s turn.")
        }
        DraftError::ItemUnavailable(_) => {
            "Player not found or already drafted.".to_string()
        }
        DraftError::AlreadyJoined { team, .. } => {
            format!("You have already joined the draft as {team}.")
        }
        DraftError::DraftComplete => {
            "The draft is complete. No more picks can be made.".to_string()
        }
        other => other.to_string(),
    };
    ServerEvent::DraftError(Notice::new(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_full_maps_to_draft_full_event() {
        let event = rejection_event(&DraftError::DraftFull(4));
        assert_eq!(
            event,
            ServerEvent::DraftFull(Notice::new("Draft is full! All 4 positions are taken."))
        );
    }

    #[test]
    fn test_turn_mismatch_names_the_team_on_the_clock() {
        let event = rejection_event(&DraftError::NotYourTurn {
            current_turn: SlotId(1),
            current_team: "Blitz".into(),
        });
        assert_eq!(
            event,
            ServerEvent::DraftError(Notice::new("It's not your turn! Currently Blitz's turn."))
        );
    }

    #[test]
    fn test_unavailable_item_is_generic() {
        let event = rejection_event(&DraftError::ItemUnavailable("12".into()));
        match event {
            ServerEvent::DraftError(notice) => {
                assert!(notice.message.starts_with("Player not found"));
                assert!(!notice.message.contains("12"));
            }
            other => panic!("expected DraftError, got {other:?}"),
        }
    }
}
