//! Types that travel on the wire.
//!
//! Field names follow the browser client's camelCase spelling
//! (`teamName`, `draftedByTeamNumber`), while the Rust side keeps
//! snake_case. `#[serde(rename_all = "camelCase")]` bridges the two.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A team slot number, `1..=total_teams`.
///
/// Newtype over `u8` so a slot can never be confused with a pick count or
/// a rank. `#[serde(transparent)]` keeps it a plain number on the wire:
/// `SlotId(3)` is `3`, not `{"0":3}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SlotId(pub u8);

impl SlotId {
    /// The slot that comes after this one in a draft of `total_teams`,
    /// wrapping from the last slot back to 1.
    pub fn next(self, total_teams: u8) -> Self {
        if self.0 >= total_teams {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Draft items
// ---------------------------------------------------------------------------

/// The role label of a draftable item.
///
/// On the wire these are the familiar roster abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
}

impl Category {
    /// The short label shown on draft boards.
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Quarterback => "QB",
            Self::RunningBack => "RB",
            Self::WideReceiver => "WR",
            Self::TightEnd => "TE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// One selectable item in the shared pool.
///
/// Loaded once from the catalog and never mutated. The wire names
/// (`position`, `team`) are the ones the draft board renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftItem {
    /// Unique within a catalog.
    pub id: String,
    pub name: String,
    #[serde(rename = "position")]
    pub category: Category,
    /// The collective this item belongs to (e.g. its pro team).
    #[serde(rename = "team")]
    pub group: String,
    /// Positive; the catalog's default display order.
    pub rank: u32,
}

impl DraftItem {
    /// The one-line summary shown next to a pick, e.g. `"WR - CIN"`.
    pub fn details(&self) -> String {
        format!("{} - {}", self.category, self.group)
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// `turn_updated`: whose turn it is now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnUpdate {
    pub current_turn: SlotId,
    pub current_team_name: String,
}

/// `join_team`: a participant asking for a slot under a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub team_name: String,
}

/// `team_joined` (to the requester) and `team_update` (to everyone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAssignment {
    pub team_name: String,
    pub team_number: SlotId,
}

/// `draft_full` and `draft_error`: a human-readable rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `draft_player`: a pick attempt.
///
/// Only `playerId` is authoritative. The name and details are whatever the
/// client had on screen; they are accepted for logging and otherwise
/// ignored, so they default to empty when a client leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickRequest {
    pub player_id: String,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub player_details: String,
}

/// `player_drafted`: a committed pick, announced to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickAnnouncement {
    pub player_id: String,
    pub player_name: String,
    pub player_details: String,
    pub player_position: Category,
    pub drafted_by: String,
    pub drafted_by_team_number: SlotId,
}

/// `draft_complete`: the final pick has been made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub message: String,
    pub total_picks: u32,
    pub max_picks: u32,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything a client may send.
///
/// `#[serde(tag = "event", content = "data")]` is serde's "adjacently
/// tagged" representation: the variant name goes in `event`, the payload
/// in `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinTeam(JoinRequest),
    DraftPlayer(PickRequest),
}

/// Everything the server may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    TurnUpdated(TurnUpdate),
    PlayersLoaded(Vec<DraftItem>),
    TeamJoined(TeamAssignment),
    DraftFull(Notice),
    TeamUpdate(TeamAssignment),
    DraftError(Notice),
    PlayerDrafted(PickAnnouncement),
    DraftComplete(DraftSummary),
}

impl ServerEvent {
    /// The event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TurnUpdated(_) => "turn_updated",
            Self::PlayersLoaded(_) => "players_loaded",
            Self::TeamJoined(_) => "team_joined",
            Self::DraftFull(_) => "draft_full",
            Self::TeamUpdate(_) => "team_update",
            Self::DraftError(_) => "draft_error",
            Self::PlayerDrafted(_) => "player_drafted",
            Self::DraftComplete(_) => "draft_complete",
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The browser client matches on exact event names and field
    //! spellings, so these tests pin the JSON shapes.

    use super::*;
    use serde_json::json;

    fn chase() -> DraftItem {
        DraftItem {
            id: "1".into(),
            name: "Ja'Marr Chase".into(),
            category: Category::WideReceiver,
            group: "CIN".into(),
            rank: 1,
        }
    }

    #[test]
    fn test_slot_id_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&SlotId(3)).unwrap(), "3");
        assert_eq!(serde_json::from_str::<SlotId>("4").unwrap(), SlotId(4));
    }

    #[test]
    fn test_slot_id_next_wraps_after_last_team() {
        assert_eq!(SlotId(1).next(4), SlotId(2));
        assert_eq!(SlotId(3).next(4), SlotId(4));
        assert_eq!(SlotId(4).next(4), SlotId(1));
    }

    #[test]
    fn test_slot_id_display() {
        assert_eq!(SlotId(2).to_string(), "2");
    }

    #[test]
    fn test_category_uses_roster_abbreviations() {
        assert_eq!(serde_json::to_value(Category::TightEnd).unwrap(), json!("TE"));
        assert_eq!(
            serde_json::from_value::<Category>(json!("QB")).unwrap(),
            Category::Quarterback
        );
        assert_eq!(Category::RunningBack.to_string(), "RB");
    }

    #[test]
    fn test_draft_item_uses_board_field_names() {
        let value = serde_json::to_value(chase()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "name": "Ja'Marr Chase",
                "position": "WR",
                "team": "CIN",
                "rank": 1
            })
        );
    }

    #[test]
    fn test_draft_item_details() {
        assert_eq!(chase().details(), "WR - CIN");
    }

    #[test]
    fn test_turn_updated_json_format() {
        let event = ServerEvent::TurnUpdated(TurnUpdate {
            current_turn: SlotId(2),
            current_team_name: "Team 2".into(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "turn_updated",
                "data": { "currentTurn": 2, "currentTeamName": "Team 2" }
            })
        );
        assert_eq!(event.name(), "turn_updated");
    }

    #[test]
    fn test_players_loaded_carries_a_plain_array() {
        let event = ServerEvent::PlayersLoaded(vec![chase()]);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "players_loaded");
        assert!(value["data"].is_array());
        assert_eq!(value["data"][0]["position"], "WR");
    }

    #[test]
    fn test_team_update_json_format() {
        let event = ServerEvent::TeamUpdate(TeamAssignment {
            team_name: "Blitz".into(),
            team_number: SlotId(4),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "team_update");
        assert_eq!(value["data"], json!({ "teamName": "Blitz", "teamNumber": 4 }));
    }

    #[test]
    fn test_player_drafted_json_format() {
        let event = ServerEvent::PlayerDrafted(PickAnnouncement {
            player_id: "1".into(),
            player_name: "Ja'Marr Chase".into(),
            player_details: "WR - CIN".into(),
            player_position: Category::WideReceiver,
            drafted_by: "Blitz".into(),
            drafted_by_team_number: SlotId(1),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value["data"],
            json!({
                "playerId": "1",
                "playerName": "Ja'Marr Chase",
                "playerDetails": "WR - CIN",
                "playerPosition": "WR",
                "draftedBy": "Blitz",
                "draftedByTeamNumber": 1
            })
        );
    }

    #[test]
    fn test_draft_complete_json_format() {
        let event = ServerEvent::DraftComplete(DraftSummary {
            message: "Draft complete!".into(),
            total_picks: 24,
            max_picks: 24,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "draft_complete");
        assert_eq!(value["data"]["totalPicks"], 24);
        assert_eq!(value["data"]["maxPicks"], 24);
    }

    #[test]
    fn test_notice_events_share_payload_shape() {
        let full = serde_json::to_value(ServerEvent::DraftFull(Notice::new("full"))).unwrap();
        let err = serde_json::to_value(ServerEvent::DraftError(Notice::new("no"))).unwrap();
        assert_eq!(full["event"], "draft_full");
        assert_eq!(full["data"], json!({ "message": "full" }));
        assert_eq!(err["event"], "draft_error");
    }

    #[test]
    fn test_decode_join_team_from_client_json() {
        let raw = r#"{"event":"join_team","data":{"teamName":"Gridiron Gang"}}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinTeam(JoinRequest {
                team_name: "Gridiron Gang".into()
            })
        );
    }

    #[test]
    fn test_decode_draft_player_from_client_json() {
        let raw = r#"{
            "event": "draft_player",
            "data": { "playerId": "7", "playerName": "Derrick Henry", "playerDetails": "RB - BAL" }
        }"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        match event {
            ClientEvent::DraftPlayer(pick) => {
                assert_eq!(pick.player_id, "7");
                assert_eq!(pick.player_details, "RB - BAL");
            }
            other => panic!("expected DraftPlayer, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_draft_player_tolerates_missing_display_fields() {
        let raw = r#"{"event":"draft_player","data":{"playerId":"7"}}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(
            event,
            ClientEvent::DraftPlayer(PickRequest {
                player_id: "7".into(),
                player_name: String::new(),
                player_details: String::new(),
            })
        );
    }

    #[test]
    fn test_decode_draft_player_without_id_fails() {
        let raw = r#"{"event":"draft_player","data":{"playerName":"Derrick Henry"}}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn test_decode_unknown_event_fails() {
        let raw = r#"{"event":"trade_player","data":{}}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn test_decode_server_event_as_client_event_fails() {
        let raw = r#"{"event":"draft_full","data":{"message":"full"}}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }
}
