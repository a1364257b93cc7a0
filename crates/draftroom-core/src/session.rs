//! The draft session aggregate: slots, turn, pool and pick log.
//!
//! [`DraftSession`] is pure state. It validates and applies joins and
//! picks but never talks to anyone; the coordinator decides who hears
//! about each change.

use std::collections::{BTreeSet, HashMap};

use draftroom_protocol::{DraftItem, SlotId};
use draftroom_transport::ConnectionId;

use crate::{Catalog, DraftConfig, DraftError, Phase, SlotPicker};

/// Longest display name a team may carry, in characters.
pub const MAX_TEAM_NAME_CHARS: usize = 32;

// ---------------------------------------------------------------------------
// TeamSlot
// ---------------------------------------------------------------------------

/// Which fallback label to use for a slot that has no display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFallback {
    /// `"Team {n}"`, used everywhere by default.
    Team,
    /// `"Draft Position {n}"`, used around join confirmations.
    DraftPosition,
}

/// One numbered team position.
#[derive(Debug, Clone)]
pub struct TeamSlot {
    id: SlotId,
    display_name: Option<String>,
    owner: Option<ConnectionId>,
    /// Catalog indexes, in pick order.
    roster: Vec<usize>,
}

impl TeamSlot {
    fn new(id: SlotId) -> Self {
        Self {
            id,
            display_name: None,
            owner: None,
            roster: Vec::new(),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The connection bound to this slot. Set once, never changed.
    pub fn owner(&self) -> Option<ConnectionId> {
        self.owner
    }

    pub fn is_occupied(&self) -> bool {
        self.owner.is_some()
    }

    pub fn roster(&self) -> &[usize] {
        &self.roster
    }

    /// The name this slot is shown under.
    pub fn resolved_name(&self, fallback: NameFallback) -> String {
        match (&self.display_name, fallback) {
            (Some(name), _) => name.clone(),
            (None, NameFallback::Team) => format!("Team {}", self.id.0),
            (None, NameFallback::DraftPosition) => {
                format!("Draft Position {}", self.id.0)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Picks
// ---------------------------------------------------------------------------

/// One committed pick in the draft log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub slot: SlotId,
    /// Index into the session's catalog.
    pub item: usize,
}

/// What happened to the turn after a pick was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The turn moved on to `next`.
    Advanced { next: SlotId },
    /// That was the final pick. The turn did not move.
    Completed,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only view of one team for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub slot: SlotId,
    pub name: String,
    pub occupied: bool,
    /// Item ids, in pick order.
    pub roster: Vec<String>,
}

/// Read-only view of the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSnapshot {
    pub phase: Phase,
    pub current_turn: SlotId,
    pub total_picks: u32,
    pub max_picks: u32,
    pub open_slots: Vec<SlotId>,
    pub remaining_items: usize,
    pub teams: Vec<TeamSummary>,
}

// ---------------------------------------------------------------------------
// DraftSession
// ---------------------------------------------------------------------------

/// All mutable state of one draft.
///
/// Invariants kept by the methods below:
/// - a connection owns at most one slot and a slot at most one connection;
///   ownership never changes once set,
/// - `open_slots` only shrinks, `remaining` only shrinks,
/// - `picks.len()` never exceeds `max_picks`, and once it reaches it the
///   phase is `Complete` and nothing else changes.
#[derive(Debug, Clone)]
pub struct DraftSession {
    config: DraftConfig,
    catalog: Catalog,
    slots: Vec<TeamSlot>,
    open_slots: Vec<SlotId>,
    owners: HashMap<ConnectionId, SlotId>,
    remaining: BTreeSet<usize>,
    picks: Vec<Pick>,
    current_turn: SlotId,
    phase: Phase,
}

impl DraftSession {
    /// Creates a session in the lobby: every slot open, slot 1 on the clock.
    ///
    /// # Errors
    /// [`DraftError::InvalidConfig`] if the catalog cannot cover
    /// `config.max_picks()` or the config has a zero count.
    pub fn new(config: DraftConfig, catalog: Catalog) -> Result<Self, DraftError> {
        config.validate(catalog.len())?;

        let slot_ids: Vec<SlotId> = (1..=config.total_teams).map(SlotId).collect();
        let slots = slot_ids.iter().copied().map(TeamSlot::new).collect();
        let remaining = (0..catalog.len()).collect();

        Ok(Self {
            config,
            catalog,
            slots,
            open_slots: slot_ids,
            owners: HashMap::new(),
            remaining,
            picks: Vec::new(),
            current_turn: SlotId(1),
            phase: Phase::Open,
        })
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_turn(&self) -> SlotId {
        self.current_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_picks(&self) -> u32 {
        self.picks.len() as u32
    }

    pub fn max_picks(&self) -> u32 {
        self.config.max_picks()
    }

    /// Slots nobody has joined yet, lowest first.
    pub fn open_slots(&self) -> &[SlotId] {
        &self.open_slots
    }

    /// `true` once every slot has an owner.
    pub fn is_full(&self) -> bool {
        self.open_slots.is_empty()
    }

    pub fn slots(&self) -> &[TeamSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&TeamSlot> {
        let index = usize::from(id.0).checked_sub(1)?;
        self.slots.get(index)
    }

    /// The slot bound to `conn`, if it has joined.
    pub fn slot_of(&self, conn: ConnectionId) -> Option<SlotId> {
        self.owners.get(&conn).copied()
    }

    /// Resolved name of a slot. Unknown slots fall back like empty ones.
    pub fn team_name(&self, id: SlotId, fallback: NameFallback) -> String {
        match self.slot(id) {
            Some(slot) => slot.resolved_name(fallback),
            None => TeamSlot::new(id).resolved_name(fallback),
        }
    }

    /// `true` if `item_id` names an item still in the pool.
    pub fn is_available(&self, item_id: &str) -> bool {
        self.catalog
            .index_of(item_id)
            .is_some_and(|index| self.remaining.contains(&index))
    }

    /// Items still in the pool, in rank order.
    pub fn remaining_items(&self) -> impl Iterator<Item = &DraftItem> {
        self.remaining
            .iter()
            .filter_map(|&index| self.catalog.get(index))
    }

    /// The pick log, oldest first.
    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    /// Items drafted by `id`, in pick order.
    pub fn roster(&self, id: SlotId) -> Vec<&DraftItem> {
        self.slot(id)
            .map(|slot| {
                slot.roster
                    .iter()
                    .filter_map(|&index| self.catalog.get(index))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Binds `conn` to a randomly drawn open slot under `requested_name`.
    ///
    /// # Errors
    /// - [`DraftError::AlreadyJoined`] if `conn` already owns a slot
    /// - [`DraftError::DraftFull`] if no slot is open
    pub fn assign_slot<P>(
        &mut self,
        conn: ConnectionId,
        requested_name: &str,
        picker: &mut P,
    ) -> Result<SlotId, DraftError>
    where
        P: SlotPicker + ?Sized,
    {
        if let Some(slot) = self.slot_of(conn) {
            return Err(DraftError::AlreadyJoined {
                slot,
                team: self.team_name(slot, NameFallback::DraftPosition),
            });
        }
        if self.open_slots.is_empty() {
            return Err(DraftError::DraftFull(self.config.total_teams));
        }

        let index = picker.pick(self.open_slots.len()) % self.open_slots.len();
        let slot_id = self.open_slots.remove(index);
        let slot = &mut self.slots[usize::from(slot_id.0) - 1];
        slot.owner = Some(conn);
        slot.display_name = normalize_team_name(requested_name);
        self.owners.insert(conn, slot_id);

        Ok(slot_id)
    }

    /// Validates and commits a pick by `conn`.
    ///
    /// Checks run in order: draft still open, requester on the clock, item
    /// still in the pool. A failed check changes nothing.
    ///
    /// # Errors
    /// - [`DraftError::DraftComplete`] after the final pick
    /// - [`DraftError::NotYourTurn`] if `conn` does not own the current slot
    /// - [`DraftError::ItemUnavailable`] if the item is unknown or taken
    pub fn record_pick(
        &mut self,
        conn: ConnectionId,
        item_id: &str,
    ) -> Result<(Pick, PickOutcome), DraftError> {
        if self.phase.is_complete() {
            return Err(DraftError::DraftComplete);
        }
        if self.slot_of(conn) != Some(self.current_turn) {
            return Err(DraftError::NotYourTurn {
                current_turn: self.current_turn,
                current_team: self.team_name(self.current_turn, NameFallback::Team),
            });
        }
        let item = self
            .catalog
            .index_of(item_id)
            .filter(|index| self.remaining.contains(index))
            .ok_or_else(|| DraftError::ItemUnavailable(item_id.to_string()))?;

        self.remaining.remove(&item);
        let pick = Pick {
            slot: self.current_turn,
            item,
        };
        self.slots[usize::from(pick.slot.0) - 1].roster.push(item);
        self.picks.push(pick);

        if self.total_picks() == self.max_picks() {
            self.phase = Phase::Complete;
            return Ok((pick, PickOutcome::Completed));
        }

        self.current_turn = self.current_turn.next(self.config.total_teams);
        Ok((
            pick,
            PickOutcome::Advanced {
                next: self.current_turn,
            },
        ))
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            phase: self.phase,
            current_turn: self.current_turn,
            total_picks: self.total_picks(),
            max_picks: self.max_picks(),
            open_slots: self.open_slots.clone(),
            remaining_items: self.remaining.len(),
            teams: self
                .slots
                .iter()
                .map(|slot| TeamSummary {
                    slot: slot.id,
                    name: slot.resolved_name(NameFallback::Team),
                    occupied: slot.is_occupied(),
                    roster: slot
                        .roster
                        .iter()
                        .filter_map(|&index| self.catalog.get(index))
                        .map(|item| item.id.clone())
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Trims and caps a requested team name. Blank names yield `None`, which
/// leaves the slot on its fallback label.
fn normalize_team_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_TEAM_NAME_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedPicker;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn session() -> DraftSession {
        DraftSession::new(DraftConfig::default(), Catalog::fantasy_top30()).unwrap()
    }

    #[test]
    fn test_new_session_starts_in_lobby() {
        let s = session();
        assert_eq!(s.current_turn(), SlotId(1));
        assert_eq!(s.phase(), Phase::Open);
        assert_eq!(s.total_picks(), 0);
        assert_eq!(s.max_picks(), 24);
        assert_eq!(s.open_slots(), &[SlotId(1), SlotId(2), SlotId(3), SlotId(4)]);
        assert_eq!(s.remaining_items().count(), 30);
        assert!(!s.is_full());
    }

    #[test]
    fn test_new_rejects_catalog_smaller_than_draft() {
        let config = DraftConfig {
            total_teams: 4,
            picks_per_team: 8,
        };
        assert!(DraftSession::new(config, Catalog::fantasy_top30()).is_err());
    }

    #[test]
    fn test_assign_slot_takes_the_drawn_open_slot() {
        let mut s = session();
        let mut picker = ScriptedPicker::new([2, 0]);

        assert_eq!(s.assign_slot(conn(1), "Blitz", &mut picker).unwrap(), SlotId(3));
        assert_eq!(s.open_slots(), &[SlotId(1), SlotId(2), SlotId(4)]);
        assert_eq!(s.assign_slot(conn(2), "Sack Pack", &mut picker).unwrap(), SlotId(1));
        assert_eq!(s.open_slots(), &[SlotId(2), SlotId(4)]);

        assert_eq!(s.slot_of(conn(1)), Some(SlotId(3)));
        let slot = s.slot(SlotId(3)).unwrap();
        assert_eq!(slot.owner(), Some(conn(1)));
        assert_eq!(slot.display_name(), Some("Blitz"));
    }

    #[test]
    fn test_assign_slot_reduces_out_of_range_draws() {
        let mut s = session();
        let mut picker = ScriptedPicker::new([9]);
        // 9 % 4 == 1 -> second open slot
        assert_eq!(s.assign_slot(conn(1), "x", &mut picker).unwrap(), SlotId(2));
    }

    #[test]
    fn test_assign_slot_rejects_second_join_without_mutation() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        s.assign_slot(conn(1), "Blitz", &mut picker).unwrap();

        let err = s.assign_slot(conn(1), "Other", &mut picker).unwrap_err();
        assert_eq!(
            err,
            DraftError::AlreadyJoined {
                slot: SlotId(1),
                team: "Blitz".into()
            }
        );
        assert_eq!(s.open_slots().len(), 3);
        assert_eq!(s.slot(SlotId(1)).unwrap().display_name(), Some("Blitz"));
    }

    #[test]
    fn test_assign_slot_when_full() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        for id in 1..=4 {
            s.assign_slot(conn(id), "t", &mut picker).unwrap();
        }
        assert!(s.is_full());
        assert_eq!(
            s.assign_slot(conn(5), "late", &mut picker).unwrap_err(),
            DraftError::DraftFull(4)
        );
        assert_eq!(s.slot_of(conn(5)), None);
    }

    #[test]
    fn test_blank_name_keeps_fallback_labels() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        s.assign_slot(conn(1), "   ", &mut picker).unwrap();
        let slot = s.slot(SlotId(1)).unwrap();
        assert_eq!(slot.display_name(), None);
        assert_eq!(slot.resolved_name(NameFallback::Team), "Team 1");
        assert_eq!(slot.resolved_name(NameFallback::DraftPosition), "Draft Position 1");
    }

    #[test]
    fn test_long_names_are_capped() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        let long = "x".repeat(100);
        s.assign_slot(conn(1), &long, &mut picker).unwrap();
        let name = s.slot(SlotId(1)).unwrap().display_name().unwrap();
        assert_eq!(name.chars().count(), MAX_TEAM_NAME_CHARS);
    }

    #[test]
    fn test_record_pick_commits_and_advances() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        s.assign_slot(conn(1), "Blitz", &mut picker).unwrap();

        let (pick, outcome) = s.record_pick(conn(1), "4").unwrap();
        assert_eq!(pick, Pick { slot: SlotId(1), item: 3 });
        assert_eq!(outcome, PickOutcome::Advanced { next: SlotId(2) });
        assert_eq!(s.total_picks(), 1);
        assert!(!s.is_available("4"));
        assert_eq!(s.roster(SlotId(1))[0].name, "Justin Jefferson");
        assert_eq!(s.remaining_items().count(), 29);
    }

    #[test]
    fn test_record_pick_by_spectator_is_turn_mismatch() {
        let mut s = session();
        let err = s.record_pick(conn(99), "1").unwrap_err();
        assert_eq!(
            err,
            DraftError::NotYourTurn {
                current_turn: SlotId(1),
                current_team: "Team 1".into()
            }
        );
        assert_eq!(s.total_picks(), 0);
    }

    #[test]
    fn test_record_pick_unknown_item_changes_nothing() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        s.assign_slot(conn(1), "Blitz", &mut picker).unwrap();

        let err = s.record_pick(conn(1), "999").unwrap_err();
        assert_eq!(err, DraftError::ItemUnavailable("999".into()));
        assert_eq!(s.current_turn(), SlotId(1));
        assert_eq!(s.remaining_items().count(), 30);
    }

    #[test]
    fn test_turn_wraps_through_unjoined_slots() {
        let config = DraftConfig {
            total_teams: 2,
            picks_per_team: 3,
        };
        let mut s = DraftSession::new(config, Catalog::fantasy_top30()).unwrap();
        let mut picker = ScriptedPicker::in_order();
        s.assign_slot(conn(1), "a", &mut picker).unwrap();

        s.record_pick(conn(1), "1").unwrap();
        assert_eq!(s.current_turn(), SlotId(2));
        // Nobody owns slot 2, so the draft waits there.
        assert!(s.record_pick(conn(1), "2").is_err());
        assert_eq!(s.current_turn(), SlotId(2));
    }

    #[test]
    fn test_snapshot_reflects_rosters() {
        let mut s = session();
        let mut picker = ScriptedPicker::in_order();
        s.assign_slot(conn(1), "Blitz", &mut picker).unwrap();
        s.record_pick(conn(1), "2").unwrap();

        let snap = s.snapshot();
        assert_eq!(snap.current_turn, SlotId(2));
        assert_eq!(snap.total_picks, 1);
        assert_eq!(snap.remaining_items, 29);
        assert_eq!(snap.open_slots, vec![SlotId(2), SlotId(3), SlotId(4)]);
        assert_eq!(snap.teams[0].name, "Blitz");
        assert!(snap.teams[0].occupied);
        assert_eq!(snap.teams[0].roster, vec!["2".to_string()]);
        assert_eq!(snap.teams[1].name, "Team 2");
        assert!(!snap.teams[1].occupied);
    }
}
