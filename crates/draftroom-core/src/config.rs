//! Draft configuration and the session phase.

use std::fmt;

use crate::DraftError;

// ---------------------------------------------------------------------------
// DraftConfig
// ---------------------------------------------------------------------------

/// Shape of one draft: how many teams, how many picks each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftConfig {
    /// Number of team slots. Slots are numbered `1..=total_teams`.
    pub total_teams: u8,

    /// Picks each team makes before the draft is complete.
    pub picks_per_team: u32,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            total_teams: 4,
            picks_per_team: 6,
        }
    }
}

impl DraftConfig {
    /// Total picks in the draft: `total_teams × picks_per_team`.
    ///
    /// Saturates at `u32::MAX`; [`validate`](Self::validate) rejects shapes
    /// that would overflow.
    pub fn max_picks(&self) -> u32 {
        u32::from(self.total_teams).saturating_mul(self.picks_per_team)
    }

    /// Checks that a draft with this shape can actually finish when drawing
    /// from a pool of `pool_size` items.
    pub fn validate(&self, pool_size: usize) -> Result<(), DraftError> {
        if self.total_teams == 0 {
            return Err(DraftError::InvalidConfig(
                "total_teams must be at least 1".into(),
            ));
        }
        if self.picks_per_team == 0 {
            return Err(DraftError::InvalidConfig(
                "picks_per_team must be at least 1".into(),
            ));
        }
        let needed = u32::from(self.total_teams)
            .checked_mul(self.picks_per_team)
            .ok_or_else(|| {
                DraftError::InvalidConfig(format!(
                    "{} teams × {} picks overflows the pick counter",
                    self.total_teams, self.picks_per_team
                ))
            })? as usize;
        if pool_size < needed {
            return Err(DraftError::InvalidConfig(format!(
                "catalog has {pool_size} items but the draft needs {needed}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Coarse session status.
///
/// ```text
/// Open ──(final pick)──→ Complete
/// ```
///
/// `Complete` is terminal. The lobby (slots still being filled) is not a
/// phase of its own; it is read off the open slot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Complete,
}

impl Phase {
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_four_teams_of_six() {
        let config = DraftConfig::default();
        assert_eq!(config.total_teams, 4);
        assert_eq!(config.picks_per_team, 6);
        assert_eq!(config.max_picks(), 24);
    }

    #[test]
    fn test_validate_accepts_exactly_enough_items() {
        let config = DraftConfig {
            total_teams: 4,
            picks_per_team: 1,
        };
        assert!(config.validate(4).is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_pick_count() {
        let config = DraftConfig {
            total_teams: 4,
            picks_per_team: u32::MAX,
        };
        let err = config.validate(usize::MAX).unwrap_err();
        assert!(matches!(err, DraftError::InvalidConfig(_)));
        assert!(err.to_string().contains("overflows"));
        assert_eq!(config.max_picks(), u32::MAX);
    }

    #[test]
    fn test_validate_rejects_short_pool() {
        let err = DraftConfig::default().validate(23).unwrap_err();
        assert!(matches!(err, DraftError::InvalidConfig(_)));
        assert!(err.to_string().contains("needs 24"));
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let no_teams = DraftConfig {
            total_teams: 0,
            picks_per_team: 6,
        };
        let no_picks = DraftConfig {
            total_teams: 4,
            picks_per_team: 0,
        };
        assert!(no_teams.validate(30).is_err());
        assert!(no_picks.validate(30).is_err());
    }

    #[test]
    fn test_phase_display_and_terminality() {
        assert_eq!(Phase::Open.to_string(), "Open");
        assert!(!Phase::Open.is_complete());
        assert!(Phase::Complete.is_complete());
    }
}
