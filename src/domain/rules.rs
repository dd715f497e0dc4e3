//! Squad composition rules.

use serde::Deserialize;

use super::player::Position;
use crate::error::ParameterError;

/// Squad size, position quotas and the per-club cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SquadRules {
    #[serde(default = "default_squad_size")]
    pub squad_size: usize,
    #[serde(default = "default_max_per_club")]
    pub max_per_club: usize,
    #[serde(default = "default_goalkeepers")]
    pub goalkeepers: usize,
    #[serde(default = "default_defenders")]
    pub defenders: usize,
    #[serde(default = "default_midfielders")]
    pub midfielders: usize,
    #[serde(default = "default_forwards")]
    pub forwards: usize,
}

const fn default_squad_size() -> usize {
    15
}

const fn default_max_per_club() -> usize {
    3
}

const fn default_goalkeepers() -> usize {
    2
}

const fn default_defenders() -> usize {
    5
}

const fn default_midfielders() -> usize {
    5
}

const fn default_forwards() -> usize {
    3
}

impl SquadRules {
    /// The official ruleset: 15 players, 2-5-5-3, at most 3 per club.
    #[must_use]
    pub const fn official() -> Self {
        Self {
            squad_size: default_squad_size(),
            max_per_club: default_max_per_club(),
            goalkeepers: default_goalkeepers(),
            defenders: default_defenders(),
            midfielders: default_midfielders(),
            forwards: default_forwards(),
        }
    }

    /// Required number of players at `position`.
    #[must_use]
    pub const fn quota(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    /// Sum of all position quotas.
    #[must_use]
    pub fn quota_total(&self) -> usize {
        Position::ALL.iter().map(|p| self.quota(*p)).sum()
    }

    /// Reject rules that can never describe a squad.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.squad_size == 0 {
            return Err(ParameterError::InvalidValue {
                field: "squad_size".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_per_club == 0 {
            return Err(ParameterError::InvalidValue {
                field: "max_per_club".into(),
                reason: "must be greater than 0".into(),
            });
        }
        let total = self.quota_total();
        if total > self.squad_size {
            return Err(ParameterError::QuotasExceedSquadSize {
                total,
                squad_size: self.squad_size,
            });
        }
        Ok(())
    }
}

impl Default for SquadRules {
    fn default() -> Self {
        Self::official()
    }
}
