//! Players and position classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{ClubId, PlayerId};
use super::money::Cost;

/// Position class of a player.
///
/// Ordering follows the squad sheet: goalkeepers first, forwards last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    pub const ALL: [Self; 4] = [
        Self::Goalkeeper,
        Self::Defender,
        Self::Midfielder,
        Self::Forward,
    ];

    /// Map the numeric `element_type` used by the data source (1..=4).
    #[must_use]
    pub const fn from_element_type(element_type: i64) -> Option<Self> {
        match element_type {
            1 => Some(Self::Goalkeeper),
            2 => Some(Self::Defender),
            3 => Some(Self::Midfielder),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Defender => "DEF",
            Self::Midfielder => "MID",
            Self::Forward => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" | "GKP" | "GOALKEEPER" => Ok(Self::Goalkeeper),
            "DEF" | "DEFENDER" => Ok(Self::Defender),
            "MID" | "MIDFIELDER" => Ok(Self::Midfielder),
            "FWD" | "FORWARD" => Ok(Self::Forward),
            other => match other.parse::<i64>().ok().and_then(Self::from_element_type) {
                Some(position) => Ok(position),
                None => Err(format!("unknown position '{s}'")),
            },
        }
    }
}

/// A selectable player with its fixture-adjusted window score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name, when the input carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Position,
    pub club: ClubId,
    pub cost: Cost,
    /// Base expected points, one entry per gameweek of the window.
    pub base_points: Vec<f64>,
    /// Fixture-adjusted points, aligned with `base_points`.
    pub adjusted_points: Vec<f64>,
    /// Sum of `adjusted_points`.
    pub window_score: f64,
}

impl Player {
    /// Label for logs and tables: the name if present, otherwise `#id`.
    #[must_use]
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}
