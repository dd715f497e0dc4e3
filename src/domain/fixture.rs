//! Fixtures, difficulty ratings and the gameweek window.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::ids::ClubId;
use crate::error::ParameterError;

/// Last gameweek of a season.
pub const LAST_GAMEWEEK: u32 = 38;

/// Opponent difficulty from 1 (easiest) to 5 (hardest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Difficulty assumed for a club without a fixture.
    pub const NEUTRAL: Self = Self(3);

    /// Create a rating, rejecting values outside 1..=5.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 5 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Points multiplier `1.6 - 0.2 * difficulty`.
    ///
    /// Evaluated as `(8 - d) / 5` so the neutral rating maps to exactly 1.0.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(8 - self.0) / 5.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled match between two clubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub gameweek: u32,
    pub home: ClubId,
    pub away: ClubId,
    pub home_difficulty: Difficulty,
    pub away_difficulty: Difficulty,
}

impl Fixture {
    /// The fixture from `club`'s side, if it plays in it.
    #[must_use]
    pub fn side_of(&self, club: ClubId) -> Option<FixtureRecord> {
        if self.home == club {
            Some(FixtureRecord {
                gameweek: self.gameweek,
                opponent: Some(self.away),
                venue: Venue::Home,
                difficulty: self.home_difficulty,
            })
        } else if self.away == club {
            Some(FixtureRecord {
                gameweek: self.gameweek,
                opponent: Some(self.home),
                venue: Venue::Away,
                difficulty: self.away_difficulty,
            })
        } else {
            None
        }
    }
}

/// Where a club plays in a given gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Venue {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
    /// No fixture that gameweek.
    #[serde(rename = "-")]
    Blank,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Home => "H",
            Self::Away => "A",
            Self::Blank => "-",
        })
    }
}

/// One club's fixture in one gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixtureRecord {
    pub gameweek: u32,
    pub opponent: Option<ClubId>,
    pub venue: Venue,
    pub difficulty: Difficulty,
}

impl FixtureRecord {
    /// Placeholder for a gameweek in which the club has no fixture.
    #[must_use]
    pub const fn blank(gameweek: u32) -> Self {
        Self {
            gameweek,
            opponent: None,
            venue: Venue::Blank,
            difficulty: Difficulty::NEUTRAL,
        }
    }
}

/// Inclusive range of gameweeks being optimised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameweekWindow {
    start: u32,
    end: u32,
}

impl GameweekWindow {
    /// Create a window, rejecting ranges outside a season or inverted ranges.
    pub fn new(start: u32, end: u32) -> Result<Self, ParameterError> {
        if start < 1 || end < start || end > LAST_GAMEWEEK {
            return Err(ParameterError::InvalidGameweekRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Number of gameweeks in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn contains(&self, gameweek: u32) -> bool {
        gameweek >= self.start && gameweek <= self.end
    }

    #[must_use]
    pub fn gameweeks(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Conventional expected-points column names, `ep_gw{n}`.
    #[must_use]
    pub fn default_points_columns(&self) -> Vec<String> {
        self.gameweeks().map(|gw| format!("ep_gw{gw}")).collect()
    }
}

impl Default for GameweekWindow {
    fn default() -> Self {
        Self { start: 1, end: 4 }
    }
}

impl fmt::Display for GameweekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GW{}-{}", self.start, self.end)
    }
}
