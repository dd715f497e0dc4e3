//! Fixture difficulty to per-club, per-gameweek points multipliers.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{ClubFixtures, ClubId, Fixture, FixtureRecord, GameweekWindow};

/// Multipliers for every club and gameweek of a window.
///
/// A club without a fixture in a gameweek gets the neutral multiplier 1.0.
/// A club with several fixtures in one gameweek gets the mean of their
/// multipliers.
#[derive(Debug, Clone, Default)]
pub struct FixtureWeights {
    window: GameweekWindow,
    by_club: HashMap<ClubId, BTreeMap<u32, Vec<FixtureRecord>>>,
}

impl FixtureWeights {
    /// Index the fixtures that fall inside `window`.
    #[must_use]
    pub fn new(fixtures: &[Fixture], window: GameweekWindow) -> Self {
        let mut by_club: HashMap<ClubId, BTreeMap<u32, Vec<FixtureRecord>>> = HashMap::new();
        for fixture in fixtures.iter().filter(|f| window.contains(f.gameweek)) {
            for club in [fixture.home, fixture.away] {
                if let Some(record) = fixture.side_of(club) {
                    by_club
                        .entry(club)
                        .or_default()
                        .entry(fixture.gameweek)
                        .or_default()
                        .push(record);
                }
            }
        }
        Self { window, by_club }
    }

    #[must_use]
    pub const fn window(&self) -> GameweekWindow {
        self.window
    }

    /// Points multiplier for `club` in `gameweek`.
    #[must_use]
    pub fn multiplier(&self, club: ClubId, gameweek: u32) -> f64 {
        match self
            .by_club
            .get(&club)
            .and_then(|weeks| weeks.get(&gameweek))
        {
            Some(records) if !records.is_empty() => {
                records
                    .iter()
                    .map(|r| r.difficulty.multiplier())
                    .sum::<f64>()
                    / records.len() as f64
            }
            _ => 1.0,
        }
    }

    /// Multipliers for `club` over the whole window, in gameweek order.
    #[must_use]
    pub fn multipliers(&self, club: ClubId) -> Vec<f64> {
        self.window
            .gameweeks()
            .map(|gw| self.multiplier(club, gw))
            .collect()
    }

    /// Fixture records for `club`, with a blank record for each gameweek
    /// it does not play.
    #[must_use]
    pub fn records(&self, club: ClubId) -> Vec<FixtureRecord> {
        let weeks = self.by_club.get(&club);
        self.window
            .gameweeks()
            .flat_map(|gw| match weeks.and_then(|w| w.get(&gw)) {
                Some(records) if !records.is_empty() => records.clone(),
                _ => vec![FixtureRecord::blank(gw)],
            })
            .collect()
    }

    /// Fixture outlook for `club`.
    #[must_use]
    pub fn club_fixtures(&self, club: ClubId) -> ClubFixtures {
        let fixtures = self.records(club);
        let total_difficulty: u32 = fixtures
            .iter()
            .map(|r| u32::from(r.difficulty.get()))
            .sum();
        let average_difficulty = if fixtures.is_empty() {
            0.0
        } else {
            f64::from(total_difficulty) / fixtures.len() as f64
        };
        ClubFixtures {
            fixtures,
            average_difficulty,
            total_difficulty,
        }
    }
}
