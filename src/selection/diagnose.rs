//! Infeasibility diagnosis from necessary conditions.
//!
//! Each check below is a condition every legal squad must meet. A failed
//! check proves infeasibility on its own, so naming it never overstates
//! what is known. Interactions between rules, and custom constraints, are
//! not diagnosed.

use std::collections::BTreeMap;

use super::model::SquadModel;
use crate::domain::{ClubId, Cost, Position};
use crate::error::Suspect;

/// First failed necessary condition, if any.
#[must_use]
pub fn diagnose(model: &SquadModel) -> Option<Suspect> {
    let rules = model.rules();

    let quotas = rules.quota_total();
    if quotas != rules.squad_size {
        return Some(Suspect::QuotaShortfall {
            quotas,
            squad_size: rules.squad_size,
        });
    }

    for position in Position::ALL {
        let required = rules.quota(position);
        let available = model
            .players()
            .iter()
            .filter(|p| p.position == position)
            .count();
        if available < required {
            return Some(Suspect::PositionSupply {
                position,
                required,
                available,
            });
        }
    }

    for position in Position::ALL {
        let required = rules.quota(position);
        let mut per_club: BTreeMap<ClubId, usize> = BTreeMap::new();
        for player in model.players().iter().filter(|p| p.position == position) {
            *per_club.entry(player.club).or_default() += 1;
        }
        let reachable: usize = per_club
            .values()
            .map(|n| (*n).min(rules.max_per_club))
            .sum();
        if reachable < required {
            return Some(Suspect::ClubLimit {
                position,
                required,
                reachable,
            });
        }
    }

    let clubs = model
        .players()
        .iter()
        .map(|p| p.club)
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    if clubs * rules.max_per_club < rules.squad_size {
        return Some(Suspect::ClubCapacity {
            clubs,
            max_per_club: rules.max_per_club,
            squad_size: rules.squad_size,
        });
    }

    let minimum_cost = cheapest_quota_squad(model);
    if minimum_cost > model.budget() {
        return Some(Suspect::Budget {
            minimum_cost,
            budget: model.budget(),
        });
    }

    None
}

/// Cost of the cheapest squad meeting the position quotas, ignoring clubs.
///
/// A lower bound on the cost of any legal squad.
fn cheapest_quota_squad(model: &SquadModel) -> Cost {
    Position::ALL
        .into_iter()
        .map(|position| {
            let mut costs: Vec<Cost> = model
                .players()
                .iter()
                .filter(|p| p.position == position)
                .map(|p| p.cost)
                .collect();
            costs.sort_unstable();
            costs
                .into_iter()
                .take(model.rules().quota(position))
                .sum::<Cost>()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Player, PlayerId, SquadRules};

    fn player(id: i64, position: Position, club: i64, cost: i64) -> Player {
        Player {
            id: PlayerId::new(id),
            name: None,
            position,
            club: ClubId::new(club),
            cost: Cost::from_tenths(cost),
            base_points: vec![1.0],
            adjusted_points: vec![1.0],
            window_score: 1.0,
        }
    }

    fn rules() -> SquadRules {
        SquadRules {
            squad_size: 3,
            max_per_club: 2,
            goalkeepers: 1,
            defenders: 1,
            midfielders: 1,
            forwards: 0,
        }
    }

    fn model(players: Vec<Player>, budget: i64) -> SquadModel {
        SquadModel::build(players, rules(), Cost::from_tenths(budget), &[]).unwrap()
    }

    #[test]
    fn feasible_pool_has_no_suspect() {
        let m = model(
            vec![
                player(1, Position::Goalkeeper, 1, 40),
                player(2, Position::Defender, 1, 40),
                player(3, Position::Midfielder, 2, 40),
            ],
            120,
        );
        assert_eq!(diagnose(&m), None);
    }

    #[test]
    fn missing_position_is_supply_problem() {
        let m = model(
            vec![
                player(1, Position::Goalkeeper, 1, 40),
                player(2, Position::Defender, 2, 40),
            ],
            500,
        );
        assert_eq!(
            diagnose(&m),
            Some(Suspect::PositionSupply {
                position: Position::Midfielder,
                required: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn one_club_cannot_fill_squad() {
        let m = model(
            vec![
                player(1, Position::Goalkeeper, 1, 40),
                player(2, Position::Defender, 1, 40),
                player(3, Position::Midfielder, 1, 40),
            ],
            500,
        );
        assert_eq!(
            diagnose(&m),
            Some(Suspect::ClubCapacity {
                clubs: 1,
                max_per_club: 2,
                squad_size: 3,
            })
        );
    }

    #[test]
    fn budget_below_cheapest_squad() {
        let m = model(
            vec![
                player(1, Position::Goalkeeper, 1, 40),
                player(2, Position::Defender, 1, 45),
                player(3, Position::Midfielder, 2, 50),
                player(4, Position::Midfielder, 3, 70),
            ],
            100,
        );
        assert_eq!(
            diagnose(&m),
            Some(Suspect::Budget {
                minimum_cost: Cost::from_tenths(135),
                budget: Cost::from_tenths(100),
            })
        );
    }

    #[test]
    fn quotas_short_of_squad_size() {
        let rules = SquadRules {
            forwards: 0,
            ..SquadRules {
                squad_size: 4,
                ..rules()
            }
        };
        let m = SquadModel::build(
            vec![player(1, Position::Goalkeeper, 1, 40)],
            rules,
            Cost::from_tenths(100),
            &[],
        )
        .unwrap();
        assert_eq!(
            diagnose(&m),
            Some(Suspect::QuotaShortfall {
                quotas: 3,
                squad_size: 4,
            })
        );
    }
}
