//! Genetic search over position-segmented squads.
//!
//! A chromosome holds one slot per quota place, grouped by position in
//! `GK, DEF, MID, FWD` order, so position quotas always hold. Club limits,
//! the budget and custom constraints are scored as normalised violation.
//! Any feasible squad outranks any infeasible one. Among feasible squads
//! higher points win, then lower cost.

use std::cmp::Ordering;
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, trace};

use super::{Solution, SquadSolver};
use crate::domain::{Position, Selection, SolutionStatus, FEASIBILITY_TOLERANCE};
use crate::error::{ParameterError, Result};
use crate::selection::SquadModel;

/// Genetic search parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    /// Upper bound on generations.
    pub generations: usize,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    /// Per-slot probability of swapping in another player.
    pub mutation_rate: f64,
    /// Best individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Stop after this many generations without improvement.
    pub stall_generations: usize,
    /// Fixed RNG seed. Runs with the same seed and input are identical.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            generations: 500,
            tournament_size: 3,
            crossover_rate: 0.9,
            mutation_rate: 0.08,
            elite_count: 4,
            stall_generations: 75,
            seed: None,
        }
    }
}

impl GeneticConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> std::result::Result<(), ParameterError> {
        let invalid = |field: &str, reason: &str| ParameterError::InvalidValue {
            field: format!("genetic.{field}"),
            reason: reason.to_owned(),
        };
        if self.population_size < 2 {
            return Err(invalid("population_size", "must be at least 2"));
        }
        if self.generations == 0 {
            return Err(invalid("generations", "must be positive"));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(invalid(
                "tournament_size",
                "must be between 1 and population_size",
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(invalid("crossover_rate", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate", "must be within [0, 1]"));
        }
        if self.elite_count >= self.population_size {
            return Err(invalid("elite_count", "must be below population_size"));
        }
        Ok(())
    }
}

/// Heuristic solver. Reports `Feasible` or `NotFound`, never `Optimal`.
#[derive(Debug, Default, Clone)]
pub struct GeneticSolver {
    config: GeneticConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fitness {
    /// Sum of violations, each scaled by `max(1, |rhs|)`.
    violation: f64,
    points: f64,
    cost: i64,
}

impl Fitness {
    fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    /// Points on a `FEASIBILITY_TOLERANCE` grid, so sums that differ only
    /// by rounding compare equal and the order stays total.
    fn points_key(&self) -> i64 {
        (self.points / FEASIBILITY_TOLERANCE).round() as i64
    }

    /// `Greater` means `self` is the better squad.
    fn compare(&self, other: &Self) -> Ordering {
        match (self.is_feasible(), other.is_feasible()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => self
                .points_key()
                .cmp(&other.points_key())
                .then_with(|| other.cost.cmp(&self.cost))
                .then_with(|| self.points.total_cmp(&other.points)),
            (false, false) => other
                .violation
                .total_cmp(&self.violation)
                .then_with(|| self.points.total_cmp(&other.points)),
        }
    }
}

#[derive(Debug, Clone)]
struct Individual {
    genes: Vec<usize>,
    fitness: Fitness,
}

/// Model indices per position plus segment offsets into a chromosome.
struct Layout {
    pools: Vec<Vec<usize>>,
    quotas: Vec<usize>,
    offsets: Vec<usize>,
}

impl Layout {
    fn new(model: &SquadModel) -> Self {
        let pools: Vec<Vec<usize>> = Position::ALL
            .iter()
            .map(|pos| {
                model
                    .players()
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.position == *pos)
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();
        let quotas: Vec<usize> = Position::ALL
            .iter()
            .map(|pos| model.rules().quota(*pos))
            .collect();
        let offsets = quotas
            .iter()
            .scan(0, |acc, q| {
                let start = *acc;
                *acc += q;
                Some(start)
            })
            .collect();
        Self {
            pools,
            quotas,
            offsets,
        }
    }

    fn fillable(&self) -> bool {
        self.pools
            .iter()
            .zip(&self.quotas)
            .all(|(pool, quota)| pool.len() >= *quota)
    }

    fn segment<'a>(&self, genes: &'a [usize], slot: usize) -> &'a [usize] {
        let start = self.offsets[slot];
        &genes[start..start + self.quotas[slot]]
    }

    fn random(&self, rng: &mut StdRng) -> Vec<usize> {
        self.pools
            .iter()
            .zip(&self.quotas)
            .flat_map(|(pool, quota)| {
                sample(&mut *rng, pool.len(), *quota)
                    .into_iter()
                    .map(|k| pool[k])
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl GeneticSolver {
    #[must_use]
    pub const fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    fn evaluate(model: &SquadModel, genes: Vec<usize>) -> Individual {
        let selection = Selection::from_indices(model.len(), genes.iter().copied());
        let violation = model
            .violations(&selection)
            .iter()
            .map(|v| v.amount / v.rhs.abs().max(1.0))
            .sum();
        Individual {
            fitness: Fitness {
                violation,
                points: model.objective(&selection),
                cost: model.cost(&selection).tenths(),
            },
            genes,
        }
    }

    fn tournament<'a>(&self, population: &'a [Individual], rng: &mut StdRng) -> &'a Individual {
        let mut best = &population[rng.gen_range(0..population.len())];
        for _ in 1..self.config.tournament_size {
            let challenger = &population[rng.gen_range(0..population.len())];
            if challenger.fitness.compare(&best.fitness) == Ordering::Greater {
                best = challenger;
            }
        }
        best
    }

    /// Per position, draw the child's picks from the union of both parents.
    fn crossover(layout: &Layout, a: &[usize], b: &[usize], rng: &mut StdRng) -> Vec<usize> {
        let mut child = Vec::with_capacity(a.len());
        for slot in 0..layout.quotas.len() {
            let mut seen = HashSet::new();
            let mut union: Vec<usize> = layout
                .segment(a, slot)
                .iter()
                .chain(layout.segment(b, slot))
                .copied()
                .filter(|i| seen.insert(*i))
                .collect();
            union.shuffle(rng);
            child.extend(union.into_iter().take(layout.quotas[slot]));
        }
        child
    }

    /// Swap slots for unpicked players of the same position.
    fn mutate(&self, layout: &Layout, genes: &mut [usize], rng: &mut StdRng) {
        for slot in 0..layout.quotas.len() {
            let pool = &layout.pools[slot];
            let start = layout.offsets[slot];
            for k in start..start + layout.quotas[slot] {
                if !rng.gen_bool(self.config.mutation_rate) {
                    continue;
                }
                let picked: HashSet<usize> = genes[start..start + layout.quotas[slot]]
                    .iter()
                    .copied()
                    .collect();
                let spare: Vec<usize> = pool.iter().copied().filter(|i| !picked.contains(i)).collect();
                if let Some(replacement) = spare.choose(rng) {
                    genes[k] = *replacement;
                }
            }
        }
    }

    /// Best value-per-cost players per position, respecting club limits
    /// while possible.
    fn greedy(model: &SquadModel, layout: &Layout) -> Vec<usize> {
        let players = model.players();
        let max_per_club = model.rules().max_per_club;
        let mut per_club = std::collections::HashMap::new();
        let mut genes = Vec::with_capacity(layout.quotas.iter().sum());

        for (pool, quota) in layout.pools.iter().zip(&layout.quotas) {
            let mut ranked = pool.clone();
            ranked.sort_by(|a, b| {
                let value = |i: usize| {
                    players[i].window_score / (players[i].cost.tenths().max(1) as f64)
                };
                value(*b).total_cmp(&value(*a))
            });
            let mut chosen: Vec<usize> = Vec::with_capacity(*quota);
            for i in &ranked {
                if chosen.len() == *quota {
                    break;
                }
                let count = per_club.entry(players[*i].club).or_insert(0usize);
                if *count < max_per_club {
                    *count += 1;
                    chosen.push(*i);
                }
            }
            for i in &ranked {
                if chosen.len() == *quota {
                    break;
                }
                if !chosen.contains(i) {
                    chosen.push(*i);
                }
            }
            genes.extend(chosen);
        }
        genes
    }
}

impl SquadSolver for GeneticSolver {
    fn name(&self) -> &str {
        "genetic"
    }

    fn solve(&self, model: &SquadModel) -> Result<Solution> {
        self.config.validate()?;
        let layout = Layout::new(model);
        if !layout.fillable() {
            debug!("a position pool is smaller than its quota");
            return Ok(Solution::not_found(model.len(), Some(0)));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let size = self.config.population_size;
        let mut population: Vec<Individual> = Vec::with_capacity(size);
        population.push(Self::evaluate(model, Self::greedy(model, &layout)));
        while population.len() < size {
            population.push(Self::evaluate(model, layout.random(&mut rng)));
        }
        sort_best_first(&mut population);

        let mut best = population[0].clone();
        let mut stalled = 0;
        let mut generation = 0;

        while generation < self.config.generations && stalled < self.config.stall_generations {
            generation += 1;

            let mut next: Vec<Individual> = population
                .iter()
                .take(self.config.elite_count)
                .cloned()
                .collect();
            while next.len() < size {
                let a = self.tournament(&population, &mut rng);
                let b = self.tournament(&population, &mut rng);
                let mut genes = if rng.gen_bool(self.config.crossover_rate) {
                    Self::crossover(&layout, &a.genes, &b.genes, &mut rng)
                } else {
                    a.genes.clone()
                };
                self.mutate(&layout, &mut genes, &mut rng);
                next.push(Self::evaluate(model, genes));
            }
            sort_best_first(&mut next);
            population = next;

            if population[0].fitness.compare(&best.fitness) == Ordering::Greater {
                best = population[0].clone();
                stalled = 0;
                trace!(
                    generation,
                    points = best.fitness.points,
                    violation = best.fitness.violation,
                    "improved"
                );
            } else {
                stalled += 1;
            }
        }

        debug!(
            generations = generation,
            feasible = best.fitness.is_feasible(),
            points = best.fitness.points,
            "genetic search finished"
        );

        if !best.fitness.is_feasible() {
            return Ok(Solution::not_found(model.len(), Some(generation)));
        }
        Ok(Solution {
            selection: Selection::from_indices(model.len(), best.genes),
            objective: best.fitness.points,
            status: SolutionStatus::Feasible,
            iterations: Some(generation),
        })
    }
}

fn sort_best_first(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.compare(&a.fitness));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClubId, Cost, Player, PlayerId, SquadRules};

    fn player(id: i64, position: Position, club: i64, cost: i64, score: f64) -> Player {
        Player {
            id: PlayerId::new(id),
            name: None,
            position,
            club: ClubId::new(club),
            cost: Cost::from_tenths(cost),
            base_points: vec![score],
            adjusted_points: vec![score],
            window_score: score,
        }
    }

    fn rules() -> SquadRules {
        SquadRules {
            squad_size: 4,
            max_per_club: 2,
            goalkeepers: 1,
            defenders: 1,
            midfielders: 1,
            forwards: 1,
        }
    }

    fn pool() -> Vec<Player> {
        let mut players = Vec::new();
        let mut id = 1;
        for (p, position) in Position::ALL.into_iter().enumerate() {
            for k in 0..4 {
                players.push(player(
                    id,
                    position,
                    (k % 3) as i64 + 1,
                    40 + 5 * k as i64,
                    (p + k) as f64,
                ));
                id += 1;
            }
        }
        players
    }

    fn config() -> GeneticConfig {
        GeneticConfig {
            population_size: 40,
            generations: 60,
            stall_generations: 30,
            ..GeneticConfig::default()
        }
        .with_seed(7)
    }

    #[test]
    fn finds_feasible_squad() {
        let model = SquadModel::build(pool(), rules(), Cost::from_tenths(250), &[]).unwrap();
        let solution = GeneticSolver::new(config()).solve(&model).unwrap();
        assert_eq!(solution.status, SolutionStatus::Feasible);
        assert!(model.is_feasible(&solution.selection));
        assert!(solution.iterations.is_some());
    }

    #[test]
    fn same_seed_same_squad() {
        let model = SquadModel::build(pool(), rules(), Cost::from_tenths(200), &[]).unwrap();
        let first = GeneticSolver::new(config()).solve(&model).unwrap();
        let second = GeneticSolver::new(config()).solve(&model).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn impossible_budget_is_not_found() {
        let model = SquadModel::build(pool(), rules(), Cost::from_tenths(50), &[]).unwrap();
        let solution = GeneticSolver::new(config()).solve(&model).unwrap();
        assert_eq!(solution.status, SolutionStatus::NotFound);
        assert_eq!(solution.selection.count(), 0);
    }

    #[test]
    fn short_position_pool_is_not_found() {
        let players: Vec<Player> = pool()
            .into_iter()
            .filter(|p| p.position != Position::Forward)
            .collect();
        let model = SquadModel::build(players, rules(), Cost::from_tenths(250), &[]).unwrap();
        let solution = GeneticSolver::new(config()).solve(&model).unwrap();
        assert_eq!(solution.status, SolutionStatus::NotFound);
        assert_eq!(solution.iterations, Some(0));
    }

    #[test]
    fn feasible_beats_higher_scoring_infeasible() {
        let feasible = Fitness {
            violation: 0.0,
            points: 1.0,
            cost: 900,
        };
        let infeasible = Fitness {
            violation: 0.1,
            points: 50.0,
            cost: 10,
        };
        assert_eq!(feasible.compare(&infeasible), Ordering::Greater);
    }

    #[test]
    fn equal_points_prefer_cheaper() {
        let cheap = Fitness {
            violation: 0.0,
            points: 10.0,
            cost: 500,
        };
        let dear = Fitness { cost: 600, ..cheap };
        assert_eq!(cheap.compare(&dear), Ordering::Greater);
    }

    #[test]
    fn rounding_noise_in_points_defers_to_cost() {
        // Same three scores summed in two orders.
        let forward: f64 = 0.1 + 0.2 + 0.3;
        let backward = 0.3 + 0.2 + 0.1;
        assert_ne!(forward, backward);

        let cheap = Fitness {
            violation: 0.0,
            points: forward.min(backward),
            cost: 500,
        };
        let dear = Fitness {
            points: forward.max(backward),
            cost: 600,
            ..cheap
        };
        assert_eq!(cheap.compare(&dear), Ordering::Greater);
        assert_eq!(dear.compare(&cheap), Ordering::Less);
    }

    #[test]
    fn real_points_gap_beats_cost() {
        let richer = Fitness {
            violation: 0.0,
            points: 10.0005,
            cost: 600,
        };
        let cheaper = Fitness {
            points: 10.0,
            cost: 500,
            ..richer
        };
        assert_eq!(richer.compare(&cheaper), Ordering::Greater);
    }

    #[test]
    fn rejects_bad_config() {
        let config = GeneticConfig {
            mutation_rate: 1.5,
            ..GeneticConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ParameterError::InvalidValue { field, .. }) if field == "genetic.mutation_rate"
        ));
        let config = GeneticConfig {
            elite_count: 10,
            population_size: 10,
            ..GeneticConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
