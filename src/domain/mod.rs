//! Squad selection domain types.

mod constraint;
mod fixture;
mod ids;
mod money;
mod player;
mod rules;
mod squad;
mod table;

pub use constraint::{
    Constraint, ConstraintKind, ConstraintSense, CustomConstraint, Term, FEASIBILITY_TOLERANCE,
};
pub use fixture::{
    Difficulty, Fixture, FixtureRecord, GameweekWindow, Venue, LAST_GAMEWEEK,
};
pub use ids::{ClubId, PlayerId};
pub use money::Cost;
pub use player::{Player, Position};
pub use rules::SquadRules;
pub use squad::{
    ClubFixtures, FixtureSummary, Selection, SolutionStatus, SolverDiagnostics, SquadResult,
};
pub use table::Table;
