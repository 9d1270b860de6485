mod error;
mod phase;
mod pivot;
mod problem;
mod selector;
mod solution;
mod tableau;
mod trace;

pub use error::SimplexError;
pub use phase::{Phase, SolverConfig, State, TwoPhaseSimplex};
pub use pivot::{pivot, PivotCell};
pub use problem::{
    Direction, Objective, Problem, ProblemBuilder, ProblemError, Role, Variable,
};
pub use selector::{PivotRule, PivotSelector, Selection};
pub use solution::{Assignment, Report, Solution, Status};
pub use tableau::Tableau;
pub use trace::{Snapshot, Step, Trace};
