use derive_more::{Display, Error};

use super::{Phase, PivotCell};

/// Faults that abort a run. Infeasible and unbounded problems are not errors, they are
/// reported through [`Solution`](super::Solution).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SimplexError {
    /// The pivot cell is zero or lies outside the constraint block. Continuing would corrupt the
    /// tableau.
    #[display(fmt = "cannot pivot on cell {}: {}", cell, reason)]
    InvalidPivot {
        cell: PivotCell,
        reason: &'static str,
    },
    #[display(fmt = "{} did not converge within {} iterations", phase, iterations)]
    Stalled { phase: Phase, iterations: usize },
}
