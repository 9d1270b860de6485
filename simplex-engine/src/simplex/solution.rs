use std::{borrow::Cow, fmt};

use derive_more::{Display, IsVariant};
use num_rational::BigRational;

use super::{State, Trace, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum Status {
    #[display(fmt = "OPTIMAL")]
    Optimal,
    #[display(fmt = "INFEASIBLE")]
    Infeasible,
    #[display(fmt = "UNBOUNDED")]
    Unbounded,
}

/// Value of every non-artificial variable, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<(Variable, BigRational)>,
}

impl Assignment {
    pub(crate) fn new(values: Vec<(Variable, BigRational)>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&BigRational> {
        self.values
            .iter()
            .find_map(|(variable, value)| (variable.name() == name).then_some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &BigRational)> {
        self.values.iter().map(|(variable, value)| (variable, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (variable, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variable} = {value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, IsVariant)]
pub enum Solution {
    Finite {
        variables: Assignment,
        function_value: BigRational,
    },
    Infinite,
    Absent,
}

impl Solution {
    pub const fn status(&self) -> Status {
        match self {
            Solution::Finite { .. } => Status::Optimal,
            Solution::Infinite => Status::Unbounded,
            Solution::Absent => Status::Infeasible,
        }
    }

    pub fn variables(&self) -> Option<&Assignment> {
        match self {
            Solution::Finite { variables, .. } => Some(variables),
            _ => None,
        }
    }

    pub fn function_value(&self) -> Option<&BigRational> {
        match self {
            Solution::Finite { function_value, .. } => Some(function_value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Cow<'static, str> {
        match self {
            Solution::Finite {
                variables,
                function_value,
            } => format!("Variables: {variables}\nObjective value: {function_value}").into(),
            Solution::Infinite => "The objective is unbounded".into(),
            Solution::Absent => "The constraints admit no feasible solution".into(),
        }
    }
}

/// Result of one run of [`TwoPhaseSimplex`](super::TwoPhaseSimplex).
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub(crate) solution: Solution,
    pub(crate) state: State,
    pub(crate) iterations: usize,
    pub(crate) artificial_sum: Option<BigRational>,
    pub(crate) trace: Trace,
}

impl Report {
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn into_solution(self) -> Solution {
        self.solution
    }

    pub fn status(&self) -> Status {
        self.solution.status()
    }

    /// Terminal state of the controller.
    pub fn state(&self) -> State {
        self.state
    }

    /// Pivots performed by both phases, excluding the basis restoring pivots.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Minimized sum of the artificial variables, when Phase 1 proved the problem infeasible.
    pub fn artificial_sum(&self) -> Option<&BigRational> {
        self.artificial_sum.as_ref()
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}
