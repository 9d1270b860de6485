use std::{collections::BTreeMap, fmt};

use derive_more::{Display, Error, IsVariant};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use ratio_extension::IntoRatio;
use serde::{Deserialize, Serialize};

use super::{Report, SimplexError, SolverConfig, Tableau, TwoPhaseSimplex};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IsVariant, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Decision,
    Slack,
    Surplus,
    Artificial,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    role: Role,
}

impl Variable {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IsVariant, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

/// The real objective, by variable name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Objective {
    coefficients: BTreeMap<String, BigRational>,
    direction: Direction,
}

impl Objective {
    pub fn new(direction: Direction) -> Self {
        Self {
            coefficients: BTreeMap::new(),
            direction,
        }
    }

    pub fn maximize<I, N, C>(terms: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoRatio,
    {
        Self::new(Direction::Maximize).with_terms(terms)
    }

    pub fn minimize<I, N, C>(terms: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoRatio,
    {
        Self::new(Direction::Minimize).with_terms(terms)
    }

    pub fn with_terms<I, N, C>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoRatio,
    {
        self.coefficients.extend(
            terms
                .into_iter()
                .map(|(name, coefficient)| (name.into(), coefficient.into_ratio())),
        );
        self
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub fn coefficient(&self, name: &str) -> Option<&BigRational> {
        self.coefficients.get(name)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &BigRational)> {
        self.coefficients
            .iter()
            .map(|(name, coefficient)| (name.as_str(), coefficient))
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.direction)?;
        if self.coefficients.is_empty() {
            return f.write_str("0");
        }
        for (i, (name, coefficient)) in self.terms().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{coefficient} * {name}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ProblemError {
    #[display(fmt = "the tableau needs at least one constraint row and an objective row")]
    NoConstraints,
    #[display(fmt = "the tableau needs at least one variable column and a RHS column")]
    NoVariables,
    #[display(fmt = "row {} has {} cells, expected {}", row, found, expected)]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "{} variables for {} variable columns", found, expected)]
    VariableCount { expected: usize, found: usize },
    #[display(fmt = "variable {:?} is declared twice", name)]
    DuplicateVariable { name: String },
    #[display(fmt = "{} basic variables for {} constraint rows", found, expected)]
    BasisLength { expected: usize, found: usize },
    #[display(fmt = "unknown variable {:?}", name)]
    UnknownVariable { name: String },
    #[display(fmt = "variable {:?} is basic in more than one row", name)]
    RepeatedBasic { name: String },
    #[display(fmt = "artificial variable {:?} cannot appear in the objective", name)]
    ArtificialInObjective { name: String },
    #[display(fmt = "constraint row {} has a negative right-hand side", row)]
    NegativeRhs { row: usize },
}

/// A linear program already in standard tableau form, with an explicit initial basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub(crate) tableau: Tableau,
    pub(crate) variables: Vec<Variable>,
    /// Column index of the basic variable of each constraint row
    pub(crate) basis: Vec<usize>,
    pub(crate) objective: Objective,
}

impl Problem {
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::default()
    }

    /// `rows` is the full tableau: constraint rows, then the objective row; the last column of
    /// every row is the right-hand side.
    pub fn from_tableau<B, N>(
        rows: Vec<Vec<BigRational>>,
        variables: Vec<Variable>,
        basis: B,
        objective: Objective,
    ) -> Result<Self, ProblemError>
    where
        B: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let tableau = Tableau::from_rows(rows)?;
        if variables.len() != tableau.n_variables() {
            return Err(ProblemError::VariableCount {
                expected: tableau.n_variables(),
                found: variables.len(),
            });
        }
        for (i, variable) in variables.iter().enumerate() {
            if variables[..i].iter().any(|v| v.name == variable.name) {
                return Err(ProblemError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
        }

        let column_of = |name: &str| {
            variables
                .iter()
                .position(|v| v.name == name)
                .ok_or_else(|| ProblemError::UnknownVariable {
                    name: name.to_owned(),
                })
        };

        let basis = basis
            .into_iter()
            .map(|name| column_of(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if basis.len() != tableau.n_constraints() {
            return Err(ProblemError::BasisLength {
                expected: tableau.n_constraints(),
                found: basis.len(),
            });
        }
        for (i, column) in basis.iter().enumerate() {
            if basis[..i].contains(column) {
                return Err(ProblemError::RepeatedBasic {
                    name: variables[*column].name.clone(),
                });
            }
        }

        for (name, _) in objective.terms() {
            if variables[column_of(name)?].role.is_artificial() {
                return Err(ProblemError::ArtificialInObjective {
                    name: name.to_owned(),
                });
            }
        }

        if let Some(row) = (0..tableau.n_constraints()).find(|&row| tableau.rhs(row).is_negative())
        {
            return Err(ProblemError::NegativeRhs { row });
        }

        Ok(Self {
            tableau,
            variables,
            basis,
            objective,
        })
    }

    pub fn solve(self) -> Result<Report, SimplexError> {
        self.solve_with(SolverConfig::default())
    }

    pub fn solve_with(self, config: SolverConfig) -> Result<Report, SimplexError> {
        TwoPhaseSimplex::new(self, config).solve()
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn basis_names(&self) -> Vec<&str> {
        self.basis
            .iter()
            .map(|&column| self.variables[column].name())
            .collect()
    }

    /// Columns of the artificial variables, ascending.
    pub fn artificial_columns(&self) -> Vec<usize> {
        artificial_columns(&self.variables)
    }
}

pub(crate) fn artificial_columns(variables: &[Variable]) -> Vec<usize> {
    variables
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.role.is_artificial().then_some(i))
        .collect()
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Problem {{")?;
        writeln!(
            f,
            "    variables: {}",
            self.variables
                .iter()
                .map(|v| format!("{}[{}]", v.name, v.role))
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(f, "    basis: {}", self.basis_names().join(", "))?;
        writeln!(f, "    objective: {}", self.objective)?;
        writeln!(
            f,
            "    tableau:\n{}",
            self.tableau
                .to_string()
                .trim()
                .lines()
                .map(|l| format!("    {}\n", l.trim()))
                .collect::<String>()
        )?;
        write!(f, "}}")
    }
}

/// Assembles a [`Problem`] row by row.
///
/// Constraint rows take one coefficient per declared variable plus a right-hand side; the
/// objective row of the tableau is generated.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    variables: Vec<Variable>,
    rows: Vec<Vec<BigRational>>,
    basis: Vec<String>,
    objective: Objective,
}

impl ProblemBuilder {
    pub fn variable(mut self, name: impl Into<String>, role: Role) -> Self {
        self.variables.push(Variable::new(name, role));
        self
    }

    pub fn decision(self, name: impl Into<String>) -> Self {
        self.variable(name, Role::Decision)
    }

    pub fn slack(self, name: impl Into<String>) -> Self {
        self.variable(name, Role::Slack)
    }

    pub fn surplus(self, name: impl Into<String>) -> Self {
        self.variable(name, Role::Surplus)
    }

    pub fn artificial(self, name: impl Into<String>) -> Self {
        self.variable(name, Role::Artificial)
    }

    pub fn row<I, R>(mut self, coefficients: I, rhs: R) -> Self
    where
        I: IntoIterator,
        I::Item: IntoRatio,
        R: IntoRatio,
    {
        let mut row = coefficients
            .into_iter()
            .map(IntoRatio::into_ratio)
            .collect::<Vec<_>>();
        row.push(rhs.into_ratio());
        self.rows.push(row);
        self
    }

    pub fn basis<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.basis = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn maximize<I, N, C>(self, terms: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoRatio,
    {
        self.objective(Objective::maximize(terms))
    }

    pub fn minimize<I, N, C>(self, terms: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoRatio,
    {
        self.objective(Objective::minimize(terms))
    }

    pub fn build(self) -> Result<Problem, ProblemError> {
        let Self {
            variables,
            mut rows,
            basis,
            objective,
        } = self;
        if rows.is_empty() {
            return Err(ProblemError::NoConstraints);
        }
        rows.push(vec![BigRational::zero(); variables.len() + 1]);
        Problem::from_tableau(rows, variables, basis, objective)
    }
}
